use std::sync::{Arc, Mutex};

use recap::youtube::{Transcript, TranscriptError, TranscriptSource};

#[derive(Clone, Default)]
pub struct MockTranscripts {
    pub text: Option<String>,
    pub calls: Arc<Mutex<Vec<String>>>,
}

impl MockTranscripts {
    pub fn new(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A source that has no captions for any video
    pub fn unavailable() -> Self {
        Self::default()
    }
}

impl TranscriptSource for MockTranscripts {
    async fn fetch_transcript(&self, video_id: &str) -> Result<Transcript, TranscriptError> {
        self.calls.lock().unwrap().push(video_id.to_string());
        match &self.text {
            Some(text) => Ok(Transcript {
                video_id: video_id.to_string(),
                language_code: Some("en".to_string()),
                text: text.clone(),
            }),
            None => Err(TranscriptError::Unavailable {
                video_id: video_id.to_string(),
                reason: "subtitles are disabled for this video".to_string(),
            }),
        }
    }
}
