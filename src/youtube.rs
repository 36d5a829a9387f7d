//! YouTube URL handling and transcript retrieval.
//!
//! Uses yt-transcript-rs for fetching caption tracks.

use std::future::Future;

use thiserror::Error;
use url::Url;
use yt_transcript_rs::api::YouTubeTranscriptApi;

#[derive(Error, Debug)]
pub enum TranscriptError {
    #[error("could not find a video identifier in {0}")]
    NoVideoId(String),
    #[error("transcript client unavailable: {0}")]
    Client(String),
    #[error("no transcript for video {video_id}: {reason}")]
    Unavailable { video_id: String, reason: String },
    #[error("transcript for video {0} is empty")]
    Empty(String),
}

/// Transcript text for one video
#[derive(Debug, Clone, PartialEq)]
pub struct Transcript {
    pub video_id: String,
    pub language_code: Option<String>,
    pub text: String,
}

/// Anything that can turn a video identifier into transcript text.
pub trait TranscriptSource {
    fn fetch_transcript(
        &self,
        video_id: &str,
    ) -> impl Future<Output = Result<Transcript, TranscriptError>>;
}

/// Check whether a URL points at YouTube.
///
/// Matches `youtube.com`, its subdomains (`www.`, `m.`, `music.`) and `youtu.be`.
pub fn is_youtube_url(url: &Url) -> bool {
    match url.host_str() {
        Some(host) => {
            let host = host.to_ascii_lowercase();
            host == "youtu.be" || host == "youtube.com" || host.ends_with(".youtube.com")
        }
        None => false,
    }
}

/// Extract the video identifier from a YouTube URL.
///
/// Handles `watch?v=`, `/shorts/`, `/embed/`, `/live/`, `/v/` and `youtu.be/` links.
pub fn extract_video_id(url: &Url) -> Option<String> {
    if !is_youtube_url(url) {
        return None;
    }

    let mut segments = url.path_segments()?.filter(|s| !s.is_empty());

    let id = if url.host_str()?.eq_ignore_ascii_case("youtu.be") {
        segments.next().map(str::to_string)
    } else if let Some((_, v)) = url.query_pairs().find(|(key, _)| key == "v") {
        Some(v.into_owned())
    } else {
        match segments.next() {
            Some("shorts" | "embed" | "live" | "v") => segments.next().map(str::to_string),
            _ => None,
        }
    };

    id.filter(|id| is_plausible_video_id(id))
}

fn is_plausible_video_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Transcript source backed by the public YouTube caption endpoints.
pub struct YtTranscriptClient {
    api: YouTubeTranscriptApi,
    languages: Vec<String>,
}

impl YtTranscriptClient {
    /// Create a client that prefers the given languages, in order
    pub fn new(languages: Vec<String>) -> Result<Self, TranscriptError> {
        let api = YouTubeTranscriptApi::new(None, None, None)
            .map_err(|e| TranscriptError::Client(e.to_string()))?;
        Ok(Self { api, languages })
    }
}

impl TranscriptSource for YtTranscriptClient {
    async fn fetch_transcript(&self, video_id: &str) -> Result<Transcript, TranscriptError> {
        let languages: Vec<&str> = self.languages.iter().map(String::as_str).collect();
        tracing::debug!(video_id, ?languages, "fetching transcript");

        let fetched = self
            .api
            .fetch_transcript(video_id, &languages, false)
            .await
            .map_err(|e| TranscriptError::Unavailable {
                video_id: video_id.to_string(),
                reason: e.to_string(),
            })?;

        let text = fetched.text();
        if text.trim().is_empty() {
            return Err(TranscriptError::Empty(video_id.to_string()));
        }

        tracing::debug!(
            video_id,
            language = %fetched.language_code,
            generated = fetched.is_generated,
            chars = text.len(),
            "transcript fetched"
        );

        Ok(Transcript {
            video_id: video_id.to_string(),
            language_code: Some(fetched.language_code.clone()),
            text,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> Url {
        Url::parse(raw).unwrap()
    }

    #[test]
    fn extracts_watch_id() {
        let url = parse("https://www.youtube.com/watch?v=ABC123");
        assert_eq!(extract_video_id(&url).as_deref(), Some("ABC123"));
    }

    #[test]
    fn extracts_watch_id_with_extra_params() {
        let url = parse("https://m.youtube.com/watch?feature=share&v=dQw4w9WgXcQ&t=42s");
        assert_eq!(extract_video_id(&url).as_deref(), Some("dQw4w9WgXcQ"));
    }

    #[test]
    fn extracts_short_link_id() {
        let url = parse("https://youtu.be/wXVvfFMTyzY?feature=shared");
        assert_eq!(extract_video_id(&url).as_deref(), Some("wXVvfFMTyzY"));
    }

    #[test]
    fn extracts_path_style_ids() {
        for (raw, id) in [
            ("https://www.youtube.com/shorts/5_EJwYeQusM", "5_EJwYeQusM"),
            ("https://www.youtube.com/embed/S6w-UEOK7aI", "S6w-UEOK7aI"),
            ("https://youtube.com/live/abc_DEF-123?si=x", "abc_DEF-123"),
        ] {
            assert_eq!(extract_video_id(&parse(raw)).as_deref(), Some(id), "{raw}");
        }
    }

    #[test]
    fn no_id_for_channel_pages() {
        assert_eq!(extract_video_id(&parse("https://www.youtube.com/@rustlang")), None);
        assert_eq!(extract_video_id(&parse("https://www.youtube.com/")), None);
        assert_eq!(extract_video_id(&parse("https://youtu.be/")), None);
    }

    #[test]
    fn detects_youtube_hosts() {
        assert!(is_youtube_url(&parse("https://www.youtube.com/watch?v=x")));
        assert!(is_youtube_url(&parse("https://music.youtube.com/watch?v=x")));
        assert!(is_youtube_url(&parse("https://youtu.be/x")));
        assert!(!is_youtube_url(&parse("https://notyoutube.com/watch?v=x")));
        assert!(!is_youtube_url(&parse("https://example.com/youtube.com")));
        assert_eq!(extract_video_id(&parse("https://example.com/watch?v=abc")), None);
    }
}
