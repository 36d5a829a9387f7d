//! Content fetching: dispatches a URL to the transcript or webpage path.

use thiserror::Error;
use url::Url;

use crate::document::Document;
use crate::scraper::{ScraperError, WebLoader};
use crate::youtube::{self, TranscriptError, TranscriptSource};

#[derive(Error, Debug)]
pub enum FetchError {
    #[error(transparent)]
    Transcript(#[from] TranscriptError),
    #[error(transparent)]
    Web(#[from] ScraperError),
}

/// Produces documents for a validated URL.
pub struct ContentFetcher<T> {
    transcripts: T,
    web: WebLoader,
}

impl<T: TranscriptSource> ContentFetcher<T> {
    pub fn new(transcripts: T, web: WebLoader) -> Self {
        Self { transcripts, web }
    }

    /// Fetch the content behind `url`.
    ///
    /// YouTube links yield a single transcript document; everything else is
    /// loaded as a webpage.
    pub async fn fetch(&self, url: &Url) -> Result<Vec<Document>, FetchError> {
        if youtube::is_youtube_url(url) {
            let video_id = youtube::extract_video_id(url)
                .ok_or_else(|| TranscriptError::NoVideoId(url.to_string()))?;
            let transcript = self.transcripts.fetch_transcript(&video_id).await?;

            Ok(vec![Document::transcript(
                url.as_str(),
                transcript.video_id,
                transcript.language_code,
                transcript.text,
            )])
        } else {
            Ok(vec![self.web.load(url.as_str()).await?])
        }
    }
}
