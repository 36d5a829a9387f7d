//! Document - the normalized unit of fetched content.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a document's text came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Source {
    YouTube,
    Web,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Source::YouTube => "YouTube",
            Source::Web => "Web",
        })
    }
}

/// Fetched text plus its source tag and metadata.
///
/// Created once per request and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    text: String,
    source: Source,
    url: String,
    /// Page title for web pages
    title: Option<String>,
    /// Video identifier for transcripts
    video_id: Option<String>,
    /// Transcript language code
    language: Option<String>,
}

impl Document {
    /// Create a document from a webpage's extracted text
    pub fn web(url: impl Into<String>, title: Option<String>, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: Source::Web,
            url: url.into(),
            title,
            video_id: None,
            language: None,
        }
    }

    /// Create a document from a video transcript
    pub fn transcript(
        url: impl Into<String>,
        video_id: impl Into<String>,
        language: Option<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            source: Source::YouTube,
            url: url.into(),
            title: None,
            video_id: Some(video_id.into()),
            language,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn source(&self) -> Source {
        self.source
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn video_id(&self) -> Option<&str> {
        self.video_id.as_deref()
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// Number of characters of text
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}
