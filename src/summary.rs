//! Summary struct - the output of one pipeline run.

use crate::document::Source;
use serde::{Deserialize, Serialize};

/// Generated summary of a single URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// The summarised URL
    pub url: String,
    /// Whether the content came from a transcript or a webpage
    pub source: Source,
    /// Model identifier that produced the text
    pub model: String,
    /// Markdown produced by the model
    pub text: String,
}

impl Summary {
    /// Create a new summary
    pub fn new(url: String, source: Source, model: String, text: String) -> Self {
        Self {
            url,
            source,
            model,
            text,
        }
    }

    /// Check if the summary has any content
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Approximate word count of the generated text
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}
