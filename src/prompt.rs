//! Prompt construction.
//!
//! All documents are "stuffed" into a single prompt: their texts are joined
//! with a blank line and substituted for the `{text}` placeholder.

use crate::document::Document;

/// Placeholder replaced by the document text
pub const TEXT_PLACEHOLDER: &str = "{text}";

/// Instructional template asking for an in-depth, structured ~300-word summary
pub const DEFAULT_TEMPLATE: &str = "
Perform an in-depth exploration of the content from the following source, covering the main topics, unique features, and key insights:
- Start with an overview of the primary themes.
- Identify and summarize the key sections or main points in a structured manner.
- Include any significant details or unique aspects that make this content valuable.
- Aim to provide a comprehensive summary in 300 words.

Content: {text}
";

const DOCUMENT_SEPARATOR: &str = "\n\n";

/// Builds prompts from a template containing [`TEXT_PLACEHOLDER`].
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    template: String,
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self {
            template: DEFAULT_TEMPLATE.to_string(),
        }
    }
}

impl PromptBuilder {
    /// Use a custom template, or the default one when `None`.
    ///
    /// Callers validate that the template contains the placeholder; see
    /// `Config::from_toml_str`.
    pub fn new(template: Option<&str>) -> Self {
        template
            .map(|t| Self {
                template: t.to_string(),
            })
            .unwrap_or_default()
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Fill the template with the documents' text.
    ///
    /// Only the first placeholder is substituted, so `{text}` appearing inside
    /// the fetched content is left as-is.
    pub fn build(&self, documents: &[Document]) -> String {
        let text = documents
            .iter()
            .map(Document::text)
            .collect::<Vec<_>>()
            .join(DOCUMENT_SEPARATOR);

        self.template.replacen(TEXT_PLACEHOLDER, &text, 1)
    }
}
