//! The summarisation pipeline.
//!
//! Runs validation → fetching → prompt construction → model invocation for one
//! URL. Every failure is terminal for the request and maps to a single
//! user-facing message.

use std::fmt;

use thiserror::Error;

use crate::agent::{AgentError, LlmSummariser, Summariser};
use crate::config::Config;
use crate::document::Document;
use crate::fetch::{ContentFetcher, FetchError};
use crate::prompt::PromptBuilder;
use crate::scraper::{ScraperError, WebLoader};
use crate::summary::Summary;
use crate::validate;
use crate::youtube::{TranscriptError, TranscriptSource, YtTranscriptClient};

pub const MISSING_INPUT_MESSAGE: &str = "Please provide the information to get started";
pub const INVALID_URL_MESSAGE: &str =
    "Please enter a valid URL. It can be a YT video URL or website URL";
pub const NO_TRANSCRIPT_MESSAGE: &str =
    "No transcript available. Unable to retrieve content from YouTube.";
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load content from the provided URL.";

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("missing API key or URL")]
    MissingInput,
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("summarisation failed: {0}")]
    Summarise(#[from] AgentError),
}

impl PipelineError {
    /// The text shown to the user for this failure
    pub fn user_message(&self) -> String {
        match self {
            PipelineError::MissingInput => MISSING_INPUT_MESSAGE.to_string(),
            PipelineError::InvalidUrl(_) => INVALID_URL_MESSAGE.to_string(),
            PipelineError::Fetch(FetchError::Transcript(e)) => {
                format!("{NO_TRANSCRIPT_MESSAGE} {e}")
            }
            PipelineError::Fetch(FetchError::Web(e)) => format!("{LOAD_FAILED_MESSAGE} {e}"),
            PipelineError::Summarise(e) => format!("Summarisation failed: {e}"),
        }
    }
}

/// Step currently executing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Validating,
    Fetching,
    Summarising,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Validating => "Validating URL",
            Stage::Fetching => "Fetching content",
            Stage::Summarising => "Summarising",
        })
    }
}

/// Failure while wiring up the production pipeline
#[derive(Error, Debug)]
pub enum SetupError {
    #[error(transparent)]
    Transcript(#[from] TranscriptError),
    #[error(transparent)]
    Web(#[from] ScraperError),
    #[error(transparent)]
    Agent(#[from] AgentError),
}

/// Pipeline backed by YouTube captions and the configured hosted model
pub type DefaultPipeline = SummaryPipeline<YtTranscriptClient, LlmSummariser>;

impl DefaultPipeline {
    pub fn from_config(config: &Config) -> Result<Self, SetupError> {
        let transcripts = YtTranscriptClient::new(config.transcript.languages.clone())?;
        let web = WebLoader::new(&config.fetch)?;
        let summariser = LlmSummariser::from_config(config)?;

        Ok(SummaryPipeline::new(
            ContentFetcher::new(transcripts, web),
            PromptBuilder::new(config.prompt.template.as_deref()),
            summariser,
        ))
    }
}

/// Everything one request needs, wired together.
pub struct SummaryPipeline<T, S> {
    fetcher: ContentFetcher<T>,
    prompts: PromptBuilder,
    summariser: S,
}

impl<T: TranscriptSource, S: Summariser> SummaryPipeline<T, S> {
    pub fn new(fetcher: ContentFetcher<T>, prompts: PromptBuilder, summariser: S) -> Self {
        Self {
            fetcher,
            prompts,
            summariser,
        }
    }

    /// Validate `raw_url` and fetch its documents without calling the model.
    ///
    /// Needs no API key.
    pub async fn extract(&self, raw_url: &str) -> Result<Vec<Document>, PipelineError> {
        if raw_url.trim().is_empty() {
            return Err(PipelineError::MissingInput);
        }
        let url = validate::parse_web_url(raw_url)
            .ok_or_else(|| PipelineError::InvalidUrl(raw_url.to_string()))?;
        Ok(self.fetcher.fetch(&url).await?)
    }

    /// Run the whole pipeline for one URL
    pub async fn run(&self, raw_url: &str) -> Result<Summary, PipelineError> {
        self.run_with_progress(raw_url, |_| {}).await
    }

    /// Run the whole pipeline, reporting each stage as it starts
    pub async fn run_with_progress<F>(
        &self,
        raw_url: &str,
        on_stage: F,
    ) -> Result<Summary, PipelineError>
    where
        F: Fn(Stage),
    {
        let result = self.run_stages(raw_url, &on_stage).await;
        if let Err(e) = &result {
            tracing::warn!(error = %e, url = raw_url, "pipeline failed");
        }
        result
    }

    async fn run_stages<F>(&self, raw_url: &str, on_stage: &F) -> Result<Summary, PipelineError>
    where
        F: Fn(Stage),
    {
        if !self.summariser.has_credentials() || raw_url.trim().is_empty() {
            return Err(PipelineError::MissingInput);
        }

        enter(Stage::Validating, on_stage);
        let url = validate::parse_web_url(raw_url)
            .ok_or_else(|| PipelineError::InvalidUrl(raw_url.to_string()))?;

        enter(Stage::Fetching, on_stage);
        let documents = self.fetcher.fetch(&url).await?;
        let source = documents
            .first()
            .map(Document::source)
            .ok_or(FetchError::Web(ScraperError::NoContent))?;

        enter(Stage::Summarising, on_stage);
        let prompt = self.prompts.build(&documents);
        let text = self.summariser.summarise(&prompt).await?;

        tracing::info!(url = raw_url, %source, model = self.summariser.model(), "summary generated");
        Ok(Summary::new(
            raw_url.to_string(),
            source,
            self.summariser.model().to_string(),
            text,
        ))
    }
}

fn enter<F: Fn(Stage)>(stage: Stage, on_stage: &F) {
    tracing::debug!(%stage, "entering stage");
    on_stage(stage);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_messages_match_error_kind() {
        assert_eq!(
            PipelineError::MissingInput.user_message(),
            "Please provide the information to get started"
        );
        assert_eq!(
            PipelineError::InvalidUrl("x".into()).user_message(),
            "Please enter a valid URL. It can be a YT video URL or website URL"
        );

        let transcript = PipelineError::Fetch(FetchError::Transcript(TranscriptError::Empty(
            "abc".into(),
        )));
        assert!(transcript.user_message().starts_with(NO_TRANSCRIPT_MESSAGE));
        assert!(transcript.user_message().contains("abc"));

        let web = PipelineError::Fetch(FetchError::Web(ScraperError::NoContent));
        assert!(web.user_message().starts_with(LOAD_FAILED_MESSAGE));

        let model = PipelineError::Summarise(AgentError::EmptyResponse);
        assert!(model.user_message().starts_with("Summarisation failed"));
    }

    #[test]
    fn stages_display_as_labels() {
        assert_eq!(Stage::Fetching.to_string(), "Fetching content");
    }
}
