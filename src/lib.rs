//! # Recap
//!
//! A TUI application for in-depth summaries of YouTube videos and webpages using LLMs.
//!
//! ## Features
//!
//! - **YouTube or Web**: videos are summarised from their transcript, everything else from the page text
//! - **One Prompt**: a fixed template asks for an overview, key points and notable details in ~300 words
//! - **Provider Choice**: Groq (default) or OpenAI over chat completions, Gemini via rstructor

pub mod agent;
pub mod config;
pub mod document;
pub mod fetch;
pub mod logging;
pub mod pipeline;
pub mod prompt;
pub mod scraper;
pub mod summary;
pub mod ui;
pub mod validate;
pub mod youtube;

pub use config::Config;
pub use document::{Document, Source};
pub use pipeline::{DefaultPipeline, PipelineError, Stage, SummaryPipeline};
pub use summary::Summary;
