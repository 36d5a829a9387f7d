pub mod summariser;
pub mod transcripts;
