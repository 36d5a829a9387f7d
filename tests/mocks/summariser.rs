use std::sync::{Arc, Mutex};

use recap::agent::{AgentError, Summariser};

#[derive(Clone)]
pub struct MockSummariser {
    pub summary: String,
    pub prompts: Arc<Mutex<Vec<String>>>,
    pub fail_with: Option<(u16, String)>,
    pub has_credentials: bool,
}

impl MockSummariser {
    pub fn new(summary: &str) -> Self {
        Self {
            summary: summary.to_string(),
            prompts: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
            has_credentials: true,
        }
    }

    pub fn failing(status: u16, msg: &str) -> Self {
        Self {
            fail_with: Some((status, msg.to_string())),
            ..Self::new("")
        }
    }

    /// A summariser whose API key is blank
    pub fn without_credentials() -> Self {
        Self {
            has_credentials: false,
            ..Self::new("unused")
        }
    }
}

impl Summariser for MockSummariser {
    fn model(&self) -> &str {
        "mock-gemma"
    }

    fn has_credentials(&self) -> bool {
        self.has_credentials
    }

    async fn summarise(&self, prompt: &str) -> Result<String, AgentError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.fail_with {
            Some((status, message)) => Err(AgentError::Api {
                status: *status,
                message: message.clone(),
            }),
            None => Ok(self.summary.clone()),
        }
    }
}
