//! Scripted `TextGenerator` for tests.
//!
//! Replies are consumed in order; every prompt is recorded so tests can
//! assert on what was sent (or that nothing was).

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::{LlmError, TextGenerator};

#[derive(Debug, Clone)]
enum MockReply {
    Text(String),
    Failure { status: u16, message: String },
}

#[derive(Debug, Clone, Default)]
pub struct MockGenerator {
    replies: Arc<Mutex<VecDeque<MockReply>>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reply(self, text: impl Into<String>) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(MockReply::Text(text.into()));
        self
    }

    pub fn with_failure(self, status: u16, message: impl Into<String>) -> Self {
        self.replies.lock().unwrap().push_back(MockReply::Failure {
            status,
            message: message.into(),
        });
        self
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    async fn send_message(&self, prompt: &str) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        let reply = self.replies.lock().unwrap().pop_front();
        match reply {
            Some(MockReply::Text(text)) => Ok(text),
            Some(MockReply::Failure { status, message }) => Err(LlmError::Api { status, message }),
            None => Err(LlmError::EmptyContent("no scripted reply".to_string())),
        }
    }
}
