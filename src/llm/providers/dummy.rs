//! Dummy LLM provider — echoes the prompt back prefixed with `[echo]`.
//! Lets the whole form → summary path run without an API key.

use crate::llm::{LlmResponse, ProviderError};

pub const DUMMY_MODEL: &str = "dummy-echo";

#[derive(Debug, Clone)]
pub struct DummyProvider;

impl DummyProvider {
    pub async fn complete(&self, content: &str) -> Result<LlmResponse, ProviderError> {
        Ok(LlmResponse {
            text: format!("[echo] {content}"),
            usage: None,
        })
    }
}
