// src/services/report/chat_completion.rs

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use super::{ReportError, ReportStrategy, SYSTEM_PROMPT, user_prompt};
use crate::models::{analysis::ReportProvider, test_result::TestResults};

/// OpenAI-compatible chat-completion provider (Groq).
pub struct ChatCompletionStrategy {
    client: Client,
    url: String,
    api_key: String,
    model: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Debug, Deserialize)]
struct Message {
    content: Option<String>,
}

impl ChatCompletionStrategy {
    pub fn new(client: Client, url: String, api_key: String, model: String) -> Self {
        Self {
            client,
            url,
            api_key,
            model,
        }
    }
}

#[async_trait]
impl ReportStrategy for ChatCompletionStrategy {
    fn provider(&self) -> ReportProvider {
        ReportProvider::Groq
    }

    async fn generate(&self, results: &TestResults) -> Result<String, ReportError> {
        let payload = json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": SYSTEM_PROMPT},
                {"role": "user", "content": user_prompt(results)?}
            ]
        });

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ReportError::Status(response.status()));
        }

        let body: ChatCompletionResponse = response.json().await?;
        let text = body
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(ReportError::MalformedResponse)?;

        if text.trim().is_empty() {
            return Err(ReportError::EmptyReport);
        }
        Ok(text)
    }
}
