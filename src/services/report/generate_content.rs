// src/services/report/generate_content.rs

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use super::{ReportError, ReportStrategy, SYSTEM_PROMPT, user_prompt};
use crate::models::{analysis::ReportProvider, test_result::TestResults};

/// Generate-content provider (Gemini). The key travels as a query parameter.
pub struct GenerateContentStrategy {
    client: Client,
    url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GenerateContentStrategy {
    pub fn new(client: Client, url: String, api_key: String) -> Self {
        Self {
            client,
            url,
            api_key,
        }
    }
}

#[async_trait]
impl ReportStrategy for GenerateContentStrategy {
    fn provider(&self) -> ReportProvider {
        ReportProvider::Gemini
    }

    async fn generate(&self, results: &TestResults) -> Result<String, ReportError> {
        // No separate system role on this endpoint; the instruction is prepended.
        let prompt = format!("{}\n\n{}", SYSTEM_PROMPT, user_prompt(results)?);
        let payload = json!({
            "contents": [{
                "parts": [{ "text": prompt }]
            }]
        });

        let response = self
            .client
            .post(&self.url)
            .query(&[("key", self.api_key.as_str())])
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ReportError::Status(response.status()));
        }

        let body: GenerateContentResponse = response.json().await?;
        let text = body
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().find_map(|p| p.text))
            .ok_or(ReportError::MalformedResponse)?;

        if text.trim().is_empty() {
            return Err(ReportError::EmptyReport);
        }
        Ok(text)
    }
}
