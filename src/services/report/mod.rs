// src/services/report/mod.rs

//! Narrative performance reports.
//!
//! Remote providers are tried in order; the first one that returns text wins.
//! When every remote provider fails (or none is configured) the offline
//! template is rendered, so generation itself never fails.

pub mod chat_completion;
pub mod generate_content;
pub mod template;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use thiserror::Error;

use crate::{
    config::Config,
    models::{analysis::ReportProvider, test_result::TestResults},
};

use chat_completion::ChatCompletionStrategy;
use generate_content::GenerateContentStrategy;

const SYSTEM_PROMPT: &str = "You are an expert educational analyst. \
    Generate a detailed analysis of test performance in markdown format.";

/// Why a remote provider could not produce a report.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("request to provider failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("provider returned status {0}")]
    Status(StatusCode),
    #[error("provider response did not contain any text")]
    MalformedResponse,
    #[error("provider returned an empty report")]
    EmptyReport,
    #[error("could not serialize results: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A remote report provider.
#[async_trait]
pub trait ReportStrategy: Send + Sync {
    fn provider(&self) -> ReportProvider;

    async fn generate(&self, results: &TestResults) -> Result<String, ReportError>;
}

/// Report text plus the provider that produced it.
#[derive(Debug, Clone)]
pub struct GeneratedReport {
    pub text: String,
    pub provider: ReportProvider,
}

pub struct ReportGenerator {
    strategies: Vec<Box<dyn ReportStrategy>>,
}

impl ReportGenerator {
    pub fn new(strategies: Vec<Box<dyn ReportStrategy>>) -> Self {
        Self { strategies }
    }

    /// Builds the chain from configured credentials: chat-completion first,
    /// then generate-content. Providers without a key are left out.
    pub fn from_config(config: &Config) -> Result<Self, ReportError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.report_timeout_secs))
            .build()?;

        let mut strategies: Vec<Box<dyn ReportStrategy>> = Vec::new();

        if let Some(api_key) = &config.groq_api_key {
            strategies.push(Box::new(ChatCompletionStrategy::new(
                client.clone(),
                config.groq_api_url.clone(),
                api_key.clone(),
                config.groq_model.clone(),
            )));
        }

        if let Some(api_key) = &config.gemini_api_key {
            strategies.push(Box::new(GenerateContentStrategy::new(
                client.clone(),
                config.gemini_api_url.clone(),
                api_key.clone(),
            )));
        }

        Ok(Self::new(strategies))
    }

    /// Remote providers in the order they are tried.
    pub fn providers(&self) -> Vec<ReportProvider> {
        self.strategies.iter().map(|s| s.provider()).collect()
    }

    pub async fn generate(&self, results: &TestResults) -> GeneratedReport {
        for strategy in &self.strategies {
            let provider = strategy.provider();
            match strategy.generate(results).await {
                Ok(text) if !text.trim().is_empty() => {
                    tracing::debug!("Report for test={} generated by {}", results.test_id, provider);
                    return GeneratedReport { text, provider };
                }
                Ok(_) => {
                    tracing::warn!("{} returned an empty report for test={}", provider, results.test_id);
                }
                Err(e) => {
                    tracing::warn!("{} failed for test={}: {}", provider, results.test_id, e);
                }
            }
        }

        GeneratedReport {
            text: template::render(results),
            provider: ReportProvider::Template,
        }
    }
}

/// User prompt shared by the remote providers.
pub(crate) fn user_prompt(results: &TestResults) -> Result<String, ReportError> {
    Ok(format!(
        "Analyze this test result and generate a detailed analysis in markdown format: {}",
        serde_json::to_string(results)?
    ))
}
