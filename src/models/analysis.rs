// src/models/analysis.rs

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which report strategy produced an analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportProvider {
    Groq,
    Gemini,
    Template,
}

impl ReportProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportProvider::Groq => "groq",
            ReportProvider::Gemini => "gemini",
            ReportProvider::Template => "template",
        }
    }
}

impl fmt::Display for ReportProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "groq" => Ok(ReportProvider::Groq),
            "gemini" => Ok(ReportProvider::Gemini),
            "template" => Ok(ReportProvider::Template),
            other => Err(format!("unknown report provider '{}'", other)),
        }
    }
}

/// Represents the 'analysis' table in the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub session_id: String,
    pub test_id: String,
    /// Markdown report text.
    pub analysis: String,
    pub provider: ReportProvider,
    pub generated_at: DateTime<Utc>,
}

/// Query parameters for `POST /api/analysis/generate`.
#[derive(Debug, Deserialize)]
pub struct GenerateAnalysisParams {
    pub test_id: Option<String>,
}
