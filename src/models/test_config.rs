// src/models/test_config.rs

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Difficulty levels accepted for tests and questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Intermediate,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "intermediate" => Ok(Difficulty::Intermediate),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty '{}'", other)),
        }
    }
}

/// Status assigned to every freshly created test.
pub const STATUS_CREATED: &str = "created";

/// Represents a stored test configuration (the `test_configs` table).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestConfig {
    pub test_id: String,
    pub subject: Option<String>,
    pub subjects: Vec<String>,
    /// Duration in minutes.
    pub duration: i32,
    pub total_questions: i32,
    pub topics: Vec<String>,
    pub difficulty: Difficulty,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl TestConfig {
    /// Subjects the question set is drawn from.
    ///
    /// An explicit override wins, then the single `subject`, then `subjects`.
    /// An empty result means "any subject".
    pub fn subject_filter(&self, subject_override: Option<&str>) -> Vec<String> {
        if let Some(subject) = subject_override.filter(|s| !s.is_empty()) {
            return vec![subject.to_string()];
        }
        match &self.subject {
            Some(subject) => vec![subject.clone()],
            None => self.subjects.clone(),
        }
    }
}

/// DTO for creating a new test.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTestRequest {
    #[validate(length(min = 1, max = 64))]
    pub test_id: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub subject: Option<String>,

    #[serde(default)]
    #[validate(custom(function = validate_labels))]
    pub subjects: Vec<String>,

    #[validate(range(min = 1, message = "Duration must be greater than zero."))]
    pub duration: i32,

    #[validate(range(min = 1, max = 100, message = "Total questions must be between 1 and 100."))]
    pub total_questions: i32,

    #[serde(default)]
    #[validate(custom(function = validate_labels))]
    pub topics: Vec<String>,

    pub difficulty: Difficulty,
}

impl CreateTestRequest {
    /// Builds the stored configuration, generating a `test_id` when none was supplied.
    pub fn into_config(self, created_at: DateTime<Utc>) -> TestConfig {
        TestConfig {
            test_id: self
                .test_id
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            subject: self.subject,
            subjects: self.subjects,
            duration: self.duration,
            total_questions: self.total_questions,
            topics: self.topics,
            difficulty: self.difficulty,
            status: STATUS_CREATED.to_string(),
            created_at,
        }
    }
}

fn validate_labels(labels: &[String]) -> Result<(), validator::ValidationError> {
    for label in labels {
        if label.trim().is_empty() {
            return Err(validator::ValidationError::new("label_cannot_be_empty"));
        }
        if label.len() > 100 {
            return Err(validator::ValidationError::new("label_too_long"));
        }
    }
    Ok(())
}
