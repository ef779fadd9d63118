// src/models/test_result.rs

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Represents the 'test_results' table in the database.
/// One row per graded submission; rows are never updated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TestResults {
    pub test_id: String,
    /// Always equal to `percentage`.
    pub score: f64,
    pub correct_answers: i32,
    pub total_questions: i32,
    /// Seconds spent on the test.
    pub time_taken: i64,
    pub percentage: f64,
    /// Band label of `percentage`, e.g. "Very Good".
    pub performance_level: String,
    pub submitted_at: DateTime<Utc>,
}

/// DTO for submitting answers to a test.
#[derive(Debug, Deserialize, Validate)]
pub struct SubmitTestRequest {
    /// Optional echo of the path parameter; must match it when present.
    pub test_id: Option<String>,

    /// User's answers map.
    /// Key: question id
    /// Value: selected option label
    pub answers: HashMap<String, String>,

    #[validate(range(min = 0, message = "time_taken cannot be negative."))]
    pub time_taken: i64,
}
