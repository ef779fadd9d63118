// src/models/question.rs

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    config::{MAX_QUESTION_OPTIONS, MIN_QUESTION_OPTIONS},
    models::test_config::Difficulty,
};

/// Represents the 'questions' table in the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub question_id: String,

    /// The text content of the question.
    pub text: String,

    /// Labeled choices, e.g. `{"A": "10 m", "B": "20 m"}`.
    /// Stored as a JSON object in the database.
    pub options: BTreeMap<String, String>,

    /// Label of the correct option.
    pub correct_answer: String,

    /// Explanation of the correct answer.
    pub explanation: Option<String>,

    pub topic: String,
    pub difficulty: Difficulty,
    pub subject: String,

    /// Carried through storage but not used when grading.
    #[serde(default = "default_marks")]
    pub marks: i32,
}

pub(crate) fn default_marks() -> i32 {
    1
}

/// DTO for sending question to client (excludes answer and explanation).
#[derive(Debug, Serialize)]
pub struct PublicQuestion {
    pub question_id: String,
    pub text: String,
    pub options: BTreeMap<String, String>,
    pub topic: String,
    pub difficulty: Difficulty,
    pub subject: String,
    pub marks: i32,
}

impl From<Question> for PublicQuestion {
    fn from(q: Question) -> Self {
        PublicQuestion {
            question_id: q.question_id,
            text: q.text,
            options: q.options,
            topic: q.topic,
            difficulty: q.difficulty,
            subject: q.subject,
            marks: q.marks,
        }
    }
}

/// DTO for inserting a question into the bank.
#[derive(Debug, Deserialize, Validate)]
#[validate(schema(function = validate_answer_label))]
pub struct CreateQuestionRequest {
    #[validate(length(min = 1, max = 64))]
    pub question_id: Option<String>,
    #[validate(length(min = 1, max = 2000))]
    pub text: String,
    #[validate(custom(function = validate_options))]
    pub options: BTreeMap<String, String>,
    #[validate(length(min = 1, max = 16))]
    pub correct_answer: String,
    #[validate(length(max = 2000))]
    pub explanation: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub topic: String,
    pub difficulty: Difficulty,
    #[validate(length(min = 1, max = 100))]
    pub subject: String,
    #[serde(default = "default_marks")]
    #[validate(range(min = 0))]
    pub marks: i32,
}

impl CreateQuestionRequest {
    pub fn into_question(self) -> Question {
        Question {
            question_id: self
                .question_id
                .unwrap_or_else(|| format!("q_{}", uuid::Uuid::new_v4().simple())),
            text: self.text,
            options: self.options,
            correct_answer: self.correct_answer,
            explanation: self.explanation,
            topic: self.topic,
            difficulty: self.difficulty,
            subject: self.subject,
            marks: self.marks,
        }
    }
}

fn validate_options(options: &BTreeMap<String, String>) -> Result<(), validator::ValidationError> {
    if options.len() < MIN_QUESTION_OPTIONS || options.len() > MAX_QUESTION_OPTIONS {
        return Err(validator::ValidationError::new("options_count_out_of_range")
            .with_message("A question must have between 2 and 6 options.".into()));
    }
    for (label, text) in options {
        if label.trim().is_empty() || text.trim().is_empty() {
            return Err(validator::ValidationError::new("option_cannot_be_empty"));
        }
        if text.len() > 500 {
            return Err(validator::ValidationError::new("option_too_long"));
        }
    }
    Ok(())
}

fn validate_answer_label(req: &CreateQuestionRequest) -> Result<(), validator::ValidationError> {
    if !req.options.contains_key(&req.correct_answer) {
        return Err(validator::ValidationError::new("answer_not_an_option")
            .with_message("correct_answer must be one of the option labels.".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Question {
        Question {
            question_id: "q_1".to_string(),
            text: "What is the derivative of x²?".to_string(),
            options: BTreeMap::from([
                ("A".to_string(), "x".to_string()),
                ("B".to_string(), "2x".to_string()),
            ]),
            correct_answer: "B".to_string(),
            explanation: Some("Power rule".to_string()),
            topic: "Calculus".to_string(),
            difficulty: Difficulty::Medium,
            subject: "Mathematics".to_string(),
            marks: 1,
        }
    }

    #[test]
    fn public_question_hides_answer_and_explanation() {
        let value = serde_json::to_value(PublicQuestion::from(sample())).unwrap();
        let obj = value.as_object().unwrap();

        assert!(!obj.contains_key("correct_answer"));
        assert!(!obj.contains_key("explanation"));
        assert_eq!(obj["question_id"], "q_1");
        assert_eq!(obj["options"]["B"], "2x");
    }

    #[test]
    fn create_request_enforces_option_count() {
        let one_option: CreateQuestionRequest = serde_json::from_value(serde_json::json!({
            "text": "Pick one",
            "options": {"A": "only"},
            "correct_answer": "A",
            "topic": "Misc",
            "difficulty": "easy",
            "subject": "Physics"
        }))
        .unwrap();
        assert!(one_option.validate().is_err());

        let seven: BTreeMap<String, String> = ('A'..='G')
            .map(|c| (c.to_string(), format!("option {}", c)))
            .collect();
        let too_many: CreateQuestionRequest = serde_json::from_value(serde_json::json!({
            "text": "Pick one",
            "options": seven,
            "correct_answer": "A",
            "topic": "Misc",
            "difficulty": "easy",
            "subject": "Physics"
        }))
        .unwrap();
        assert!(too_many.validate().is_err());
    }

    #[test]
    fn create_request_requires_answer_among_options() {
        let req: CreateQuestionRequest = serde_json::from_value(serde_json::json!({
            "text": "Pick one",
            "options": {"A": "yes", "B": "no"},
            "correct_answer": "C",
            "topic": "Misc",
            "difficulty": "easy",
            "subject": "Physics"
        }))
        .unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn create_request_defaults_marks_and_id() {
        let req: CreateQuestionRequest = serde_json::from_value(serde_json::json!({
            "text": "Pick one",
            "options": {"A": "yes", "B": "no"},
            "correct_answer": "A",
            "topic": "Misc",
            "difficulty": "hard",
            "subject": "Physics"
        }))
        .unwrap();
        assert!(req.validate().is_ok());

        let question = req.into_question();
        assert_eq!(question.marks, 1);
        assert!(question.question_id.starts_with("q_"));
    }
}
