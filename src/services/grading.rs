// src/services/grading.rs

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::{question::Question, test_result::TestResults};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GradingError {
    #[error("Cannot grade a test with no questions")]
    InvalidQuestionSet,
}

/// Qualitative bucket for a percentage score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PerformanceBand {
    Excellent,
    VeryGood,
    Good,
    Satisfactory,
    NeedsImprovement,
}

impl PerformanceBand {
    /// Maps a percentage onto its band. Anything below 60, including NaN,
    /// lands in `NeedsImprovement`.
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 90.0 {
            PerformanceBand::Excellent
        } else if percentage >= 80.0 {
            PerformanceBand::VeryGood
        } else if percentage >= 70.0 {
            PerformanceBand::Good
        } else if percentage >= 60.0 {
            PerformanceBand::Satisfactory
        } else {
            PerformanceBand::NeedsImprovement
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PerformanceBand::Excellent => "Excellent",
            PerformanceBand::VeryGood => "Very Good",
            PerformanceBand::Good => "Good",
            PerformanceBand::Satisfactory => "Satisfactory",
            PerformanceBand::NeedsImprovement => "Needs Improvement",
        }
    }

    pub fn feedback(&self) -> &'static str {
        match self {
            PerformanceBand::Excellent => {
                "Outstanding performance! You have a strong grasp of the material."
            }
            PerformanceBand::VeryGood => "Great work! You're well-prepared for this subject.",
            PerformanceBand::Good => "Good performance. Focus on areas of improvement.",
            PerformanceBand::Satisfactory => {
                "You're on the right track. More practice needed."
            }
            PerformanceBand::NeedsImprovement => {
                "Review the material and practice more questions."
            }
        }
    }
}

/// Outcome of grading one submission, before it is attached to a test.
#[derive(Debug, Clone, PartialEq)]
pub struct Grade {
    pub correct_answers: i32,
    pub total_questions: i32,
    pub percentage: f64,
    pub time_taken: i64,
}

impl Grade {
    pub fn band(&self) -> PerformanceBand {
        PerformanceBand::from_percentage(self.percentage)
    }

    pub fn into_results(self, test_id: &str, submitted_at: DateTime<Utc>) -> TestResults {
        let performance_level = self.band().label().to_string();
        TestResults {
            test_id: test_id.to_string(),
            score: self.percentage,
            correct_answers: self.correct_answers,
            total_questions: self.total_questions,
            time_taken: self.time_taken,
            percentage: self.percentage,
            performance_level,
            submitted_at,
        }
    }
}

/// Grades a submission against the question list.
///
/// Each question scores one point when the submitted label equals its
/// `correct_answer`; a missing answer is wrong. Answers to questions outside
/// the list are ignored. `marks` is not consulted.
pub fn grade(
    answers: &HashMap<String, String>,
    questions: &[Question],
    time_taken: i64,
) -> Result<Grade, GradingError> {
    if questions.is_empty() {
        return Err(GradingError::InvalidQuestionSet);
    }

    let correct = questions
        .iter()
        .filter(|q| answers.get(&q.question_id) == Some(&q.correct_answer))
        .count();
    let total = questions.len();

    let percentage = correct as f64 * 100.0 / total as f64;

    Ok(Grade {
        correct_answers: correct as i32,
        total_questions: total as i32,
        percentage,
        time_taken,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::models::test_config::Difficulty;

    fn question(id: &str, answer: &str) -> Question {
        Question {
            question_id: id.to_string(),
            text: format!("Question {}", id),
            options: BTreeMap::from([
                ("A".to_string(), "first".to_string()),
                ("B".to_string(), "second".to_string()),
                ("C".to_string(), "third".to_string()),
            ]),
            correct_answer: answer.to_string(),
            explanation: None,
            topic: "Mechanics".to_string(),
            difficulty: Difficulty::Easy,
            subject: "Physics".to_string(),
            marks: 1,
        }
    }

    fn answers(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn half_right_is_fifty_percent() {
        let questions = vec![question("q_1", "A"), question("q_2", "C")];
        let grade = grade(&answers(&[("q_1", "A"), ("q_2", "B")]), &questions, 120).unwrap();

        assert_eq!(grade.correct_answers, 1);
        assert_eq!(grade.total_questions, 2);
        assert_eq!(grade.percentage, 50.0);
        assert_eq!(grade.time_taken, 120);
    }

    #[test]
    fn missing_answer_counts_as_wrong() {
        let questions = vec![
            question("q_1", "A"),
            question("q_2", "B"),
            question("q_3", "C"),
        ];
        let grade = grade(&answers(&[("q_1", "A"), ("q_3", "C")]), &questions, 0).unwrap();

        assert_eq!(grade.correct_answers, 2);
        assert!((grade.percentage - 200.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn answers_for_unknown_questions_are_ignored() {
        let questions = vec![question("q_1", "A")];
        let grade = grade(&answers(&[("q_9", "A"), ("q_1", "B")]), &questions, 10).unwrap();

        assert_eq!(grade.correct_answers, 0);
        assert_eq!(grade.percentage, 0.0);
    }

    #[test]
    fn empty_question_set_is_an_error() {
        let err = grade(&answers(&[("q_1", "A")]), &[], 10).unwrap_err();
        assert_eq!(err, GradingError::InvalidQuestionSet);
    }

    #[test]
    fn percentage_stays_within_bounds() {
        let questions: Vec<Question> = (0..7)
            .map(|i| question(&format!("q_{}", i), "B"))
            .collect();

        for right in 0..=questions.len() {
            let submitted: HashMap<String, String> = questions
                .iter()
                .enumerate()
                .map(|(i, q)| {
                    let label = if i < right { "B" } else { "A" };
                    (q.question_id.clone(), label.to_string())
                })
                .collect();

            let grade = grade(&submitted, &questions, 0).unwrap();
            let expected = 100.0 * right as f64 / questions.len() as f64;

            assert_eq!(grade.correct_answers as usize, right);
            assert!((grade.percentage - expected).abs() < 1e-9);
            assert!((0.0..=100.0).contains(&grade.percentage));
        }
    }

    #[test]
    fn results_carry_score_equal_to_percentage() {
        let questions = vec![question("q_1", "A"), question("q_2", "C")];
        let results = grade(&answers(&[("q_1", "A"), ("q_2", "C")]), &questions, 60)
            .unwrap()
            .into_results("test-1", Utc::now());

        assert_eq!(results.test_id, "test-1");
        assert_eq!(results.score, results.percentage);
        assert_eq!(results.percentage, 100.0);
        assert_eq!(results.performance_level, "Excellent");
    }

    #[test]
    fn band_boundaries() {
        assert_eq!(PerformanceBand::from_percentage(100.0).label(), "Excellent");
        assert_eq!(PerformanceBand::from_percentage(90.0).label(), "Excellent");
        assert_eq!(PerformanceBand::from_percentage(89.9).label(), "Very Good");
        assert_eq!(PerformanceBand::from_percentage(80.0).label(), "Very Good");
        assert_eq!(PerformanceBand::from_percentage(79.9).label(), "Good");
        assert_eq!(PerformanceBand::from_percentage(70.0).label(), "Good");
        assert_eq!(PerformanceBand::from_percentage(60.0).label(), "Satisfactory");
        assert_eq!(
            PerformanceBand::from_percentage(59.9).label(),
            "Needs Improvement"
        );
        assert_eq!(
            PerformanceBand::from_percentage(0.0).label(),
            "Needs Improvement"
        );
        assert_eq!(
            PerformanceBand::from_percentage(f64::NAN).label(),
            "Needs Improvement"
        );
    }
}
