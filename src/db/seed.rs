// src/db/seed.rs

use std::collections::BTreeMap;

use super::{DocumentStore, StoreError};
use crate::models::{question::Question, test_config::Difficulty};

#[allow(clippy::too_many_arguments)]
fn question(
    id: &str,
    text: &str,
    options: [&str; 4],
    correct_answer: &str,
    explanation: &str,
    topic: &str,
    difficulty: Difficulty,
    subject: &str,
) -> Question {
    let options: BTreeMap<String, String> = ["A", "B", "C", "D"]
        .iter()
        .zip(options)
        .map(|(label, text)| (label.to_string(), text.to_string()))
        .collect();

    Question {
        question_id: id.to_string(),
        text: text.to_string(),
        options,
        correct_answer: correct_answer.to_string(),
        explanation: Some(explanation.to_string()),
        topic: topic.to_string(),
        difficulty,
        subject: subject.to_string(),
        marks: 1,
    }
}

/// The starter bank covering Physics, Chemistry and Mathematics.
pub fn sample_questions() -> Vec<Question> {
    vec![
        question(
            "q_001",
            "A ball is thrown vertically upward with an initial velocity of 20 m/s. What is the maximum height reached by the ball? (g = 10 m/s²)",
            ["10 m", "20 m", "30 m", "40 m"],
            "B",
            "Using kinematic equations: v² = u² + 2as, where v=0 at max height",
            "Mechanics",
            Difficulty::Medium,
            "Physics",
        ),
        question(
            "q_002",
            "Which of the following is a vector quantity?",
            ["Mass", "Temperature", "Force", "Time"],
            "C",
            "Force has both magnitude and direction, making it a vector quantity",
            "Mechanics",
            Difficulty::Easy,
            "Physics",
        ),
        question(
            "q_003",
            "What is the chemical formula for water?",
            ["H2O", "CO2", "O2", "N2"],
            "A",
            "Water consists of two hydrogen atoms and one oxygen atom",
            "Chemical Bonding",
            Difficulty::Easy,
            "Chemistry",
        ),
        question(
            "q_004",
            "What is the derivative of x²?",
            ["x", "2x", "x²", "2x²"],
            "B",
            "Using power rule: d/dx(x^n) = nx^(n-1)",
            "Calculus",
            Difficulty::Medium,
            "Mathematics",
        ),
        question(
            "q_005",
            "What is the SI unit of electric current?",
            ["Volt", "Ampere", "Ohm", "Watt"],
            "B",
            "The ampere (A) is the SI unit of electric current",
            "Electricity",
            Difficulty::Easy,
            "Physics",
        ),
        question(
            "q_006",
            "Which gas is responsible for the greenhouse effect?",
            ["Oxygen", "Nitrogen", "Carbon Dioxide", "Hydrogen"],
            "C",
            "Carbon dioxide is a major greenhouse gas that traps heat in the atmosphere",
            "Environmental Chemistry",
            Difficulty::Easy,
            "Chemistry",
        ),
        question(
            "q_007",
            "What is the value of π (pi) to two decimal places?",
            ["3.12", "3.14", "3.16", "3.18"],
            "B",
            "π is approximately 3.14159, so to two decimal places it's 3.14",
            "Geometry",
            Difficulty::Easy,
            "Mathematics",
        ),
        question(
            "q_008",
            "What is Newton's First Law also known as?",
            ["Law of Motion", "Law of Inertia", "Law of Action-Reaction", "Law of Acceleration"],
            "B",
            "Newton's First Law is the Law of Inertia: an object stays at rest or in uniform motion unless acted upon by an external force",
            "Mechanics",
            Difficulty::Medium,
            "Physics",
        ),
    ]
}

/// Inserts the sample bank when the question collection is empty.
/// Returns the number of questions inserted.
pub async fn seed_sample_questions(store: &dyn DocumentStore) -> Result<usize, StoreError> {
    if store.count_questions().await? > 0 {
        return Ok(0);
    }

    let questions = sample_questions();
    for q in &questions {
        store.insert_question(q).await?;
    }
    Ok(questions.len())
}
