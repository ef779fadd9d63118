// src/db/postgres.rs

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, prelude::FromRow, types::Json};

use super::{DocumentStore, StoreError};
use crate::models::{
    analysis::AnalysisRecord, question::Question, test_config::TestConfig,
    test_result::TestResults,
};

/// `DocumentStore` backed by PostgreSQL, one table per collection.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Turns a unique-key violation into `StoreError::Duplicate`.
fn duplicate_or(err: sqlx::Error, message: impl FnOnce() -> String) -> StoreError {
    let unique_violation = err
        .as_database_error()
        .is_some_and(|db_err| db_err.is_unique_violation());

    if unique_violation {
        StoreError::Duplicate(message())
    } else {
        StoreError::Database(err)
    }
}

#[derive(FromRow)]
struct TestConfigRow {
    test_id: String,
    subject: Option<String>,
    subjects: Json<Vec<String>>,
    duration: i32,
    total_questions: i32,
    topics: Json<Vec<String>>,
    difficulty: String,
    status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<TestConfigRow> for TestConfig {
    type Error = StoreError;

    fn try_from(row: TestConfigRow) -> Result<Self, Self::Error> {
        Ok(TestConfig {
            test_id: row.test_id,
            subject: row.subject,
            subjects: row.subjects.0,
            duration: row.duration,
            total_questions: row.total_questions,
            topics: row.topics.0,
            difficulty: row.difficulty.parse().map_err(|message| StoreError::Corrupt {
                collection: "test_configs",
                message,
            })?,
            status: row.status,
            created_at: row.created_at,
        })
    }
}

#[derive(FromRow)]
struct QuestionRow {
    question_id: String,
    text: String,
    options: Json<BTreeMap<String, String>>,
    correct_answer: String,
    explanation: Option<String>,
    topic: String,
    difficulty: String,
    subject: String,
    marks: i32,
}

impl TryFrom<QuestionRow> for Question {
    type Error = StoreError;

    fn try_from(row: QuestionRow) -> Result<Self, Self::Error> {
        Ok(Question {
            question_id: row.question_id,
            text: row.text,
            options: row.options.0,
            correct_answer: row.correct_answer,
            explanation: row.explanation,
            topic: row.topic,
            difficulty: row.difficulty.parse().map_err(|message| StoreError::Corrupt {
                collection: "questions",
                message,
            })?,
            subject: row.subject,
            marks: row.marks,
        })
    }
}

#[derive(FromRow)]
struct TestResultsRow {
    test_id: String,
    score: f64,
    correct_answers: i32,
    total_questions: i32,
    time_taken: i64,
    percentage: f64,
    performance_level: String,
    submitted_at: DateTime<Utc>,
}

impl From<TestResultsRow> for TestResults {
    fn from(row: TestResultsRow) -> Self {
        TestResults {
            test_id: row.test_id,
            score: row.score,
            correct_answers: row.correct_answers,
            total_questions: row.total_questions,
            time_taken: row.time_taken,
            percentage: row.percentage,
            performance_level: row.performance_level,
            submitted_at: row.submitted_at,
        }
    }
}

#[derive(FromRow)]
struct AnalysisRow {
    session_id: String,
    test_id: String,
    analysis: String,
    provider: String,
    generated_at: DateTime<Utc>,
}

impl TryFrom<AnalysisRow> for AnalysisRecord {
    type Error = StoreError;

    fn try_from(row: AnalysisRow) -> Result<Self, Self::Error> {
        Ok(AnalysisRecord {
            session_id: row.session_id,
            test_id: row.test_id,
            analysis: row.analysis,
            provider: row.provider.parse().map_err(|message| StoreError::Corrupt {
                collection: "analysis",
                message,
            })?,
            generated_at: row.generated_at,
        })
    }
}

#[async_trait]
impl DocumentStore for PgStore {
    async fn insert_test_config(&self, config: &TestConfig) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO test_configs
                (test_id, subject, subjects, duration, total_questions, topics, difficulty, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(&config.test_id)
        .bind(&config.subject)
        .bind(Json(&config.subjects))
        .bind(config.duration)
        .bind(config.total_questions)
        .bind(Json(&config.topics))
        .bind(config.difficulty.as_str())
        .bind(&config.status)
        .bind(config.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            duplicate_or(e, || format!("Test '{}' already exists", config.test_id))
        })?;

        Ok(())
    }

    async fn find_test_config(&self, test_id: &str) -> Result<Option<TestConfig>, StoreError> {
        sqlx::query_as::<_, TestConfigRow>(
            r#"
            SELECT test_id, subject, subjects, duration, total_questions, topics, difficulty, status, created_at
            FROM test_configs
            WHERE test_id = $1
            "#,
        )
        .bind(test_id)
        .fetch_optional(&self.pool)
        .await?
        .map(TestConfig::try_from)
        .transpose()
    }

    async fn find_questions(
        &self,
        subjects: &[String],
        limit: i64,
    ) -> Result<Vec<Question>, StoreError> {
        let rows = sqlx::query_as::<_, QuestionRow>(
            r#"
            SELECT question_id, text, options, correct_answer, explanation, topic, difficulty, subject, marks
            FROM questions
            WHERE (cardinality($1::TEXT[]) = 0 OR subject = ANY($1))
            ORDER BY question_id
            LIMIT $2
            "#,
        )
        .bind(subjects)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Question::try_from).collect()
    }

    async fn insert_question(&self, question: &Question) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO questions
                (question_id, text, options, correct_answer, explanation, topic, difficulty, subject, marks)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(&question.question_id)
        .bind(&question.text)
        .bind(Json(&question.options))
        .bind(&question.correct_answer)
        .bind(&question.explanation)
        .bind(&question.topic)
        .bind(question.difficulty.as_str())
        .bind(&question.subject)
        .bind(question.marks)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            duplicate_or(e, || format!("Question '{}' already exists", question.question_id))
        })?;

        Ok(())
    }

    async fn count_questions(&self) -> Result<i64, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM questions")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn insert_results(&self, results: &TestResults) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO test_results
                (test_id, score, correct_answers, total_questions, time_taken, percentage, performance_level, submitted_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(&results.test_id)
        .bind(results.score)
        .bind(results.correct_answers)
        .bind(results.total_questions)
        .bind(results.time_taken)
        .bind(results.percentage)
        .bind(&results.performance_level)
        .bind(results.submitted_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_results(&self, test_id: &str) -> Result<Option<TestResults>, StoreError> {
        let row = sqlx::query_as::<_, TestResultsRow>(
            r#"
            SELECT test_id, score, correct_answers, total_questions, time_taken, percentage, performance_level, submitted_at
            FROM test_results
            WHERE test_id = $1
            ORDER BY submitted_at ASC, id ASC
            LIMIT 1
            "#,
        )
        .bind(test_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(TestResults::from))
    }

    async fn insert_analysis(&self, record: &AnalysisRecord) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO analysis (session_id, test_id, analysis, provider, generated_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(&record.session_id)
        .bind(&record.test_id)
        .bind(&record.analysis)
        .bind(record.provider.as_str())
        .bind(record.generated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_analysis(&self, session_id: &str) -> Result<Option<AnalysisRecord>, StoreError> {
        sqlx::query_as::<_, AnalysisRow>(
            r#"
            SELECT session_id, test_id, analysis, provider, generated_at
            FROM analysis
            WHERE session_id = $1
            "#,
        )
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await?
        .map(AnalysisRecord::try_from)
        .transpose()
    }

    async fn find_latest_analysis(
        &self,
        test_id: &str,
    ) -> Result<Option<AnalysisRecord>, StoreError> {
        sqlx::query_as::<_, AnalysisRow>(
            r#"
            SELECT session_id, test_id, analysis, provider, generated_at
            FROM analysis
            WHERE test_id = $1
            ORDER BY generated_at DESC
            LIMIT 1
            "#,
        )
        .bind(test_id)
        .fetch_optional(&self.pool)
        .await?
        .map(AnalysisRecord::try_from)
        .transpose()
    }
}
