// src/db/mod.rs

//! Collection-level access to the document store.

pub mod postgres;
pub mod seed;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{
    analysis::AnalysisRecord, question::Question, test_config::TestConfig,
    test_result::TestResults,
};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("{0}")]
    Duplicate(String),
    #[error("corrupt document in '{collection}': {message}")]
    Corrupt {
        collection: &'static str,
        message: String,
    },
}

/// Query-and-insert operations over the `test_configs`, `questions`,
/// `test_results` and `analysis` collections.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn insert_test_config(&self, config: &TestConfig) -> Result<(), StoreError>;

    async fn find_test_config(&self, test_id: &str) -> Result<Option<TestConfig>, StoreError>;

    /// Questions whose subject is in `subjects` (any subject when empty),
    /// ordered by `question_id`, at most `limit` of them.
    async fn find_questions(
        &self,
        subjects: &[String],
        limit: i64,
    ) -> Result<Vec<Question>, StoreError>;

    async fn insert_question(&self, question: &Question) -> Result<(), StoreError>;

    async fn count_questions(&self) -> Result<i64, StoreError>;

    async fn insert_results(&self, results: &TestResults) -> Result<(), StoreError>;

    /// The earliest stored results for a test.
    async fn find_results(&self, test_id: &str) -> Result<Option<TestResults>, StoreError>;

    async fn insert_analysis(&self, record: &AnalysisRecord) -> Result<(), StoreError>;

    async fn find_analysis(&self, session_id: &str) -> Result<Option<AnalysisRecord>, StoreError>;

    /// The most recently generated analysis for a test.
    async fn find_latest_analysis(
        &self,
        test_id: &str,
    ) -> Result<Option<AnalysisRecord>, StoreError>;
}

pub type Store = Arc<dyn DocumentStore>;
