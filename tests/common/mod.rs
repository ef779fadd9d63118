// tests/common/mod.rs

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mock_test_api::{
    db::{DocumentStore, StoreError},
    models::{
        analysis::AnalysisRecord,
        question::Question,
        test_config::{Difficulty, TestConfig},
        test_result::TestResults,
    },
    routes,
    services::report::ReportGenerator,
    state::AppState,
};

/// In-memory stand-in for the Postgres store.
#[derive(Default)]
pub struct MemoryStore {
    configs: Mutex<Vec<TestConfig>>,
    questions: Mutex<Vec<Question>>,
    results: Mutex<Vec<TestResults>>,
    analyses: Mutex<Vec<AnalysisRecord>>,
}

impl MemoryStore {
    pub fn results_for(&self, test_id: &str) -> Vec<TestResults> {
        self.results
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.test_id == test_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert_test_config(&self, config: &TestConfig) -> Result<(), StoreError> {
        let mut configs = self.configs.lock().unwrap();
        if configs.iter().any(|c| c.test_id == config.test_id) {
            return Err(StoreError::Duplicate(format!(
                "Test '{}' already exists",
                config.test_id
            )));
        }
        configs.push(config.clone());
        Ok(())
    }

    async fn find_test_config(&self, test_id: &str) -> Result<Option<TestConfig>, StoreError> {
        Ok(self
            .configs
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.test_id == test_id)
            .cloned())
    }

    async fn find_questions(
        &self,
        subjects: &[String],
        limit: i64,
    ) -> Result<Vec<Question>, StoreError> {
        let mut matching: Vec<Question> = self
            .questions
            .lock()
            .unwrap()
            .iter()
            .filter(|q| subjects.is_empty() || subjects.contains(&q.subject))
            .cloned()
            .collect();
        matching.sort_by(|a, b| a.question_id.cmp(&b.question_id));
        matching.truncate(limit.max(0) as usize);
        Ok(matching)
    }

    async fn insert_question(&self, question: &Question) -> Result<(), StoreError> {
        let mut questions = self.questions.lock().unwrap();
        if questions.iter().any(|q| q.question_id == question.question_id) {
            return Err(StoreError::Duplicate(format!(
                "Question '{}' already exists",
                question.question_id
            )));
        }
        questions.push(question.clone());
        Ok(())
    }

    async fn count_questions(&self) -> Result<i64, StoreError> {
        Ok(self.questions.lock().unwrap().len() as i64)
    }

    async fn insert_results(&self, results: &TestResults) -> Result<(), StoreError> {
        self.results.lock().unwrap().push(results.clone());
        Ok(())
    }

    async fn find_results(&self, test_id: &str) -> Result<Option<TestResults>, StoreError> {
        Ok(self
            .results
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.test_id == test_id)
            .cloned())
    }

    async fn insert_analysis(&self, record: &AnalysisRecord) -> Result<(), StoreError> {
        self.analyses.lock().unwrap().push(record.clone());
        Ok(())
    }

    async fn find_analysis(&self, session_id: &str) -> Result<Option<AnalysisRecord>, StoreError> {
        Ok(self
            .analyses
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.session_id == session_id)
            .cloned())
    }

    async fn find_latest_analysis(
        &self,
        test_id: &str,
    ) -> Result<Option<AnalysisRecord>, StoreError> {
        Ok(self
            .analyses
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|a| a.test_id == test_id)
            .cloned())
    }
}

pub fn question(id: &str, subject: &str, correct_answer: &str) -> Question {
    Question {
        question_id: id.to_string(),
        text: format!("Question {}", id),
        options: BTreeMap::from([
            ("A".to_string(), "Option A".to_string()),
            ("B".to_string(), "Option B".to_string()),
            ("C".to_string(), "Option C".to_string()),
            ("D".to_string(), "Option D".to_string()),
        ]),
        correct_answer: correct_answer.to_string(),
        explanation: Some(format!("Because {}", correct_answer)),
        topic: "General".to_string(),
        difficulty: Difficulty::Easy,
        subject: subject.to_string(),
        marks: 1,
    }
}

/// Spawns the app on a random port for testing.
/// Returns the base URL (e.g., "http://127.0.0.1:12345").
pub async fn spawn_app(store: Arc<MemoryStore>, reports: ReportGenerator) -> String {
    let state = AppState {
        store,
        reports: Arc::new(reports),
    };
    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://127.0.0.1:{}", port)
}

/// App with an empty store and no remote report providers.
pub async fn spawn_default_app() -> (String, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::default());
    let address = spawn_app(store.clone(), ReportGenerator::new(Vec::new())).await;
    (address, store)
}
