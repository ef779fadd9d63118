// src/config.rs

use std::env;

use dotenvy::dotenv;
use url::Url;

/// Allowed number of labeled options on a question.
pub const MIN_QUESTION_OPTIONS: usize = 2;
pub const MAX_QUESTION_OPTIONS: usize = 6;

pub const DEFAULT_GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const DEFAULT_GROQ_MODEL: &str = "llama3-8b-8192";
pub const DEFAULT_GEMINI_API_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-pro:generateContent";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub rust_log: String,
    pub server_port: u16,

    /// Credential for the chat-completion report provider. Unset disables it.
    pub groq_api_key: Option<String>,
    pub groq_api_url: String,
    pub groq_model: String,

    /// Credential for the generate-content report provider. Unset disables it.
    pub gemini_api_key: Option<String>,
    pub gemini_api_url: String,

    /// Timeout applied to every outbound report request, in seconds.
    pub report_timeout_secs: u64,

    /// Insert the sample question bank when the `questions` table is empty.
    pub seed_sample_questions: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: String::new(),
            rust_log: "info".to_string(),
            server_port: 8000,
            groq_api_key: None,
            groq_api_url: DEFAULT_GROQ_API_URL.to_string(),
            groq_model: DEFAULT_GROQ_MODEL.to_string(),
            gemini_api_key: None,
            gemini_api_url: DEFAULT_GEMINI_API_URL.to_string(),
            report_timeout_secs: 15,
            seed_sample_questions: true,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let defaults = Self::default();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

        let rust_log = env::var("RUST_LOG").unwrap_or(defaults.rust_log);

        let server_port = env::var("SERVER_PORT")
            .ok()
            .map(|v| v.parse().expect("SERVER_PORT must be a valid port number"))
            .unwrap_or(defaults.server_port);

        let groq_api_url = env::var("GROQ_API_URL").unwrap_or(defaults.groq_api_url);
        let gemini_api_url = env::var("GEMINI_API_URL").unwrap_or(defaults.gemini_api_url);
        Url::parse(&groq_api_url).expect("GROQ_API_URL must be a valid URL");
        Url::parse(&gemini_api_url).expect("GEMINI_API_URL must be a valid URL");

        let report_timeout_secs = env::var("REPORT_TIMEOUT_SECS")
            .ok()
            .map(|v| v.parse().expect("REPORT_TIMEOUT_SECS must be a number of seconds"))
            .unwrap_or(defaults.report_timeout_secs);
        assert!(report_timeout_secs > 0, "REPORT_TIMEOUT_SECS must be greater than zero");

        let seed_sample_questions = env::var("SEED_SAMPLE_QUESTIONS")
            .map(|v| !matches!(v.to_ascii_lowercase().as_str(), "0" | "false" | "no"))
            .unwrap_or(defaults.seed_sample_questions);

        Self {
            database_url,
            rust_log,
            server_port,
            groq_api_key: non_empty_var("GROQ_API_KEY"),
            groq_api_url,
            groq_model: env::var("GROQ_MODEL").unwrap_or(defaults.groq_model),
            gemini_api_key: non_empty_var("GEMINI_API_KEY"),
            gemini_api_url,
            report_timeout_secs,
            seed_sample_questions,
        }
    }
}

/// An empty credential counts as unset.
fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
