// src/routes.rs

use axum::{
    Router,
    http::Method,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    handlers::{analysis, health, mock_test, question},
    state::AppState,
};

/// Assembles the main application router.
///
/// * Merges all sub-routers (tests, questions, analysis).
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (store, report generator).
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    let test_routes = Router::new()
        .route("/create", post(mock_test::create_test))
        .route("/{test_id}/questions", get(mock_test::get_test_questions))
        .route("/{test_id}/submit", post(mock_test::submit_test))
        .route("/{test_id}/results", get(mock_test::get_test_results));

    let analysis_routes = Router::new()
        .route("/generate", post(analysis::generate_analysis))
        .route("/test/{test_id}", get(analysis::get_latest_analysis))
        .route("/{session_id}", get(analysis::get_analysis));

    Router::new()
        .route("/", get(health::root))
        .nest("/api/tests", test_routes)
        .route("/api/questions", post(question::create_question))
        .nest("/api/analysis", analysis_routes)
        .method_not_allowed_fallback(health::method_not_allowed)
        .fallback(health::not_found)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
