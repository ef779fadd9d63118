// src/handlers/analysis.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    response::IntoResponse,
};
use chrono::Utc;
use serde_json::json;

use crate::{
    db::Store,
    error::AppError,
    extractors::{AppPath, AppQuery},
    models::analysis::{AnalysisRecord, GenerateAnalysisParams},
    services::report::ReportGenerator,
};

/// Generates a performance report for a test's results and stores it.
///
/// The report generator never fails; when no remote provider answers the
/// offline template is used.
pub async fn generate_analysis(
    State(store): State<Store>,
    State(reports): State<Arc<ReportGenerator>>,
    AppQuery(params): AppQuery<GenerateAnalysisParams>,
) -> Result<impl IntoResponse, AppError> {
    let test_id = params
        .test_id
        .filter(|id| !id.is_empty())
        .ok_or(AppError::BadRequest("test_id is required".to_string()))?;

    let results = store
        .find_results(&test_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch results for test {}: {:?}", test_id, e);
            AppError::from(e)
        })?
        .ok_or(AppError::NotFound("Test results not found".to_string()))?;

    let report = reports.generate(&results).await;

    let record = AnalysisRecord {
        session_id: uuid::Uuid::new_v4().to_string(),
        test_id,
        analysis: report.text,
        provider: report.provider,
        generated_at: Utc::now(),
    };

    store.insert_analysis(&record).await.map_err(|e| {
        tracing::error!("Failed to store analysis for test {}: {:?}", record.test_id, e);
        AppError::from(e)
    })?;

    tracing::info!(
        "Stored analysis {} for test {} ({})",
        record.session_id,
        record.test_id,
        record.provider
    );

    Ok(Json(json!({
        "success": true,
        "analysis": record.analysis,
        "session_id": record.session_id
    })))
}

/// Retrieves a stored report by session id.
pub async fn get_analysis(
    State(store): State<Store>,
    AppPath(session_id): AppPath<String>,
) -> Result<impl IntoResponse, AppError> {
    let record = store
        .find_analysis(&session_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch analysis {}: {:?}", session_id, e);
            AppError::from(e)
        })?
        .ok_or(AppError::NotFound("Analysis not found".to_string()))?;

    Ok(Json(json!({
        "success": true,
        "analysis": record.analysis
    })))
}

/// Retrieves the most recent report generated for a test.
pub async fn get_latest_analysis(
    State(store): State<Store>,
    AppPath(test_id): AppPath<String>,
) -> Result<impl IntoResponse, AppError> {
    let record = store
        .find_latest_analysis(&test_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch analysis for test {}: {:?}", test_id, e);
            AppError::from(e)
        })?
        .ok_or(AppError::NotFound("Analysis not found".to_string()))?;

    Ok(Json(json!({
        "success": true,
        "analysis": record.analysis,
        "session_id": record.session_id,
        "provider": record.provider,
        "generated_at": record.generated_at
    })))
}
