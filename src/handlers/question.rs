// src/handlers/question.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;
use validator::Validate;

use crate::{
    db::Store, error::AppError, extractors::AppJson, models::question::CreateQuestionRequest,
};

/// Adds a question to the bank.
pub async fn create_question(
    State(store): State<Store>,
    AppJson(payload): AppJson<CreateQuestionRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let question = payload.into_question();

    store.insert_question(&question).await.map_err(|e| {
        tracing::error!("Failed to create question: {:?}", e);
        AppError::from(e)
    })?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "question_id": question.question_id,
            "message": "Question created successfully"
        })),
    ))
}
