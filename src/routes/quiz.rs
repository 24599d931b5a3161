use crate::{
    dto::workbook_dto::GenerateQuizPayload,
    error::{Error, Result},
    services::prompt_builder::QuestionCounts,
    AppState,
};
use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;
use validator::Validate;

/// Default question mix when the client does not specify one.
const DEFAULT_MCQS: u32 = 2;
const DEFAULT_SAQS: u32 = 1;

#[axum::debug_handler]
pub async fn generate_quiz(
    State(state): State<AppState>,
    Json(payload): Json<GenerateQuizPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;

    let topic = payload
        .topic
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| {
            Error::BadRequest("Topic is required and must be a non-empty string.".to_string())
        })?;

    let counts = QuestionCounts {
        multiple_choice: payload.num_mcqs.unwrap_or(DEFAULT_MCQS),
        short_answer: payload.num_saqs.unwrap_or(DEFAULT_SAQS),
    };
    if counts.total() == 0 {
        return Err(Error::BadRequest(
            "Please request at least one question (MCQ or SAQ).".to_string(),
        ));
    }

    let quiz = state.quiz_service.generate_quiz(topic, counts).await?;

    Ok(Json(json!({ "quiz": quiz })))
}
