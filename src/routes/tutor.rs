use crate::{
    dto::workbook_dto::SocraticTutorPayload,
    error::{Error, Result},
    AppState,
};
use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;
use validator::Validate;

#[axum::debug_handler]
pub async fn socratic_tutor(
    State(state): State<AppState>,
    Json(payload): Json<SocraticTutorPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;

    let question_text = payload
        .question_text
        .as_deref()
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| Error::BadRequest("Missing required field: questionText.".to_string()))?;

    let history = payload.conversation_history.unwrap_or_default();

    let tutor_response = state
        .tutor_service
        .respond(
            question_text,
            payload.student_current_answer.as_deref().unwrap_or(""),
            &history,
            payload.latest_student_chat.as_deref().unwrap_or(""),
        )
        .await?;

    Ok(Json(json!({ "tutorResponse": tutor_response })))
}
