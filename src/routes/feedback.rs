use crate::{
    dto::workbook_dto::GenerateFeedbackPayload,
    error::{Error, Result},
    services::feedback_service::DEFAULT_FEEDBACK_POINTS,
    AppState,
};
use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;
use validator::Validate;

#[axum::debug_handler]
pub async fn generate_feedback(
    State(state): State<AppState>,
    Json(payload): Json<GenerateFeedbackPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;

    let question_text = payload
        .question_text
        .as_deref()
        .filter(|t| !t.trim().is_empty());
    let student_answer = payload
        .student_answer
        .as_deref()
        .filter(|a| !a.trim().is_empty());

    let (question_text, student_answer) = match (question_text, student_answer) {
        (Some(q), Some(a)) => (q, a),
        _ => {
            return Err(Error::BadRequest(
                "Missing required fields: questionText and studentAnswer are required."
                    .to_string(),
            ))
        }
    };

    let feedback = state
        .feedback_service
        .generate_feedback(
            question_text,
            student_answer,
            payload.feedback_hints.as_deref().unwrap_or(""),
            payload.points.unwrap_or(DEFAULT_FEEDBACK_POINTS),
        )
        .await?;

    Ok(Json(json!({ "feedback": feedback })))
}
