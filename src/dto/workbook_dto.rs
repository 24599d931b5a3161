use crate::services::tutor_service::ChatMessage;
use serde::Deserialize;
use validator::Validate;

/// Request bodies keep the client-facing camelCase field names. Required
/// fields are `Option` here so a missing field becomes a 400 with a
/// descriptive `{"error": ...}` body instead of a deserializer rejection.
#[derive(Debug, Deserialize, Validate, Default)]
#[serde(default)]
pub struct GenerateQuizPayload {
    #[validate(length(max = 200, message = "topic is too long"))]
    pub topic: Option<String>,
    #[serde(rename = "numMCQs")]
    #[validate(range(max = 25, message = "too many MCQs requested"))]
    pub num_mcqs: Option<u32>,
    #[serde(rename = "numSAQs")]
    #[validate(range(max = 25, message = "too many SAQs requested"))]
    pub num_saqs: Option<u32>,
}

#[derive(Debug, Deserialize, Validate, Default)]
#[serde(default)]
pub struct GenerateFeedbackPayload {
    #[serde(rename = "questionText")]
    pub question_text: Option<String>,
    #[serde(rename = "studentAnswer")]
    pub student_answer: Option<String>,
    #[serde(rename = "feedbackHints")]
    pub feedback_hints: Option<String>,
    #[validate(range(min = 1, max = 100, message = "points out of range"))]
    pub points: Option<i32>,
}

#[derive(Debug, Deserialize, Validate, Default)]
#[serde(default)]
pub struct SocraticTutorPayload {
    #[serde(rename = "questionText")]
    pub question_text: Option<String>,
    #[serde(rename = "studentCurrentAnswer")]
    pub student_current_answer: Option<String>,
    #[serde(rename = "conversationHistory")]
    pub conversation_history: Option<Vec<ChatMessage>>,
    #[serde(rename = "latestStudentChat")]
    pub latest_student_chat: Option<String>,
}
