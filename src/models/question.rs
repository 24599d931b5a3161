use serde::{Deserialize, Serialize};

pub const DEFAULT_MCQ_POINTS: i32 = 10;
pub const DEFAULT_SAQ_POINTS: i32 = 20;

/// A single quiz question as served to the client. The wire shape is the
/// one the generation service is asked to produce: a `type` tag of `mcq`
/// or `saq` with the variant fields flattened alongside the common ones.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub text: String,
    pub points: i32,
    #[serde(flatten)]
    pub details: QuestionDetails,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum QuestionDetails {
    #[serde(rename = "mcq")]
    MultipleChoice(MultipleChoiceDetails),
    #[serde(rename = "saq")]
    ShortAnswer(ShortAnswerDetails),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultipleChoiceDetails {
    pub options: Vec<String>,
    #[serde(rename = "correctAnswer")]
    pub correct_answer: String,
    #[serde(default)]
    pub explanation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShortAnswerDetails {
    #[serde(rename = "feedbackHints", default)]
    pub feedback_hints: String,
}
