use crate::error::Result;
use crate::services::gemini_service::{TextGenerator, Turn};
use crate::services::prompt_builder::PromptBuilder;
use std::sync::Arc;

pub const DEFAULT_FEEDBACK_POINTS: i32 = 10;

/// Grades a short answer by asking the generation service for examiner
/// prose ending in a `Suggested Mark: N/points` line. The returned text
/// is free-form; `ScoringEngine` scrapes the mark back out of it.
#[derive(Clone)]
pub struct FeedbackService {
    generator: Arc<dyn TextGenerator>,
}

impl FeedbackService {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    pub async fn generate_feedback(
        &self,
        question_text: &str,
        student_answer: &str,
        feedback_hints: &str,
        points: i32,
    ) -> Result<String> {
        let prompt =
            PromptBuilder::feedback_prompt(question_text, student_answer, feedback_hints, points);

        tracing::info!("Requesting feedback for question \"{}\"", question_text);

        let feedback = self.generator.generate(&[Turn::user(prompt)]).await?;
        Ok(feedback.trim().to_string())
    }
}
