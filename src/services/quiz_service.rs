use crate::error::{Error, Result};
use crate::models::question::{
    MultipleChoiceDetails, Question, QuestionDetails, ShortAnswerDetails, DEFAULT_MCQ_POINTS,
    DEFAULT_SAQ_POINTS,
};
use crate::models::quiz::{Quiz, QuizType};
use crate::services::gemini_service::{TextGenerator, Turn};
use crate::services::prompt_builder::{PromptBuilder, QuestionCounts};
use crate::utils::extract::extract_json;
use serde_json::Value as JsonValue;
use std::sync::Arc;

#[derive(Clone)]
pub struct QuizService {
    generator: Arc<dyn TextGenerator>,
}

impl QuizService {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Full generation pipeline: prompt -> generation service -> JSON
    /// extraction -> schema validation -> quiz assembly. A quiz with zero
    /// surviving questions is a failure, never an empty quiz.
    pub async fn generate_quiz(&self, topic: &str, counts: QuestionCounts) -> Result<Quiz> {
        let prompt = PromptBuilder::quiz_prompt(topic, counts)?;
        let topic = topic.trim();

        tracing::info!(
            "Requesting quiz for topic \"{}\" ({} MCQs, {} SAQs)",
            topic,
            counts.multiple_choice,
            counts.short_answer
        );

        let raw = self.generator.generate(&[Turn::user(prompt)]).await?;
        let cleaned = extract_json(&raw);

        let parsed: JsonValue = serde_json::from_str(&cleaned).map_err(|e| {
            tracing::error!("Cleaned generation output failed to parse: {}", e);
            Error::MalformedContent(
                "generated content was not valid JSON even after cleaning".to_string(),
            )
        })?;

        let questions = validate_questions(&parsed)?;
        tracing::info!("Validated {} questions for topic \"{}\"", questions.len(), topic);

        Ok(Quiz {
            id: live_quiz_id(topic),
            title: format!("Live Quiz on: {}", topic),
            questions,
            quiz_type: QuizType::Live,
        })
    }
}

/// Topic slug plus a millisecond timestamp, so repeated generations for
/// the same topic never collide.
pub fn live_quiz_id(topic: &str) -> String {
    let slug: String = topic.split_whitespace().collect::<Vec<_>>().join("-");
    format!(
        "live-quiz-{}-{}",
        slug,
        chrono::Utc::now().timestamp_millis()
    )
}

/// Validates the extracted payload against the question data model.
/// Individual bad elements are dropped (partial model errors should not
/// discard an otherwise-usable quiz); zero survivors is a hard failure.
pub fn validate_questions(parsed: &JsonValue) -> Result<Vec<Question>> {
    let items = parsed.as_array().ok_or_else(|| {
        Error::MalformedContent("generated content is not a valid quiz array".to_string())
    })?;

    let mut questions = Vec::new();
    for (idx, item) in items.iter().enumerate() {
        match coerce_question(item, idx) {
            Some(q) => questions.push(q),
            None => tracing::warn!("Dropping malformed question at index {}", idx),
        }
    }

    if questions.is_empty() {
        return Err(Error::MalformedContent(
            "generated content contains no valid quiz questions".to_string(),
        ));
    }

    Ok(questions)
}

/// Coerces one loosely-typed element into a `Question`, or rejects it.
/// Extra fields from the generation service are ignored.
fn coerce_question(v: &JsonValue, idx: usize) -> Option<Question> {
    let type_str = v.get("type").and_then(|s| s.as_str())?;
    let text = v.get("text").and_then(|s| s.as_str())?.trim().to_string();
    if text.is_empty() {
        return None;
    }

    let (details, default_points) = match type_str {
        "mcq" => {
            let options: Vec<String> = v
                .get("options")?
                .as_array()?
                .iter()
                .filter_map(|o| o.as_str())
                .map(|s| s.to_string())
                .collect();

            if options.len() != 4
                || options.iter().any(|o| o.trim().is_empty())
                || has_duplicates(&options)
            {
                return None;
            }

            let correct_answer = v.get("correctAnswer").and_then(|s| s.as_str())?.to_string();
            if !options.contains(&correct_answer) {
                return None;
            }

            let explanation = v
                .get("explanation")
                .and_then(|s| s.as_str())
                .unwrap_or_default()
                .to_string();

            (
                QuestionDetails::MultipleChoice(MultipleChoiceDetails {
                    options,
                    correct_answer,
                    explanation,
                }),
                DEFAULT_MCQ_POINTS,
            )
        }
        "saq" => {
            let feedback_hints = v
                .get("feedbackHints")
                .and_then(|s| s.as_str())
                .unwrap_or_default()
                .to_string();

            (
                QuestionDetails::ShortAnswer(ShortAnswerDetails { feedback_hints }),
                DEFAULT_SAQ_POINTS,
            )
        }
        _ => return None,
    };

    let points = v
        .get("points")
        .and_then(|p| p.as_i64())
        .map(|p| p as i32)
        .unwrap_or(default_points);
    if points <= 0 {
        return None;
    }

    let id = v
        .get("id")
        .and_then(|s| s.as_str())
        .map(|s| s.to_string())
        .unwrap_or_else(|| format!("{}_{}", type_str, idx + 1));

    Some(Question {
        id,
        text,
        points,
        details,
    })
}

fn has_duplicates(options: &[String]) -> bool {
    let mut seen = std::collections::HashSet::new();
    options.iter().any(|o| !seen.insert(o))
}
