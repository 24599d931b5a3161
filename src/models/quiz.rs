use crate::models::question::Question;
use serde::{Deserialize, Serialize};

/// An immutable, ordered set of questions. Regenerating a quiz for the
/// same topic mints a new id; a quiz is never mutated in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quiz {
    pub id: String,
    pub title: String,
    pub questions: Vec<Question>,
    #[serde(rename = "quizType", default)]
    pub quiz_type: QuizType,
}

/// Live quizzes are generated ad hoc and never persisted as progress;
/// curriculum quizzes belong to a fixed module and contribute to totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum QuizType {
    #[default]
    Live,
    Curriculum,
}

impl Quiz {
    /// Sum of every question's points, regardless of answer state.
    pub fn total_points(&self) -> i32 {
        self.questions.iter().map(|q| q.points).sum()
    }
}
