use crate::models::attempt::Score;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-user progress document, owned by the external user-record store.
/// The core consumes it through `UserStore`; it never reaches into the
/// persistence layer directly.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserRecord {
    pub points: i64,
    #[serde(rename = "completedLessons")]
    pub completed_lessons: Vec<String>,
    #[serde(rename = "completedQuizzes")]
    pub completed_quizzes: Vec<CompletedQuiz>,
    pub badges: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletedQuiz {
    #[serde(rename = "quizId")]
    pub quiz_id: String,
    pub score: Score,
    pub date: DateTime<Utc>,
}

impl UserRecord {
    pub fn has_completed_quiz(&self, quiz_id: &str) -> bool {
        self.completed_quizzes.iter().any(|q| q.quiz_id == quiz_id)
    }

    pub fn has_completed_lesson(&self, lesson_id: &str) -> bool {
        self.completed_lessons.iter().any(|l| l == lesson_id)
    }

    pub fn has_badge(&self, badge: &str) -> bool {
        self.badges.iter().any(|b| b == badge)
    }
}

/// Increment-style update applied atomically against a user record:
/// the point delta is an unconditional increment, the list fields have
/// array-union semantics (duplicates are dropped on append).
#[derive(Debug, Clone, Default)]
pub struct RecordUpdate {
    pub points_delta: i64,
    pub completed_lesson: Option<String>,
    pub completed_quiz: Option<CompletedQuiz>,
    pub badge: Option<String>,
}
