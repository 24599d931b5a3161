use crate::models::attempt::Score;
use crate::models::quiz::{Quiz, QuizType};
use crate::models::user_record::{CompletedQuiz, RecordUpdate, UserRecord};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Score ratio at or above which a module mastery badge is awarded.
/// Policy constant, not derived.
pub const MASTERY_RATIO: f64 = 0.8;

/// Awarded once every curriculum quiz has been completed.
pub const CHAMPION_BADGE: &str = "AI Workbook Champion";

/// Narrow interface over the external per-user record store. Updates are
/// field-level increments and array unions; the point increment is
/// unconditional, so callers must pre-check completion before re-sending
/// a completion event (the uniqueness guarantee lives in that pre-check,
/// not in the store).
pub trait UserStore: Send + Sync {
    fn get_or_create(&self, user_id: &str) -> UserRecord;
    fn apply(&self, user_id: &str, update: RecordUpdate);
}

/// RwLock-backed store used in tests and single-process deployments.
#[derive(Default)]
pub struct InMemoryUserStore {
    records: RwLock<HashMap<String, UserRecord>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserStore for InMemoryUserStore {
    fn get_or_create(&self, user_id: &str) -> UserRecord {
        let mut records = self.records.write().expect("user store lock poisoned");
        records.entry(user_id.to_string()).or_default().clone()
    }

    fn apply(&self, user_id: &str, update: RecordUpdate) {
        let mut records = self.records.write().expect("user store lock poisoned");
        let record = records.entry(user_id.to_string()).or_default();

        record.points += update.points_delta;
        if let Some(lesson) = update.completed_lesson {
            if !record.completed_lessons.contains(&lesson) {
                record.completed_lessons.push(lesson);
            }
        }
        if let Some(quiz) = update.completed_quiz {
            if !record.has_completed_quiz(&quiz.quiz_id) {
                record.completed_quizzes.push(quiz);
            }
        }
        if let Some(badge) = update.badge {
            if !record.badges.contains(&badge) {
                record.badges.push(badge);
            }
        }
    }
}

/// Applies the completion policy on quiz submission: persist the score,
/// increment points by the module bonus plus earned marks, and award
/// badges at the policy thresholds. Live quizzes never persist.
#[derive(Clone)]
pub struct ProgressService {
    store: Arc<dyn UserStore>,
    curriculum_quiz_ids: Vec<String>,
}

impl ProgressService {
    pub fn new(store: Arc<dyn UserStore>, curriculum_quiz_ids: Vec<String>) -> Self {
        Self {
            store,
            curriculum_quiz_ids,
        }
    }

    pub fn record(&self, user_id: &str) -> UserRecord {
        self.store.get_or_create(user_id)
    }

    /// Returns false when the lesson was already completed (idempotent
    /// fast path; no points are re-awarded).
    pub fn mark_lesson_completed(&self, user_id: &str, lesson_id: &str, points: i64) -> bool {
        let record = self.store.get_or_create(user_id);
        if record.has_completed_lesson(lesson_id) {
            return false;
        }
        self.store.apply(
            user_id,
            RecordUpdate {
                points_delta: points,
                completed_lesson: Some(lesson_id.to_string()),
                ..Default::default()
            },
        );
        true
    }

    /// Returns false when nothing was persisted (live quiz, or already
    /// completed).
    pub fn mark_quiz_completed(
        &self,
        user_id: &str,
        quiz: &Quiz,
        score: Score,
        completion_bonus: i64,
    ) -> bool {
        if quiz.quiz_type == QuizType::Live {
            return false;
        }

        let record = self.store.get_or_create(user_id);
        if record.has_completed_quiz(&quiz.id) {
            tracing::warn!("Quiz {} already completed by {}; skipping", quiz.id, user_id);
            return false;
        }

        self.store.apply(
            user_id,
            RecordUpdate {
                points_delta: completion_bonus + i64::from(score.earned),
                completed_quiz: Some(CompletedQuiz {
                    quiz_id: quiz.id.clone(),
                    score,
                    date: chrono::Utc::now(),
                }),
                ..Default::default()
            },
        );

        if score.possible > 0 && score.ratio() >= MASTERY_RATIO {
            self.add_badge(user_id, &format!("{} Master", quiz.title));
        }

        let record = self.store.get_or_create(user_id);
        let all_done = self
            .curriculum_quiz_ids
            .iter()
            .all(|id| record.has_completed_quiz(id));
        if all_done && !self.curriculum_quiz_ids.is_empty() {
            self.add_badge(user_id, CHAMPION_BADGE);
        }

        true
    }

    pub fn add_badge(&self, user_id: &str, badge: &str) {
        let record = self.store.get_or_create(user_id);
        if record.has_badge(badge) {
            return;
        }
        self.store.apply(
            user_id,
            RecordUpdate {
                badge: Some(badge.to_string()),
                ..Default::default()
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::question::{Question, QuestionDetails, ShortAnswerDetails};

    fn curriculum_quiz(id: &str, title: &str, points: i32) -> Quiz {
        Quiz {
            id: id.to_string(),
            title: title.to_string(),
            questions: vec![Question {
                id: "s1".to_string(),
                text: "Discuss.".to_string(),
                points,
                details: QuestionDetails::ShortAnswer(ShortAnswerDetails {
                    feedback_hints: String::new(),
                }),
            }],
            quiz_type: QuizType::Curriculum,
        }
    }

    fn service(ids: &[&str]) -> ProgressService {
        ProgressService::new(
            Arc::new(InMemoryUserStore::new()),
            ids.iter().map(|s| s.to_string()).collect(),
        )
    }

    #[test]
    fn quiz_completion_persists_score_and_points() {
        let svc = service(&["quiz-a", "quiz-b"]);
        let quiz = curriculum_quiz("quiz-a", "Robotics", 20);
        let score = Score {
            earned: 14,
            possible: 20,
        };

        assert!(svc.mark_quiz_completed("u1", &quiz, score, 50));
        let record = svc.record("u1");
        assert_eq!(record.points, 64);
        assert!(record.has_completed_quiz("quiz-a"));
    }

    #[test]
    fn repeated_completion_does_not_double_increment() {
        let svc = service(&["quiz-a"]);
        let quiz = curriculum_quiz("quiz-a", "Robotics", 20);
        let score = Score {
            earned: 10,
            possible: 20,
        };

        assert!(svc.mark_quiz_completed("u1", &quiz, score, 50));
        assert!(!svc.mark_quiz_completed("u1", &quiz, score, 50));
        assert_eq!(svc.record("u1").points, 60);
        assert_eq!(svc.record("u1").completed_quizzes.len(), 1);
    }

    #[test]
    fn live_quizzes_are_never_persisted() {
        let svc = service(&["quiz-a"]);
        let mut quiz = curriculum_quiz("live-quiz-topic-1", "Live", 20);
        quiz.quiz_type = QuizType::Live;
        assert!(!svc.mark_quiz_completed(
            "u1",
            &quiz,
            Score {
                earned: 20,
                possible: 20
            },
            0
        ));
        assert_eq!(svc.record("u1").points, 0);
    }

    #[test]
    fn mastery_badge_at_eighty_percent() {
        let svc = service(&["quiz-a", "quiz-b"]);
        let quiz = curriculum_quiz("quiz-a", "Robotics", 20);

        assert!(svc.mark_quiz_completed(
            "u1",
            &quiz,
            Score {
                earned: 16,
                possible: 20
            },
            0
        ));
        assert!(svc.record("u1").has_badge("Robotics Master"));

        // Just below the threshold earns nothing.
        let quiz_b = curriculum_quiz("quiz-b", "AI Ethics", 20);
        assert!(svc.mark_quiz_completed(
            "u1",
            &quiz_b,
            Score {
                earned: 15,
                possible: 20
            },
            0
        ));
        assert!(!svc.record("u1").has_badge("AI Ethics Master"));
    }

    #[test]
    fn champion_badge_when_all_curriculum_quizzes_done() {
        let svc = service(&["quiz-a", "quiz-b"]);
        let low = Score {
            earned: 5,
            possible: 20,
        };

        svc.mark_quiz_completed("u1", &curriculum_quiz("quiz-a", "A", 20), low, 0);
        assert!(!svc.record("u1").has_badge(CHAMPION_BADGE));

        svc.mark_quiz_completed("u1", &curriculum_quiz("quiz-b", "B", 20), low, 0);
        assert!(svc.record("u1").has_badge(CHAMPION_BADGE));
    }

    #[test]
    fn lesson_completion_is_idempotent() {
        let svc = service(&[]);
        assert!(svc.mark_lesson_completed("u1", "lesson-1", 15));
        assert!(!svc.mark_lesson_completed("u1", "lesson-1", 15));
        let record = svc.record("u1");
        assert_eq!(record.points, 15);
        assert_eq!(record.completed_lessons, vec!["lesson-1".to_string()]);
    }

    #[test]
    fn badge_award_is_idempotent() {
        let svc = service(&[]);
        svc.add_badge("u1", "Robotics Master");
        svc.add_badge("u1", "Robotics Master");
        assert_eq!(svc.record("u1").badges.len(), 1);
    }
}
