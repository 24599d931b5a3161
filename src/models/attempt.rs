use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Ephemeral per-presentation record of a user's answers and the feedback
/// text they received. Created when a quiz is first shown, discarded when
/// the user leaves or a new quiz replaces it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Attempt {
    /// question id -> submitted answer (selected option text for MCQs,
    /// free text for SAQs)
    pub answers: HashMap<String, String>,
    /// question id -> feedback text; for SAQs this may embed a
    /// `Suggested Mark: X/Y` line
    pub feedback: HashMap<String, String>,
}

impl Attempt {
    pub fn record_answer(&mut self, question_id: impl Into<String>, answer: impl Into<String>) {
        self.answers.insert(question_id.into(), answer.into());
    }

    pub fn record_feedback(&mut self, question_id: impl Into<String>, feedback: impl Into<String>) {
        self.feedback.insert(question_id.into(), feedback.into());
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub earned: i32,
    pub possible: i32,
}

impl Score {
    pub fn ratio(&self) -> f64 {
        if self.possible <= 0 {
            return 0.0;
        }
        f64::from(self.earned) / f64::from(self.possible)
    }
}
