use crate::models::attempt::{Attempt, Score};
use crate::models::question::QuestionDetails;
use crate::models::quiz::Quiz;
use regex::Regex;
use std::sync::OnceLock;

/// Minimum answer length (in characters) for the participation-credit
/// heuristic on short answers.
const HEURISTIC_MIN_ANSWER_LEN: usize = 10;

fn mark_pattern() -> &'static Regex {
    static MARK_RE: OnceLock<Regex> = OnceLock::new();
    MARK_RE.get_or_init(|| Regex::new(r"Suggested Mark:\s*(\d+)/(\d+)").unwrap())
}

/// Deterministic, replayable scoring over a completed attempt. Pure
/// function of (quiz, attempt); no hidden state, safe to recompute.
pub struct ScoringEngine;

impl ScoringEngine {
    pub fn score(quiz: &Quiz, attempt: &Attempt) -> Score {
        let mut earned = 0;

        for question in &quiz.questions {
            let answer = attempt.answers.get(&question.id).map(String::as_str);

            match &question.details {
                QuestionDetails::MultipleChoice(mc) => {
                    // Exact, case-sensitive match on the option text.
                    if answer == Some(mc.correct_answer.as_str()) {
                        earned += question.points;
                    }
                }
                QuestionDetails::ShortAnswer(_) => {
                    let feedback = attempt.feedback.get(&question.id).map(String::as_str);
                    earned += Self::score_short_answer(question.points, answer, feedback);
                }
            }
        }

        Score {
            earned,
            possible: quiz.total_points(),
        }
    }

    /// Prefer the mark embedded in the grader's prose; fall back to a
    /// coarse participation credit for a substantive answer when the mark
    /// is absent or its denominator disagrees with the question's points.
    fn score_short_answer(points: i32, answer: Option<&str>, feedback: Option<&str>) -> i32 {
        if let Some(feedback) = feedback {
            if let Some(caps) = mark_pattern().captures(feedback) {
                let numerator: i32 = caps[1].parse().unwrap_or(0);
                let denominator: i32 = caps[2].parse().unwrap_or(0);
                if denominator == points {
                    return numerator.clamp(0, points);
                }
            }
        }

        match answer {
            Some(a) if a.chars().count() > HEURISTIC_MIN_ANSWER_LEN => points / 2,
            _ => 0,
        }
    }
}
