use crate::error::Result;
use crate::services::gemini_service::{Role, TextGenerator, Turn};
use crate::services::prompt_builder::PromptBuilder;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// One message of the student/assistant chat as the client records it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    // Aliases accept the legacy client encoding of chat senders.
    #[serde(alias = "user")]
    Student,
    #[serde(alias = "ai")]
    Assistant,
}

#[derive(Clone)]
pub struct TutorService {
    generator: Arc<dyn TextGenerator>,
}

impl TutorService {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    pub async fn respond(
        &self,
        question_text: &str,
        student_current_answer: &str,
        history: &[ChatMessage],
        latest_student_chat: &str,
    ) -> Result<String> {
        let instruction = PromptBuilder::tutor_instruction(question_text, student_current_answer);
        let turns = to_turns(&instruction, question_text, history, latest_student_chat);

        tracing::info!(
            "Tutor turn for question \"{}\": {} turns ({} history messages)",
            question_text,
            turns.len(),
            history.len()
        );

        let response = self.generator.generate(&turns).await?;
        Ok(response.trim().to_string())
    }
}

/// Maps the recorded chat onto the ordered turn sequence the generation
/// service expects. The policy instruction is re-injected as a leading
/// user turn on every call, so the service never has to remember its
/// persona across stateless invocations.
pub fn to_turns(
    instruction: &str,
    question_text: &str,
    history: &[ChatMessage],
    latest_student_chat: &str,
) -> Vec<Turn> {
    let mut turns = vec![Turn::user(instruction)];

    for msg in history {
        turns.push(match msg.sender {
            Sender::Student => Turn::user(&msg.text),
            Sender::Assistant => Turn::model(&msg.text),
        });
    }

    if history.is_empty() && latest_student_chat.is_empty() {
        // Tutor opened with no prior interaction: the first rendered
        // message must come from the tutor, never a blank prompt.
        turns.push(Turn::model(opening_greeting(question_text)));
        return turns;
    }

    if !latest_student_chat.is_empty() {
        let already_last = turns
            .last()
            .map(|t| t.role == Role::User && t.text == latest_student_chat)
            .unwrap_or(false);
        if !already_last {
            turns.push(Turn::user(latest_student_chat));
        }
    }

    turns
}

fn opening_greeting(question_text: &str) -> String {
    format!(
        "Hello! I see you're looking at the question: \"{}\". What are your initial thoughts or where are you feeling stuck?",
        question_text
    )
}
