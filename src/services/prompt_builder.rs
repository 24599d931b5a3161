use crate::error::{Error, Result};

/// Requested question mix for a generated quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionCounts {
    pub multiple_choice: u32,
    pub short_answer: u32,
}

impl QuestionCounts {
    pub fn total(&self) -> u32 {
        self.multiple_choice + self.short_answer
    }
}

/// Builds the instruction strings sent to the generation service. The
/// quiz prompt spells out the exact output contract (field names,
/// cardinalities, a literal example) and demands a bare JSON array; the
/// service does not always comply, which is why `extract_json` exists.
pub struct PromptBuilder;

impl PromptBuilder {
    pub fn quiz_prompt(topic: &str, counts: QuestionCounts) -> Result<String> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(Error::BadRequest(
                "Topic is required and must be a non-empty string.".to_string(),
            ));
        }
        if counts.total() == 0 {
            return Err(Error::BadRequest(
                "Please request at least one question (MCQ or SAQ).".to_string(),
            ));
        }

        Ok(format!(
            r#"Generate an array of {total} unique exam-style questions suitable for an IB Digital Society student on the topic of "{topic}".
The questions should consist of exactly {mcqs} Multiple Choice Questions (MCQs) and exactly {saqs} Short Answer Questions (SAQs).
Present them intermingled or grouped, but ensure the total counts for each type are met.

For each MCQ, provide:
1.  "id": A unique string identifier (e.g., "mcq_1").
2.  "type": "mcq" (string literal "mcq").
3.  "text": The full question text.
4.  "options": An array of exactly 4 distinct string options.
5.  "correctAnswer": A string that exactly matches one of the provided options.
6.  "explanation": A brief explanation for why the correct answer is correct, suitable for a student.
7.  "points": 10 (integer).

For each SAQ (Short Answer Question), provide:
1.  "id": A unique string identifier (e.g., "saq_1").
2.  "type": "saq" (string literal "saq").
3.  "text": The full question text, clearly requiring a written response of a few sentences to a paragraph.
4.  "feedbackHints": Key concepts, terms, or marking points an examiner would look for in an ideal answer.
5.  "points": 20 (integer).

Return ONLY a valid JSON array of these question objects. Do not include any introductory text, surrounding markdown formatting like ```json, or any other text outside the JSON array.
Example of a mixed array:
[
  {{ "id": "mcq_topic_1", "type": "mcq", "text": "What is AI ethics primarily concerned with?", "options": ["Algorithm speed", "Moral implications of AI", "Hardware requirements", "Data storage capacity"], "correctAnswer": "Moral implications of AI", "explanation": "AI ethics explores the moral principles and values that should govern the development and use of artificial intelligence.", "points": 10 }},
  {{ "id": "saq_topic_1", "type": "saq", "text": "Explain two ethical considerations when developing facial recognition AI.", "feedbackHints": "Consider privacy, bias, surveillance, consent, accuracy, potential for misuse.", "points": 20 }}
]"#,
            total = counts.total(),
            mcqs = counts.multiple_choice,
            saqs = counts.short_answer,
        ))
    }

    pub fn feedback_prompt(
        question_text: &str,
        student_answer: &str,
        feedback_hints: &str,
        points: i32,
    ) -> String {
        let hints = if feedback_hints.trim().is_empty() {
            "Evaluate based on understanding, application of concepts, clarity, and critical thinking relevant to IB Digital Society."
        } else {
            feedback_hints
        };

        format!(
            r#"You are an expert IB Digital Society examiner providing feedback on a student's short answer.
The question was: "{question_text}"
The student's answer is: "{student_answer}"
Key concepts, marking points, or guidance for this question: "{hints}"
The question is out of {points} points.

Provide constructive feedback on the student's answer. Highlight strengths and areas for improvement.
Keep the feedback concise, specific, and constructive, suitable for an IB student.
Conclude with a suggested mark out of {points} points and a brief justification for this mark.

Format your response clearly. Start the main feedback text directly.
At the end, include a line that says:
"Suggested Mark: [Your Suggested Mark Here]/{points}"

Do not include any other introductory or concluding phrases outside of this structure. Ensure the "Suggested Mark" line is the very last part of your response."#,
        )
    }

    pub fn tutor_instruction(question_text: &str, student_current_answer: &str) -> String {
        let current_answer = if student_current_answer.trim().is_empty() {
            "No attempt yet."
        } else {
            student_current_answer
        };

        format!(
            r#"You are an IB Digital Society Socratic Tutor. Your goal is to help a student understand how to answer a specific Short Answer Question (SAQ) by guiding them with questions, rather than providing direct answers.
The original SAQ is: "{question_text}"
The student's current attempt at answering the main SAQ (if any) is: "{current_answer}"

Your role is to:
- Analyze the student's chat message and the conversation history.
- If the student is asking for a direct answer to the SAQ, gently refuse and instead ask a probing question to guide them.
- Help them break down the original SAQ.
- Prompt them to recall relevant concepts, terms, or examples.
- Encourage them to think about different perspectives or stakeholders.
- If they seem stuck, offer a small hint or ask a simpler, related question.
- Keep your responses concise, encouraging, and focused on guiding their thought process.
- Do not provide model answers or large chunks of information.
- End your response with a question to encourage further thinking from the student.
- If the student expresses frustration or says "I don't know", try to reframe or simplify your guidance."#,
        )
    }
}
