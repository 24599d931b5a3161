use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    routing::post,
    Router,
};
use serde_json::{json, Value as JsonValue};
use tower::ServiceExt;
use workbook_backend::error::{Error, Result};
use workbook_backend::services::gemini_service::{TextGenerator, Turn};
use workbook_backend::AppState;

/// Canned generation service: returns a fixed response and records
/// nothing. Upstream failure is simulated with `failing()`.
struct StubGenerator {
    response: Option<String>,
}

impl StubGenerator {
    fn returning(response: impl Into<String>) -> Self {
        Self {
            response: Some(response.into()),
        }
    }

    fn failing() -> Self {
        Self { response: None }
    }
}

#[async_trait]
impl TextGenerator for StubGenerator {
    async fn generate(&self, _turns: &[Turn]) -> Result<String> {
        match &self.response {
            Some(r) => Ok(r.clone()),
            None => Err(Error::Upstream("request failed with status 503".to_string())),
        }
    }
}

fn app_with(generator: StubGenerator) -> Router {
    let state = AppState::with_generator(Arc::new(generator));
    Router::new()
        .route(
            "/api/generate-quiz",
            post(workbook_backend::routes::quiz::generate_quiz),
        )
        .route(
            "/api/generate-feedback",
            post(workbook_backend::routes::feedback::generate_feedback),
        )
        .route(
            "/api/socratic-tutor",
            post(workbook_backend::routes::tutor::socratic_tutor),
        )
        .with_state(state)
}

async fn post_json(app: Router, uri: &str, body: JsonValue) -> (StatusCode, JsonValue) {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let body: JsonValue = serde_json::from_slice(&bytes).unwrap();
    (status, body)
}

fn fenced_quiz_payload() -> String {
    let questions = json!([
        {
            "id": "mcq_data-privacy_1",
            "type": "mcq",
            "text": "What does data minimisation require?",
            "options": ["Collect everything", "Collect only what is needed", "Delete nothing", "Encrypt nothing"],
            "correctAnswer": "Collect only what is needed",
            "explanation": "Minimisation limits collection to what the purpose requires.",
            "points": 10
        },
        {
            "id": "mcq_data-privacy_2",
            "type": "mcq",
            "text": "Which is a lawful basis for processing?",
            "options": ["Consent", "Convenience", "Curiosity", "Cost"],
            "correctAnswer": "Consent",
            "explanation": "Consent is one of the recognised lawful bases.",
            "points": 10
        },
        {
            "id": "saq_data-privacy_1",
            "type": "saq",
            "text": "Explain two risks of centralised data storage.",
            "feedbackHints": "Breach blast radius, single point of failure, insider access.",
            "points": 20
        }
    ]);
    format!("Sure, here is your quiz:\n```json\n{}\n```", questions)
}

#[tokio::test]
async fn generate_quiz_end_to_end() {
    let app = app_with(StubGenerator::returning(fenced_quiz_payload()));

    let (status, body) = post_json(
        app,
        "/api/generate-quiz",
        json!({ "topic": "Data Privacy", "numMCQs": 2, "numSAQs": 1 }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let quiz = &body["quiz"];
    assert_eq!(quiz["questions"].as_array().unwrap().len(), 3);
    assert!(quiz["id"].as_str().unwrap().contains("Data-Privacy"));
    assert_eq!(quiz["title"], "Live Quiz on: Data Privacy");
    assert_eq!(quiz["questions"][0]["type"], "mcq");
    assert!(!quiz["questions"][2]["feedbackHints"]
        .as_str()
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn generate_quiz_rejects_prose_only_output() {
    let app = app_with(StubGenerator::returning(
        "I'd be happy to help you study Data Privacy! Let me know what you need.",
    ));

    let (status, body) = post_json(
        app,
        "/api/generate-quiz",
        json!({ "topic": "Data Privacy", "numMCQs": 2, "numSAQs": 1 }),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("Malformed content"));
}

#[tokio::test]
async fn generate_quiz_requires_a_topic() {
    let app = app_with(StubGenerator::returning(fenced_quiz_payload()));

    let (status, body) = post_json(app, "/api/generate-quiz", json!({ "numMCQs": 2 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Topic is required"));

    let app = app_with(StubGenerator::returning(fenced_quiz_payload()));
    let (status, _) = post_json(app, "/api/generate-quiz", json!({ "topic": "   " })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn generate_quiz_rejects_zero_questions() {
    let app = app_with(StubGenerator::returning(fenced_quiz_payload()));

    let (status, body) = post_json(
        app,
        "/api/generate-quiz",
        json!({ "topic": "AI Ethics", "numMCQs": 0, "numSAQs": 0 }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("at least one question"));
}

#[tokio::test]
async fn generate_quiz_propagates_upstream_failure() {
    let app = app_with(StubGenerator::failing());

    let (status, body) = post_json(
        app,
        "/api/generate-quiz",
        json!({ "topic": "Data Privacy" }),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("Generation service error"));
}

#[tokio::test]
async fn non_post_methods_are_rejected() {
    let app = app_with(StubGenerator::returning(fenced_quiz_payload()));

    let req = Request::builder()
        .method("GET")
        .uri("/api/generate-quiz")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn generate_feedback_returns_trimmed_text() {
    let app = app_with(StubGenerator::returning(
        "\nClear definition, missing an example.\nSuggested Mark: 14/20\n",
    ));

    let (status, body) = post_json(
        app,
        "/api/generate-feedback",
        json!({
            "questionText": "Explain two risks of centralised data storage.",
            "studentAnswer": "A breach exposes everything at once.",
            "feedbackHints": "Breach blast radius, insider access.",
            "points": 20
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let feedback = body["feedback"].as_str().unwrap();
    assert!(feedback.starts_with("Clear definition"));
    assert!(feedback.ends_with("Suggested Mark: 14/20"));
}

#[tokio::test]
async fn generate_feedback_requires_question_and_answer() {
    let app = app_with(StubGenerator::returning("unused"));

    let (status, body) = post_json(
        app,
        "/api/generate-feedback",
        json!({ "questionText": "Explain bias." }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("studentAnswer"));
}

#[tokio::test]
async fn socratic_tutor_round_trip() {
    let app = app_with(StubGenerator::returning(
        "What do you think the question is really asking you to compare?",
    ));

    let (status, body) = post_json(
        app,
        "/api/socratic-tutor",
        json!({
            "questionText": "Explain two ethical considerations of facial recognition.",
            "studentCurrentAnswer": "",
            "conversationHistory": [
                { "sender": "assistant", "text": "Where would you like to start?" },
                { "sender": "student", "text": "I don't know" }
            ],
            "latestStudentChat": "I don't know"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["tutorResponse"]
        .as_str()
        .unwrap()
        .contains("really asking"));
}

#[tokio::test]
async fn socratic_tutor_requires_question_text() {
    let app = app_with(StubGenerator::returning("unused"));

    let (status, body) = post_json(
        app,
        "/api/socratic-tutor",
        json!({ "latestStudentChat": "help" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("questionText"));
}
