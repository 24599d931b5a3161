pub mod config;
pub mod dto;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use crate::services::{
    feedback_service::FeedbackService,
    gemini_service::{GeminiService, TextGenerator},
    quiz_service::QuizService,
    tutor_service::TutorService,
};
use reqwest::Client;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub quiz_service: QuizService,
    pub feedback_service: FeedbackService,
    pub tutor_service: TutorService,
}

impl AppState {
    /// Builds the production state from config: one HTTP client shared
    /// across services, one generation-service handle injected into each.
    pub fn new() -> Self {
        let config = crate::config::get_config();
        let http_client = Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .unwrap();

        let generator: Arc<dyn TextGenerator> = Arc::new(GeminiService::new(
            config.gemini_api_key.clone(),
            config.gemini_api_url.clone(),
            http_client,
        ));

        Self::with_generator(generator)
    }

    /// Constructs the state around an arbitrary generator; tests pass a
    /// canned implementation here instead of the live service.
    pub fn with_generator(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            quiz_service: QuizService::new(generator.clone()),
            feedback_service: FeedbackService::new(generator.clone()),
            tutor_service: TutorService::new(generator),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
