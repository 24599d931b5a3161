pub mod feedback_service;
pub mod gemini_service;
pub mod progress_service;
pub mod prompt_builder;
pub mod quiz_service;
pub mod scoring_service;
pub mod tutor_service;
