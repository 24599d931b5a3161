pub mod feedback;
pub mod health;
pub mod quiz;
pub mod tutor;
