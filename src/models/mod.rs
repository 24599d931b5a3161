pub mod attempt;
pub mod question;
pub mod quiz;
pub mod user_record;
