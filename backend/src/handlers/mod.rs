//! HTTP handlers

pub mod advisory;
pub mod forecast;
pub mod health;

pub use advisory::{answer_question, get_advisory};
pub use forecast::{get_daily_csv, get_forecast};
pub use health::health_check;
