//! Route definitions for the Raincast advisory service

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/forecast", forecast_routes())
        .nest("/advisory", advisory_routes())
}

/// Forecast routes
fn forecast_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::get_forecast))
        .route("/daily.csv", get(handlers::get_daily_csv))
}

/// Advisory routes
fn advisory_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::get_advisory))
        .route("/question", post(handlers::answer_question))
}
