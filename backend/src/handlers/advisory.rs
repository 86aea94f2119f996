//! HTTP handlers for advisory endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use shared::{Crop, Language, QuestionTopic};

use crate::error::{AppError, AppResult};
use crate::external::Provider;
use crate::handlers::forecast::ForecastQuery;
use crate::services::{AdvisoryReport, ForecastService};
use crate::AppState;

/// Query parameters for the advisory endpoint
#[derive(Debug, Deserialize)]
pub struct AdvisoryQuery {
    pub city: String,
    pub provider: Option<Provider>,
    /// Crop name, or "none"
    pub crop: Option<String>,
    /// Language name or ISO code
    pub language: Option<String>,
}

/// Get the farmer advisory for a city
pub async fn get_advisory(
    State(state): State<AppState>,
    Query(query): Query<AdvisoryQuery>,
) -> AppResult<Json<AdvisoryReport>> {
    let (city, provider) = ForecastQuery {
        city: query.city,
        provider: query.provider,
    }
    .resolve(&state)?;

    let crop = Crop::parse_selection(query.crop.as_deref())
        .map_err(|e| AppError::validation("crop", e.to_string()))?;
    let language = parse_language(query.language.as_deref())?;

    let service = ForecastService::new(state.weather.clone());
    let report = service.get_advisory(&city, provider, crop, language).await?;
    Ok(Json(report))
}

/// A transcribed farmer question
#[derive(Debug, Deserialize)]
pub struct QuestionRequest {
    pub text: String,
    pub language: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct QuestionResponse {
    pub topic: QuestionTopic,
    pub advice: String,
    pub language: Language,
}

/// Answer a farmer question with canned advice
pub async fn answer_question(
    Json(input): Json<QuestionRequest>,
) -> AppResult<Json<QuestionResponse>> {
    if input.text.trim().is_empty() {
        return Err(AppError::validation("text", "Question text is required"));
    }
    let language = parse_language(input.language.as_deref())?;
    let answer = shared::answer_question(&input.text);

    tracing::debug!("Answered {:?} question in {}", answer.topic, language);

    Ok(Json(QuestionResponse {
        topic: answer.topic,
        advice: answer.advice,
        language,
    }))
}

fn parse_language(value: Option<&str>) -> AppResult<Language> {
    match value {
        None => Ok(Language::default()),
        Some(v) => v
            .parse()
            .map_err(|e: shared::ParseVariantError| AppError::validation("language", e.to_string())),
    }
}
