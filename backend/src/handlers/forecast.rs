//! HTTP handlers for forecast endpoints

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use shared::validate_city_name;

use crate::error::{AppError, AppResult};
use crate::external::Provider;
use crate::services::{Forecast, ForecastService};
use crate::AppState;

/// Query parameters for forecast lookups
#[derive(Debug, Deserialize)]
pub struct ForecastQuery {
    pub city: String,
    pub provider: Option<Provider>,
}

impl ForecastQuery {
    /// Validated city name and the provider, falling back to the configured default
    pub fn resolve(&self, state: &AppState) -> AppResult<(String, Provider)> {
        validate_city_name(&self.city).map_err(|msg| AppError::validation("city", msg))?;
        let provider = self
            .provider
            .unwrap_or(state.config.weather.default_provider);
        Ok((self.city.trim().to_string(), provider))
    }
}

/// Get the normalized forecast for a city
pub async fn get_forecast(
    State(state): State<AppState>,
    Query(query): Query<ForecastQuery>,
) -> AppResult<Json<Forecast>> {
    let (city, provider) = query.resolve(&state)?;
    let service = ForecastService::new(state.weather.clone());
    let forecast = service.get_forecast(&city, provider).await?;
    Ok(Json(forecast))
}

/// Download the daily table for a city as CSV
pub async fn get_daily_csv(
    State(state): State<AppState>,
    Query(query): Query<ForecastQuery>,
) -> AppResult<impl IntoResponse> {
    let (city, provider) = query.resolve(&state)?;
    let service = ForecastService::new(state.weather.clone());
    let forecast = service.get_forecast(&city, provider).await?;
    let csv = crate::services::forecast::export_daily_csv(&forecast.daily)?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"daily_forecast.csv\"",
            ),
        ],
        csv,
    ))
}
