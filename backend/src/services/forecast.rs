//! Forecast service: fetch, normalize, aggregate and advise

use serde::Serialize;
use shared::{
    advise, aggregate_daily, flood_risk, normalize, summarize, AdvisoryContext, Crop,
    DailyAggregate, FloodRisk, ForecastSummary, Language, WeatherSample,
};

use crate::error::{AppError, AppResult};
use crate::external::{Location, Provider, WeatherClient};

/// Service turning a city name into a normalized forecast and advisory
#[derive(Clone)]
pub struct ForecastService {
    client: WeatherClient,
}

/// Normalized forecast for one location
#[derive(Debug, Clone, Serialize)]
pub struct Forecast {
    pub location: Location,
    pub provider: Provider,
    pub samples: Vec<WeatherSample>,
    pub daily: Vec<DailyAggregate>,
}

/// Advisory payload served to dashboards
#[derive(Debug, Clone, Serialize)]
pub struct AdvisoryReport {
    pub location: Location,
    pub provider: Provider,
    pub samples: Vec<WeatherSample>,
    pub daily: Vec<DailyAggregate>,
    pub summary: ForecastSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crop: Option<Crop>,
    pub advice: String,
    pub flood_risk: FloodRisk,
    pub language: Language,
    pub language_code: &'static str,
}

impl ForecastService {
    pub fn new(client: WeatherClient) -> Self {
        Self { client }
    }

    /// Geocode the city, fetch the provider payload and normalize it
    pub async fn get_forecast(&self, city: &str, provider: Provider) -> AppResult<Forecast> {
        let location = self.client.geocode(city).await?;
        let payload = self.client.fetch_forecast(provider, location.point()).await?;

        let samples = normalize(&payload, provider.shape())?;
        let daily = aggregate_daily(&samples);

        tracing::info!(
            "Normalized {} {} samples into {} days for {}",
            samples.len(),
            provider,
            daily.len(),
            location.name
        );

        Ok(Forecast {
            location,
            provider,
            samples,
            daily,
        })
    }

    /// Fetch the forecast and build the advisory report
    pub async fn get_advisory(
        &self,
        city: &str,
        provider: Provider,
        crop: Option<Crop>,
        language: Language,
    ) -> AppResult<AdvisoryReport> {
        let forecast = self.get_forecast(city, provider).await?;
        build_report(forecast, crop, language)
    }
}

/// Reduce a forecast to its advisory report.
///
/// An empty daily table has nothing to advise on and is reported as
/// [`AppError::NoForecastData`].
pub fn build_report(
    forecast: Forecast,
    crop: Option<Crop>,
    language: Language,
) -> AppResult<AdvisoryReport> {
    let summary = summarize(&forecast.daily).ok_or(AppError::NoForecastData)?;

    let context = AdvisoryContext::from_summary(&summary, crop);
    let advice = advise(&context);
    // No humidity readings at all cannot satisfy a humidity threshold
    let risk = match summary.avg_humidity_pct {
        Some(humidity) => flood_risk(summary.avg_rain_mm, humidity),
        None => FloodRisk::Low,
    };

    Ok(AdvisoryReport {
        location: forecast.location,
        provider: forecast.provider,
        samples: forecast.samples,
        daily: forecast.daily,
        summary,
        crop,
        advice,
        flood_risk: risk,
        language,
        language_code: language.code(),
    })
}

/// Export the daily table as CSV
pub fn export_daily_csv(daily: &[DailyAggregate]) -> AppResult<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    for record in daily {
        wtr.serialize(record)
            .map_err(|e| AppError::Internal(format!("CSV serialization error: {}", e)))?;
    }
    let csv_data = String::from_utf8(
        wtr.into_inner()
            .map_err(|e| AppError::Internal(format!("CSV writer error: {}", e)))?,
    )
    .map_err(|e| AppError::Internal(format!("UTF-8 conversion error: {}", e)))?;
    Ok(csv_data)
}
