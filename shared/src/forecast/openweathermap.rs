//! OpenWeatherMap 5 day / 3 hour forecast payloads
//!
//! See: https://openweathermap.org/forecast5

use chrono::{DateTime, FixedOffset};
use serde::Deserialize;

use super::capitalize;
use crate::error::NormalizeError;
use crate::models::WeatherSample;

/// OpenWeatherMap reports wind in m/s with `units=metric`
const MPS_TO_KPH: f64 = 3.6;

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    list: Option<Vec<ForecastEntry>>,
    city: Option<City>,
}

#[derive(Debug, Deserialize)]
struct City {
    /// Shift in seconds from UTC
    timezone: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct ForecastEntry {
    dt: Option<i64>,
    main: Option<Main>,
    rain: Option<Rain>,
    wind: Option<Wind>,
    weather: Option<Vec<Condition>>,
}

#[derive(Debug, Deserialize)]
struct Main {
    temp: Option<f64>,
    humidity: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct Rain {
    #[serde(rename = "3h")]
    three_hour: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct Wind {
    speed: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct Condition {
    description: Option<String>,
}

pub(super) fn normalize(payload: &serde_json::Value) -> Result<Vec<WeatherSample>, NormalizeError> {
    let response = ForecastResponse::deserialize(payload)?;

    let offset_secs = response.city.and_then(|c| c.timezone).unwrap_or(0);
    let offset = FixedOffset::east_opt(offset_secs).ok_or_else(|| {
        NormalizeError::InvalidShape(format!("city.timezone out of range: {}", offset_secs))
    })?;

    response
        .list
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(index, entry)| to_sample(index, entry, offset))
        .collect()
}

fn to_sample(
    index: usize,
    entry: ForecastEntry,
    offset: FixedOffset,
) -> Result<WeatherSample, NormalizeError> {
    let dt = entry
        .dt
        .ok_or(NormalizeError::MalformedPayload { index, field: "dt" })?;
    let (temp, humidity) = match entry.main {
        Some(main) => (main.temp, main.humidity),
        None => (None, None),
    };
    let temperature_c = temp.ok_or(NormalizeError::MalformedPayload {
        index,
        field: "main.temp",
    })?;

    let timestamp = DateTime::from_timestamp(dt, 0)
        .ok_or(NormalizeError::OutOfRange {
            index,
            field: "dt",
            reason: "Timestamp is outside the representable range",
        })?
        .with_timezone(&offset);

    // The rain object is omitted entirely when no rain is expected
    let rain_mm = entry.rain.and_then(|r| r.three_hour).unwrap_or(0.0);

    let wind_kph = entry
        .wind
        .and_then(|w| w.speed)
        .map(|mps| (mps * MPS_TO_KPH * 10.0).round() / 10.0);

    let condition = entry
        .weather
        .unwrap_or_default()
        .into_iter()
        .next()
        .and_then(|c| c.description)
        .and_then(|d| capitalize(&d));

    Ok(WeatherSample {
        timestamp,
        temperature_c,
        humidity_pct: humidity,
        rain_mm,
        wind_kph,
        condition,
    })
}
