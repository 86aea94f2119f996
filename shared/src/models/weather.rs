//! Weather data models

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ParseVariantError;

/// A single timestamped weather observation or forecast step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSample {
    /// Provider-local time; every sample of one normalization shares the offset
    pub timestamp: DateTime<FixedOffset>,
    pub temperature_c: f64,
    pub humidity_pct: Option<f64>,
    /// Precipitation accumulated over the provider interval (1h or 3h)
    pub rain_mm: f64,
    pub wind_kph: Option<f64>,
    pub condition: Option<String>,
}

impl WeatherSample {
    /// Calendar date of the sample in its own offset
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }
}

/// One calendar day's rollup of weather samples
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyAggregate {
    pub date: NaiveDate,
    pub rain_mm_total: f64,
    /// `None` when no sample of the day carried a temperature
    pub temperature_c_mean: Option<f64>,
    /// `None` when no sample of the day carried a humidity reading
    pub humidity_pct_mean: Option<f64>,
    pub sample_count: usize,
}

/// Dashboard reduction of a daily forecast table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSummary {
    /// First date of the forecast window
    pub today: NaiveDate,
    pub today_rain_mm: f64,
    pub avg_temp_c: Option<f64>,
    pub avg_humidity_pct: Option<f64>,
    /// Mean of the daily rain totals across the window
    pub avg_rain_mm: f64,
    pub days: usize,
}

/// Field layout of an upstream forecast response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ProviderShape {
    /// `list[]` of records with `dt`, `main.temp`, `main.humidity`, `rain.3h`
    /// (OpenWeatherMap 5 day / 3 hour forecast)
    #[default]
    ThreeHourly,
    /// Parallel arrays under `hourly` keyed by `hourly.time[]`
    /// (Open-Meteo forecast)
    Hourly,
}

impl ProviderShape {
    /// Guess the shape from the payload's top-level keys.
    pub fn detect(payload: &serde_json::Value) -> Option<Self> {
        if payload.get("list").is_some() {
            Some(ProviderShape::ThreeHourly)
        } else if payload.get("hourly").is_some() {
            Some(ProviderShape::Hourly)
        } else {
            None
        }
    }
}

impl std::fmt::Display for ProviderShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderShape::ThreeHourly => write!(f, "three-hourly"),
            ProviderShape::Hourly => write!(f, "hourly"),
        }
    }
}

impl FromStr for ProviderShape {
    type Err = ParseVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "three-hourly" | "3h" | "openweathermap" => Ok(ProviderShape::ThreeHourly),
            "hourly" | "1h" | "open-meteo" | "openmeteo" => Ok(ProviderShape::Hourly),
            _ => Err(ParseVariantError::new("provider shape", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_detect_three_hourly() {
        let payload = json!({ "cod": "200", "list": [] });
        assert_eq!(ProviderShape::detect(&payload), Some(ProviderShape::ThreeHourly));
    }

    #[test]
    fn test_detect_hourly() {
        let payload = json!({ "utc_offset_seconds": 0, "hourly": { "time": [] } });
        assert_eq!(ProviderShape::detect(&payload), Some(ProviderShape::Hourly));
    }

    #[test]
    fn test_detect_unknown() {
        assert_eq!(ProviderShape::detect(&json!({ "daily": {} })), None);
        assert_eq!(ProviderShape::detect(&json!([])), None);
    }

    #[test]
    fn test_shape_from_provider_name() {
        assert_eq!("openweathermap".parse::<ProviderShape>().unwrap(), ProviderShape::ThreeHourly);
        assert_eq!("open-meteo".parse::<ProviderShape>().unwrap(), ProviderShape::Hourly);
        assert!("rainviewer".parse::<ProviderShape>().is_err());
    }
}
