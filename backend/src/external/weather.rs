//! Weather API client for fetching forecast payloads
//!
//! Integrates with OpenWeatherMap (geocoding and 5 day / 3 hour forecast)
//! and Open-Meteo (hourly forecast). Responses are returned as raw JSON and
//! handed to the shared normalizer.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use shared::{validate_coordinates, GeoPoint, ProviderShape};

use crate::config::WeatherConfig;
use crate::error::{AppError, AppResult};

/// Hourly variables requested from Open-Meteo
const OPEN_METEO_HOURLY: &str =
    "temperature_2m,relative_humidity_2m,rain,wind_speed_10m,weather_code";

/// Upstream forecast provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Provider {
    #[serde(rename = "openweathermap")]
    OpenWeatherMap,
    #[serde(rename = "open-meteo")]
    OpenMeteo,
}

impl Provider {
    /// Payload layout this provider returns
    pub fn shape(&self) -> ProviderShape {
        match self {
            Provider::OpenWeatherMap => ProviderShape::ThreeHourly,
            Provider::OpenMeteo => ProviderShape::Hourly,
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Provider::OpenWeatherMap => write!(f, "openweathermap"),
            Provider::OpenMeteo => write!(f, "open-meteo"),
        }
    }
}

/// A geocoded place
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Location {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }
}

/// OpenWeatherMap geocoding API entry
#[derive(Debug, Deserialize)]
struct OWMGeocodeEntry {
    name: String,
    lat: f64,
    lon: f64,
    country: Option<String>,
}

/// Weather API client
#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    api_key: String,
    openweathermap_url: String,
    geocoding_url: String,
    open_meteo_url: String,
}

impl WeatherClient {
    /// Create a WeatherClient from configuration
    pub fn from_config(config: &WeatherConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| AppError::Configuration(format!("HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            openweathermap_url: trim_base(&config.openweathermap_url),
            geocoding_url: trim_base(&config.geocoding_url),
            open_meteo_url: trim_base(&config.open_meteo_url),
        })
    }

    /// Resolve a city name to coordinates
    pub async fn geocode(&self, city: &str) -> AppResult<Location> {
        let api_key = self.require_api_key()?;
        let url = format!("{}/direct", self.geocoding_url);

        tracing::debug!("Geocoding city {:?}", city);
        let value = self
            .get_json(&url, &[("q", city), ("limit", "1"), ("appid", api_key)])
            .await?;

        let entries: Vec<OWMGeocodeEntry> = serde_json::from_value(value).map_err(|e| {
            AppError::ExternalService(format!("Failed to parse geocoding response: {}", e))
        })?;

        let entry = entries
            .into_iter()
            .next()
            .ok_or_else(|| AppError::NotFound("City".to_string()))?;
        validate_coordinates(entry.lat, entry.lon).map_err(|msg| {
            AppError::ExternalService(format!("Geocoding returned bad coordinates: {}", msg))
        })?;

        Ok(Location {
            name: entry.name,
            country: entry.country,
            latitude: entry.lat,
            longitude: entry.lon,
        })
    }

    /// Fetch the raw forecast payload for a point from the given provider
    pub async fn fetch_forecast(
        &self,
        provider: Provider,
        point: GeoPoint,
    ) -> AppResult<serde_json::Value> {
        let latitude = point.latitude.to_string();
        let longitude = point.longitude.to_string();

        tracing::debug!(
            "Fetching {} forecast for ({}, {})",
            provider,
            latitude,
            longitude
        );

        match provider {
            Provider::OpenWeatherMap => {
                let api_key = self.require_api_key()?;
                let url = format!("{}/forecast", self.openweathermap_url);
                self.get_json(
                    &url,
                    &[
                        ("lat", latitude.as_str()),
                        ("lon", longitude.as_str()),
                        ("appid", api_key),
                        ("units", "metric"),
                    ],
                )
                .await
            }
            Provider::OpenMeteo => {
                let url = format!("{}/forecast", self.open_meteo_url);
                self.get_json(
                    &url,
                    &[
                        ("latitude", latitude.as_str()),
                        ("longitude", longitude.as_str()),
                        ("hourly", OPEN_METEO_HOURLY),
                        ("timezone", "auto"),
                    ],
                )
                .await
            }
        }
    }

    fn require_api_key(&self) -> AppResult<&str> {
        if self.api_key.is_empty() {
            return Err(AppError::Configuration(
                "weather.api_key is not set".to_string(),
            ));
        }
        Ok(&self.api_key)
    }

    async fn get_json(&self, url: &str, query: &[(&str, &str)]) -> AppResult<serde_json::Value> {
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| AppError::ExternalService(format!("Weather API request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("Weather API returned {} for {}", status, url);
            return Err(AppError::ExternalService(format!(
                "Weather API error: {} - {}",
                status, body
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::ExternalService(format!("Failed to parse weather response: {}", e)))
    }
}

fn trim_base(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_serde_names() {
        let json = serde_json::to_string(&Provider::OpenMeteo).unwrap();
        assert_eq!(json, "\"open-meteo\"");
        let provider: Provider = serde_json::from_str("\"openweathermap\"").unwrap();
        assert_eq!(provider, Provider::OpenWeatherMap);
        assert!(serde_json::from_str::<Provider>("\"rainviewer\"").is_err());
    }

    #[test]
    fn test_provider_shape() {
        assert_eq!(Provider::OpenWeatherMap.shape(), ProviderShape::ThreeHourly);
        assert_eq!(Provider::OpenMeteo.shape(), ProviderShape::Hourly);
    }

    #[test]
    fn test_trim_base() {
        assert_eq!(trim_base("http://localhost:8080/"), "http://localhost:8080");
        assert_eq!(trim_base("http://localhost:8080"), "http://localhost:8080");
    }

    #[tokio::test]
    async fn test_missing_api_key_is_configuration_error() {
        let client = WeatherClient::from_config(&WeatherConfig::default()).unwrap();
        let err = client.geocode("Surat").await.unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
    }
}
