//! Open-Meteo hourly forecast payloads
//!
//! See: https://open-meteo.com/en/docs

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone};
use serde::Deserialize;

use crate::error::NormalizeError;
use crate::models::WeatherSample;

type Series<T> = Option<Vec<Option<T>>>;

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    utc_offset_seconds: Option<i32>,
    hourly: Option<Hourly>,
}

#[derive(Debug, Deserialize)]
struct Hourly {
    time: Series<String>,
    temperature_2m: Series<f64>,
    relative_humidity_2m: Series<f64>,
    rain: Series<f64>,
    precipitation: Series<f64>,
    wind_speed_10m: Series<f64>,
    weather_code: Series<i64>,
}

pub(super) fn normalize(payload: &serde_json::Value) -> Result<Vec<WeatherSample>, NormalizeError> {
    let response = ForecastResponse::deserialize(payload)?;
    let Some(hourly) = response.hourly else {
        return Ok(Vec::new());
    };

    let offset_secs = response.utc_offset_seconds.unwrap_or(0);
    let offset = FixedOffset::east_opt(offset_secs).ok_or_else(|| {
        NormalizeError::InvalidShape(format!("utc_offset_seconds out of range: {}", offset_secs))
    })?;

    // A temperature array longer than the time axis means missing timestamps
    let entries = series_len(&hourly.time).max(series_len(&hourly.temperature_2m));

    (0..entries)
        .map(|index| {
            let time = at(&hourly.time, index).ok_or(NormalizeError::MalformedPayload {
                index,
                field: "hourly.time",
            })?;
            let temperature_c =
                at(&hourly.temperature_2m, index).ok_or(NormalizeError::MalformedPayload {
                    index,
                    field: "hourly.temperature_2m",
                })?;
            let timestamp = parse_local_time(&time, offset).ok_or_else(|| {
                NormalizeError::InvalidShape(format!(
                    "unparseable hourly.time `{}` at entry {}",
                    time, index
                ))
            })?;

            Ok(WeatherSample {
                timestamp,
                temperature_c,
                humidity_pct: at(&hourly.relative_humidity_2m, index),
                rain_mm: at(&hourly.rain, index)
                    .or_else(|| at(&hourly.precipitation, index))
                    .unwrap_or(0.0),
                wind_kph: at(&hourly.wind_speed_10m, index),
                condition: at(&hourly.weather_code, index)
                    .and_then(wmo_description)
                    .map(str::to_string),
            })
        })
        .collect()
}

fn series_len<T>(series: &Series<T>) -> usize {
    series.as_ref().map_or(0, Vec::len)
}

fn at<T: Clone>(series: &Series<T>, index: usize) -> Option<T> {
    series.as_ref()?.get(index)?.clone()
}

/// Open-Meteo returns local wall-clock times (`2024-06-01T13:00`) alongside
/// the offset of the requested timezone.
fn parse_local_time(text: &str, offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&offset));
    }
    let naive = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S"))
        .ok()?;
    offset.from_local_datetime(&naive).single()
}

/// Describe a WMO weather interpretation code.
/// See: https://open-meteo.com/en/docs#weathervariables
fn wmo_description(code: i64) -> Option<&'static str> {
    let label = match code {
        0 => "Clear",
        1 | 2 => "Partly cloudy",
        3 => "Cloudy",
        45 | 48 => "Fog",
        51 | 53 | 55 => "Drizzle",
        56 | 57 => "Freezing drizzle",
        61 | 63 => "Rain",
        65 => "Heavy rain",
        66 | 67 => "Freezing rain",
        71 | 73 | 75 | 77 | 85 | 86 => "Snow",
        80..=82 => "Rain showers",
        95 | 96 | 99 => "Thunderstorm",
        _ => return None,
    };
    Some(label)
}
