//! Forecast normalization and daily aggregation
//!
//! Converts heterogeneous provider payloads into a uniform [`WeatherSample`]
//! sequence, then rolls samples up into [`DailyAggregate`] rows.

mod open_meteo;
mod openweathermap;

use chrono::{DateTime, FixedOffset, NaiveDate};
use std::collections::{BTreeMap, HashSet};

use crate::error::NormalizeError;
use crate::models::{DailyAggregate, ForecastSummary, ProviderShape, WeatherSample};
use crate::validation::{validate_humidity, validate_non_negative, validate_temperature};

/// Normalize a parsed provider response into weather samples.
///
/// Samples keep payload order and are not re-sorted; callers must supply a
/// chronologically ordered payload. A payload without entries yields an empty
/// vector. An entry missing its timestamp or temperature fails the whole call.
pub fn normalize(
    raw_payload: &serde_json::Value,
    shape: ProviderShape,
) -> Result<Vec<WeatherSample>, NormalizeError> {
    let samples = match shape {
        ProviderShape::ThreeHourly => openweathermap::normalize(raw_payload)?,
        ProviderShape::Hourly => open_meteo::normalize(raw_payload)?,
    };
    check_samples(&samples)?;
    Ok(samples)
}

/// Enforce the sample invariants: unique timestamps and in-range values.
fn check_samples(samples: &[WeatherSample]) -> Result<(), NormalizeError> {
    let mut seen: HashSet<DateTime<FixedOffset>> = HashSet::with_capacity(samples.len());

    for (index, sample) in samples.iter().enumerate() {
        if !seen.insert(sample.timestamp) {
            return Err(NormalizeError::DuplicateTimestamp { index });
        }

        let out_of_range = |field: &'static str| {
            move |reason: &'static str| NormalizeError::OutOfRange {
                index,
                field,
                reason,
            }
        };

        validate_temperature(sample.temperature_c).map_err(out_of_range("temperature_c"))?;
        if let Some(humidity) = sample.humidity_pct {
            validate_humidity(humidity).map_err(out_of_range("humidity_pct"))?;
        }
        validate_non_negative(sample.rain_mm).map_err(out_of_range("rain_mm"))?;
        if let Some(wind) = sample.wind_kph {
            validate_non_negative(wind).map_err(out_of_range("wind_kph"))?;
        }
    }

    Ok(())
}

/// Group samples by calendar date and roll each day up.
///
/// Dates come out ascending whatever the input order. A metric with no values
/// on a given day is `None` for that day only; the day itself is kept.
pub fn aggregate_daily(samples: &[WeatherSample]) -> Vec<DailyAggregate> {
    let mut days: BTreeMap<NaiveDate, DayAccumulator> = BTreeMap::new();

    for sample in samples {
        days.entry(sample.date()).or_default().add(sample);
    }

    days.into_iter()
        .map(|(date, acc)| acc.finish(date))
        .collect()
}

/// Reduce a daily table to the figures the advisory needs.
///
/// Returns `None` for an empty table ("no forecast data available").
pub fn summarize(daily: &[DailyAggregate]) -> Option<ForecastSummary> {
    let first = daily.first()?;

    Some(ForecastSummary {
        today: first.date,
        today_rain_mm: first.rain_mm_total,
        avg_temp_c: mean(daily.iter().filter_map(|d| d.temperature_c_mean)),
        avg_humidity_pct: mean(daily.iter().filter_map(|d| d.humidity_pct_mean)),
        avg_rain_mm: mean(daily.iter().map(|d| d.rain_mm_total)).unwrap_or(0.0),
        days: daily.len(),
    })
}

#[derive(Default)]
struct DayAccumulator {
    rain_mm_total: f64,
    temperature_sum: f64,
    temperature_count: usize,
    humidity_sum: f64,
    humidity_count: usize,
    sample_count: usize,
}

impl DayAccumulator {
    fn add(&mut self, sample: &WeatherSample) {
        self.rain_mm_total += sample.rain_mm;
        self.temperature_sum += sample.temperature_c;
        self.temperature_count += 1;
        if let Some(humidity) = sample.humidity_pct {
            self.humidity_sum += humidity;
            self.humidity_count += 1;
        }
        self.sample_count += 1;
    }

    fn finish(self, date: NaiveDate) -> DailyAggregate {
        DailyAggregate {
            date,
            rain_mm_total: self.rain_mm_total,
            temperature_c_mean: ratio(self.temperature_sum, self.temperature_count),
            humidity_pct_mean: ratio(self.humidity_sum, self.humidity_count),
            sample_count: self.sample_count,
        }
    }
}

fn ratio(sum: f64, count: usize) -> Option<f64> {
    (count > 0).then(|| sum / count as f64)
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    ratio(sum, count)
}

/// Upper-case the first character of a provider label; blank labels are dropped.
fn capitalize(text: &str) -> Option<String> {
    let mut chars = text.trim().chars();
    let first = chars.next()?;
    Some(first.to_uppercase().chain(chars).collect())
}
