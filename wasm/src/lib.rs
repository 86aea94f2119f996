//! WebAssembly module for the Raincast farmer dashboards
//!
//! Provides client-side computation for:
//! - Forecast normalization and daily aggregation
//! - Farming advisory and flood risk
//! - Farmer question advice

use serde::Serialize;
use wasm_bindgen::prelude::*;

use shared::{
    advise, aggregate_daily, answer_question, flood_risk, normalize, summarize, AdvisoryContext,
    Crop, DailyAggregate, ForecastSummary, Language, ProviderShape, QuestionAdvice,
};

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::log_1(&"Raincast advisory module loaded".into());
}

/// Daily table plus the dashboard summary
#[derive(Serialize)]
struct AggregatedForecast {
    daily: Vec<DailyAggregate>,
    summary: Option<ForecastSummary>,
}

/// Normalize a provider payload into a JSON array of samples
#[wasm_bindgen]
pub fn normalize_forecast(payload_json: &str, shape: &str) -> Result<String, JsValue> {
    normalize_json(payload_json, shape).map_err(|e| JsValue::from_str(&e))
}

/// Normalize and aggregate a provider payload into `{daily, summary}` JSON
#[wasm_bindgen]
pub fn aggregate_forecast(payload_json: &str, shape: &str) -> Result<String, JsValue> {
    aggregate_json(payload_json, shape).map_err(|e| JsValue::from_str(&e))
}

/// Compose the advisory text. NaN temperature or humidity skips that clause;
/// an empty or "none" crop means no crop.
#[wasm_bindgen]
pub fn advise_farmer(
    today_rain_mm: f64,
    avg_temp_c: f64,
    avg_humidity_pct: f64,
    crop: &str,
) -> Result<String, JsValue> {
    advice_text(today_rain_mm, avg_temp_c, avg_humidity_pct, crop)
        .map_err(|e| JsValue::from_str(&e))
}

/// Classify flood risk as "LOW", "MEDIUM" or "HIGH"
#[wasm_bindgen]
pub fn classify_flood_risk(avg_rain_mm: f64, avg_humidity_pct: f64) -> String {
    flood_risk(avg_rain_mm, avg_humidity_pct).to_string()
}

/// Answer a transcribed question; returns `{topic, advice}` JSON
#[wasm_bindgen]
pub fn answer_farmer_question(text: &str) -> String {
    question_json(&answer_question(text))
}

/// ISO code for a language name ("Gujarati" -> "gu"); unknown names fall back to English
#[wasm_bindgen]
pub fn language_code(name: &str) -> String {
    name.parse::<Language>()
        .unwrap_or_default()
        .code()
        .to_string()
}

// ============================================================================
// Helpers
// ============================================================================

fn parse_payload(payload_json: &str, shape: &str) -> Result<(serde_json::Value, ProviderShape), String> {
    let payload: serde_json::Value =
        serde_json::from_str(payload_json).map_err(|e| format!("Invalid payload JSON: {}", e))?;
    let shape = if shape.trim().is_empty() {
        ProviderShape::detect(&payload).ok_or("Unrecognized forecast payload")?
    } else {
        shape.parse::<ProviderShape>().map_err(|e| e.to_string())?
    };
    Ok((payload, shape))
}

fn normalize_json(payload_json: &str, shape: &str) -> Result<String, String> {
    let (payload, shape) = parse_payload(payload_json, shape)?;
    let samples = normalize(&payload, shape).map_err(|e| e.to_string())?;
    serde_json::to_string(&samples).map_err(|e| e.to_string())
}

fn aggregate_json(payload_json: &str, shape: &str) -> Result<String, String> {
    let (payload, shape) = parse_payload(payload_json, shape)?;
    let samples = normalize(&payload, shape).map_err(|e| e.to_string())?;
    let daily = aggregate_daily(&samples);
    let summary = summarize(&daily);
    serde_json::to_string(&AggregatedForecast { daily, summary }).map_err(|e| e.to_string())
}

fn advice_text(rain: f64, temp: f64, humidity: f64, crop: &str) -> Result<String, String> {
    let crop = Crop::parse_selection(Some(crop)).map_err(|e| e.to_string())?;
    let ctx = AdvisoryContext {
        today_rain_mm: rain,
        avg_temp_c: (!temp.is_nan()).then_some(temp),
        avg_humidity_pct: (!humidity.is_nan()).then_some(humidity),
        crop,
    };
    Ok(advise(&ctx))
}

fn question_json(answer: &QuestionAdvice) -> String {
    serde_json::to_string(answer).unwrap_or_default()
}
