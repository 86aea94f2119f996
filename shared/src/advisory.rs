//! Rule-based farmer advisory
//!
//! Fixed threshold rules over a forecast summary. Every function here is
//! deterministic; the same inputs always give the same text.

use crate::models::{AdvisoryContext, FloodRisk, QuestionAdvice, QuestionTopic};
use crate::types::Crop;

// ============================================================================
// Thresholds
// ============================================================================

const HEAVY_RAIN_MM: f64 = 30.0;
const MODERATE_RAIN_MM: f64 = 10.0;
const HOT_TEMP_C: f64 = 35.0;
const COOL_TEMP_C: f64 = 20.0;
const HUMID_PCT: f64 = 85.0;

const FLOOD_HIGH_RAIN_MM: f64 = 20.0;
const FLOOD_HIGH_HUMIDITY_PCT: f64 = 80.0;
const FLOOD_MEDIUM_RAIN_MM: f64 = 10.0;
const FLOOD_MEDIUM_HUMIDITY_PCT: f64 = 70.0;

// ============================================================================
// Advice Texts
// ============================================================================

pub const HEAVY_RAIN_ADVICE: &str = "Heavy rain expected: avoid fertilizer application, protect harvested crops and livestock, and keep drainage channels clear.";
pub const MODERATE_RAIN_ADVICE: &str =
    "Moderate rain expected: delay irrigation and pesticide spraying, and prepare field drainage.";
pub const LIGHT_RAIN_ADVICE: &str = "Light rain expected: only minimal irrigation is needed.";
pub const NO_RAIN_ADVICE: &str =
    "No rain expected: schedule irrigation and fertilizer application today.";
pub const HEAT_ADVICE: &str = "High temperatures: irrigate during the cooler morning or evening hours and mulch to retain soil moisture.";
pub const COOL_ADVICE: &str = "Cooler weather: favourable conditions for sowing wheat and mustard.";
pub const HUMIDITY_ADVICE: &str = "High humidity: monitor crops closely for fungal diseases.";

/// Crop-specific sentence appended after the weather clauses
pub fn crop_advice(crop: Crop) -> &'static str {
    match crop {
        Crop::Wheat => {
            "Wheat: avoid irrigation just before expected rain and watch for rust in humid spells."
        }
        Crop::Rice => {
            "Rice: maintain standing water in the paddy and strengthen field bunds against overflow."
        }
        Crop::Maize => "Maize: ensure fields drain well, as maize is sensitive to waterlogging.",
    }
}

// ============================================================================
// Advisory Engine
// ============================================================================

/// Compose the advisory for a context.
///
/// Clauses appear in the order rain, temperature, humidity, crop and are
/// joined by single spaces. Rain thresholds are exclusive lower bounds, so
/// exactly 10 mm is light rain and exactly 30 mm is moderate. An undefined
/// temperature or humidity skips its clause.
pub fn advise(ctx: &AdvisoryContext) -> String {
    let mut clauses: Vec<&'static str> = Vec::with_capacity(4);

    clauses.push(rain_advice(ctx.today_rain_mm));

    if let Some(temp) = ctx.avg_temp_c {
        if temp > HOT_TEMP_C {
            clauses.push(HEAT_ADVICE);
        } else if temp < COOL_TEMP_C {
            clauses.push(COOL_ADVICE);
        }
    }

    if let Some(humidity) = ctx.avg_humidity_pct {
        if humidity > HUMID_PCT {
            clauses.push(HUMIDITY_ADVICE);
        }
    }

    if let Some(crop) = ctx.crop {
        clauses.push(crop_advice(crop));
    }

    clauses.join(" ")
}

fn rain_advice(rain_mm: f64) -> &'static str {
    if rain_mm > HEAVY_RAIN_MM {
        HEAVY_RAIN_ADVICE
    } else if rain_mm > MODERATE_RAIN_MM {
        MODERATE_RAIN_ADVICE
    } else if rain_mm > 0.0 {
        LIGHT_RAIN_ADVICE
    } else {
        NO_RAIN_ADVICE
    }
}

/// Classify flood risk from window-average rain and humidity.
///
/// Both conditions of a tier must hold; a NaN input never satisfies a
/// comparison and falls through to `Low`.
pub fn flood_risk(avg_rain_mm: f64, avg_humidity_pct: f64) -> FloodRisk {
    if avg_rain_mm > FLOOD_HIGH_RAIN_MM && avg_humidity_pct > FLOOD_HIGH_HUMIDITY_PCT {
        FloodRisk::High
    } else if avg_rain_mm > FLOOD_MEDIUM_RAIN_MM && avg_humidity_pct > FLOOD_MEDIUM_HUMIDITY_PCT {
        FloodRisk::Medium
    } else {
        FloodRisk::Low
    }
}

// ============================================================================
// Question Advice
// ============================================================================

/// Keywords per topic, in priority order. English keywords are matched
/// case-insensitively; Gujarati and Hindi have no case.
const TOPIC_KEYWORDS: &[(QuestionTopic, &[&str])] = &[
    (QuestionTopic::Irrigation, &["irrigat", "water", "પાણી", "सिंचाई", "पानी"]),
    (QuestionTopic::Fertilizer, &["fertiliz", "fertilis", "ખાતર", "खाद"]),
    (QuestionTopic::Disease, &["disease", "રોગ", "रोग"]),
    (QuestionTopic::Harvest, &["harvest", "કાપણી", "कटाई"]),
];

/// Answer a transcribed farmer question with a fixed advice sentence.
///
/// The first topic (irrigation, fertilizer, disease, harvest) with a keyword
/// contained in the question wins; anything else gets the general answer.
pub fn answer_question(text: &str) -> QuestionAdvice {
    let text = text.trim().to_lowercase();

    let topic = TOPIC_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| text.contains(k)))
        .map(|(topic, _)| *topic)
        .unwrap_or(QuestionTopic::General);

    QuestionAdvice {
        topic,
        advice: topic_advice(topic).to_string(),
    }
}

/// Fixed advice sentence for a question topic
pub fn topic_advice(topic: QuestionTopic) -> &'static str {
    match topic {
        QuestionTopic::Irrigation => {
            "Delay irrigation if rain is expected; otherwise, water early in the morning."
        }
        QuestionTopic::Fertilizer => {
            "Apply fertilizer on dry days and avoid applying it before heavy rain."
        }
        QuestionTopic::Disease => {
            "Monitor crops for fungal disease and apply protection when humidity is high."
        }
        QuestionTopic::Harvest => "Harvest on dry days and avoid rainy periods.",
        QuestionTopic::General => "Weather looks moderate. Follow the general advisory.",
    }
}
