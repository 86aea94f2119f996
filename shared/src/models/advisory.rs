//! Advisory models

use serde::{Deserialize, Serialize};

use super::ForecastSummary;
use crate::types::Crop;

/// Input to the advisory rule table.
///
/// Temperature and humidity are optional: an undefined metric skips its
/// clause instead of being evaluated as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisoryContext {
    pub today_rain_mm: f64,
    pub avg_temp_c: Option<f64>,
    pub avg_humidity_pct: Option<f64>,
    pub crop: Option<Crop>,
}

impl AdvisoryContext {
    pub fn new(today_rain_mm: f64, avg_temp_c: f64, avg_humidity_pct: f64, crop: Option<Crop>) -> Self {
        Self {
            today_rain_mm,
            avg_temp_c: Some(avg_temp_c),
            avg_humidity_pct: Some(avg_humidity_pct),
            crop,
        }
    }

    /// Build the context from a forecast summary: first-day rain, window
    /// averages for temperature and humidity.
    pub fn from_summary(summary: &ForecastSummary, crop: Option<Crop>) -> Self {
        Self {
            today_rain_mm: summary.today_rain_mm,
            avg_temp_c: summary.avg_temp_c,
            avg_humidity_pct: summary.avg_humidity_pct,
            crop,
        }
    }
}

/// Coarse flood risk classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FloodRisk {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for FloodRisk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FloodRisk::Low => write!(f, "LOW"),
            FloodRisk::Medium => write!(f, "MEDIUM"),
            FloodRisk::High => write!(f, "HIGH"),
        }
    }
}

/// Topic of a farmer's spoken or typed question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionTopic {
    Irrigation,
    Fertilizer,
    Disease,
    Harvest,
    General,
}

/// Canned answer to a farmer's question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionAdvice {
    pub topic: QuestionTopic,
    pub advice: String,
}
