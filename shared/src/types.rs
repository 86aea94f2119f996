//! Common types used across the platform

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ParseVariantError;

/// Geographic coordinates in decimal degrees
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Supported languages
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    Hindi,
    Gujarati,
}

impl Language {
    /// ISO 639-1 code handed to speech and translation services
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Hindi => "hi",
            Language::Gujarati => "gu",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Language::English => write!(f, "English"),
            Language::Hindi => write!(f, "Hindi"),
            Language::Gujarati => write!(f, "Gujarati"),
        }
    }
}

impl FromStr for Language {
    type Err = ParseVariantError;

    /// Accepts either the language name or its ISO code, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "english" | "en" => Ok(Language::English),
            "hindi" | "hi" => Ok(Language::Hindi),
            "gujarati" | "gu" => Ok(Language::Gujarati),
            _ => Err(ParseVariantError::new("language", s)),
        }
    }
}

/// Crops with dedicated advisory guidance
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Crop {
    Wheat,
    Rice,
    Maize,
}

impl Crop {
    pub const ALL: [Crop; 3] = [Crop::Wheat, Crop::Rice, Crop::Maize];

    /// Parse an optional crop selection where "none" or an empty value means
    /// no crop was chosen.
    pub fn parse_selection(value: Option<&str>) -> Result<Option<Crop>, ParseVariantError> {
        match value.map(str::trim) {
            None | Some("") => Ok(None),
            Some(v) if v.eq_ignore_ascii_case("none") => Ok(None),
            Some(v) => v.parse().map(Some),
        }
    }
}

impl std::fmt::Display for Crop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Crop::Wheat => write!(f, "Wheat"),
            Crop::Rice => write!(f, "Rice"),
            Crop::Maize => write!(f, "Maize"),
        }
    }
}

impl FromStr for Crop {
    type Err = ParseVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "wheat" => Ok(Crop::Wheat),
            "rice" => Ok(Crop::Rice),
            "maize" | "corn" => Ok(Crop::Maize),
            _ => Err(ParseVariantError::new("crop", s)),
        }
    }
}
