//! Validation utilities for the Raincast platform
//!
//! Range checks shared by the forecast normalizer and the HTTP layer.

// ============================================================================
// Weather Value Validations
// ============================================================================

/// Validate relative humidity is a percentage
pub fn validate_humidity(humidity_pct: f64) -> Result<(), &'static str> {
    if !humidity_pct.is_finite() {
        return Err("Humidity must be a finite number");
    }
    if !(0.0..=100.0).contains(&humidity_pct) {
        return Err("Humidity must be between 0 and 100%");
    }
    Ok(())
}

/// Validate an accumulated or speed value (rain, wind) is not negative
pub fn validate_non_negative(value: f64) -> Result<(), &'static str> {
    if !value.is_finite() {
        return Err("Value must be a finite number");
    }
    if value < 0.0 {
        return Err("Value cannot be negative");
    }
    Ok(())
}

/// Validate an air temperature in °C is physically plausible
pub fn validate_temperature(temperature_c: f64) -> Result<(), &'static str> {
    if !temperature_c.is_finite() {
        return Err("Temperature must be a finite number");
    }
    // Below absolute zero or far above any recorded surface temperature
    if !(-273.15..=70.0).contains(&temperature_c) {
        return Err("Temperature is outside the plausible range");
    }
    Ok(())
}

// ============================================================================
// Location Validations
// ============================================================================

/// Validate latitude/longitude are within WGS84 bounds
pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), &'static str> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err("Latitude must be between -90 and 90");
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err("Longitude must be between -180 and 180");
    }
    Ok(())
}

/// Validate a city name entered by the user
pub fn validate_city_name(city: &str) -> Result<(), &'static str> {
    let trimmed = city.trim();
    if trimmed.is_empty() {
        return Err("City name is required");
    }
    if trimmed.chars().count() > 100 {
        return Err("City name must be at most 100 characters");
    }
    if trimmed.chars().any(char::is_control) {
        return Err("City name contains invalid characters");
    }
    Ok(())
}
