//! Browser tests, run with `wasm-pack test --headless --firefox`

#![cfg(target_arch = "wasm32")]

use raincast_wasm::{advise_farmer, aggregate_forecast, normalize_forecast};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn test_malformed_payload_is_js_error() {
    let result = normalize_forecast(r#"{"list": [{"dt": 1717200000, "main": {}}]}"#, "openweathermap");
    let message = result.unwrap_err().as_string().unwrap();
    assert!(message.contains("main.temp"));
}

#[wasm_bindgen_test]
fn test_aggregate_forecast_round_trip() {
    let json = aggregate_forecast(r#"{"list": []}"#, "openweathermap").unwrap();
    assert_eq!(json, r#"{"daily":[],"summary":null}"#);
}

#[wasm_bindgen_test]
fn test_unknown_crop_is_js_error() {
    assert!(advise_farmer(0.0, 25.0, 50.0, "barley").is_err());
}
