//! HTTP API integration tests
//!
//! Exercises the router end to end against mocked providers:
//! - Forecast normalization for both providers
//! - Advisory report, empty forecast and upstream failures
//! - Question advice and request validation

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use raincast_backend::{
    config::{Config, WeatherConfig},
    create_app,
    external::Provider,
    AppState,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Helpers
// ============================================================================

fn test_config(server: &MockServer) -> Config {
    Config {
        weather: WeatherConfig {
            api_key: "test-key".to_string(),
            openweathermap_url: format!("{}/data/2.5", server.uri()),
            geocoding_url: format!("{}/geo/1.0", server.uri()),
            open_meteo_url: format!("{}/v1", server.uri()),
            request_timeout_secs: 5,
            default_provider: Provider::OpenWeatherMap,
        },
        ..Config::default()
    }
}

fn app(server: &MockServer) -> Router {
    create_app(AppState::new(test_config(server)).unwrap())
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let (status, body) = send(app, request).await;
    (status, serde_json::from_slice(&body).unwrap())
}

async fn mount_geocoding(server: &MockServer, city: &str) {
    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .and(query_param("q", city))
        .and(query_param("appid", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "name": city, "lat": 23.0225, "lon": 72.5714, "country": "IN" }
        ])))
        .mount(server)
        .await;
}

/// Two rainy days of 3 hour slots at IST (+05:30)
fn owm_forecast() -> Value {
    json!({
        "cod": "200",
        "list": [
            { "dt": 1717200000, "main": { "temp": 30.0, "humidity": 88 }, "rain": { "3h": 20.0 },
              "wind": { "speed": 5.0 }, "weather": [ { "description": "heavy intensity rain" } ] },
            { "dt": 1717210800, "main": { "temp": 32.0, "humidity": 90 }, "rain": { "3h": 16.0 } },
            { "dt": 1717286400, "main": { "temp": 29.0, "humidity": 84 }, "rain": { "3h": 12.0 } },
            { "dt": 1717297200, "main": { "temp": 31.0, "humidity": 86 } }
        ],
        "city": { "name": "Ahmedabad", "timezone": 19800 }
    })
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health() {
    let server = MockServer::start().await;
    let (status, body) = get_json(app(&server), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, _) = get_json(app(&server), "/api/v1/health").await;
    assert_eq!(status, StatusCode::OK);
}

// ============================================================================
// Forecast
// ============================================================================

#[tokio::test]
async fn test_forecast_openweathermap() {
    let server = MockServer::start().await;
    mount_geocoding(&server, "Ahmedabad").await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(owm_forecast()))
        .mount(&server)
        .await;

    let (status, body) = get_json(app(&server), "/api/v1/forecast?city=Ahmedabad").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["provider"], "openweathermap");
    assert_eq!(body["location"]["country"], "IN");
    assert_eq!(body["samples"].as_array().unwrap().len(), 4);
    assert_eq!(body["samples"][0]["wind_kph"], 18.0);
    assert_eq!(body["samples"][0]["condition"], "Heavy intensity rain");
    assert_eq!(body["samples"][3]["rain_mm"], 0.0);

    let daily = body["daily"].as_array().unwrap();
    assert_eq!(daily.len(), 2);
    assert_eq!(daily[0]["date"], "2024-06-01");
    assert_eq!(daily[0]["rain_mm_total"], 36.0);
    assert_eq!(daily[0]["temperature_c_mean"], 31.0);
}

#[tokio::test]
async fn test_forecast_open_meteo() {
    let server = MockServer::start().await;
    mount_geocoding(&server, "Rajkot").await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("timezone", "auto"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "utc_offset_seconds": 19800,
            "hourly": {
                "time": ["2024-06-01T00:00", "2024-06-01T01:00"],
                "temperature_2m": [27.0, 26.0],
                "relative_humidity_2m": [70, 74],
                "rain": [0.0, 0.8],
                "wind_speed_10m": [7.2, 6.1],
                "weather_code": [2, 61]
            }
        })))
        .mount(&server)
        .await;

    let (status, body) =
        get_json(app(&server), "/api/v1/forecast?city=Rajkot&provider=open-meteo").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["provider"], "open-meteo");
    assert_eq!(body["samples"][1]["condition"], "Rain");
    assert_eq!(body["daily"][0]["rain_mm_total"], 0.8);
    assert_eq!(body["daily"][0]["sample_count"], 2);
}

#[tokio::test]
async fn test_forecast_daily_csv() {
    let server = MockServer::start().await;
    mount_geocoding(&server, "Ahmedabad").await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(owm_forecast()))
        .mount(&server)
        .await;

    let request = Request::builder()
        .uri("/api/v1/forecast/daily.csv?city=Ahmedabad")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(app(&server), request).await;
    assert_eq!(status, StatusCode::OK);

    let text = String::from_utf8(body).unwrap();
    let mut lines = text.lines();
    assert_eq!(
        lines.next(),
        Some("date,rain_mm_total,temperature_c_mean,humidity_pct_mean,sample_count")
    );
    assert_eq!(lines.count(), 2);
}

#[tokio::test]
async fn test_unknown_city_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let (status, body) = get_json(app(&server), "/api/v1/forecast?city=Atlantis").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_blank_city_is_rejected() {
    let server = MockServer::start().await;
    let (status, body) = get_json(app(&server), "/api/v1/forecast?city=%20%20").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["field"], "city");
}

#[tokio::test]
async fn test_upstream_failure_is_bad_gateway() {
    let server = MockServer::start().await;
    mount_geocoding(&server, "Surat").await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "cod": 401, "message": "Invalid API key"
        })))
        .mount(&server)
        .await;

    let (status, body) = get_json(app(&server), "/api/v1/forecast?city=Surat").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"]["code"], "EXTERNAL_SERVICE_ERROR");
}

#[tokio::test]
async fn test_malformed_forecast_is_bad_gateway() {
    let server = MockServer::start().await;
    mount_geocoding(&server, "Surat").await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "list": [ { "dt": 1717200000, "main": { "humidity": 80 } } ]
        })))
        .mount(&server)
        .await;

    let (status, body) = get_json(app(&server), "/api/v1/forecast?city=Surat").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"]["code"], "MALFORMED_FORECAST");
}

// ============================================================================
// Advisory
// ============================================================================

#[tokio::test]
async fn test_advisory_report() {
    let server = MockServer::start().await;
    mount_geocoding(&server, "Ahmedabad").await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(owm_forecast()))
        .mount(&server)
        .await;

    let (status, body) = get_json(
        app(&server),
        "/api/v1/advisory?city=Ahmedabad&crop=wheat&language=hi",
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(body["summary"]["today_rain_mm"], 36.0);
    assert_eq!(body["crop"], "wheat");
    assert_eq!(body["language"], "hindi");
    assert_eq!(body["language_code"], "hi");
    // Day totals 36 and 12 average to 24 mm; humidity averages 87%
    assert_eq!(body["flood_risk"], "HIGH");

    let advice = body["advice"].as_str().unwrap();
    assert!(advice.starts_with("Heavy rain expected"));
    assert!(advice.contains("High humidity"));
    assert!(advice.ends_with(shared::crop_advice(shared::Crop::Wheat)));
}

#[tokio::test]
async fn test_advisory_empty_forecast_is_no_data() {
    let server = MockServer::start().await;
    mount_geocoding(&server, "Bhuj").await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "cod": "200", "list": [] })))
        .mount(&server)
        .await;

    let (status, body) = get_json(app(&server), "/api/v1/advisory?city=Bhuj").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NO_FORECAST_DATA");
}

#[tokio::test]
async fn test_advisory_rejects_unknown_crop() {
    let server = MockServer::start().await;
    let (status, body) = get_json(app(&server), "/api/v1/advisory?city=Surat&crop=barley").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["field"], "crop");
}

// ============================================================================
// Question Advice
// ============================================================================

async fn post_question(server: &MockServer, payload: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/advisory/question")
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap();
    let (status, body) = send(app(server), request).await;
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_question_gujarati() {
    let server = MockServer::start().await;
    let (status, body) =
        post_question(&server, json!({ "text": "ખાતર ક્યારે નાખવું?", "language": "Gujarati" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["topic"], "fertilizer");
    assert_eq!(body["language"], "gujarati");
}

#[tokio::test]
async fn test_question_defaults_to_english_general() {
    let server = MockServer::start().await;
    let (status, body) = post_question(&server, json!({ "text": "Will it be sunny?" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["topic"], "general");
    assert_eq!(body["advice"], "Weather looks moderate. Follow the general advisory.");
    assert_eq!(body["language"], "english");
}

#[tokio::test]
async fn test_question_requires_text() {
    let server = MockServer::start().await;
    let (status, _) = post_question(&server, json!({ "text": "  " })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
