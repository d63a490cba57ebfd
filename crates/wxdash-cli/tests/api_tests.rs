mod common;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;
use wxdash_config::DashboardSettings;
use wxdash_core::SourceError;

async fn send(app: &Router, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let res = app.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}

#[tokio::test]
async fn weather_for_city_returns_view_and_records_search() {
    let (app, state) = common::app();

    let (status, body) = get(&app, "/api/v1/weather?city=%20London%20").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["unit"], "C");
    assert_eq!(body["current"]["city"], "London");
    assert_eq!(body["current"]["temperature"], "12°C");
    assert_eq!(body["current"]["wind_direction"], "SW");
    assert_eq!(body["current"]["icon_url"], "https://icons.test/04d@2x.png");

    let forecast = body["forecast"].as_array().unwrap();
    assert_eq!(forecast.len(), 2);
    assert_eq!(forecast[0]["date"], "2024-01-01");
    assert_eq!(forecast[0]["high"], "15°C");
    assert_eq!(forecast[0]["low"], "9°C");
    assert_eq!(forecast[0]["condition"], "Rain");
    assert_eq!(forecast[0]["emoji"], "🌧️");
    assert_eq!(forecast[0]["wind_kph"], 7);
    assert_eq!(forecast[0]["precipitation_mm"], 1.0);
    assert_eq!(forecast[1]["condition"], "Clear");

    let prefs = state.preferences().await;
    assert_eq!(prefs.recent_searches, vec!["London"]);
    assert_eq!(prefs.last_city.as_deref(), Some("London"));
}

#[tokio::test]
async fn weather_honours_unit_override_and_preference() {
    let (app, _state) = common::app();

    let (status, body) = get(&app, "/api/v1/weather?city=London&unit=F").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["current"]["temperature"], "54°F");

    let (status, _) = send(
        &app,
        Method::PATCH,
        "/api/v1/preferences",
        Some(r#"{"unit":"F"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = get(&app, "/api/v1/weather?city=London").await;
    assert_eq!(body["unit"], "F");
    assert_eq!(body["forecast"][0]["high"], "59°F");

    let (status, body) = get(&app, "/api/v1/weather?city=London&unit=K").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("K"));
}

#[tokio::test]
async fn weather_by_coordinates_uses_resolved_city() {
    let (app, state) = common::app();

    let (status, body) = get(&app, "/api/v1/weather?lat=51.48&lon=0.0").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["current"]["city"], "Greenwich");
    assert_eq!(body["forecast"].as_array().unwrap().len(), 2);
    assert_eq!(state.preferences().await.recent_searches, vec!["Greenwich"]);
}

#[tokio::test]
async fn weather_rejects_blank_city() {
    let (app, _state) = common::app();

    let (status, body) = get(&app, "/api/v1/weather?city=").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Please enter a city name");

    let (status, _) = get(&app, "/api/v1/weather?city=%20%20").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn weather_without_query_uses_default_city() {
    let dashboard = DashboardSettings {
        default_city: "Paris".to_string(),
        ..DashboardSettings::default()
    };
    let (app, state) = common::app_with(common::FakeSource::default(), dashboard);

    let (status, body) = get(&app, "/api/v1/weather").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["current"]["city"], "Paris");
    assert_eq!(state.preferences().await.last_city.as_deref(), Some("Paris"));
}

#[tokio::test]
async fn weather_without_query_resumes_last_city() {
    let (app, _state) = common::app();

    let (status, _) = get(&app, "/api/v1/weather?city=Oslo").await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = get(&app, "/api/v1/weather").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["current"]["city"], "Oslo");
}

#[tokio::test]
async fn source_errors_map_to_statuses() {
    let cases = [
        (SourceError::NotFound, StatusCode::NOT_FOUND),
        (SourceError::RateLimited, StatusCode::TOO_MANY_REQUESTS),
        (SourceError::InvalidApiKey, StatusCode::BAD_GATEWAY),
        (SourceError::Upstream { status: 500 }, StatusCode::BAD_GATEWAY),
        (
            SourceError::MalformedPayload("eof".into()),
            StatusCode::BAD_GATEWAY,
        ),
        (
            SourceError::Network("refused".into()),
            StatusCode::SERVICE_UNAVAILABLE,
        ),
    ];
    for (err, expected) in cases {
        let message = err.to_string();
        let (app, state) = common::app_with(
            common::FakeSource::failing(err),
            DashboardSettings::default(),
        );
        let (status, body) = get(&app, "/api/v1/weather?city=London").await;
        assert_eq!(status, expected);
        assert_eq!(body["error"], message.as_str());
        assert!(state.preferences().await.recent_searches.is_empty());
    }
}

#[tokio::test]
async fn forecast_endpoint_returns_daily_summaries() {
    let (app, _state) = common::app();

    let (status, body) = get(&app, "/api/v1/forecast?city=London").await;
    assert_eq!(status, StatusCode::OK);
    let days = body.as_array().unwrap();
    assert_eq!(days.len(), 2);
    assert_eq!(days[0]["date_utc"], "2024-01-01");
    assert_eq!(days[0]["temperature_high_c"], 15);
    assert_eq!(days[0]["dominant_condition"], "Rain");
    assert_eq!(days[0]["representative_description"], "rain");
    assert_eq!(days[0]["sample_count"], 3);
    assert_eq!(days[1]["temperature_low_c"], 3);

    let (status, _) = get(&app, "/api/v1/forecast?city=Nowhere").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = get(&app, "/api/v1/forecast").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn favorites_lifecycle() {
    let dashboard = DashboardSettings {
        max_favorites: 2,
        ..DashboardSettings::default()
    };
    let (app, _state) = common::app_with(common::FakeSource::default(), dashboard);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/favorites",
        Some(r#"{"city":"Oslo"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["favorites"], serde_json::json!(["Oslo"]));

    let (status, _) = send(&app, Method::POST, "/api/v1/favorites/Rome/toggle", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/favorites",
        Some(r#"{"city":"Lima"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Maximum 2 favorites allowed");

    let (_, body) = get(&app, "/api/v1/weather?city=Rome").await;
    assert_eq!(body["is_favorite"], true);

    let (status, body) = send(&app, Method::DELETE, "/api/v1/favorites/Oslo", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["favorites"], serde_json::json!(["Rome"]));

    let (_, body) = send(&app, Method::POST, "/api/v1/favorites/Rome/toggle", None).await;
    assert_eq!(body["favorites"], serde_json::json!([]));
}

#[tokio::test]
async fn preferences_patch_is_partial() {
    let (app, _state) = common::app();

    let (status, body) = get(&app, "/api/v1/preferences").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["unit"], "C");
    assert_eq!(body["last_city"], Value::Null);

    let (_, body) = send(
        &app,
        Method::PATCH,
        "/api/v1/preferences",
        Some(r#"{"last_city":"Oslo"}"#),
    )
    .await;
    assert_eq!(body["unit"], "C");
    assert_eq!(body["last_city"], "Oslo");

    let (status, _) = send(
        &app,
        Method::PATCH,
        "/api/v1/preferences",
        Some(r#"{"favorites":["x"]}"#),
    )
    .await;
    assert!(status.is_client_error());
}
