pub mod prefs;
pub mod present;

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use opentelemetry::metrics::{Counter, MeterProvider};
use opentelemetry_prometheus::exporter;
use opentelemetry_sdk::metrics::SdkMeterProvider;
use prometheus::{Encoder, Registry, TextEncoder};
use serde::Deserialize;
use tokio::sync::Mutex;
use wxdash_config::DashboardSettings;
use wxdash_core::{aggregate_forecast, SourceError, TemperatureUnit, WeatherSource};
use wxdash_source::{report_for_city, report_for_coords};

use crate::prefs::{Preferences, PreferencesError, PreferencesUpdate};
use crate::present::weather_view;

pub struct AppState {
    ready: AtomicBool,
    registry: Registry,
    #[allow(dead_code)]
    provider: SdkMeterProvider,
    requests_total: Counter<u64>,
    upstream_failures_total: Counter<u64>,
    source: Arc<dyn WeatherSource>,
    dashboard: DashboardSettings,
    icon_base: String,
    preferences: Mutex<Preferences>,
}

impl AppState {
    pub async fn preferences(&self) -> Preferences {
        self.preferences.lock().await.clone()
    }
}

pub fn build_app(
    source: Arc<dyn WeatherSource>,
    dashboard: DashboardSettings,
    icon_base: impl Into<String>,
) -> (Router, Arc<AppState>) {
    // Prometheus exporter via OpenTelemetry
    let registry = Registry::new();
    let reader = exporter()
        .with_registry(registry.clone())
        .build()
        .expect("prom exporter");
    let provider = SdkMeterProvider::builder().with_reader(reader).build();
    let meter = provider.meter("wxdash-cli");

    let requests_total = meter
        .u64_counter("wxdash_requests_total")
        .with_description("Total HTTP requests served")
        .init();
    let upstream_failures_total = meter
        .u64_counter("wxdash_upstream_failures_total")
        .with_description("Weather source calls that returned an error")
        .init();

    let unit = dashboard
        .default_unit
        .parse::<TemperatureUnit>()
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "falling back to Celsius");
            TemperatureUnit::Celsius
        });

    let state = Arc::new(AppState {
        ready: AtomicBool::new(false),
        registry,
        provider,
        requests_total,
        upstream_failures_total,
        source,
        dashboard,
        icon_base: icon_base.into(),
        preferences: Mutex::new(Preferences::with_unit(unit)),
    });

    let router = Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/metrics", get(metrics))
        .route("/api/v1/weather", get(weather))
        .route("/api/v1/forecast", get(forecast))
        .route(
            "/api/v1/preferences",
            get(get_preferences).patch(patch_preferences),
        )
        .route("/api/v1/favorites", post(add_favorite))
        .route("/api/v1/favorites/:city", delete(remove_favorite))
        .route("/api/v1/favorites/:city/toggle", post(toggle_favorite))
        .with_state(Arc::clone(&state));

    (router, state)
}

pub fn set_ready(state: &Arc<AppState>, is_ready: bool) {
    state.ready.store(is_ready, Ordering::Relaxed);
}

fn error_response(status: StatusCode, message: impl ToString) -> Response {
    (
        status,
        Json(serde_json::json!({ "error": message.to_string() })),
    )
        .into_response()
}

fn source_error_status(err: &SourceError) -> StatusCode {
    match err {
        SourceError::NotFound => StatusCode::NOT_FOUND,
        SourceError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
        SourceError::Network(_) => StatusCode::SERVICE_UNAVAILABLE,
        SourceError::InvalidApiKey
        | SourceError::Upstream { .. }
        | SourceError::MalformedPayload(_) => StatusCode::BAD_GATEWAY,
    }
}

fn source_failure(state: &AppState, err: SourceError) -> Response {
    state.upstream_failures_total.add(1, &[]);
    tracing::warn!(error = %err, "weather source failed");
    error_response(source_error_status(&err), err)
}

fn preferences_failure(err: PreferencesError) -> Response {
    let status = match err {
        PreferencesError::FavoritesFull(_) => StatusCode::CONFLICT,
        PreferencesError::EmptyCity => StatusCode::BAD_REQUEST,
    };
    error_response(status, err)
}

async fn healthz(State(state): State<Arc<AppState>>) -> StatusCode {
    state.requests_total.add(1, &[]);
    StatusCode::OK
}

async fn readyz(State(state): State<Arc<AppState>>) -> StatusCode {
    if state.ready.load(Ordering::Relaxed) {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

async fn metrics(
    State(state): State<Arc<AppState>>,
) -> (
    [(axum::http::header::HeaderName, axum::http::HeaderValue); 1],
    String,
) {
    let encoder = TextEncoder::new();
    let metric_families = state.registry.gather();
    let mut buf = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buf) {
        tracing::warn!(error=?e, "failed to encode metrics");
    }
    let body = String::from_utf8(buf).unwrap_or_default();
    let header = (
        header::CONTENT_TYPE,
        axum::http::HeaderValue::from_static("text/plain; version=0.0.4; charset=utf-8"),
    );
    ([header], body)
}

#[derive(Deserialize)]
struct WeatherQuery {
    city: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
    unit: Option<String>,
}

async fn weather(
    State(state): State<Arc<AppState>>,
    Query(q): Query<WeatherQuery>,
) -> Response {
    state.requests_total.add(1, &[]);

    let unit = match q.unit.as_deref().map(str::parse::<TemperatureUnit>) {
        Some(Ok(unit)) => Some(unit),
        Some(Err(e)) => return error_response(StatusCode::BAD_REQUEST, e),
        None => None,
    };

    let result = match (q.lat, q.lon, q.city.as_deref().map(str::trim)) {
        (Some(lat), Some(lon), _) => report_for_coords(state.source.as_ref(), lat, lon).await,
        (_, _, Some("")) => return preferences_failure(PreferencesError::EmptyCity),
        (_, _, Some(city)) => report_for_city(state.source.as_ref(), city).await,
        // no query: resume the last search, else the configured default
        (_, _, None) => {
            let city = state
                .preferences
                .lock()
                .await
                .last_city
                .clone()
                .unwrap_or_else(|| state.dashboard.default_city.clone());
            report_for_city(state.source.as_ref(), &city).await
        }
    };
    let report = match result {
        Ok(report) => report,
        Err(e) => return source_failure(&state, e),
    };

    let mut prefs = state.preferences.lock().await;
    if let Err(e) = prefs.record_search(&report.current.location.city, state.dashboard.max_recent)
    {
        tracing::debug!(error = %e, "search not recorded");
    }
    let unit = unit.unwrap_or(prefs.unit);
    let is_favorite = prefs.is_favorite(&report.current.location.city);
    drop(prefs);

    let view = weather_view(&report, unit, &state.icon_base, is_favorite);
    (StatusCode::OK, Json(view)).into_response()
}

#[derive(Deserialize)]
struct ForecastQuery {
    city: Option<String>,
}

async fn forecast(
    State(state): State<Arc<AppState>>,
    Query(q): Query<ForecastQuery>,
) -> Response {
    state.requests_total.add(1, &[]);
    let city = match q.city.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
        Some(city) => city,
        None => return preferences_failure(PreferencesError::EmptyCity),
    };
    match state.source.forecast_by_city(city).await {
        Ok(samples) => (StatusCode::OK, Json(aggregate_forecast(&samples))).into_response(),
        Err(e) => source_failure(&state, e),
    }
}

async fn get_preferences(State(state): State<Arc<AppState>>) -> Response {
    state.requests_total.add(1, &[]);
    (StatusCode::OK, Json(state.preferences().await)).into_response()
}

async fn patch_preferences(
    State(state): State<Arc<AppState>>,
    Json(update): Json<PreferencesUpdate>,
) -> Response {
    state.requests_total.add(1, &[]);
    let mut prefs = state.preferences.lock().await;
    prefs.apply(update);
    (StatusCode::OK, Json(prefs.clone())).into_response()
}

#[derive(Deserialize)]
struct FavoriteRequest {
    city: String,
}

async fn add_favorite(
    State(state): State<Arc<AppState>>,
    Json(req): Json<FavoriteRequest>,
) -> Response {
    state.requests_total.add(1, &[]);
    let mut prefs = state.preferences.lock().await;
    match prefs.add_favorite(&req.city, state.dashboard.max_favorites) {
        Ok(_) => (StatusCode::OK, Json(prefs.clone())).into_response(),
        Err(e) => preferences_failure(e),
    }
}

async fn remove_favorite(
    State(state): State<Arc<AppState>>,
    Path(city): Path<String>,
) -> Response {
    state.requests_total.add(1, &[]);
    let mut prefs = state.preferences.lock().await;
    prefs.remove_favorite(&city);
    (StatusCode::OK, Json(prefs.clone())).into_response()
}

async fn toggle_favorite(
    State(state): State<Arc<AppState>>,
    Path(city): Path<String>,
) -> Response {
    state.requests_total.add(1, &[]);
    let mut prefs = state.preferences.lock().await;
    match prefs.toggle_favorite(&city, state.dashboard.max_favorites) {
        Ok(_) => (StatusCode::OK, Json(prefs.clone())).into_response(),
        Err(e) => preferences_failure(e),
    }
}
