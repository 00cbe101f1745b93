//! HTTP request handlers.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Json, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::state::{AppState, KeyCheck};
use crate::engine::AnalyzeOptions;

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors_enabled = state.config.cors_enabled;
    let logging = state.config.logging;

    let mut router = Router::new()
        // Health and status
        .route("/health", get(health_check))
        .route("/status", get(status))
        // Catalog introspection
        .route("/v1/patterns", get(list_patterns))
        // Scan operations
        .route("/v1/analyze", post(analyze))
        .route("/v1/analyze/batch", post(analyze_batch))
        .with_state(state);

    if cors_enabled {
        router = router.layer(CorsLayer::permissive());
    }
    if logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Status endpoint
async fn status(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let catalog = state.analyzer.catalog();

    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "uptime_secs": state.uptime().as_secs(),
        "patterns": catalog.len(),
        "patterns_skipped": catalog.skipped(),
        "strict_default": state.config.strict_default,
        "max_text_len": state.config.max_text_len,
        "max_batch": state.config.max_batch,
        "auth_required": state.config.require_key,
    }))
}

/// Catalog listing endpoint (rule metadata, not pattern sources)
async fn list_patterns(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let catalog = state.analyzer.catalog();

    let rules: Vec<_> = catalog
        .iter()
        .map(|entry| {
            json!({
                "id": entry.rule.id,
                "category": entry.rule.category,
                "weight": entry.rule.weight,
                "explanation": entry.rule.explanation,
            })
        })
        .collect();

    let counts: serde_json::Map<String, serde_json::Value> = catalog
        .category_counts()
        .into_iter()
        .map(|(cat, n)| (cat.as_str().to_string(), json!(n)))
        .collect();

    Json(json!({
        "count": rules.len(),
        "categories": counts,
        "rules": rules,
    }))
}

/// Analyze request
#[derive(Deserialize)]
pub struct AnalyzeRequest {
    pub text: String,
    #[serde(default)]
    pub strict_mode: Option<bool>,
}

/// Batch analyze request
#[derive(Deserialize)]
pub struct BatchRequest {
    pub items: Vec<String>,
    #[serde(default)]
    pub strict_mode: Option<bool>,
}

/// Key/plan identity resolved for a request
struct RequestIdentity {
    plan: Option<String>,
}

/// Resolve and count the caller's API key, when keys are required.
async fn authorize(state: &AppState, headers: &HeaderMap) -> Result<RequestIdentity, (StatusCode, Json<serde_json::Value>)> {
    if !state.config.require_key {
        return Ok(RequestIdentity { plan: None });
    }

    let Some(key) = headers.get("x-api-key").and_then(|v| v.to_str().ok()) else {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "Missing x-api-key header"})),
        ));
    };

    match state.keys.check(key).await {
        KeyCheck::Allowed { plan, .. } => Ok(RequestIdentity { plan: Some(plan) }),
        KeyCheck::UnknownKey => Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "Unknown API key"})),
        )),
        KeyCheck::RateLimited { retry_after_secs } => Err((
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({
                "error": "Rate limit exceeded",
                "retry_after_secs": retry_after_secs,
            })),
        )),
    }
}

/// Validate one text item. The engine never rejects input; all user-facing
/// validation lives here.
fn validate_text(text: &str, max_len: usize) -> Result<(), String> {
    if text.trim().is_empty() {
        return Err("text must not be empty".to_string());
    }
    let chars = text.chars().count();
    if chars > max_len {
        return Err(format!("text exceeds maximum length: {chars} > {max_len}"));
    }
    Ok(())
}

/// Analyze a single text
async fn analyze(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<AnalyzeRequest>,
) -> impl IntoResponse {
    let identity = match authorize(&state, &headers).await {
        Ok(identity) => identity,
        Err(reject) => return reject,
    };

    if let Err(reason) = validate_text(&req.text, state.config.max_text_len) {
        return (StatusCode::BAD_REQUEST, Json(json!({"error": reason})));
    }

    let strict = req.strict_mode.unwrap_or(state.config.strict_default);
    let options = AnalyzeOptions::from_strict(strict);

    let started = Instant::now();
    let result = state.analyzer.analyze(&req.text, &options);
    let latency_ms = started.elapsed().as_secs_f64() * 1000.0;

    (
        StatusCode::OK,
        Json(json!({
            "request_id": uuid::Uuid::new_v4().to_string(),
            "latency_ms": latency_ms,
            "plan": identity.plan,
            "result": result,
        })),
    )
}

/// Analyze a batch of texts (1-20 items)
async fn analyze_batch(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<BatchRequest>,
) -> impl IntoResponse {
    let identity = match authorize(&state, &headers).await {
        Ok(identity) => identity,
        Err(reject) => return reject,
    };

    if req.items.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "batch must contain at least one item"})),
        );
    }
    if req.items.len() > state.config.max_batch {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": format!(
                    "batch exceeds maximum size: {} > {}",
                    req.items.len(),
                    state.config.max_batch
                ),
            })),
        );
    }
    for (index, item) in req.items.iter().enumerate() {
        if let Err(reason) = validate_text(item, state.config.max_text_len) {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": format!("item {index}: {reason}")})),
            );
        }
    }

    let strict = req.strict_mode.unwrap_or(state.config.strict_default);
    let options = AnalyzeOptions::from_strict(strict);

    let started = Instant::now();
    let results: Vec<_> = req
        .items
        .iter()
        .map(|item| state.analyzer.analyze(item, &options))
        .collect();
    let latency_ms = started.elapsed().as_secs_f64() * 1000.0;

    (
        StatusCode::OK,
        Json(json!({
            "request_id": uuid::Uuid::new_v4().to_string(),
            "latency_ms": latency_ms,
            "plan": identity.plan,
            "count": results.len(),
            "results": results,
        })),
    )
}
