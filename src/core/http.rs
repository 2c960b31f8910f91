//! HTTP endpoint server using Axum

use axum::{
    extract::{Path, Query, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{Mutex, RwLock};
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{error, info, warn, Level};

use crate::agents::Explainer;
use crate::error::{ExplainError, SignalError, WatchlistError};
use crate::metrics::Metrics;
use crate::models::signal::{IndexResult, SignalOutcome, SignalResult};
use crate::models::strategy::StrategyConfig;
use crate::notifiers::formatter::{format_index_message, format_stock_message};
use crate::services::symbols::{full_code, validate_stock_code};
use crate::services::watchlist::{add_to_watchlist, load_watchlist_or_empty, Watchlist};
use crate::signals::SignalEngine;

pub const SERVICE_NAME: &str = "trendwatch-signal-engine";

#[derive(Clone)]
pub struct AppState {
    pub health: Arc<RwLock<HealthStatus>>,
    pub metrics: Arc<Metrics>,
    pub start_time: Arc<Instant>,
    pub engine: Arc<SignalEngine>,
    pub explainer: Option<Arc<dyn Explainer>>,
    pub watchlist_path: PathBuf,
    /// Serialises read-modify-write cycles on the watchlist file.
    pub watchlist_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(engine: Arc<SignalEngine>, metrics: Arc<Metrics>, watchlist_path: PathBuf) -> Self {
        Self {
            health: Arc::new(RwLock::new(HealthStatus::default())),
            metrics,
            start_time: Arc::new(Instant::now()),
            engine,
            explainer: None,
            watchlist_path,
            watchlist_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn with_explainer(mut self, explainer: Arc<dyn Explainer>) -> Self {
        self.explainer = Some(explainer);
        self
    }
}

#[derive(Clone, Debug)]
pub struct HealthStatus {
    pub status: String,
}

impl Default for HealthStatus {
    fn default() -> Self {
        Self {
            status: "healthy".to_string(),
        }
    }
}

type ApiError = (StatusCode, Json<Value>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, Json(json!({ "error": message.into() })))
}

fn signal_error(code: &str, e: SignalError) -> ApiError {
    let status = match &e {
        SignalError::InsufficientData { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        SignalError::Upstream(_) | SignalError::UnorderedSeries { .. } => StatusCode::BAD_GATEWAY,
    };
    warn!(symbol = %code, error = %e, "Evaluation of {} failed", code);
    api_error(status, e.to_string())
}

fn watchlist_error(e: WatchlistError) -> ApiError {
    if let WatchlistError::InvalidCode(_) = e {
        return api_error(StatusCode::BAD_REQUEST, e.to_string());
    }
    error!(error = %e, "Watchlist access failed");
    api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}

/// Validate and normalise a code taken from the URL.
fn normalise_code(code: &str) -> Result<String, ApiError> {
    if !validate_stock_code(code) {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            format!("invalid stock code: {}", code),
        ));
    }
    Ok(full_code(&code.to_ascii_lowercase()))
}

fn name_for(watchlist: &Watchlist, code: &str) -> Option<String> {
    watchlist
        .iter()
        .find(|(_, existing)| existing.as_str() == code)
        .map(|(name, _)| name.clone())
}

pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    let health = state.health.read().await;
    let uptime_seconds = state.start_time.elapsed().as_secs();
    Ok(Json(json!({
        "status": health.status,
        "uptime_seconds": uptime_seconds,
        "service": SERVICE_NAME
    })))
}

pub async fn metrics_handler(State(state): State<AppState>) -> Result<String, StatusCode> {
    state
        .metrics
        .export()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Middleware to track HTTP request metrics
async fn metrics_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    state.metrics.http_requests_in_flight.inc();

    let response = next.run(request).await;
    let status = response.status();
    let duration = start.elapsed();

    state.metrics.http_requests_in_flight.dec();

    state.metrics.http_requests_total.inc();
    state
        .metrics
        .http_request_duration_seconds
        .observe(duration.as_secs_f64());

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            path = %path,
            status = %status,
            duration_ms = duration.as_millis(),
            "HTTP request error"
        );
    }

    response
}

#[derive(Debug, Default, Deserialize)]
pub struct ExplainQuery {
    #[serde(default)]
    explain: bool,
}

#[derive(Debug, Serialize)]
struct EvaluationResponse<T> {
    #[serde(flatten)]
    result: T,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    commentary: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AddWatchlistRequest {
    code: String,
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct EditStrategyRequest {
    preference: String,
}

/// Evaluate one stock with structure and timing signals
async fn get_signal(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Query(query): Query<ExplainQuery>,
) -> Result<Json<EvaluationResponse<SignalResult>>, ApiError> {
    let code = normalise_code(&code)?;
    let started = Instant::now();
    let outcome = state.engine.evaluate(&code).await;
    state
        .metrics
        .signal_evaluation_duration_seconds
        .observe(started.elapsed().as_secs_f64());

    let outcome = outcome.map_err(|e| {
        state
            .metrics
            .signal_evaluation_failures_total
            .with_label_values(&["stock"])
            .inc();
        signal_error(&code, e)
    })?;
    let mut result = match outcome {
        SignalOutcome::Evaluated(result) => result,
        SignalOutcome::NoData { symbol } => {
            return Err(api_error(
                StatusCode::NOT_FOUND,
                format!("no market data for {}", symbol),
            ))
        }
    };
    state
        .metrics
        .signal_evaluations_total
        .with_label_values(&["stock"])
        .inc();

    let watchlist = load_watchlist_or_empty(&state.watchlist_path).unwrap_or_default();
    if let Some(name) = name_for(&watchlist, &code) {
        result = result.with_name(name);
    }

    let commentary = match (&state.explainer, query.explain) {
        (Some(explainer), true) => explain_or_log(explainer.explain_stock(&result).await),
        _ => None,
    };
    let message = format_stock_message(&result, state.engine.config());
    Ok(Json(EvaluationResponse {
        result,
        message,
        commentary,
    }))
}

/// Evaluate one market index with the structure signal only
async fn get_index(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Query(query): Query<ExplainQuery>,
) -> Result<Json<EvaluationResponse<IndexResult>>, ApiError> {
    let code = normalise_code(&code)?;
    let outcome = state.engine.evaluate_index(&code).await.map_err(|e| {
        state
            .metrics
            .signal_evaluation_failures_total
            .with_label_values(&["index"])
            .inc();
        signal_error(&code, e)
    })?;
    let result = match outcome {
        SignalOutcome::Evaluated(result) => result,
        SignalOutcome::NoData { symbol } => {
            return Err(api_error(
                StatusCode::NOT_FOUND,
                format!("no market data for {}", symbol),
            ))
        }
    };
    state
        .metrics
        .signal_evaluations_total
        .with_label_values(&["index"])
        .inc();

    let commentary = match (&state.explainer, query.explain) {
        (Some(explainer), true) => {
            explain_or_log(explainer.explain_indices(std::slice::from_ref(&result)).await)
        }
        _ => None,
    };
    let message = format_index_message(&result, state.engine.config());
    Ok(Json(EvaluationResponse {
        result,
        message,
        commentary,
    }))
}

async fn list_watchlist(State(state): State<AppState>) -> Result<Json<Watchlist>, ApiError> {
    let watchlist = load_watchlist_or_empty(&state.watchlist_path).map_err(watchlist_error)?;
    Ok(Json(watchlist))
}

/// Add a stock to the watchlist; the name defaults to the normalised code
async fn add_watchlist(
    State(state): State<AppState>,
    Json(request): Json<AddWatchlistRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let _guard = state.watchlist_lock.lock().await;
    let name = request
        .name
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| full_code(&request.code.to_ascii_lowercase()));
    let code =
        add_to_watchlist(&state.watchlist_path, &name, &request.code).map_err(watchlist_error)?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "name": name, "code": code })),
    ))
}

/// Evaluate every watchlist entry; failures are reported per symbol
async fn watchlist_signals(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let watchlist = load_watchlist_or_empty(&state.watchlist_path).map_err(watchlist_error)?;

    let mut results = Vec::new();
    let mut errors = Vec::new();
    for (name, code) in &watchlist {
        match state.engine.evaluate(code).await {
            Ok(SignalOutcome::Evaluated(result)) => {
                state
                    .metrics
                    .signal_evaluations_total
                    .with_label_values(&["stock"])
                    .inc();
                results.push(result.with_name(name.clone()));
            }
            Ok(SignalOutcome::NoData { symbol }) => errors.push(json!({
                "symbol": symbol,
                "name": name,
                "error": "no market data",
            })),
            Err(e) => {
                state
                    .metrics
                    .signal_evaluation_failures_total
                    .with_label_values(&["stock"])
                    .inc();
                warn!(symbol = %code, error = %e, "Evaluation of {} failed", code);
                errors.push(json!({
                    "symbol": code,
                    "name": name,
                    "error": e.to_string(),
                }));
            }
        }
    }

    Ok(Json(json!({ "results": results, "errors": errors })))
}

async fn get_strategy(
    State(state): State<AppState>,
    Query(query): Query<ExplainQuery>,
) -> Json<Value> {
    let config = state.engine.config();
    let commentary = match (&state.explainer, query.explain) {
        (Some(explainer), true) => explain_or_log(explainer.explain_strategy(config).await),
        _ => None,
    };
    Json(json!({
        "strategy": &**config,
        "summary": config.summary(),
        "required_bars": state.engine.required_bars(),
        "commentary": commentary,
    }))
}

/// Ask the LLM for a revised strategy document. The active strategy is left untouched.
async fn edit_strategy(
    State(state): State<AppState>,
    Json(request): Json<EditStrategyRequest>,
) -> Result<Json<Value>, ApiError> {
    let preference = request.preference.trim();
    if preference.is_empty() {
        return Err(api_error(StatusCode::BAD_REQUEST, "preference must not be empty"));
    }
    let Some(explainer) = &state.explainer else {
        return Err(api_error(
            StatusCode::SERVICE_UNAVAILABLE,
            ExplainError::Disabled.to_string(),
        ));
    };

    let suggestion = match explainer.edit_strategy(state.engine.config(), preference).await {
        Ok(suggestion) => suggestion,
        Err(ExplainError::Disabled) => {
            return Err(api_error(
                StatusCode::SERVICE_UNAVAILABLE,
                ExplainError::Disabled.to_string(),
            ))
        }
        Err(e) => {
            warn!(error = %e, "Strategy edit failed");
            return Err(api_error(StatusCode::BAD_GATEWAY, e.to_string()));
        }
    };

    let validation_error = StrategyConfig::from_yaml(&suggestion)
        .err()
        .map(|e| e.to_string());
    Ok(Json(json!({
        "suggestion": suggestion,
        "valid": validation_error.is_none(),
        "validation_error": validation_error,
    })))
}

fn explain_or_log(result: Result<String, ExplainError>) -> Option<String> {
    match result {
        Ok(text) => Some(text),
        Err(e) => {
            warn!(error = %e, "Explanation unavailable");
            None
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/api/signals/{code}", get(get_signal))
        .route("/api/indices/{code}", get(get_index))
        .route("/api/watchlist", get(list_watchlist).post(add_watchlist))
        .route("/api/watchlist/signals", get(watchlist_signals))
        .route("/api/strategy", get(get_strategy))
        .route("/api/strategy/edit", post(edit_strategy))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                        .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
                )
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    metrics_middleware,
                ))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn start_server(state: AppState, port: u16) -> std::io::Result<()> {
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!(port = port, "HTTP server listening on port {}", port);
    info!(
        "Metrics endpoint available at http://0.0.0.0:{}/metrics",
        port
    );
    axum::serve(listener, app).await?;

    Ok(())
}
