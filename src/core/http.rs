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
use std::str::FromStr;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{info, warn, Level};

use crate::config::Config;
use crate::core::context::BiasContext;
use crate::error::BiasError;
use crate::metrics::Metrics;
use crate::models::{BiasReport, IndicatorSnapshot, SentimentFlag, SnapshotInput, TradingFocus};
use crate::rules::{load_rule_tables, NamedRuleTable, RuleTableRegistry};

#[derive(Clone)]
pub struct AppState {
    pub health: Arc<RwLock<HealthStatus>>,
    pub metrics: Arc<Metrics>,
    pub start_time: Arc<Instant>,
    pub context: Arc<BiasContext>,
    pub default_sentiment: SentimentFlag,
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

fn api_error(err: BiasError) -> ApiError {
    let status = match &err {
        BiasError::NotFound(_) => StatusCode::NOT_FOUND,
        BiasError::DuplicateName(_) => StatusCode::CONFLICT,
        BiasError::Validation { .. } | BiasError::InvalidRuleTable { .. } => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
    };
    (status, Json(json!({ "error": err.to_string() })))
}

fn invalid_body(err: serde_json::Error) -> ApiError {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({ "error": err.to_string() })),
    )
}

pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    let health = state.health.read().await;
    let uptime_seconds = state.start_time.elapsed().as_secs();
    Ok(Json(json!({
        "status": health.status,
        "uptime_seconds": uptime_seconds,
        "service": "macrobias"
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

/// List registered rule table names
async fn list_rule_tables(State(state): State<AppState>) -> Json<Value> {
    let names: Vec<String> = state.context.registry.list_names().into_iter().collect();
    Json(json!({
        "rule_tables": names,
        "default": state.context.default_rule_table,
    }))
}

async fn get_rule_table(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let table = state.context.registry.get(&name).map_err(api_error)?;
    Ok(Json(json!({ "name": name, "table": &*table })))
}

/// Register a new rule table; names cannot be replaced
async fn create_rule_table(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let named: NamedRuleTable = serde_json::from_value(body).map_err(invalid_body)?;
    let name = named.name.clone();

    state
        .context
        .registry
        .register(named.name, named.table)
        .map_err(|e| {
            warn!(rule_table = %name, error = %e, "Rejected rule table");
            api_error(e)
        })?;

    Ok((StatusCode::CREATED, Json(json!({ "name": name }))))
}

#[derive(Debug, Serialize, Deserialize)]
struct EvaluateRequest {
    #[serde(flatten)]
    snapshot: SnapshotInput,
    #[serde(default)]
    rule_table: Option<String>,
}

/// Score a caller-supplied snapshot
async fn evaluate_bias(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let request: EvaluateRequest = serde_json::from_value(body).map_err(invalid_body)?;
    let snapshot = IndicatorSnapshot::try_from(request.snapshot).map_err(api_error)?;
    let rule_table = request
        .rule_table
        .unwrap_or_else(|| state.context.default_rule_table.clone());

    let result = state
        .context
        .evaluate(&snapshot, Some(&rule_table))
        .map_err(api_error)?;
    let focus = TradingFocus::from_label(result.label);

    Ok(Json(json!({
        "rule_table": rule_table,
        "result": result,
        "focus": focus,
    })))
}

#[derive(Debug, Deserialize)]
struct BiasQuery {
    sentiment: Option<String>,
    rule_table: Option<String>,
}

/// Full report from the configured providers
async fn current_bias(
    State(state): State<AppState>,
    Query(params): Query<BiasQuery>,
) -> Result<Json<BiasReport>, ApiError> {
    let sentiment = match params.sentiment.as_deref() {
        Some(raw) => SentimentFlag::from_str(raw).map_err(api_error)?,
        None => state.default_sentiment,
    };

    let report = state
        .context
        .report(sentiment, params.rule_table.as_deref())
        .await
        .map_err(api_error)?;

    Ok(Json(report))
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/api/rule-tables", get(list_rule_tables))
        .route("/api/rule-tables", post(create_rule_table))
        .route("/api/rule-tables/{name}", get(get_rule_table))
        .route("/api/bias", get(current_bias))
        .route("/api/bias/evaluate", post(evaluate_bias))
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

/// Build the application state for `config`, sharing `registry`
pub fn build_state(
    config: &Config,
    registry: Arc<RuleTableRegistry>,
) -> Result<AppState, prometheus::Error> {
    let metrics = Arc::new(Metrics::new()?);
    let context = BiasContext::from_config(config, registry, Some(metrics.clone()));

    Ok(AppState {
        health: Arc::new(RwLock::new(HealthStatus::default())),
        metrics,
        start_time: Arc::new(Instant::now()),
        context: Arc::new(context),
        default_sentiment: config.sentiment,
    })
}

pub async fn start_server(config: Config) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let registry = RuleTableRegistry::global();
    if let Some(path) = &config.rule_tables_path {
        load_rule_tables(&registry, path)?;
    }

    let state = build_state(&config, registry)?;
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;

    info!(port = config.port, "HTTP server listening on port {}", config.port);
    info!(
        "Metrics endpoint available at http://0.0.0.0:{}/metrics",
        config.port
    );
    axum::serve(listener, app).await?;

    Ok(())
}
