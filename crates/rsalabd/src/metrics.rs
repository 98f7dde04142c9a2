//! Prometheus /metrics + health check HTTP endpoints
//!
//! Endpoints:
//!   GET /metrics  OpenMetrics text: rsalab_requests_total, rsalab_request_duration_seconds
//!   GET /healthz  Liveness probe (always 200 if process is running)
//!   GET /readyz   Readiness probe (200 if the ciphertext store is usable)

use anyhow::Result;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use prometheus_client::encoding::text::encode;
use prometheus_client::metrics::counter::Counter;
use prometheus_client::metrics::family::Family;
use prometheus_client::metrics::histogram::{exponential_buckets, Histogram};
use prometheus_client::registry::Registry;
use rsalab_core::RsaLabResult;
use std::sync::Arc;
use std::time::Instant;

use crate::state::SharedStore;

const OPENMETRICS_CONTENT_TYPE: &str =
    "application/openmetrics-text; version=1.0.0; charset=utf-8";

type Labels = Vec<(String, String)>;
type HistogramFamily = Family<Labels, Histogram, fn() -> Histogram>;

/// Per-operation request counters and latency histograms.
#[derive(Clone)]
pub struct ApiMetrics {
    requests: Family<Labels, Counter>,
    duration: HistogramFamily,
}

impl ApiMetrics {
    pub fn new(registry: &mut Registry) -> Self {
        let requests = Family::<Labels, Counter>::default();
        // 1ms .. ~32s; 2048-bit keygen lands in the upper buckets
        let duration: HistogramFamily =
            Family::new_with_constructor(|| Histogram::new(exponential_buckets(0.001, 2.0, 16)));

        registry.register(
            "rsalab_requests",
            "API requests by operation and outcome",
            requests.clone(),
        );
        registry.register(
            "rsalab_request_duration_seconds",
            "API request latency by operation and outcome",
            duration.clone(),
        );

        Self { requests, duration }
    }

    /// Record one completed operation. `outcome` is "ok" or the error kind.
    pub fn observe<T>(&self, op: &str, started: Instant, result: &RsaLabResult<T>) {
        let outcome = match result {
            Ok(_) => "ok",
            Err(e) => e.kind(),
        };
        let labels = vec![
            ("op".to_string(), op.to_string()),
            ("outcome".to_string(), outcome.to_string()),
        ];
        self.requests.get_or_create(&labels).inc();
        self.duration
            .get_or_create(&labels)
            .observe(started.elapsed().as_secs_f64());
    }
}

/// State shared by the health listener
#[derive(Clone)]
pub struct HealthState {
    pub registry: Arc<Registry>,
    pub store: SharedStore,
}

/// Serve Prometheus metrics and health endpoints on `addr` (e.g. "127.0.0.1:9100")
pub async fn serve(addr: String, state: HealthState) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| anyhow::anyhow!("metrics bind {addr}: {e}"))?;

    tracing::info!(addr = %addr, "metrics: listening on /metrics, /healthz, /readyz");

    axum::serve(listener, router(state))
        .await
        .map_err(|e| anyhow::anyhow!("metrics server: {e}"))
}

fn router(state: HealthState) -> Router {
    Router::new()
        .route("/metrics", get(metrics_handler))
        .route("/healthz", get(healthz_handler))
        .route("/readyz", get(readyz_handler))
        .with_state(state)
}

async fn metrics_handler(State(state): State<HealthState>) -> Response {
    let mut body = String::new();
    if let Err(e) = encode(&mut body, &state.registry) {
        tracing::error!("metrics encode failed: {e}");
        return (StatusCode::INTERNAL_SERVER_ERROR, format!("encode: {e}")).into_response();
    }
    ([(header::CONTENT_TYPE, OPENMETRICS_CONTENT_TYPE)], body).into_response()
}

/// Liveness: the process is up and serving.
async fn healthz_handler() -> &'static str {
    concat!("ok rsalabd ", env!("CARGO_PKG_VERSION"))
}

/// Readiness probe: returns 200 if the store is usable, 503 otherwise.
async fn readyz_handler(State(state): State<HealthState>) -> impl IntoResponse {
    match state.store.read().await.check_health() {
        Ok(()) => (StatusCode::OK, "ready".to_string()),
        Err(e) => {
            tracing::warn!("readiness check failed: {e}");
            (StatusCode::SERVICE_UNAVAILABLE, format!("store unavailable: {e}"))
        }
    }
}
