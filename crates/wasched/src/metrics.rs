//! `GET /metrics` endpoint for the Prometheus backend.
use axum::{
    Router,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use tokio::net::TcpListener;
use tracing::warn;

use wasched_prometheus::{Encoder, PrometheusMetrics, TextEncoder};

/// Router with the metrics route mounted.
///
/// Routes:
/// - GET /metrics - registry in the Prometheus text format
pub fn router(metrics: PrometheusMetrics) -> Router {
    Router::new()
        .route("/metrics", get(metrics_handler))
        .with_state(metrics)
}

/// Serve the metrics router on `listener` until the runtime stops.
pub async fn serve(listener: TcpListener, metrics: PrometheusMetrics) -> std::io::Result<()> {
    axum::serve(listener, router(metrics)).await
}

/// GET /metrics
async fn metrics_handler(State(metrics): State<PrometheusMetrics>) -> Response {
    match metrics.render() {
        Ok(body) => {
            let content_type = TextEncoder::new().format_type().to_string();
            ([(header::CONTENT_TYPE, content_type)], body).into_response()
        }
        Err(e) => {
            warn!(error = %e, "failed to render metrics");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}
