use crate::api::AppState;
use axum::{
    extract::{MatchedPath, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{Instrument, info, info_span, warn};
use uuid::Uuid;

/// `GET /metrics`
pub async fn get_metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.prometheus_handle.as_ref().map_or_else(
        || "Metrics not enabled or failed to initialize".to_string(),
        metrics_exporter_prometheus::PrometheusHandle::render,
    )
}

fn outcome_for(status: StatusCode) -> &'static str {
    if status.is_server_error() {
        "error"
    } else if status.is_client_error() {
        "client_error"
    } else {
        "success"
    }
}

/// Wraps each request in a span and records `http_requests_total` and
/// `http_request_duration_seconds` labelled by route template.
pub async fn track_metrics(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let request_id = Uuid::new_v4();

    let method = req.method().clone();
    let route = req.extensions().get::<MatchedPath>().map_or_else(
        || req.uri().path().to_string(),
        |mp| mp.as_str().to_string(),
    );

    let span = info_span!(
        "request",
        request_id = %request_id,
        method = %method,
        route = %route,
        query = req.uri().query().unwrap_or_default(),
    );

    async move {
        let response = next.run(req).await;

        let elapsed = start.elapsed();
        let status = response.status();
        let outcome = outcome_for(status);

        let labels = [
            ("method", method.to_string()),
            ("path", route),
            ("status", status.as_u16().to_string()),
        ];

        metrics::counter!("http_requests_total", &labels).increment(1);
        metrics::histogram!("http_request_duration_seconds", &labels)
            .record(elapsed.as_secs_f64());

        let duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        if status.is_server_error() {
            warn!(duration_ms, status_code = status.as_u16(), outcome, "Request failed");
        } else {
            info!(duration_ms, status_code = status.as_u16(), outcome, "Request finished");
        }

        response
    }
    .instrument(span)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_groups_status_classes() {
        assert_eq!(outcome_for(StatusCode::OK), "success");
        assert_eq!(outcome_for(StatusCode::NOT_FOUND), "client_error");
        assert_eq!(outcome_for(StatusCode::BAD_GATEWAY), "error");
    }
}
