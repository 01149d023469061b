use std::sync::Arc;

use axum::extract::Path;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::{Extension, Json};
use serde_json::json;

use sel_assess::locale::{self, Lang};
use sel_assess::questionnaires::{questionnaire_router, SessionHub};
use sel_assess::store::DocumentStore;

use crate::infra::AppState;

pub(crate) fn with_session_routes<S>(hub: Arc<SessionHub<S>>) -> axum::Router
where
    S: DocumentStore + 'static,
{
    questionnaire_router(hub)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route("/api/v1/locale/:lang", axum::routing::get(locale_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Serves the full label catalog for one language so clients can render the
/// questionnaire without bundling translations themselves.
pub(crate) async fn locale_endpoint(Path(lang): Path<String>) -> impl IntoResponse {
    let lang = Lang::from_tag(Some(lang.as_str()));
    (StatusCode::OK, Json(locale::catalog(lang).clone()))
}
