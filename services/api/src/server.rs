use std::sync::atomic::Ordering;
use std::sync::Arc;

use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use tracing::info;

use sel_assess::config::AppConfig;
use sel_assess::error::AppError;
use sel_assess::questionnaires::{SessionHub, SubmissionService};
use sel_assess::store::AppwriteStore;
use sel_assess::telemetry;

use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_session_routes;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let collections = config.store.collections();
    let store = Arc::new(AppwriteStore::new(config.store.clone())?);
    let hub = Arc::new(SessionHub::new(SubmissionService::new(store, collections)));

    let app = with_session_routes(hub)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "questionnaire service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
