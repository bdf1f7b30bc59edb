use std::sync::atomic::Ordering;
use std::sync::Arc;

use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use tracing::info;
use triage_ai::config::AppConfig;
use triage_ai::error::AppError;
use triage_ai::telemetry;
use triage_ai::triage::TriageService;

use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryTriageHistory, UnconfiguredExtractor};
use crate::routes::with_triage_routes;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::from_env()?;

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

    let history = Arc::new(InMemoryTriageHistory::default());
    let extractor = Arc::new(UnconfiguredExtractor);
    let triage_service = Arc::new(TriageService::new(history, extractor));

    let app = with_triage_routes(triage_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "evacuation triage service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
