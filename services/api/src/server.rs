use crate::cli::ServeArgs;
use crate::infra::{load_catalog, AppState};
use crate::routes::app_router;
use axum_prometheus::PrometheusMetricLayer;
use lagos_rent::config::AppConfig;
use lagos_rent::error::AppError;
use lagos_rent::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(path) = args.catalog.take() {
        config.catalog.path = Some(path);
    }

    telemetry::init(&config.telemetry, config.environment)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let catalog = Arc::new(load_catalog(config.catalog.path.as_deref())?);
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        catalog: catalog.clone(),
    };

    let app = app_router(app_state, config.catalog.default_page_size).layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        listings = catalog.snapshot().len(),
        "lagos rent listing service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
