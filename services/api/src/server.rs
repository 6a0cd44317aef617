use crate::cli::ServeArgs;
use crate::infra::{build_planner, AppState};
use crate::routes::with_service_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use event_planner::config::AppConfig;
use event_planner::error::AppError;
use event_planner::events::JsonFileEventStore;
use event_planner::telemetry::{self, LogTarget};
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

    telemetry::init(&config.telemetry, LogTarget::Stdout)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        static_dir: Arc::new(config.storage.static_dir.clone()),
    };

    let store = Arc::new(JsonFileEventStore::new(config.storage.events_path.clone()));
    let events_path = store.path().to_path_buf();
    let planner = Arc::new(build_planner(&config.weather, store)?);
    let cache_ttl = planner.forecasts().cache().ttl();

    let app = with_service_routes(planner)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        events = %events_path.display(),
        cache_ttl_secs = cache_ttl.as_secs(),
        "smart event planner ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
