use crate::cli::ServeArgs;
use crate::infra::{load_catalog, AppState, InMemoryOnboardingDirectory};
use crate::routes::with_marketplace_routes;
use aisle::config::AppConfig;
use aisle::error::AppError;
use aisle::marketplace::access::{RouteAccessGuard, SiteMap};
use aisle::marketplace::directory::DirectoryService;
use aisle::telemetry;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
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
    if let Some(catalog) = args.catalog.take() {
        config.directory.catalog_path = Some(catalog);
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let catalog = load_catalog(config.directory.catalog_path.as_deref())?;
    info!(
        vendors = catalog.len(),
        rejected = catalog.rejected().len(),
        "vendor catalog loaded"
    );

    let directory = Arc::new(DirectoryService::new(catalog));
    let onboarding = Arc::new(InMemoryOnboardingDirectory::default());
    let guard = Arc::new(RouteAccessGuard::new(
        SiteMap::default(),
        onboarding,
        config.guard.onboarding_lookup_timeout,
    ));

    let app = with_marketplace_routes(directory, guard)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "marketplace services ready");

    axum::serve(listener, app).await?;
    Ok(())
}
