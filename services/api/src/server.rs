use crate::cli::ServeArgs;
use crate::infra::{
    AppState, InMemoryComplianceRepository, InMemoryFeatureRepository, InMemoryProjectRepository,
    InMemorySimulationRepository,
};
use crate::routes::{with_api_routes, Services};
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use resilio::analysis::AnalysisService;
use resilio::config::AppConfig;
use resilio::error::AppError;
use resilio::features::FeatureService;
use resilio::projects::ProjectService;
use resilio::telemetry;
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

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let projects = Arc::new(InMemoryProjectRepository::default());
    let features = Arc::new(InMemoryFeatureRepository::default());
    let simulations = Arc::new(InMemorySimulationRepository::default());
    let checks = Arc::new(InMemoryComplianceRepository::default());

    let services = Services {
        projects: Arc::new(ProjectService::new(projects.clone())),
        features: Arc::new(FeatureService::new(features, projects.clone())),
        analysis: Arc::new(AnalysisService::new(
            simulations,
            checks,
            projects,
            config.analysis.clone(),
        )),
    };

    let app = with_api_routes(services)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "resilience planning service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
