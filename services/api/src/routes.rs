use crate::infra::{
    AppState, InMemoryComplianceRepository, InMemoryFeatureRepository, InMemoryProjectRepository,
    InMemorySimulationRepository,
};
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Extension;
use axum::Json;
use resilio::analysis::{analysis_router, AnalysisService};
use resilio::features::{feature_router, FeatureService};
use resilio::identity::RequesterId;
use resilio::projects::{
    project_router, ProjectId, ProjectService, ProjectStats,
};
use resilio::repository::RepositoryError;
use serde_json::json;
use std::sync::Arc;

/// The concrete services backing the HTTP surface.
#[derive(Clone)]
pub(crate) struct Services {
    pub(crate) projects: Arc<ProjectService<InMemoryProjectRepository>>,
    pub(crate) features:
        Arc<FeatureService<InMemoryFeatureRepository, InMemoryProjectRepository>>,
    pub(crate) analysis: Arc<
        AnalysisService<
            InMemorySimulationRepository,
            InMemoryComplianceRepository,
            InMemoryProjectRepository,
        >,
    >,
}

pub(crate) fn with_api_routes(services: Services) -> axum::Router {
    let stats = axum::Router::new()
        .route("/api/v1/projects/:project_id/stats", get(project_stats_endpoint))
        .with_state(services.clone());

    project_router(services.projects)
        .merge(feature_router(services.features))
        .merge(analysis_router(services.analysis))
        .merge(stats)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
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

/// Dashboard rollup assembled from the project and its dependent records.
pub(crate) async fn project_stats_endpoint(
    State(services): State<Services>,
    requester: RequesterId,
    Path(project_id): Path<String>,
) -> Response {
    let id = ProjectId(project_id);

    let project = match services.projects.get(&requester.0, &id) {
        Ok(project) => project,
        Err(error) => return stats_error(error),
    };
    let features = match services.features.for_project(&requester.0, &id) {
        Ok(features) => features,
        Err(error) => return stats_error(error),
    };
    let simulations = match services.analysis.simulations_for_project(&requester.0, &id) {
        Ok(records) => records,
        Err(error) => return stats_error(error),
    };
    let checks = match services
        .analysis
        .compliance_checks_for_project(&requester.0, &id)
    {
        Ok(records) => records,
        Err(error) => return stats_error(error),
    };

    let stats = ProjectStats::collect(&project, &features, &simulations, &checks);
    (StatusCode::OK, Json(json!({ "stats": stats }))).into_response()
}

fn stats_error(error: RepositoryError) -> Response {
    let status = match error {
        RepositoryError::NotFound => StatusCode::NOT_FOUND,
        RepositoryError::Conflict => StatusCode::CONFLICT,
        RepositoryError::Unavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(json!({ "error": error.to_string() }))).into_response()
}
