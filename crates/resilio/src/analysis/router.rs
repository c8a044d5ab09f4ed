use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::domain::{ComplianceCheckId, ComplianceDraft, SimulationDraft, SimulationId};
use super::repository::{ComplianceRepository, SimulationRepository};
use super::service::AnalysisService;
use crate::identity::RequesterId;
use crate::projects::domain::ProjectId;
use crate::projects::repository::ProjectRepository;
use crate::projects::router::repository_error_response;

/// Router builder exposing the simulation and compliance endpoints. Both
/// create endpoints answer 201 with the still-pending record; callers poll
/// the read endpoint to observe the terminal state.
pub fn analysis_router<S, C, P>(service: Arc<AnalysisService<S, C, P>>) -> Router
where
    S: SimulationRepository + 'static,
    C: ComplianceRepository + 'static,
    P: ProjectRepository + 'static,
{
    Router::new()
        .route("/api/v1/simulations", post(start_simulation_handler::<S, C, P>))
        .route(
            "/api/v1/simulations/project/:project_id",
            get(project_simulations_handler::<S, C, P>),
        )
        .route(
            "/api/v1/simulations/:simulation_id",
            get(simulation_handler::<S, C, P>).delete(delete_simulation_handler::<S, C, P>),
        )
        .route("/api/v1/compliance", post(start_compliance_handler::<S, C, P>))
        .route(
            "/api/v1/compliance/project/:project_id",
            get(project_compliance_handler::<S, C, P>),
        )
        .route(
            "/api/v1/compliance/:check_id",
            get(compliance_handler::<S, C, P>).delete(delete_compliance_handler::<S, C, P>),
        )
        .with_state(service)
}

async fn start_simulation_handler<S, C, P>(
    State(service): State<Arc<AnalysisService<S, C, P>>>,
    requester: RequesterId,
    axum::Json(draft): axum::Json<SimulationDraft>,
) -> Response
where
    S: SimulationRepository + 'static,
    C: ComplianceRepository + 'static,
    P: ProjectRepository + 'static,
{
    match service.start_simulation(&requester.0, draft) {
        Ok(record) => (StatusCode::CREATED, axum::Json(record)).into_response(),
        Err(error) => repository_error_response(error),
    }
}

async fn project_simulations_handler<S, C, P>(
    State(service): State<Arc<AnalysisService<S, C, P>>>,
    requester: RequesterId,
    Path(project_id): Path<String>,
) -> Response
where
    S: SimulationRepository + 'static,
    C: ComplianceRepository + 'static,
    P: ProjectRepository + 'static,
{
    match service.simulations_for_project(&requester.0, &ProjectId(project_id)) {
        Ok(records) => (StatusCode::OK, axum::Json(records)).into_response(),
        Err(error) => repository_error_response(error),
    }
}

async fn simulation_handler<S, C, P>(
    State(service): State<Arc<AnalysisService<S, C, P>>>,
    requester: RequesterId,
    Path(simulation_id): Path<String>,
) -> Response
where
    S: SimulationRepository + 'static,
    C: ComplianceRepository + 'static,
    P: ProjectRepository + 'static,
{
    match service.get_simulation(&requester.0, &SimulationId(simulation_id)) {
        Ok(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        Err(error) => repository_error_response(error),
    }
}

async fn delete_simulation_handler<S, C, P>(
    State(service): State<Arc<AnalysisService<S, C, P>>>,
    requester: RequesterId,
    Path(simulation_id): Path<String>,
) -> Response
where
    S: SimulationRepository + 'static,
    C: ComplianceRepository + 'static,
    P: ProjectRepository + 'static,
{
    match service.delete_simulation(&requester.0, &SimulationId(simulation_id)) {
        Ok(()) => (
            StatusCode::OK,
            axum::Json(json!({ "message": "simulation deleted" })),
        )
            .into_response(),
        Err(error) => repository_error_response(error),
    }
}

async fn start_compliance_handler<S, C, P>(
    State(service): State<Arc<AnalysisService<S, C, P>>>,
    requester: RequesterId,
    axum::Json(draft): axum::Json<ComplianceDraft>,
) -> Response
where
    S: SimulationRepository + 'static,
    C: ComplianceRepository + 'static,
    P: ProjectRepository + 'static,
{
    match service.start_compliance_check(&requester.0, draft) {
        Ok(record) => (StatusCode::CREATED, axum::Json(record)).into_response(),
        Err(error) => repository_error_response(error),
    }
}

async fn project_compliance_handler<S, C, P>(
    State(service): State<Arc<AnalysisService<S, C, P>>>,
    requester: RequesterId,
    Path(project_id): Path<String>,
) -> Response
where
    S: SimulationRepository + 'static,
    C: ComplianceRepository + 'static,
    P: ProjectRepository + 'static,
{
    match service.compliance_checks_for_project(&requester.0, &ProjectId(project_id)) {
        Ok(records) => (StatusCode::OK, axum::Json(records)).into_response(),
        Err(error) => repository_error_response(error),
    }
}

async fn compliance_handler<S, C, P>(
    State(service): State<Arc<AnalysisService<S, C, P>>>,
    requester: RequesterId,
    Path(check_id): Path<String>,
) -> Response
where
    S: SimulationRepository + 'static,
    C: ComplianceRepository + 'static,
    P: ProjectRepository + 'static,
{
    match service.get_compliance_check(&requester.0, &ComplianceCheckId(check_id)) {
        Ok(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        Err(error) => repository_error_response(error),
    }
}

async fn delete_compliance_handler<S, C, P>(
    State(service): State<Arc<AnalysisService<S, C, P>>>,
    requester: RequesterId,
    Path(check_id): Path<String>,
) -> Response
where
    S: SimulationRepository + 'static,
    C: ComplianceRepository + 'static,
    P: ProjectRepository + 'static,
{
    match service.delete_compliance_check(&requester.0, &ComplianceCheckId(check_id)) {
        Ok(()) => (
            StatusCode::OK,
            axum::Json(json!({ "message": "compliance check deleted" })),
        )
            .into_response(),
        Err(error) => repository_error_response(error),
    }
}
