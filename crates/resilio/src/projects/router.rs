use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde_json::json;

use super::domain::{ProjectDraft, ProjectId, ProjectPatch};
use super::repository::ProjectRepository;
use super::service::ProjectService;
use crate::identity::RequesterId;
use crate::repository::RepositoryError;

/// Router builder exposing owner-scoped project CRUD.
pub fn project_router<P>(service: Arc<ProjectService<P>>) -> Router
where
    P: ProjectRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/projects",
            get(list_handler::<P>).post(create_handler::<P>),
        )
        .route(
            "/api/v1/projects/:project_id",
            get(get_handler::<P>)
                .put(update_handler::<P>)
                .delete(delete_handler::<P>),
        )
        .with_state(service)
}

pub(crate) fn repository_error_response(error: RepositoryError) -> Response {
    let status = match error {
        RepositoryError::NotFound => StatusCode::NOT_FOUND,
        RepositoryError::Conflict => StatusCode::CONFLICT,
        RepositoryError::Unavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}

async fn list_handler<P>(
    State(service): State<Arc<ProjectService<P>>>,
    requester: RequesterId,
) -> Response
where
    P: ProjectRepository + 'static,
{
    match service.list(&requester.0) {
        Ok(projects) => (StatusCode::OK, axum::Json(projects)).into_response(),
        Err(error) => repository_error_response(error),
    }
}

async fn create_handler<P>(
    State(service): State<Arc<ProjectService<P>>>,
    requester: RequesterId,
    axum::Json(draft): axum::Json<ProjectDraft>,
) -> Response
where
    P: ProjectRepository + 'static,
{
    match service.create(&requester.0, draft) {
        Ok(project) => (StatusCode::CREATED, axum::Json(project)).into_response(),
        Err(error) => repository_error_response(error),
    }
}

async fn get_handler<P>(
    State(service): State<Arc<ProjectService<P>>>,
    requester: RequesterId,
    Path(project_id): Path<String>,
) -> Response
where
    P: ProjectRepository + 'static,
{
    match service.get(&requester.0, &ProjectId(project_id)) {
        Ok(project) => (StatusCode::OK, axum::Json(project)).into_response(),
        Err(error) => repository_error_response(error),
    }
}

async fn update_handler<P>(
    State(service): State<Arc<ProjectService<P>>>,
    requester: RequesterId,
    Path(project_id): Path<String>,
    axum::Json(patch): axum::Json<ProjectPatch>,
) -> Response
where
    P: ProjectRepository + 'static,
{
    match service.update(&requester.0, &ProjectId(project_id), patch) {
        Ok(project) => (StatusCode::OK, axum::Json(project)).into_response(),
        Err(error) => repository_error_response(error),
    }
}

async fn delete_handler<P>(
    State(service): State<Arc<ProjectService<P>>>,
    requester: RequesterId,
    Path(project_id): Path<String>,
) -> Response
where
    P: ProjectRepository + 'static,
{
    match service.delete(&requester.0, &ProjectId(project_id)) {
        Ok(()) => (
            StatusCode::OK,
            axum::Json(json!({ "message": "project deleted" })),
        )
            .into_response(),
        Err(error) => repository_error_response(error),
    }
}
