use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use serde_json::json;

use super::domain::{FeatureDraft, FeatureId, FeaturePatch};
use super::repository::FeatureRepository;
use super::service::FeatureService;
use crate::identity::RequesterId;
use crate::projects::domain::ProjectId;
use crate::projects::repository::ProjectRepository;
use crate::projects::router::repository_error_response;

/// Router builder exposing map feature endpoints.
pub fn feature_router<F, P>(service: Arc<FeatureService<F, P>>) -> Router
where
    F: FeatureRepository + 'static,
    P: ProjectRepository + 'static,
{
    Router::new()
        .route("/api/v1/features", post(create_handler::<F, P>))
        .route(
            "/api/v1/features/project/:project_id",
            get(project_features_handler::<F, P>),
        )
        .route(
            "/api/v1/features/:feature_id",
            put(update_handler::<F, P>).delete(delete_handler::<F, P>),
        )
        .with_state(service)
}

async fn create_handler<F, P>(
    State(service): State<Arc<FeatureService<F, P>>>,
    requester: RequesterId,
    axum::Json(draft): axum::Json<FeatureDraft>,
) -> Response
where
    F: FeatureRepository + 'static,
    P: ProjectRepository + 'static,
{
    match service.create(&requester.0, draft) {
        Ok(feature) => (StatusCode::CREATED, axum::Json(feature)).into_response(),
        Err(error) => repository_error_response(error),
    }
}

async fn project_features_handler<F, P>(
    State(service): State<Arc<FeatureService<F, P>>>,
    requester: RequesterId,
    Path(project_id): Path<String>,
) -> Response
where
    F: FeatureRepository + 'static,
    P: ProjectRepository + 'static,
{
    match service.for_project(&requester.0, &ProjectId(project_id)) {
        Ok(features) => (StatusCode::OK, axum::Json(features)).into_response(),
        Err(error) => repository_error_response(error),
    }
}

async fn update_handler<F, P>(
    State(service): State<Arc<FeatureService<F, P>>>,
    requester: RequesterId,
    Path(feature_id): Path<String>,
    axum::Json(patch): axum::Json<FeaturePatch>,
) -> Response
where
    F: FeatureRepository + 'static,
    P: ProjectRepository + 'static,
{
    match service.update(&requester.0, &FeatureId(feature_id), patch) {
        Ok(feature) => (StatusCode::OK, axum::Json(feature)).into_response(),
        Err(error) => repository_error_response(error),
    }
}

async fn delete_handler<F, P>(
    State(service): State<Arc<FeatureService<F, P>>>,
    requester: RequesterId,
    Path(feature_id): Path<String>,
) -> Response
where
    F: FeatureRepository + 'static,
    P: ProjectRepository + 'static,
{
    match service.delete(&requester.0, &FeatureId(feature_id)) {
        Ok(()) => (
            StatusCode::OK,
            axum::Json(json!({ "message": "feature deleted" })),
        )
            .into_response(),
        Err(error) => repository_error_response(error),
    }
}
