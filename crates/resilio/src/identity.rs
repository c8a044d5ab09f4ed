//! Requester identity. Authentication itself is an upstream collaborator:
//! the gateway validates credentials and forwards the subject in the
//! `x-user-id` header, which this service trusts verbatim. Ownership scoping
//! against that identity happens in the services.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;

pub const USER_ID_HEADER: &str = "x-user-id";

/// Identifier of the authenticated planner owning projects.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

/// Extractor yielding the trusted identity attached by the gateway.
#[derive(Debug, Clone)]
pub struct RequesterId(pub UserId);

#[async_trait]
impl<S> FromRequestParts<S> for RequesterId
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<serde_json::Value>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty());

        match value {
            Some(subject) => Ok(RequesterId(UserId(subject.to_string()))),
            None => Err((
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "missing x-user-id header" })),
            )),
        }
    }
}
