use async_trait::async_trait;
use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use serde::Deserialize;

use crate::api::errors::ApiError;

/// The caller's user id, taken from the `userId` (or `user_id`) query
/// parameter. Every ownership-scoped route requires it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CallerId(pub(crate) i64);

#[derive(Debug, Deserialize)]
struct CallerQuery {
    #[serde(default, rename = "userId", alias = "user_id")]
    user_id: Option<String>,
}

#[async_trait]
impl<S> FromRequestParts<S> for CallerId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<CallerQuery>::from_request_parts(parts, state)
            .await
            .map_err(|err| ApiError::BadRequest(err.body_text()))?;

        let raw = query
            .user_id
            .ok_or_else(|| ApiError::BadRequest("userId query parameter is required".to_string()))?;

        raw.trim()
            .parse::<i64>()
            .map(CallerId)
            .map_err(|_| ApiError::BadRequest(format!("Invalid userId '{raw}'")))
    }
}
