//! Request extractors.

use axum::{extract::FromRequestParts, http::request::Parts};
use devshare_common::AppError;
use devshare_db::entities::user;
use serde::Deserialize;

/// Authenticated user extractor.
///
/// Reads the user placed in request extensions by the auth middleware
/// and rejects with 401 when absent.
#[derive(Debug, Clone)]
pub struct AuthUser(pub user::Model);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<user::Model>()
            .cloned()
            .map(AuthUser)
            .ok_or(AppError::Unauthorized)
    }
}

/// Limit/offset pagination query parameters.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct Pagination {
    /// Maximum number of items to return.
    pub limit: u64,
    /// Number of items to skip.
    pub offset: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            limit: 20,
            offset: 0,
        }
    }
}

impl Pagination {
    /// The limit, clamped to a sane upper bound.
    #[must_use]
    pub fn limit(&self) -> u64 {
        self.limit.min(100)
    }
}
