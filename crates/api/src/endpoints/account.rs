//! Account endpoints.

use axum::{Json, Router, routing::get};
use devshare_common::AppResult;

use crate::{extractors::AuthUser, middleware::AppState, response::AccountResponse};

/// Get the authenticated user's account.
async fn show(AuthUser(user): AuthUser) -> AppResult<Json<AccountResponse>> {
    Ok(Json(user.into()))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(show))
}
