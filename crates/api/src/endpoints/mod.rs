//! API endpoints.

mod account;
mod comments;
mod notifications;
mod posts;
mod replies;

use axum::Router;

use crate::middleware::AppState;

/// Create the API router. All routes live under `/api`.
pub fn router() -> Router<AppState> {
    Router::new().nest(
        "/api",
        Router::new()
            .nest("/posts", posts::router())
            .nest("/comments", comments::router())
            .nest("/replies", replies::router())
            .nest("/notifications", notifications::router())
            .nest("/account", account::router()),
    )
}
