//! HTTP API layer for the DevShare backend.
//!
//! - **Endpoints**: REST routes under `/api`
//! - **Extractors**: authentication, pagination
//! - **Middleware**: bearer-token auth
//!
//! Built on Axum 0.8 with Tower middleware.

pub mod endpoints;
pub mod extractors;
pub mod middleware;
pub mod response;

pub use endpoints::router;
pub use middleware::AppState;
