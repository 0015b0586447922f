//! API middleware.

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};
use devshare_core::{
    CommentService, LikeService, NotificationService, PostService, ReplyService, UserService,
};

/// Application state shared by all routes.
#[derive(Clone)]
pub struct AppState {
    /// User lookup and token authentication.
    pub user_service: UserService,
    /// Post CRUD and cascade deletion.
    pub post_service: PostService,
    /// Comment CRUD and cascade deletion.
    pub comment_service: CommentService,
    /// Reply CRUD and cascade deletion.
    pub reply_service: ReplyService,
    /// Like toggles for posts, comments, and replies.
    pub like_service: LikeService,
    /// Notification listing and maintenance.
    pub notification_service: NotificationService,
}

/// Authentication middleware.
///
/// Resolves a bearer token to a user and stores the user in request
/// extensions. Routes requiring auth reject via the `AuthUser`
/// extractor, so unauthenticated requests pass through here untouched.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(auth_header) = req.headers().get("Authorization") {
        if let Ok(auth_str) = auth_header.to_str() {
            if let Some(token) = auth_str.strip_prefix("Bearer ") {
                if let Ok(user) = state.user_service.authenticate_by_token(token).await {
                    req.extensions_mut().insert(user);
                }
            }
        }
    }

    next.run(req).await
}
