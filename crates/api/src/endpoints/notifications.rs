//! Notification endpoints. All recipient-scoped.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{delete as delete_route, get, post},
};
use devshare_common::AppResult;
use serde::{Deserialize, Serialize};

use crate::{extractors::AuthUser, middleware::AppState, response::NotificationResponse};

/// Notification listing query parameters.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ListQuery {
    /// Maximum number of notifications to return.
    pub limit: u64,
    /// Number of notifications to skip.
    pub offset: u64,
    /// Return only unread notifications.
    pub unread_only: bool,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            limit: 20,
            offset: 0,
            unread_only: false,
        }
    }
}

/// List the user's notifications, newest first.
async fn list(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<NotificationResponse>>> {
    let notifications = state
        .notification_service
        .list(&user.id, query.unread_only, query.limit.min(100), query.offset)
        .await?;
    Ok(Json(notifications.into_iter().map(Into::into).collect()))
}

/// Unread count response.
#[derive(Debug, Serialize)]
pub struct UnreadCountResponse {
    /// Number of unread notifications.
    pub count: u64,
}

/// Count the user's unread notifications.
async fn unread_count(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<UnreadCountResponse>> {
    let count = state.notification_service.unread_count(&user.id).await?;
    Ok(Json(UnreadCountResponse { count }))
}

/// Mark one notification as read.
async fn mark_read(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    state.notification_service.mark_read(&user.id, &id).await?;
    Ok(Json(serde_json::json!({ "message": "Notification marked as read" })))
}

/// Updated-count response for bulk operations.
#[derive(Debug, Serialize)]
pub struct BulkResponse {
    /// Number of notifications affected.
    pub count: u64,
}

/// Mark all of the user's notifications as read.
async fn mark_all_read(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<BulkResponse>> {
    let count = state.notification_service.mark_all_read(&user.id).await?;
    Ok(Json(BulkResponse { count }))
}

/// Delete one notification.
async fn delete(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    state.notification_service.delete(&user.id, &id).await?;
    Ok(Json(serde_json::json!({ "message": "Notification deleted" })))
}

/// Delete all of the user's notifications.
async fn delete_all(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<BulkResponse>> {
    let count = state.notification_service.delete_all(&user.id).await?;
    Ok(Json(BulkResponse { count }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).delete(delete_all))
        .route("/unread-count", get(unread_count))
        .route("/{id}/read", post(mark_read))
        .route("/read-all", post(mark_all_read))
        .route("/{id}", delete_route(delete))
}
