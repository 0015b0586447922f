//! Reply endpoints.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, put},
};
use devshare_common::AppResult;
use devshare_core::{LikeResult, services::reply::ReplyInput};

use crate::{
    extractors::AuthUser,
    middleware::AppState,
    response::{CascadeResponse, LikeResponse, ReplyResponse},
};

/// Update a reply. Author only.
async fn update(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<ReplyInput>,
) -> AppResult<Json<ReplyResponse>> {
    let updated = state.reply_service.update(&user, &id, input).await?;
    Ok(Json(updated.into()))
}

/// Delete a reply. Reply author or post owner.
async fn delete(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<CascadeResponse>> {
    let counts = state.reply_service.delete(&user, &id).await?;
    Ok(Json(counts.into()))
}

/// Toggle a like on a reply.
async fn toggle_like(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<LikeResult>> {
    let result = state.like_service.toggle_reply_like(&user, &id).await?;
    Ok(Json(result))
}

/// List likes on a reply.
async fn likes(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<LikeResponse>>> {
    let likes = state.like_service.list_reply_likes(&id).await?;
    Ok(Json(likes.into_iter().map(Into::into).collect()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}", put(update).delete(delete))
        .route("/{id}/likes", get(likes).post(toggle_like))
}
