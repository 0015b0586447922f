//! Comment endpoints.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post, put},
};
use devshare_common::AppResult;
use devshare_core::{
    LikeResult,
    services::{comment::CommentInput, reply::ReplyInput},
};

use crate::{
    extractors::{AuthUser, Pagination},
    middleware::AppState,
    response::{CascadeResponse, CommentResponse, LikeResponse, ReplyResponse},
};

/// Update a comment. Author only.
async fn update(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<CommentInput>,
) -> AppResult<Json<CommentResponse>> {
    let updated = state.comment_service.update(&user, &id, input).await?;
    Ok(Json(updated.into()))
}

/// Delete a comment and its replies. Comment author or post owner.
async fn delete(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<CascadeResponse>> {
    let counts = state.comment_service.delete(&user, &id).await?;
    Ok(Json(counts.into()))
}

/// Toggle a like on a comment.
async fn toggle_like(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<LikeResult>> {
    let result = state.like_service.toggle_comment_like(&user, &id).await?;
    Ok(Json(result))
}

/// List likes on a comment.
async fn likes(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<LikeResponse>>> {
    let likes = state.like_service.list_comment_likes(&id).await?;
    Ok(Json(likes.into_iter().map(Into::into).collect()))
}

/// List replies to a comment, oldest first.
async fn replies(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(page): Query<Pagination>,
) -> AppResult<Json<Vec<ReplyResponse>>> {
    let replies = state
        .reply_service
        .list(&id, page.limit(), page.offset)
        .await?;
    Ok(Json(replies.into_iter().map(Into::into).collect()))
}

/// Add a reply to a comment.
async fn add_reply(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<ReplyInput>,
) -> AppResult<Json<ReplyResponse>> {
    let created = state.reply_service.add(&user, &id, input).await?;
    Ok(Json(created.into()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}", put(update).delete(delete))
        .route("/{id}/like", post(toggle_like))
        .route("/{id}/likes", get(likes))
        .route("/{id}/replies", get(replies).post(add_reply))
}
