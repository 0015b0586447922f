//! Post endpoints.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};
use devshare_common::AppResult;
use devshare_core::{
    LikeResult,
    services::{comment::CommentInput, post::PostInput},
};

use crate::{
    extractors::{AuthUser, Pagination},
    middleware::AppState,
    response::{CascadeResponse, CommentResponse, LikeResponse, PostResponse},
};

/// List posts, newest first.
async fn list(
    State(state): State<AppState>,
    Query(page): Query<Pagination>,
) -> AppResult<Json<Vec<PostResponse>>> {
    let posts = state.post_service.list(page.limit(), page.offset).await?;
    Ok(Json(posts.into_iter().map(Into::into).collect()))
}

/// Create a post.
async fn create(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(input): Json<PostInput>,
) -> AppResult<Json<PostResponse>> {
    let created = state.post_service.create(&user, input).await?;
    Ok(Json(created.into()))
}

/// Get a post.
async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<PostResponse>> {
    let post = state.post_service.get(&id).await?;
    Ok(Json(post.into()))
}

/// Update a post. Owner only.
async fn update(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<PostInput>,
) -> AppResult<Json<PostResponse>> {
    let updated = state.post_service.update(&user, &id, input).await?;
    Ok(Json(updated.into()))
}

/// Delete a post and its entire graph. Owner only.
async fn delete(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<CascadeResponse>> {
    let counts = state.post_service.delete(&user, &id).await?;
    Ok(Json(counts.into()))
}

/// Toggle a like on a post.
async fn toggle_like(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<LikeResult>> {
    let result = state.like_service.toggle_post_like(&user, &id).await?;
    Ok(Json(result))
}

/// List likes on a post.
async fn likes(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<LikeResponse>>> {
    let likes = state.like_service.list_post_likes(&id).await?;
    Ok(Json(likes.into_iter().map(Into::into).collect()))
}

/// List comments on a post, oldest first.
async fn comments(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(page): Query<Pagination>,
) -> AppResult<Json<Vec<CommentResponse>>> {
    let comments = state
        .comment_service
        .list(&id, page.limit(), page.offset)
        .await?;
    Ok(Json(comments.into_iter().map(Into::into).collect()))
}

/// Add a comment to a post.
async fn add_comment(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<CommentInput>,
) -> AppResult<Json<CommentResponse>> {
    let created = state.comment_service.add(&user, &id, input).await?;
    Ok(Json(created.into()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", get(show).put(update).delete(delete))
        .route("/{id}/like", post(toggle_like))
        .route("/{id}/likes", get(likes))
        .route("/{id}/comments", get(comments).post(add_comment))
}
