//! API request handlers

use axum::{extract::State, http::StatusCode, Json};
use futures::TryStreamExt;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::routes::AppState;
use crate::types::{BlogPost, PostFilter};

// Request bodies

#[derive(Debug, Deserialize, ToSchema)]
pub struct FetchPostsRequest {
    /// Username whose posts should be returned
    pub username: String,
}

// Response types

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PostsResponse {
    /// Post bodies in the order the store returned them
    pub posts: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// API version
    pub version: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

/// Driver errors carry host and topology details; those stay in the log
fn store_error() -> ApiError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: "Store error".into(),
        }),
    )
}

// Handlers

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        version: env!("CARGO_PKG_VERSION").into(),
    })
}

/// Store a blog post and echo it back.
///
/// A failed insert is logged. Unless `strict_writes` is enabled the caller
/// still receives 200 with the submitted post. Bodies missing `username` or
/// `post` are rejected with 422 (415 without a JSON content type) before the
/// store is touched.
#[utoipa::path(
    post,
    path = "/blog_post",
    request_body = BlogPost,
    responses(
        (status = 200, description = "Post accepted", body = BlogPost),
        (status = 403, description = "Origin not allowed", body = ErrorResponse),
        (status = 415, description = "Missing JSON content type"),
        (status = 422, description = "Missing username or post field"),
        (status = 500, description = "Insert failed (strict writes only)", body = ErrorResponse)
    ),
    tag = "posts"
)]
pub async fn submit_post(
    State(state): State<AppState>,
    Json(post): Json<BlogPost>,
) -> Result<Json<BlogPost>, ApiError> {
    match state.store.insert(&post).await {
        Ok(()) => tracing::info!(username = %post.username, "Posted user post to database"),
        Err(e) => {
            tracing::error!(username = %post.username, error = %e, "Unable to store user post");
            if state.strict_writes {
                return Err(store_error());
            }
        }
    }

    Ok(Json(post))
}

/// Fetch every post body written by a username.
///
/// A body without `username` is rejected with 422 (415 without a JSON content
/// type) before the store is queried.
#[utoipa::path(
    post,
    path = "/get_blog_posts",
    request_body = FetchPostsRequest,
    responses(
        (status = 200, description = "Posts for the user, possibly empty", body = PostsResponse),
        (status = 403, description = "Origin not allowed", body = ErrorResponse),
        (status = 415, description = "Missing JSON content type"),
        (status = 422, description = "Missing username field"),
        (status = 500, description = "Store error", body = ErrorResponse)
    ),
    tag = "posts"
)]
pub async fn get_blog_posts(
    State(state): State<AppState>,
    Json(req): Json<FetchPostsRequest>,
) -> Result<Json<PostsResponse>, ApiError> {
    let stream = state
        .store
        .find(PostFilter::by_username(req.username.as_str()))
        .await
        .map_err(|e| {
            tracing::error!(username = %req.username, error = %e, "Failed to query posts");
            store_error()
        })?;

    let posts: Vec<String> = stream
        .map_ok(|record| record.post)
        .try_collect()
        .await
        .map_err(|e| {
            tracing::error!(username = %req.username, error = %e, "Failed to read posts");
            store_error()
        })?;

    tracing::debug!(username = %req.username, count = posts.len(), "Fetched posts");

    Ok(Json(PostsResponse { posts }))
}
