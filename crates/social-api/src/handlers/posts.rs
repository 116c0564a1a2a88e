//! Post handlers

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use social_core::domain::{NewPost, Post};
use social_shared::PostId;

use crate::error::ApiError;
use crate::extractor::CurrentUser;
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CreatedPost {
    pub post_id: PostId,
}

/// POST /api/posts
pub async fn create_post(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<NewPost>,
) -> Result<(StatusCode, Json<ApiResponse<CreatedPost>>), ApiError> {
    let post_id = state.posts.create(user.user_id, &payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(CreatedPost { post_id }, "Post created successfully")),
    ))
}

/// GET /api/getposts
pub async fn list_posts(State(state): State<AppState>) -> Result<Json<Vec<Post>>, ApiError> {
    Ok(Json(state.posts.list_all().await?))
}
