//! Comment handlers

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use social_core::domain::{Comment, NewComment};
use social_shared::PostId;

use crate::error::ApiError;
use crate::extractor::CurrentUser;
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CommentsQuery {
    #[serde(rename = "postId")]
    pub post_id: Option<PostId>,
}

/// GET /api/getcomments?postId=N
pub async fn list_comments(
    State(state): State<AppState>,
    Query(query): Query<CommentsQuery>,
) -> Result<Json<Vec<Comment>>, ApiError> {
    let post_id = query
        .post_id
        .ok_or_else(|| ApiError::BadRequest("Post ID is required".to_string()))?;

    Ok(Json(state.comments.list(post_id).await?))
}

/// POST /api/addcomments
pub async fn add_comment(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<NewComment>,
) -> Result<(StatusCode, Json<ApiResponse<()>>), ApiError> {
    state.comments.add(user.user_id, &payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message((), "Comment added successfully")),
    ))
}
