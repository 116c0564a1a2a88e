// ============================================================================
// Social API - Profile Handlers
// File: crates/social-api/src/handlers/profile.rs
// ============================================================================
//! Profile, follower, activity and follow handlers

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use social_core::domain::{Activity, UserPost, UserSummary};
use social_core::services::{CompleteProfileView, ProfileView};
use social_shared::{UserId, UserRef};

use crate::error::ApiError;
use crate::extractor::CurrentUser;
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PrivacySettings {
    pub is_private: bool,
}

#[derive(Debug, Serialize)]
pub struct FollowStatus {
    pub is_following: bool,
}

fn subject_of(segment: &str, user: &CurrentUser) -> Result<UserId, ApiError> {
    UserRef::parse(segment)
        .map(|r| r.resolve(user.user_id))
        .ok_or_else(|| ApiError::BadRequest(format!("Invalid user id: {}", segment)))
}

/// GET /api/profile/{id}
pub async fn get_profile(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<UserId>,
) -> Result<Json<ProfileView>, ApiError> {
    Ok(Json(state.profiles.get_profile(user.user_id, id).await?))
}

/// GET /api/profile/{id}/complete
pub async fn get_complete_profile(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<UserId>,
) -> Result<Json<CompleteProfileView>, ApiError> {
    Ok(Json(state.profiles.complete_profile(user.user_id, id).await?))
}

/// POST /api/profile/privacy
pub async fn update_privacy(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(settings): Json<PrivacySettings>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state.profiles.update_privacy(user.user_id, settings.is_private).await?;
    Ok(Json(ApiResponse::success_with_message((), "Privacy settings updated successfully")))
}

/// GET /api/followers/{id|me}
pub async fn get_followers(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(segment): Path<String>,
) -> Result<Json<Vec<UserSummary>>, ApiError> {
    let subject = subject_of(&segment, &user)?;
    Ok(Json(state.profiles.followers(user.user_id, subject).await?))
}

/// GET /api/following/{id|me}
pub async fn get_following(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(segment): Path<String>,
) -> Result<Json<Vec<UserSummary>>, ApiError> {
    let subject = subject_of(&segment, &user)?;
    Ok(Json(state.profiles.following(user.user_id, subject).await?))
}

/// GET /api/posts/user/{id|me}
pub async fn get_user_posts(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(segment): Path<String>,
) -> Result<Json<Vec<UserPost>>, ApiError> {
    let subject = subject_of(&segment, &user)?;
    Ok(Json(state.profiles.user_posts(user.user_id, subject).await?))
}

/// GET /api/activity/{id|me}
pub async fn get_user_activity(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(segment): Path<String>,
) -> Result<Json<Vec<Activity>>, ApiError> {
    let subject = subject_of(&segment, &user)?;
    Ok(Json(state.profiles.user_activity(user.user_id, subject).await?))
}

/// POST /api/follow/{id}
pub async fn follow(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<UserId>,
) -> Result<Json<ApiResponse<FollowStatus>>, ApiError> {
    let outcome = state.profiles.follow(user.user_id, id).await?;
    let message = if outcome.created {
        "Successfully followed user"
    } else {
        "Already following this user"
    };

    Ok(Json(ApiResponse::success_with_message(FollowStatus { is_following: true }, message)))
}

/// POST /api/unfollow/{id}
pub async fn unfollow(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<UserId>,
) -> Result<Json<ApiResponse<FollowStatus>>, ApiError> {
    state.profiles.unfollow(user.user_id, id).await?;
    Ok(Json(ApiResponse::success_with_message(
        FollowStatus { is_following: false },
        "Successfully unfollowed user",
    )))
}

/// GET /api/follow/status/{id}
pub async fn follow_status(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<UserId>,
) -> Result<Json<FollowStatus>, ApiError> {
    let is_following = state.profiles.follow_status(user.user_id, id).await?;
    Ok(Json(FollowStatus { is_following }))
}
