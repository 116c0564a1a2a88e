//! Router assembly

use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use axum::http::header::InvalidHeaderValue;
use social_shared::config::CorsSettings;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

use crate::handlers;
use crate::state::AppState;

/// CORS for the single configured front-end origin, cookies allowed.
pub fn cors_layer(settings: &CorsSettings) -> Result<CorsLayer, InvalidHeaderValue> {
    let origin: HeaderValue = settings.allowed_origin.parse()?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]))
}

pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    // Public routes (no session needed)
    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/api/register", post(handlers::auth::register))
        .route("/api/login", post(handlers::auth::login))
        .route("/api/logout", post(handlers::auth::logout))
        .route("/api/session", get(handlers::auth::session_status))
        .route("/api/getposts", get(handlers::posts::list_posts))
        .route("/api/getcomments", get(handlers::comments::list_comments));

    // Routes that extract `CurrentUser`
    let session_routes = Router::new()
        .route("/api/info", get(handlers::auth::info))
        .route("/api/posts", post(handlers::posts::create_post))
        .route("/api/addcomments", post(handlers::comments::add_comment))
        .route("/api/profile/privacy", post(handlers::profile::update_privacy))
        .route("/api/profile/{id}", get(handlers::profile::get_profile))
        .route("/api/profile/{id}/complete", get(handlers::profile::get_complete_profile))
        .route("/api/followers/{user}", get(handlers::profile::get_followers))
        .route("/api/following/{user}", get(handlers::profile::get_following))
        .route("/api/posts/user/{user}", get(handlers::profile::get_user_posts))
        .route("/api/activity/{user}", get(handlers::profile::get_user_activity))
        .route("/api/follow/{id}", post(handlers::profile::follow))
        .route("/api/unfollow/{id}", post(handlers::profile::unfollow))
        .route("/api/follow/status/{id}", get(handlers::profile::follow_status));

    Router::new()
        .merge(public_routes)
        .merge(session_routes)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(false)),
        )
}
