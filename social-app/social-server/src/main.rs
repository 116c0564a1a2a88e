use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

use social_api::{build_router, cors_layer, state::CookieSettings, AppState};
use social_core::domain::SessionLifetime;
use social_core::services::{
    spawn_expiry_sweeper, AuthService, CommentService, PostService, ProfileService, SessionManager,
    SessionPolicy,
};
use social_infrastructure::{
    create_pool, run_migrations, PgActivityRepository, PgCommentRepository, PgFollowRepository,
    PgPostRepository, PgSessionRepository, PgUserRepository,
};
use social_shared::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load()?;

    // Initialize telemetry; the guard flushes file logs on exit
    let _log_guard = social_shared::telemetry::init_telemetry(&config.log)?;

    info!("{} starting ({})...", config.app.name, config.app.env);

    // Connect to Database
    info!("Connecting to database...");
    let pool = create_pool(&config.database).await?;
    run_migrations(&pool).await?;
    info!("Database connection established.");

    // Repositories
    let users = Arc::new(PgUserRepository::new(pool.clone()));
    let follows = Arc::new(PgFollowRepository::new(pool.clone()));
    let posts = Arc::new(PgPostRepository::new(pool.clone()));
    let comments = Arc::new(PgCommentRepository::new(pool.clone()));
    let activity = Arc::new(PgActivityRepository::new(pool.clone()));

    // Session manager and its background sweeper
    let policy = SessionPolicy {
        lifetime: SessionLifetime::new(config.session.lifetime()),
        cache_write_timeout: config.session.cache_write_timeout(),
    };
    let sessions = Arc::new(SessionManager::new(Arc::new(PgSessionRepository::new(pool)), policy));
    let sweeper = spawn_expiry_sweeper(sessions.clone(), config.session.sweep_interval());

    // Create App State
    let state = AppState {
        sessions: sessions.clone(),
        auth: Arc::new(AuthService::new(users.clone(), sessions)),
        profiles: Arc::new(ProfileService::new(users.clone(), follows, posts.clone(), activity)),
        posts: Arc::new(PostService::new(posts, users.clone())),
        comments: Arc::new(CommentService::new(comments, users)),
        cookie: CookieSettings::from(&config.session),
    };

    let app = build_router(state, cors_layer(&config.cors)?);

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    sweeper.abort();
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received");
}
