//! DevShare server entry point.

use std::sync::Arc;

use axum::{Router, middleware};
use devshare_api::{middleware::AppState, router as api_router};
use devshare_common::Config;
use devshare_core::{
    CommentService, LikeService, NotificationService, PostService, ReplyService, UserService,
};
use devshare_db::repositories::{
    CascadeRepository, CommentLikeRepository, CommentRepository, NotificationRepository,
    PostLikeRepository, PostRepository, ReplyLikeRepository, ReplyRepository, UserRepository,
};
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Waits for a shutdown signal (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received SIGINT, initiating graceful shutdown...");
        },
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "devshare=debug,tower_http=debug".into()),
        )
        .init();

    info!("Starting DevShare server...");

    // Load configuration
    let config = Config::load()?;

    // Connect to database
    let db = devshare_db::init(&config).await?;
    info!("Connected to database");

    // Run migrations
    info!("Running database migrations...");
    devshare_db::migrate(&db).await?;
    info!("Migrations completed");

    // Initialize repositories
    let db = Arc::new(db);
    let user_repo = UserRepository::new(Arc::clone(&db));
    let post_repo = PostRepository::new(Arc::clone(&db));
    let comment_repo = CommentRepository::new(Arc::clone(&db));
    let reply_repo = ReplyRepository::new(Arc::clone(&db));
    let post_like_repo = PostLikeRepository::new(Arc::clone(&db));
    let comment_like_repo = CommentLikeRepository::new(Arc::clone(&db));
    let reply_like_repo = ReplyLikeRepository::new(Arc::clone(&db));
    let notification_repo = NotificationRepository::new(Arc::clone(&db));
    let cascade_repo = CascadeRepository::new(Arc::clone(&db));

    // Initialize services
    let notification_service = NotificationService::new(notification_repo);
    let user_service = UserService::new(user_repo);
    let post_service = PostService::new(post_repo.clone(), cascade_repo.clone());
    let comment_service = CommentService::new(
        comment_repo.clone(),
        post_repo.clone(),
        cascade_repo.clone(),
        notification_service.clone(),
    );
    let reply_service = ReplyService::new(
        reply_repo.clone(),
        comment_repo.clone(),
        post_repo.clone(),
        cascade_repo,
        notification_service.clone(),
    );
    let like_service = LikeService::new(
        post_repo,
        comment_repo,
        reply_repo,
        post_like_repo,
        comment_like_repo,
        reply_like_repo,
        notification_service.clone(),
    );

    // Create app state
    let state = AppState {
        user_service,
        post_service,
        comment_service,
        reply_service,
        like_service,
        notification_service,
    };

    // Build router
    let app = Router::new()
        .merge(api_router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            devshare_api::middleware::auth_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    // Start server with graceful shutdown
    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
