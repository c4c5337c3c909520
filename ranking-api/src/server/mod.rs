// Server module - HTTP server setup and routing
pub mod handlers;
pub mod state;

use std::net::SocketAddr;

use axum::http::{HeaderValue, Method};
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tracing::info;

use self::state::AppState;
use crate::errors::ServiceError;

/// Create the Axum application router with all routes and middleware
pub fn create_app(state: AppState, cors_origins: Vec<HeaderValue>) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/r/:subreddit/posts", get(handlers::list_posts))
        .route("/posts/:post_id/comments", get(handlers::list_comments))
        .route("/votes", post(handlers::cast_vote))
        .route("/votes/batch", post(handlers::cast_votes))
        .layer(create_cors_layer(cors_origins))
        .with_state(state)
}

/// CORS layer for the configured browser origins
pub fn create_cors_layer(origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([axum::http::header::CONTENT_TYPE])
}

/// Run the server on the specified address until Ctrl+C
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), ServiceError> {
    info!("Server listening on {}", addr);
    info!("- Listing endpoint: http://{}/r/{{subreddit}}/posts?sort=hot", addr);
    info!("- Comments endpoint: http://{}/posts/{{post_id}}/comments?sort=top&t=day", addr);
    info!("- Vote endpoint: http://{}/votes", addr);
    info!("- Batch vote endpoint: http://{}/votes/batch", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
