use std::sync::Arc;

use tower_http::cors::CorsLayer;

use snake_arcade::api;
use snake_arcade::config::Config;
use snake_arcade::store::ScoreStore;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = Config::load();
    let store = Arc::new(ScoreStore::new(config.leaderboard_file.clone()));

    let app = api::router(store, config.leaderboard_limit).layer(CorsLayer::permissive());

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| panic!("Failed to bind to {addr}: {e}"));

    tracing::info!(
        port = config.port,
        file = %config.leaderboard_file.display(),
        "leaderboard server listening"
    );
    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}
