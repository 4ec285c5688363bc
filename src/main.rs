use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use word_puzzle_backend::{
    config::Config,
    dictionary::WordDictionary,
    routes, AppState,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "word_puzzle_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting word puzzle backend...");

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!("Configuration loaded");

    // Load dictionary
    let dictionary = match WordDictionary::load(&config.dictionary).await {
        Ok(dict) => {
            tracing::info!("Dictionary loaded successfully");
            dict
        }
        Err(e) => {
            tracing::warn!(
                "Failed to load dictionary: {}. Using empty dictionary for now.",
                e
            );
            tracing::warn!(
                "Download a word list to {} for full functionality",
                config.dictionary.valid_words_path.display()
            );
            WordDictionary::empty()
        }
    };

    for (length, count) in dictionary.bucket_sizes() {
        tracing::debug!("{} words of {} letters", count, length);
    }
    if !dictionary.rejected_lines().is_empty() {
        tracing::warn!(
            "{} word list lines were rejected",
            dictionary.rejected_lines().len()
        );
    }

    let addr = config.server_addr();
    let state = Arc::new(AppState::new(config, dictionary));

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .merge(routes::create_routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);
    tracing::info!("Health check: http://{}/health", addr);
    tracing::info!("Puzzles: http://{}/api/puzzle", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
