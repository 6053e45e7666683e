mod config;
mod errors;
mod model;
mod pipeline;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{ensure, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::model::scorer::SimilarityScorer;
use crate::model::vectorizer::TfidfVectorizer;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting cvmatch API v{}", env!("CARGO_PKG_VERSION"));

    // Both pretrained artifacts load before the listener binds; a missing or
    // corrupt artifact aborts startup rather than failing per-request.
    let vectorizer = TfidfVectorizer::load(&config.vectorizer_path)?;
    info!(
        "Vectorizer loaded from {} ({} terms)",
        config.vectorizer_path.display(),
        vectorizer.dimension()
    );

    let scorer = SimilarityScorer::load(&config.model_weights_path, &config.model_config_path)?;
    info!(
        "Similarity model loaded from {} (input dim {})",
        config.model_weights_path.display(),
        scorer.input_dim()
    );

    ensure!(
        vectorizer.dimension() == scorer.input_dim(),
        "vectorizer dimension {} does not match model input dimension {}",
        vectorizer.dimension(),
        scorer.input_dim()
    );

    let state = AppState {
        vectorizer: Arc::new(vectorizer),
        scorer: Arc::new(scorer),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
