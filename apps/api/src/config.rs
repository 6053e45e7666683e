use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Artifact paths default to the conventional filenames in the working
/// directory so a local deploy needs no configuration at all.
#[derive(Debug, Clone)]
pub struct Config {
    pub vectorizer_path: PathBuf,
    pub model_weights_path: PathBuf,
    pub model_config_path: PathBuf,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            vectorizer_path: env_path("VECTORIZER_PATH", "tfidf_vectorizer.json"),
            model_weights_path: env_path("MODEL_WEIGHTS_PATH", "similarity_model.safetensors"),
            model_config_path: env_path("MODEL_CONFIG_PATH", "similarity_model.json"),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn env_path(key: &str, default: &str) -> PathBuf {
    std::env::var(key).unwrap_or_else(|_| default.to_string()).into()
}
