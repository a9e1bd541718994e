use anyhow::{Context, Result};

use crate::llm_client::GeminiConfig;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub gemini: GeminiConfig,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let mut gemini = GeminiConfig::new(require_env("GEMINI_API_KEY")?);
        if let Ok(model) = std::env::var("GEMINI_MODEL") {
            gemini = gemini.with_model(model);
        }
        if let Ok(base_url) = std::env::var("GEMINI_API_BASE") {
            gemini.base_url = base_url.trim_end_matches('/').to_string();
        }
        if let Ok(turns) = std::env::var("GEMINI_HISTORY_TURNS") {
            gemini.history_turns = turns
                .parse::<usize>()
                .context("GEMINI_HISTORY_TURNS must be a non-negative integer")?;
        }

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            gemini,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
