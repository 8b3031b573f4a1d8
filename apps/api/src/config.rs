use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
///
/// Only `PORT` is validated strictly. Everything else is optional: without
/// `DATABASE_URL` plans live in memory, and without an OpenRouter key + model
/// every LLM-backed step runs its offline path.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: Option<String>,
    pub openrouter_api_key: Option<String>,
    pub openrouter_model: Option<String>,
    pub enable_ai_enrichment: bool,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: optional_env("DATABASE_URL"),
            openrouter_api_key: optional_env("OPENROUTER_API_KEY"),
            openrouter_model: optional_env("OPENROUTER_MODEL"),
            enable_ai_enrichment: parse_flag(
                std::env::var("ENABLE_AI_ENRICHMENT").ok().as_deref(),
                true,
            ),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Returns the (api key, model) pair when the text-generation collaborator is usable.
    pub fn llm_credentials(&self) -> Option<(String, String)> {
        match (&self.openrouter_api_key, &self.openrouter_model) {
            (Some(key), Some(model)) => Some((key.clone(), model.clone())),
            _ => None,
        }
    }
}

/// Reads an env var, treating unset and blank values alike.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_flag(raw: Option<&str>, default: bool) -> bool {
    match raw.map(|v| v.trim().to_ascii_lowercase()) {
        Some(v) if matches!(v.as_str(), "1" | "true" | "yes" | "on") => true,
        Some(v) if matches!(v.as_str(), "0" | "false" | "no" | "off") => false,
        _ => default,
    }
}
