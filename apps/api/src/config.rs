use anyhow::{Context, Result};

pub const DEFAULT_LLM_API_URL: &str = "https://api.siliconflow.cn/v1/chat/completions";
pub const DEFAULT_LLM_MODEL: &str = "Qwen/Qwen3-8B";

/// Application configuration loaded from environment variables.
/// Only malformed values fail startup; everything has a default.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub llm: LlmConfig,
}

/// Chat-completion provider settings.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Absent key leaves the parser usable; AI endpoints answer 503.
    pub api_key: Option<String>,
    pub api_url: String,
    pub model: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
            llm: LlmConfig {
                api_key: optional_env("LLM_API_KEY"),
                api_url: env_or("LLM_API_URL", DEFAULT_LLM_API_URL),
                model: env_or("LLM_MODEL", DEFAULT_LLM_MODEL),
            },
        })
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_or(key: &str, default: &str) -> String {
    optional_env(key).unwrap_or_else(|| default.to_string())
}
