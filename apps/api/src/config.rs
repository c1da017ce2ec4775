use std::path::PathBuf;

use anyhow::{Context, Result};

/// Default model for all LLM calls when ANTHROPIC_MODEL is not set.
const DEFAULT_MODEL: &str = "claude-sonnet-4-5";

/// Application configuration loaded from environment variables.
///
/// Everything the pipeline needs is carried here explicitly and passed into
/// the core entry points — the core never reads ambient process state.
#[derive(Debug, Clone)]
pub struct Config {
    /// Source résumé as plain text with dashed section headers.
    pub resume_path: PathBuf,
    /// Base HTML template supplying the stylesheet, header block, and
    /// section allow-list.
    pub template_path: PathBuf,
    /// Directory receiving generated HTML/PDF files.
    pub output_dir: PathBuf,
    /// Page budget for rendered PDFs; 0 disables the fitting loop.
    pub max_pages: u32,
    /// Optional — without it, tailoring/cover letters are unavailable and
    /// fit assessment uses the local heuristic.
    pub anthropic_api_key: Option<String>,
    pub model: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            resume_path: PathBuf::from(require_env("RESUME_TXT")?),
            template_path: PathBuf::from(require_env("RESUME_TEMPLATE")?),
            output_dir: std::env::var("RESUME_OUTPUT_DIR")
                .unwrap_or_else(|_| "outputs".to_string())
                .into(),
            max_pages: std::env::var("RESUME_MAX_PAGES")
                .unwrap_or_else(|_| "2".to_string())
                .parse::<u32>()
                .context("RESUME_MAX_PAGES must be a non-negative integer")?,
            anthropic_api_key: std::env::var("ANTHROPIC_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            model: std::env::var("ANTHROPIC_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
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
