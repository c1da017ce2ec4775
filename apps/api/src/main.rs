mod config;
mod errors;
mod generation;
mod layout;
mod llm_client;
mod pdf;
mod render;
mod resume;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::generation::fit::{FitAssessor, HeuristicFitAssessor, LlmFitAssessor};
use crate::llm_client::LlmClient;
use crate::pdf::ChromeRenderer;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resume tailor API v{}", env!("CARGO_PKG_VERSION"));
    info!(
        resume = %config.resume_path.display(),
        template = %config.template_path.display(),
        max_pages = config.max_pages,
        "Using configured inputs"
    );

    // Initialize LLM client — optional; without it tailoring degrades to the
    // classic pipeline and fit assessment to the keyword heuristic.
    let llm = config
        .anthropic_api_key
        .clone()
        .map(|key| LlmClient::new(key, config.model.clone()));
    match &llm {
        Some(client) => info!("LLM client initialized (model: {})", client.model()),
        None => info!("No ANTHROPIC_API_KEY set — running with local heuristics only"),
    }

    // Initialize the fit assessor behind its trait seam
    let fit_assessor: Arc<dyn FitAssessor> = match &llm {
        Some(client) => Arc::new(LlmFitAssessor::new(client.clone())),
        None => Arc::new(HeuristicFitAssessor),
    };

    // Initialize the Chrome-backed page renderer. Chrome availability is
    // checked lazily: a missing browser surfaces as a Render error per call.
    let renderer = Arc::new(ChromeRenderer);
    info!("Page renderer initialized (headless Chrome, A4)");

    // Build app state
    let state = AppState {
        config: config.clone(),
        llm,
        fit_assessor,
        renderer,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
