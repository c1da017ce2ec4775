use std::sync::Arc;

use crate::config::Config;
use crate::generation::fit::FitAssessor;
use crate::llm_client::LlmClient;
use crate::pdf::PageRenderer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Absent when no API key is configured — tailoring then falls back to
    /// the classic parse-and-reorder pipeline.
    pub llm: Option<LlmClient>,
    /// Pluggable fit assessor. LLM-backed when a key is configured, keyword
    /// heuristic otherwise; the LLM backend degrades to the heuristic on
    /// collaborator failure.
    pub fit_assessor: Arc<dyn FitAssessor>,
    /// Browser-based PDF renderer driving the page-fit loop.
    pub renderer: Arc<dyn PageRenderer>,
}
