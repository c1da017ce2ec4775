//! Fit Assessment — should the candidate apply for this role?
//!
//! Pluggable, trait-based assessor. Default backend is the pure-Rust
//! keyword-overlap heuristic (fast, deterministic, fully testable); when an
//! LLM credential is configured the LLM backend is used, falling back to the
//! heuristic on any collaborator failure — an assessment is never fatal.
//!
//! `AppState` holds an `Arc<dyn FitAssessor>`, picked at startup.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::AppError;
use crate::generation::keywords::{counting_tokens, top_frequency_tokens};
use crate::generation::prompts::{FIT_PROMPT_TEMPLATE, FIT_SYSTEM};
use crate::llm_client::LlmClient;
use crate::resume::normalize::normalize_text;

/// How many top job tokens the heuristic checks against the résumé.
const HEURISTIC_TOKEN_COUNT: usize = 18;
/// Confidence thresholds for the heuristic recommendation.
const APPLY_THRESHOLD: u8 = 65;
const MAYBE_THRESHOLD: u8 = 40;
/// Requirement lists are capped to keep responses readable.
const MAX_REQUIREMENTS: usize = 15;
const GAP_COUNT: usize = 3;

// ────────────────────────────────────────────────────────────────────────────
// Output data model (shared across all assessor backends)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Recommendation {
    Apply,
    Maybe,
    No,
}

/// Structured apply/no-apply recommendation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitAssessment {
    pub recommendation: Recommendation,
    /// 0–100.
    pub confidence: u8,
    pub rationale: String,
    pub matched_requirements: Vec<String>,
    pub missing_requirements: Vec<String>,
    /// The top few missing requirements, for compact display.
    pub gaps: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// The fit assessor seam. Implementations must never fail a generation run
/// for operational reasons — degrade to the heuristic instead.
#[async_trait]
pub trait FitAssessor: Send + Sync {
    async fn assess(&self, job_text: &str, resume_text: &str)
        -> Result<FitAssessment, AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// HeuristicFitAssessor — word-overlap scoring, no collaborators
// ────────────────────────────────────────────────────────────────────────────

pub struct HeuristicFitAssessor;

#[async_trait]
impl FitAssessor for HeuristicFitAssessor {
    async fn assess(
        &self,
        job_text: &str,
        resume_text: &str,
    ) -> Result<FitAssessment, AppError> {
        Ok(heuristic_fit(job_text, resume_text))
    }
}

/// Keyword-overlap fit heuristic.
///
/// Takes the top `HEURISTIC_TOKEN_COUNT` job tokens by frequency and checks
/// which appear in the résumé text; the hit ratio becomes the confidence.
pub fn heuristic_fit(job_text: &str, resume_text: &str) -> FitAssessment {
    if job_text.trim().is_empty() {
        return FitAssessment {
            recommendation: Recommendation::Maybe,
            confidence: 0,
            rationale: "Paste a job description to get an apply recommendation.".to_string(),
            matched_requirements: vec![],
            missing_requirements: vec![],
            gaps: vec![],
        };
    }

    let words = counting_tokens(&normalize_text(job_text).to_lowercase());
    if words.is_empty() {
        return FitAssessment {
            recommendation: Recommendation::Maybe,
            confidence: 40,
            rationale: "Not enough detail in the job description to score fit accurately."
                .to_string(),
            matched_requirements: vec![],
            missing_requirements: vec![],
            gaps: vec![],
        };
    }

    let top_words = top_frequency_tokens(&words, HEURISTIC_TOKEN_COUNT);
    let resume_norm = normalize_text(resume_text).to_lowercase();

    let matched: Vec<String> = top_words
        .iter()
        .filter(|w| resume_norm.contains(w.as_str()))
        .cloned()
        .collect();
    let missing: Vec<String> = top_words
        .iter()
        .filter(|w| !resume_norm.contains(w.as_str()))
        .cloned()
        .collect();

    let confidence = (matched.len() * 100 / top_words.len().max(1)) as u8;
    let recommendation = if confidence >= APPLY_THRESHOLD {
        Recommendation::Apply
    } else if confidence >= MAYBE_THRESHOLD {
        Recommendation::Maybe
    } else {
        Recommendation::No
    };

    FitAssessment {
        recommendation,
        confidence,
        rationale: format!("Match score based on keyword overlap: {confidence}%."),
        matched_requirements: matched,
        gaps: missing.iter().take(GAP_COUNT).cloned().collect(),
        missing_requirements: missing,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// LlmFitAssessor — semantic assessment with heuristic fallback
// ────────────────────────────────────────────────────────────────────────────

pub struct LlmFitAssessor {
    llm: LlmClient,
}

impl LlmFitAssessor {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl FitAssessor for LlmFitAssessor {
    async fn assess(
        &self,
        job_text: &str,
        resume_text: &str,
    ) -> Result<FitAssessment, AppError> {
        if job_text.trim().is_empty() {
            return Ok(heuristic_fit(job_text, resume_text));
        }

        let prompt = FIT_PROMPT_TEMPLATE
            .replace("{job_text}", job_text)
            .replace("{resume_text}", resume_text);

        match self.llm.call_json::<RawAssessment>(&prompt, FIT_SYSTEM).await {
            Ok(raw) => Ok(sanitize_assessment(raw)),
            Err(e) => {
                warn!("Fit assessment LLM call failed ({e}); using keyword heuristic");
                Ok(heuristic_fit(job_text, resume_text))
            }
        }
    }
}

/// Raw LLM reply; every field optional so a sloppy response still yields a
/// usable assessment after sanitizing.
#[derive(Debug, Deserialize)]
struct RawAssessment {
    #[serde(default)]
    recommendation: Option<String>,
    #[serde(default)]
    confidence: Option<i64>,
    #[serde(default)]
    rationale: Option<String>,
    #[serde(default)]
    matched_requirements: Option<Vec<String>>,
    #[serde(default)]
    missing_requirements: Option<Vec<String>>,
}

/// Clamps and validates an LLM reply into a well-formed `FitAssessment`.
fn sanitize_assessment(raw: RawAssessment) -> FitAssessment {
    let recommendation = match raw
        .recommendation
        .as_deref()
        .map(|r| r.trim().to_uppercase())
        .as_deref()
    {
        Some("APPLY") => Recommendation::Apply,
        Some("NO") => Recommendation::No,
        _ => Recommendation::Maybe,
    };
    let confidence = raw.confidence.unwrap_or(50).clamp(0, 100) as u8;
    let clean = |items: Option<Vec<String>>| -> Vec<String> {
        items
            .unwrap_or_default()
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .take(MAX_REQUIREMENTS)
            .collect()
    };
    let matched_requirements = clean(raw.matched_requirements);
    let missing_requirements = clean(raw.missing_requirements);

    FitAssessment {
        recommendation,
        confidence,
        rationale: raw.rationale.unwrap_or_default().trim().to_string(),
        matched_requirements,
        gaps: missing_requirements.iter().take(GAP_COUNT).cloned().collect(),
        missing_requirements,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
