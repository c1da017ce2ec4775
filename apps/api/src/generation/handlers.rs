//! Axum route handlers for the Generation API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::generation::cover_letter::{generate_cover_letter, CoverLetterRequest};
use crate::generation::fit::FitAssessment;
use crate::generation::generator::{generate_resume, TailorRequest};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct TailorApiRequest {
    /// May be empty: the résumé is then rebuilt untailored.
    #[serde(default)]
    pub job_text: String,
    #[serde(default)]
    pub label: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TailorApiResponse {
    pub html_path: String,
    pub pdf_path: String,
    pub tagline: Option<String>,
    pub pages: u32,
    pub within_budget: bool,
    /// How many content units the page-fit loop removed.
    pub trims: u32,
}

#[derive(Debug, Deserialize)]
pub struct AssessApiRequest {
    #[serde(default)]
    pub job_text: String,
}

#[derive(Debug, Serialize)]
pub struct AssessApiResponse {
    pub assessment: FitAssessment,
}

#[derive(Debug, Deserialize)]
pub struct CoverLetterApiRequest {
    pub job_text: String,
    #[serde(default)]
    pub label: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CoverLetterApiResponse {
    pub text_path: String,
    pub html_path: Option<String>,
    pub pdf_path: Option<String>,
    pub cover_letter: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resumes/tailor
///
/// Full pipeline: parse résumé → tailor (LLM or classic) → render → fit to
/// the page budget → write HTML + PDF. Returns the output paths.
pub async fn handle_tailor(
    State(state): State<AppState>,
    Json(request): Json<TailorApiRequest>,
) -> Result<Json<TailorApiResponse>, AppError> {
    let response = generate_resume(
        &state.config,
        state.llm.as_ref(),
        state.renderer.as_ref(),
        TailorRequest {
            job_text: request.job_text,
            label: request.label,
        },
    )
    .await?;

    Ok(Json(TailorApiResponse {
        html_path: response.html_path.display().to_string(),
        pdf_path: response.pdf_path.display().to_string(),
        tagline: response.tagline,
        pages: response.pages,
        within_budget: response.within_budget,
        trims: response.trims,
    }))
}

/// POST /api/v1/resumes/assess
///
/// Apply/no-apply recommendation for the configured résumé against a job
/// description. Empty job text yields a neutral MAYBE, not an error.
pub async fn handle_assess(
    State(state): State<AppState>,
    Json(request): Json<AssessApiRequest>,
) -> Result<Json<AssessApiResponse>, AppError> {
    let resume_text = tokio::fs::read_to_string(&state.config.resume_path)
        .await
        .map_err(|_| {
            AppError::NotFound(format!(
                "Resume file not found: {}",
                state.config.resume_path.display()
            ))
        })?;

    let assessment = state
        .fit_assessor
        .assess(&request.job_text, &resume_text)
        .await?;

    Ok(Json(AssessApiResponse { assessment }))
}

/// POST /api/v1/cover-letters
///
/// Drafts and renders a cover letter. Requires job text and a configured LLM.
pub async fn handle_cover_letter(
    State(state): State<AppState>,
    Json(request): Json<CoverLetterApiRequest>,
) -> Result<Json<CoverLetterApiResponse>, AppError> {
    if request.job_text.trim().is_empty() {
        return Err(AppError::Validation("job_text cannot be empty".to_string()));
    }

    let response = generate_cover_letter(
        &state.config,
        state.llm.as_ref(),
        state.renderer.as_ref(),
        CoverLetterRequest {
            job_text: request.job_text,
            label: request.label,
        },
    )
    .await?;

    Ok(Json(CoverLetterApiResponse {
        text_path: response.text_path.display().to_string(),
        html_path: response.html_path.map(|p| p.display().to_string()),
        pdf_path: response.pdf_path.map(|p| p.display().to_string()),
        cover_letter: response.text,
    }))
}
