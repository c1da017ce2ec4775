//! Cover letter drafting — LLM-written letter, paragraph/signature parsing,
//! and HTML/PDF rendering with the base template's stylesheet.
//!
//! Unlike fit assessment, this feature has no local fallback: drafting prose
//! requires the text-generation collaborator, so a missing credential is a
//! validation error surfaced to the caller.

use std::path::PathBuf;

use tracing::info;

use crate::config::Config;
use crate::errors::AppError;
use crate::generation::generator::output_basename;
use crate::generation::prompts::{COVER_LETTER_PROMPT_TEMPLATE, COVER_LETTER_SYSTEM};
use crate::llm_client::LlmClient;
use crate::pdf::PageRenderer;
use crate::render::html::{escape_html, render_header_html};
use crate::render::template::{
    apply_tagline_to_header, extract_style_css, extract_template_header,
};
use crate::resume::header::parse_header;
use crate::resume::sections::split_sections;

/// Additional stylesheet rules for the letter layout.
const LETTER_CSS: &str = "\
.section-title { font-weight: 700; margin-top: 16px; }
.cover-letter p { margin: 0 0 10px; }
.cover-letter .signature { margin-top: 10px; }
@media print { .page { padding-top: 6mm; } }
@media screen { .page { padding-top: 24px; } }";

/// Signature detection marker in the drafted letter.
const SIGN_OFF: &str = "kind regards";

#[derive(Debug, Clone)]
pub struct CoverLetterRequest {
    pub job_text: String,
    pub label: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CoverLetterResponse {
    pub text_path: PathBuf,
    pub html_path: Option<PathBuf>,
    pub pdf_path: Option<PathBuf>,
    pub text: String,
}

/// A letter paragraph with its rendering class.
#[derive(Debug, Clone, PartialEq)]
pub enum LetterParagraph {
    Body(String),
    Signature(String),
}

/// Drafts, validates, and renders a cover letter for the configured résumé.
pub async fn generate_cover_letter(
    config: &Config,
    llm: Option<&LlmClient>,
    renderer: &dyn PageRenderer,
    request: CoverLetterRequest,
) -> Result<CoverLetterResponse, AppError> {
    let llm = llm.ok_or_else(|| {
        AppError::Validation(
            "Cover letter drafting requires ANTHROPIC_API_KEY to be configured".to_string(),
        )
    })?;

    let resume_text = tokio::fs::read_to_string(&config.resume_path)
        .await
        .map_err(|_| {
            AppError::NotFound(format!(
                "Resume file not found: {}",
                config.resume_path.display()
            ))
        })?;
    let split = split_sections(&resume_text);
    let header = parse_header(&split.header_block);
    let name = if header.name.is_empty() {
        "Candidate".to_string()
    } else {
        header.name.clone()
    };

    let prompt = COVER_LETTER_PROMPT_TEMPLATE
        .replace("{name}", &name)
        .replace("{job_text}", &request.job_text)
        .replace("{resume_text}", &resume_text);
    let cover_text = llm
        .call_text(&prompt, COVER_LETTER_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Cover letter drafting failed: {e}")))?;

    // The plain-text letter is always written; HTML/PDF need the template.
    tokio::fs::create_dir_all(&config.output_dir)
        .await
        .map_err(AppError::Io)?;
    let base = output_basename("CoverLetter", request.label.as_deref());
    let text_path = config.output_dir.join(format!("{base}.txt"));
    tokio::fs::write(&text_path, &cover_text)
        .await
        .map_err(AppError::Io)?;

    let template_text = tokio::fs::read_to_string(&config.template_path)
        .await
        .unwrap_or_default();
    let style_css = extract_style_css(&template_text);
    if style_css.is_empty() {
        info!(letter = %text_path.display(), "cover letter written (no template stylesheet, text only)");
        return Ok(CoverLetterResponse {
            text_path,
            html_path: None,
            pdf_path: None,
            text: cover_text,
        });
    }

    let mut header_html = extract_template_header(&template_text)
        .unwrap_or_else(|| render_header_html(&header, ""));
    if !request.job_text.trim().is_empty() {
        if let Some(tagline) =
            crate::generation::generator::generate_tagline(llm, &request.job_text, &resume_text)
                .await
        {
            header_html = apply_tagline_to_header(&header_html, &tagline);
        }
    }

    let html = build_cover_letter_html(&style_css, &header_html, &cover_text);
    let html_path = config.output_dir.join(format!("{base}.html"));
    let pdf_path = config.output_dir.join(format!("{base}.pdf"));
    tokio::fs::write(&html_path, &html)
        .await
        .map_err(AppError::Io)?;
    renderer.render_pdf_to_file(&html, &pdf_path).await?;

    info!(
        letter = %text_path.display(),
        pdf = %pdf_path.display(),
        "cover letter generated"
    );

    Ok(CoverLetterResponse {
        text_path,
        html_path: Some(html_path),
        pdf_path: Some(pdf_path),
        text: cover_text,
    })
}

/// Splits the drafted letter into paragraphs on blank lines. Everything from
/// the sign-off onwards renders as signature lines; trailing content after
/// the signature name is dropped.
pub fn parse_letter_paragraphs(cover_text: &str) -> Vec<LetterParagraph> {
    let mut paragraphs: Vec<String> = Vec::new();
    let mut buf: Vec<&str> = Vec::new();
    for line in cover_text.trim().lines() {
        let line = line.trim();
        if line.is_empty() {
            if !buf.is_empty() {
                paragraphs.push(buf.join(" "));
                buf.clear();
            }
            continue;
        }
        buf.push(line);
    }
    if !buf.is_empty() {
        paragraphs.push(buf.join(" "));
    }

    let mut styled = Vec::new();
    let mut iter = paragraphs.into_iter();
    while let Some(para) = iter.next() {
        if para.to_lowercase().starts_with(SIGN_OFF) {
            styled.push(LetterParagraph::Signature("Kind regards,".to_string()));
            if let Some(name) = iter.next() {
                styled.push(LetterParagraph::Signature(name));
            }
            break;
        }
        styled.push(LetterParagraph::Body(para));
    }
    styled
}

/// Full letter document: template stylesheet + letter rules, header block,
/// one "Cover Letter" section with styled paragraphs.
pub fn build_cover_letter_html(style_css: &str, header_html: &str, cover_text: &str) -> String {
    let blocks: Vec<String> = parse_letter_paragraphs(cover_text)
        .into_iter()
        .map(|p| match p {
            LetterParagraph::Body(text) => {
                format!(r#"<p class="body">{}</p>"#, escape_html(&text))
            }
            LetterParagraph::Signature(text) => {
                format!(r#"<p class="signature">{}</p>"#, escape_html(&text))
            }
        })
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Cover Letter</title>
<style>
{}
{}
</style>
</head>
<body>
<div class="page">
{}
<div class="section">
  <div class="section-title">Cover Letter</div>
  <div class="cover-letter">
    {}
  </div>
</div>
</div>
</body>
</html>
"#,
        style_css,
        LETTER_CSS,
        header_html,
        blocks.join("\n    ")
    )
}
