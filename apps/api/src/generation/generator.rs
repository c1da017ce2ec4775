//! Résumé Generation — orchestrates the full tailoring pipeline.
//!
//! Flow: read résumé + template → split/parse header and sections →
//! (LLM-tailored text | classic parse-and-reorder) → skills filtering →
//! render → page-fit loop → write HTML + PDF to the output directory.
//!
//! The LLM path asks the collaborator for tailored text in the constrained
//! format and parses it deterministically; without a configured LLM (or with
//! no job text) the classic path restructures the parsed résumé directly.

use std::path::{Path, PathBuf};

use chrono::Local;
use regex::Regex;
use tracing::{info, warn};

use crate::config::Config;
use crate::errors::AppError;
use crate::generation::keywords::{
    extract_keywords, filter_skills_for_job, order_skills_by_keywords, relevance_score,
};
use crate::generation::prompts::{
    TAGLINE_PROMPT_TEMPLATE, TAGLINE_SYSTEM, TAILOR_PROMPT_TEMPLATE, TAILOR_SYSTEM,
};
use crate::generation::tailored::{extract_tagline, parse_tailored_text, validate_tagline};
use crate::layout::fit_to_pages;
use crate::llm_client::prompts::NO_FABRICATION_INSTRUCTION;
use crate::llm_client::LlmClient;
use crate::pdf::PageRenderer;
use crate::render::html::{
    assemble_document, render_header_html, render_sections_to_html, PRINT_PAGE_CSS,
};
use crate::render::template::{
    apply_tagline_to_header, extract_style_css, extract_template_header,
    extract_template_sections,
};
use crate::resume::entries::{
    parse_education, parse_experience, parse_list, parse_skills, split_work_entries,
    ExperienceEntry,
};
use crate::resume::header::parse_header;
use crate::resume::model::{Header, Section};
use crate::resume::sections::{split_sections, SplitResume};

/// Skills section bounds after job filtering.
const MAX_SKILLS: usize = 16;
const MIN_SKILLS: usize = 10;

/// Used when the résumé carries no summary section at all.
const FALLBACK_SUMMARY: &str = "Software engineer with a strong foundation in web \
    technologies, networking, and object-oriented programming.";

// ────────────────────────────────────────────────────────────────────────────
// Request / response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct TailorRequest {
    pub job_text: String,
    pub label: Option<String>,
}

#[derive(Debug, Clone)]
pub struct TailorResponse {
    pub html_path: PathBuf,
    pub pdf_path: PathBuf,
    pub tagline: Option<String>,
    pub pages: u32,
    pub within_budget: bool,
    pub trims: u32,
}

/// The structured model a raw résumé parses into, ready for rendering.
#[derive(Debug, Clone)]
pub struct ResumeModel {
    pub header: Header,
    pub sections: Vec<Section>,
    /// Lower-cased render order.
    pub preferred_order: Vec<String>,
    pub tagline: Option<String>,
}

/// Parses raw résumé text (plus optional job text) into the structured
/// Section/Entry model. `allowed_sections`, when non-empty, overrides the
/// render order derived from the résumé itself.
pub fn build_resume_model(
    resume_text: &str,
    job_text: &str,
    allowed_sections: &[String],
) -> ResumeModel {
    let split = split_sections(resume_text);
    let header = parse_header(&split.header_block);
    let headline = if split.contains("Software Engineer") {
        "Software Engineer"
    } else {
        ""
    };
    let (sections, derived_order, tagline) = build_classic_sections(&split, job_text, headline);
    let preferred_order = if allowed_sections.is_empty() {
        derived_order
    } else {
        allowed_sections.iter().map(|s| s.to_lowercase()).collect()
    };
    ResumeModel {
        header,
        sections,
        preferred_order,
        tagline,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Generation pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Runs the full tailoring pipeline and writes the HTML/PDF pair.
pub async fn generate_resume(
    config: &Config,
    llm: Option<&LlmClient>,
    renderer: &dyn PageRenderer,
    request: TailorRequest,
) -> Result<TailorResponse, AppError> {
    let resume_text = read_input(&config.resume_path, "Resume").await?;
    let template_text = read_input(&config.template_path, "Template").await?;

    let style_css = format!("{}{}", extract_style_css(&template_text), PRINT_PAGE_CSS);
    let template_header = extract_template_header(&template_text);
    let template_sections = extract_template_sections(&template_text);

    let split = split_sections(&resume_text);
    let header = parse_header(&split.header_block);
    let headline = if split.contains("Software Engineer") {
        "Software Engineer"
    } else {
        ""
    };

    let job_text = request.job_text.trim().to_string();

    // Build the section model: tailored via the LLM when available, else the
    // classic parse-and-reorder of the source résumé.
    let (mut sections, preferred_order, tagline, doc_title) = match llm {
        Some(llm) if !job_text.is_empty() => {
            let (sections, order, tagline) = build_tailored_sections(
                llm,
                &job_text,
                &resume_text,
                &header.name,
                &template_sections,
            )
            .await?;
            (sections, order, tagline, "Tailored Resume".to_string())
        }
        _ => {
            let model = build_resume_model(&resume_text, &job_text, &[]);
            (
                model.sections,
                model.preferred_order,
                model.tagline,
                format!("{} - Resume", header.name),
            )
        }
    };

    let base_header = template_header
        .unwrap_or_else(|| render_header_html(&header, tagline.as_deref().unwrap_or(headline)));
    let header_html = match &tagline {
        Some(t) => apply_tagline_to_header(&base_header, t),
        None => base_header,
    };

    let rebuild = |sections: &[Section]| {
        let body = format!(
            "{}\n{}",
            header_html,
            render_sections_to_html(sections, &preferred_order)
        );
        assemble_document(&doc_title, &style_css, &body)
    };

    let outcome = fit_to_pages(renderer, &mut sections, rebuild, config.max_pages).await?;
    if !outcome.within_budget {
        warn!(
            pages = outcome.pages,
            budget = config.max_pages,
            "generated resume exceeds the page budget after exhausting trims"
        );
    }

    tokio::fs::create_dir_all(&config.output_dir)
        .await
        .map_err(AppError::Io)?;
    let base = output_basename("Resume", request.label.as_deref());
    let html_path = config.output_dir.join(format!("{base}.html"));
    let pdf_path = config.output_dir.join(format!("{base}.pdf"));

    tokio::fs::write(&html_path, &outcome.html)
        .await
        .map_err(AppError::Io)?;
    renderer.render_pdf_to_file(&outcome.html, &pdf_path).await?;

    info!(
        html = %html_path.display(),
        pdf = %pdf_path.display(),
        pages = outcome.pages,
        trims = outcome.trims,
        "resume generated"
    );

    Ok(TailorResponse {
        html_path,
        pdf_path,
        tagline,
        pages: outcome.pages,
        within_budget: outcome.within_budget,
        trims: outcome.trims,
    })
}

async fn read_input(path: &Path, what: &str) -> Result<String, AppError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|_| AppError::NotFound(format!("{what} file not found: {}", path.display())))
}

// ────────────────────────────────────────────────────────────────────────────
// Tailored path
// ────────────────────────────────────────────────────────────────────────────

/// Requests tailored text from the LLM, validates the tagline, parses the
/// body, and filters skills sections for the job.
async fn build_tailored_sections(
    llm: &LlmClient,
    job_text: &str,
    resume_text: &str,
    name: &str,
    template_sections: &[String],
) -> Result<(Vec<Section>, Vec<String>, Option<String>), AppError> {
    let allowed_list = template_sections.join("\n");
    let prompt = TAILOR_PROMPT_TEMPLATE
        .replace("{no_fabrication}", NO_FABRICATION_INSTRUCTION)
        .replace("{allowed_sections}", &allowed_list)
        .replace("{job_text}", job_text)
        .replace("{resume_text}", resume_text);

    let text = llm
        .call_text(&prompt, TAILOR_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Resume tailoring failed: {e}")))?;

    let (raw_tagline, body) = extract_tagline(&text);
    let mut tagline = raw_tagline.and_then(|t| validate_tagline(&t, resume_text));
    if tagline.is_none() {
        tagline = generate_tagline(llm, job_text, resume_text).await;
    }

    let parsed = parse_tailored_text(&body, Some(name), template_sections);
    let mut sections = parsed.sections;
    for section in &mut sections {
        if section.title.to_lowercase().contains("skill") && !section.skills.is_empty() {
            section.skills =
                filter_skills_for_job(&section.skills, job_text, MAX_SKILLS, MIN_SKILLS);
        }
    }

    Ok((sections, parsed.allowed, tagline))
}

/// Dedicated tagline call, used when the tailored text carried no valid
/// tagline. Returns None rather than failing: a missing tagline is
/// cosmetic, a fabricated one is not acceptable.
pub(crate) async fn generate_tagline(
    llm: &LlmClient,
    job_text: &str,
    resume_text: &str,
) -> Option<String> {
    let prompt = TAGLINE_PROMPT_TEMPLATE
        .replace("{job_text}", job_text)
        .replace("{resume_text}", resume_text);
    match llm.call_text(&prompt, TAGLINE_SYSTEM).await {
        Ok(text) => {
            let first_line = text.lines().next().unwrap_or("").trim();
            validate_tagline(first_line, resume_text)
        }
        Err(e) => {
            warn!("Tagline generation failed ({e}); continuing without one");
            None
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Classic path — no LLM involved
// ────────────────────────────────────────────────────────────────────────────

/// Section titles the classic path reads from the source résumé.
const SUMMARY_SOURCE: &str = "Software Engineer";
const EDUCATION_SOURCE: &str = "Education";
const SKILLS_SOURCE: &str = "Skills";
const WORK_SOURCE: &str = "Work experience/Projects";
const VOLUNTEER_SOURCE: &str = "Volunteer Experience";
const CERTIFICATES_SOURCE: &str = "Certificates";
const INTERESTS_SOURCE: &str = "Interests";

/// Builds the section model straight from the parsed résumé, ordered by
/// keyword relevance when job text is present.
fn build_classic_sections(
    split: &SplitResume,
    job_text: &str,
    headline: &str,
) -> (Vec<Section>, Vec<String>, Option<String>) {
    let mut summary = split
        .body(SUMMARY_SOURCE)
        .iter()
        .filter(|l| !l.trim().is_empty())
        .cloned()
        .collect::<Vec<_>>()
        .join(" ");
    if summary.is_empty() {
        summary = FALLBACK_SUMMARY.to_string();
    }

    let education = parse_education(split.body(EDUCATION_SOURCE));
    let mut skills = parse_skills(split.body(SKILLS_SOURCE));
    skills = filter_skills_for_job(&skills, job_text, MAX_SKILLS, MIN_SKILLS);

    let work = parse_experience(split.body(WORK_SOURCE));
    let volunteer = parse_experience(split.body(VOLUNTEER_SOURCE));
    let (mut experience, mut projects) = split_work_entries(work);

    let certificates = parse_list(split.body(CERTIFICATES_SOURCE));
    let interests = parse_list(split.body(INTERESTS_SOURCE));

    let keywords = extract_keywords(job_text, &skills);
    if !keywords.is_empty() {
        order_skills_by_keywords(&mut skills, &keywords);
        let by_relevance = |entries: &mut Vec<ExperienceEntry>| {
            entries.sort_by_key(|e| std::cmp::Reverse(relevance_score(&e.raw, &keywords)));
        };
        by_relevance(&mut projects);
        by_relevance(&mut experience);
    }

    // Summary sentence polish, then the keyword focus suffix.
    if !summary.ends_with(['.', '!', '?']) {
        summary.push('.');
    }
    if !keywords.is_empty() {
        let focus: Vec<String> = keywords.iter().take(4).cloned().collect();
        summary = format!(
            "{}. Relevant focus: {}.",
            summary.trim_end_matches(['.', ' ']),
            focus.join(", ")
        );
    }

    let tagline = if keywords.is_empty() {
        None
    } else {
        let extra = keywords
            .iter()
            .take(3)
            .cloned()
            .collect::<Vec<_>>()
            .join(", ");
        Some(if headline.is_empty() {
            extra
        } else {
            format!("{headline} - {extra}")
        })
    };

    let mut sections = vec![
        Section {
            title: "Professional Summary".to_string(),
            paragraphs: vec![summary],
            ..Section::default()
        },
        Section {
            title: "Education".to_string(),
            entries: education,
            ..Section::default()
        },
        Section {
            title: "Technical Skills".to_string(),
            skills,
            ..Section::default()
        },
        Section {
            title: "Projects".to_string(),
            entries: projects.into_iter().map(|e| e.entry).collect(),
            ..Section::default()
        },
        Section {
            title: "Experience".to_string(),
            entries: experience.into_iter().map(|e| e.entry).collect(),
            ..Section::default()
        },
        Section {
            title: "Volunteer Experience".to_string(),
            entries: volunteer.into_iter().map(|e| e.entry).collect(),
            ..Section::default()
        },
        Section {
            title: "Certificates".to_string(),
            bullets: certificates,
            ..Section::default()
        },
        Section {
            title: "Interests".to_string(),
            paragraphs: if interests.is_empty() {
                vec![]
            } else {
                vec![interests.join(" - ")]
            },
            ..Section::default()
        },
    ];
    sections.retain(Section::has_content);

    let order = sections.iter().map(|s| s.title.to_lowercase()).collect();
    (sections, order, tagline)
}

// ────────────────────────────────────────────────────────────────────────────
// Output naming
// ────────────────────────────────────────────────────────────────────────────

/// `<kind>_<sanitized label>_<timestamp>`, e.g. `Resume_Acme-Backend_20260807_101500`.
pub fn output_basename(kind: &str, label: Option<&str>) -> String {
    let stamp = Local::now().format("%Y%m%d_%H%M%S");
    format!("{kind}_{}_{stamp}", sanitize_label(label))
}

fn sanitize_label(label: Option<&str>) -> String {
    let re = Regex::new(r"[^A-Za-z0-9_-]+").expect("invalid label regex");
    let cleaned = re
        .replace_all(label.unwrap_or("Tailored"), "-")
        .trim_matches('-')
        .to_string();
    if cleaned.is_empty() {
        "Tailored".to_string()
    } else {
        cleaned
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
