//! Tailored-Text Parser — turns the constrained Markdown-like output of the
//! text-generation collaborator into the structured Section model.
//!
//! Conventions accepted (and nothing more): an optional leading
//! `TAGLINE: …` line, `## ` section headers gated by a caller-supplied
//! allow-list, `### ` entry headers with pipe-separated fields, `- `/`* `
//! bullet lines, bold markers stripped, horizontal rules ignored. Parsing is
//! fully deterministic — all collaborator I/O happens before this runs.

use regex::Regex;

use crate::resume::model::{Entry, Section};
use crate::resume::normalize::normalize_text;

/// Parse result: sections in input order plus the lower-cased allow-list
/// (used later for render ordering).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TailoredResume {
    pub sections: Vec<Section>,
    pub allowed: Vec<String>,
}

/// Title given to content arriving before any `## ` header when no
/// allow-list constrains the output.
const FALLBACK_SECTION_TITLE: &str = "Tailored Resume";

fn bold_re() -> (Regex, Regex) {
    (
        Regex::new(r"\*\*(.*?)\*\*").expect("invalid bold regex"),
        Regex::new(r"__([^_]+)__").expect("invalid underscore bold regex"),
    )
}

fn hashes_only_re() -> Regex {
    Regex::new(r"^#+$").expect("invalid hash regex")
}

fn date_like_re() -> Regex {
    Regex::new(r"\b\d{2}/\d{4}\b|\b\d{4}\b|(?i:\bPresent\b)").expect("invalid date-like regex")
}

/// `MM/YYYY`, a bare 4-digit year, or the word "Present" anywhere in `s`.
pub fn looks_like_date(s: &str) -> bool {
    date_like_re().is_match(s)
}

/// Splits an optional first `TAGLINE: …` line off the tailored text.
pub fn extract_tagline(text: &str) -> (Option<String>, String) {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    match lines.first() {
        Some(first) if first.to_lowercase().starts_with("tagline:") => {
            let tagline = first.splitn(2, ':').nth(1).unwrap_or("").trim().to_string();
            (Some(tagline), lines[1..].join("\n"))
        }
        _ => (None, text.to_string()),
    }
}

/// Words that may appear in a tagline without résumé evidence.
const TAGLINE_STOPWORDS: &[&str] = &[
    "and", "or", "for", "with", "in", "on", "to", "of", "the", "a", "an", "developer",
    "engineer", "analyst", "specialist",
];

/// Validates a generated tagline: at most 6 words, and every substantive
/// token must already appear in the résumé text. Anything else is discarded
/// — the no-fabrication rule.
pub fn validate_tagline(tagline: &str, resume_text: &str) -> Option<String> {
    if tagline.is_empty() {
        return None;
    }
    let word_re = Regex::new(r"[A-Za-z0-9+#\-]+").expect("invalid word regex");
    if word_re.find_iter(tagline).count() > 6 {
        return None;
    }
    let resume_l = normalize_text(resume_text).to_lowercase();
    let token_re = Regex::new(r"[a-zA-Z][a-zA-Z0-9+#\-]+").expect("invalid token regex");
    for token in token_re.find_iter(&tagline.to_lowercase()) {
        let token = token.as_str();
        if token.len() < 3 || TAGLINE_STOPWORDS.contains(&token) {
            continue;
        }
        if !resume_l.contains(token) {
            return None;
        }
    }
    Some(tagline.to_string())
}

/// Parses tailored text into sections.
///
/// `name` suppresses a `## ` header repeating the candidate's name.
/// Sections whose title is not in a non-empty `allowed_sections` are
/// silently discarded, including their body, until the next accepted header.
pub fn parse_tailored_text(
    text: &str,
    name: Option<&str>,
    allowed_sections: &[String],
) -> TailoredResume {
    let allowed: Vec<String> = allowed_sections.iter().map(|s| s.to_lowercase()).collect();
    let (bold, bold_underscore) = bold_re();
    let hashes_only = hashes_only_re();

    let mut sections: Vec<Section> = Vec::new();
    // Index of the open section / entry; `None` while inside a discarded
    // section (or before the first header).
    let mut current: Option<usize> = None;
    let mut current_entry: Option<(usize, usize)> = None;

    for raw in text.lines() {
        let normalized = normalize_text(raw.trim_end());
        let trimmed = normalized.trim();
        if trimmed.is_empty() {
            continue;
        }

        let line = bold_underscore
            .replace_all(&bold.replace_all(trimmed, "$1"), "$1")
            .trim()
            .to_string();

        if hashes_only.is_match(&line) || line.starts_with("# ") {
            continue;
        }

        if let Some(title) = line.strip_prefix("## ") {
            let title = title.trim();
            if name.is_some_and(|n| n.eq_ignore_ascii_case(title)) {
                continue;
            }
            if allowed.is_empty() || allowed.contains(&title.to_lowercase()) {
                sections.push(Section::new(title));
                current = Some(sections.len() - 1);
            } else {
                current = None;
            }
            current_entry = None;
            continue;
        }

        // A non-empty allow-list means content outside an accepted section
        // is discarded, whatever its shape.
        if current.is_none() && !allowed.is_empty() {
            continue;
        }

        if let Some(content) = line.strip_prefix("### ") {
            let section_ix = ensure_section(&mut sections, &mut current);
            let entry = parse_entry_header(content.trim());
            sections[section_ix].entries.push(entry);
            current_entry = Some((section_ix, sections[section_ix].entries.len() - 1));
            continue;
        }

        // Horizontal rules. Em/en dashes were normalized to `-` above, so
        // any all-dash line qualifies.
        if line.chars().all(|c| c == '-') {
            continue;
        }

        if let Some(item) = line
            .strip_prefix("- ")
            .or_else(|| line.strip_prefix("* "))
        {
            let section_ix = ensure_section(&mut sections, &mut current);
            let item = item.trim();
            if sections[section_ix].title.to_lowercase().contains("skill") {
                let item = match item.split_once(':') {
                    Some((_, rest)) => rest.trim(),
                    None => item,
                };
                for part in item.split(',') {
                    let part = part.trim();
                    if !part.is_empty() {
                        sections[section_ix].skills.push(part.to_string());
                    }
                }
            } else if let Some((s_ix, e_ix)) = current_entry {
                sections[s_ix].entries[e_ix].bullets.push(item.to_string());
            } else {
                sections[section_ix].bullets.push(item.to_string());
            }
            continue;
        }

        let section_ix = ensure_section(&mut sections, &mut current);

        // Education shorthand: "Title - School | Date" on one line.
        if sections[section_ix].title.eq_ignore_ascii_case("education") {
            if let Some((left, right)) = line.split_once('|') {
                let (left, right) = (left.trim(), right.trim());
                let (title, subtitle) = match left.split_once(" - ") {
                    Some((t, s)) => (t.trim().to_string(), s.trim().to_string()),
                    None => (left.to_string(), String::new()),
                };
                sections[section_ix].entries.push(Entry {
                    title,
                    subtitle,
                    date: right.to_string(),
                    bullets: Vec::new(),
                });
                continue;
            }
        }

        match current_entry {
            Some((s_ix, e_ix)) => {
                let entry = &mut sections[s_ix].entries[e_ix];
                if looks_like_date(&line) {
                    entry.date = line;
                } else if entry.subtitle.is_empty() {
                    entry.subtitle = line;
                } else {
                    sections[s_ix].paragraphs.push(line);
                }
            }
            None => sections[section_ix].paragraphs.push(line),
        }
    }

    TailoredResume { sections, allowed }
}

/// Opens the fallback section if no section is active (only reachable with
/// an empty allow-list).
fn ensure_section(sections: &mut Vec<Section>, current: &mut Option<usize>) -> usize {
    if let Some(ix) = *current {
        return ix;
    }
    sections.push(Section::new(FALLBACK_SECTION_TITLE));
    *current = Some(sections.len() - 1);
    sections.len() - 1
}

/// Splits `### ` content on `|`. If the last field looks like a date it
/// becomes the entry date; middle fields rejoin into the subtitle.
fn parse_entry_header(content: &str) -> Entry {
    let parts: Vec<&str> = content.split('|').map(str::trim).collect();
    let mut entry = Entry::default();
    if parts.len() >= 2 && looks_like_date(parts[parts.len() - 1]) {
        entry.title = parts[0].to_string();
        entry.date = parts[parts.len() - 1].to_string();
        if parts.len() > 2 {
            entry.subtitle = parts[1..parts.len() - 1].join(" | ");
        }
    } else {
        entry.title = parts[0].to_string();
        if parts.len() > 1 {
            entry.subtitle = parts[1..].join(" | ");
        }
    }
    entry
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allow(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parses_skills_and_experience_sections() {
        let text = "## Key Skills\n- Languages: Python, Go, Rust\n## Professional Experience\n### Backend Engineer | Acme | 01/2020 - Present\n- Built service X";
        let parsed = parse_tailored_text(
            text,
            None,
            &allow(&["key skills", "professional experience"]),
        );
        assert_eq!(parsed.sections.len(), 2);

        let skills = &parsed.sections[0];
        assert_eq!(skills.skills, vec!["Python", "Go", "Rust"]);

        let experience = &parsed.sections[1];
        assert_eq!(experience.entries.len(), 1);
        let entry = &experience.entries[0];
        assert_eq!(entry.title, "Backend Engineer");
        assert_eq!(entry.subtitle, "Acme");
        assert_eq!(entry.date, "01/2020 - Present");
        assert_eq!(entry.bullets, vec!["Built service X"]);
    }

    #[test]
    fn test_disallowed_section_is_discarded_with_its_body() {
        let text = "## Hobbies\n- Chess\n## Key Skills\n- Rust";
        let parsed = parse_tailored_text(text, None, &allow(&["key skills"]));
        assert_eq!(parsed.sections.len(), 1);
        assert_eq!(parsed.sections[0].title, "Key Skills");
        assert_eq!(parsed.sections[0].skills, vec!["Rust"]);
    }

    #[test]
    fn test_empty_allow_list_accepts_everything() {
        let text = "stray paragraph\n## Anything\n- item";
        let parsed = parse_tailored_text(text, None, &[]);
        assert_eq!(parsed.sections[0].title, "Tailored Resume");
        assert_eq!(parsed.sections[0].paragraphs, vec!["stray paragraph"]);
        assert_eq!(parsed.sections[1].title, "Anything");
        assert_eq!(parsed.sections[1].bullets, vec!["item"]);
    }

    #[test]
    fn test_content_without_section_is_dropped_when_allow_list_set() {
        let parsed = parse_tailored_text("stray line", None, &allow(&["key skills"]));
        assert!(parsed.sections.is_empty());
    }

    #[test]
    fn test_name_header_is_skipped() {
        let text = "## Jane Doe\n## Key Skills\n- Rust";
        let parsed = parse_tailored_text(text, Some("Jane Doe"), &allow(&["key skills"]));
        assert_eq!(parsed.sections.len(), 1);
        assert_eq!(parsed.sections[0].title, "Key Skills");
    }

    #[test]
    fn test_bold_markers_are_stripped() {
        let text = "## Professional Summary\n**Seasoned** __engineer__ paragraph";
        let parsed = parse_tailored_text(text, None, &allow(&["professional summary"]));
        assert_eq!(parsed.sections[0].paragraphs, vec!["Seasoned engineer paragraph"]);
    }

    #[test]
    fn test_horizontal_rules_are_ignored() {
        let text = "## Key Skills\n---\n- Rust\n\u{2014}\n";
        let parsed = parse_tailored_text(text, None, &allow(&["key skills"]));
        assert_eq!(parsed.sections[0].skills, vec!["Rust"]);
        assert!(parsed.sections[0].paragraphs.is_empty());
    }

    #[test]
    fn test_entry_header_without_date_joins_subtitle() {
        let text = "## Projects\n### Cache | Rust | Bitpacked";
        let parsed = parse_tailored_text(text, None, &allow(&["projects"]));
        let entry = &parsed.sections[0].entries[0];
        assert_eq!(entry.title, "Cache");
        assert_eq!(entry.subtitle, "Rust | Bitpacked");
        assert!(entry.date.is_empty());
    }

    #[test]
    fn test_stray_line_becomes_subtitle_then_date_then_paragraph() {
        let text = "## Professional Experience\n### Engineer\nAcme Corp\n01/2020 - Present\ntrailing note";
        let parsed = parse_tailored_text(text, None, &allow(&["professional experience"]));
        let section = &parsed.sections[0];
        assert_eq!(section.entries[0].subtitle, "Acme Corp");
        assert_eq!(section.entries[0].date, "01/2020 - Present");
        assert_eq!(section.paragraphs, vec!["trailing note"]);
    }

    #[test]
    fn test_education_one_line_shorthand() {
        let text = "## Education\nBSc Computer Science - State University | 2018";
        let parsed = parse_tailored_text(text, None, &allow(&["education"]));
        let entry = &parsed.sections[0].entries[0];
        assert_eq!(entry.title, "BSc Computer Science");
        assert_eq!(entry.subtitle, "State University");
        assert_eq!(entry.date, "2018");
    }

    #[test]
    fn test_skill_bullets_strip_category_prefix() {
        let text = "## Technical Skills\n- Cloud: AWS, GCP";
        let parsed = parse_tailored_text(text, None, &allow(&["technical skills"]));
        assert_eq!(parsed.sections[0].skills, vec!["AWS", "GCP"]);
    }

    #[test]
    fn test_determinism_for_identical_input() {
        let text = "## Key Skills\n- Rust, Go\n## Projects\n### Cache | 2023\n- Fast";
        let allowed = allow(&["key skills", "projects"]);
        let a = parse_tailored_text(text, None, &allowed);
        let b = parse_tailored_text(text, None, &allowed);
        assert_eq!(a, b);
    }

    // ── tagline extraction & validation ─────────────────────────────────────

    #[test]
    fn test_extract_tagline_from_first_line() {
        let (tagline, rest) = extract_tagline("TAGLINE: Systems Engineer\n## Key Skills\n- Rust");
        assert_eq!(tagline.as_deref(), Some("Systems Engineer"));
        assert!(rest.starts_with("## Key Skills"));
    }

    #[test]
    fn test_no_tagline_returns_text_unchanged() {
        let (tagline, rest) = extract_tagline("## Key Skills\n- Rust");
        assert!(tagline.is_none());
        assert_eq!(rest, "## Key Skills\n- Rust");
    }

    #[test]
    fn test_validate_tagline_rejects_more_than_six_words() {
        let resume = "rust systems engineer with lots of backend experience";
        assert!(validate_tagline("one two three four five six seven", resume).is_none());
    }

    #[test]
    fn test_validate_tagline_rejects_fabricated_terms() {
        let resume = "rust backend services";
        assert!(validate_tagline("Kubernetes Platform Lead", resume).is_none());
    }

    #[test]
    fn test_validate_tagline_accepts_resume_grounded_terms() {
        let resume = "Rust backend services and systems work";
        let tagline = validate_tagline("Rust Backend Engineer", resume);
        assert_eq!(tagline.as_deref(), Some("Rust Backend Engineer"));
    }
}
