//! Section Splitter — segments raw résumé text into a header block and an
//! ordered list of titled sections using a dashed-line heuristic.
//!
//! A line is a section header iff it is non-empty, contains no URL or `@`,
//! and the next non-blank line is a dashed separator. This is implemented as
//! an explicit two-line lookahead scan, not a grammar: the one-line lookahead
//! makes it unambiguous without backtracking.

use regex::Regex;

use crate::resume::normalize::normalize_text;

/// A section title together with its raw body lines (blank lines preserved —
/// the entry parsers split on them).
#[derive(Debug, Clone, PartialEq)]
pub struct RawSection {
    pub title: String,
    pub lines: Vec<String>,
}

/// Result of splitting: everything before the first header, plus the titled
/// sections in first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SplitResume {
    pub header_block: Vec<String>,
    pub sections: Vec<RawSection>,
}

impl SplitResume {
    /// Body lines for an exactly-matching title, or an empty slice.
    pub fn body(&self, title: &str) -> &[String] {
        self.sections
            .iter()
            .find(|s| s.title == title)
            .map(|s| s.lines.as_slice())
            .unwrap_or(&[])
    }

    pub fn contains(&self, title: &str) -> bool {
        self.sections.iter().any(|s| s.title == title)
    }
}

/// Dashed separator: one or more `-`, optionally space-separated, nothing else.
fn dash_line_re() -> Regex {
    Regex::new(r"^-[-\s]*$").expect("invalid dash separator regex")
}

/// Lines carrying a URL or `@` are never section headers.
fn link_re() -> Regex {
    Regex::new(r"https?://|@").expect("invalid link regex")
}

/// Splits normalized résumé text into a header block and titled sections.
///
/// Dashed separator lines are dropped everywhere. A résumé with no headers
/// yields one header block and no sections. A header-looking line at EOF
/// (no dashed line after it) is ordinary content.
pub fn split_sections(text: &str) -> SplitResume {
    let dash_line = dash_line_re();
    let link = link_re();

    let lines: Vec<String> = text
        .lines()
        .map(|l| normalize_text(l.trim_end()))
        .collect();

    let mut split = SplitResume::default();
    let mut current: Option<usize> = None;
    let mut i = 0;

    while i < lines.len() {
        let stripped = lines[i].trim();

        if stripped.is_empty() {
            push_line(&mut split, current, String::new());
            i += 1;
            continue;
        }

        if dash_line.is_match(stripped) {
            i += 1;
            continue;
        }

        // Lookahead: skip blanks, then check for a dashed separator.
        let mut j = i + 1;
        while j < lines.len() && lines[j].trim().is_empty() {
            j += 1;
        }
        let is_header_candidate = !link.is_match(stripped);
        if is_header_candidate && j < lines.len() && dash_line.is_match(lines[j].trim()) {
            current = Some(open_section(&mut split, stripped));
            i = j + 1;
            continue;
        }

        push_line(&mut split, current, stripped.to_string());
        i += 1;
    }

    split
}

/// Returns the index of the section with this title, opening it if new.
/// A repeated title continues the earlier section's body.
fn open_section(split: &mut SplitResume, title: &str) -> usize {
    if let Some(ix) = split.sections.iter().position(|s| s.title == title) {
        return ix;
    }
    split.sections.push(RawSection {
        title: title.to_string(),
        lines: Vec::new(),
    });
    split.sections.len() - 1
}

fn push_line(split: &mut SplitResume, current: Option<usize>, line: String) {
    match current {
        None => split.header_block.push(line),
        Some(ix) => split.sections[ix].lines.push(line),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESUME: &str = "\
Jane Doe
jane@example.com
https://example.com/jane

Education
---------
BSc Computer Science
State University
09/2014 - 06/2018

Skills
------
- Rust | Python
- Docker, Kubernetes
";

    #[test]
    fn test_well_formed_resume_yields_one_section_per_header() {
        let split = split_sections(RESUME);
        let titles: Vec<&str> = split.sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Education", "Skills"]);
    }

    #[test]
    fn test_section_bodies_keep_non_dashed_lines_in_order() {
        let split = split_sections(RESUME);
        let education: Vec<&String> = split
            .body("Education")
            .iter()
            .filter(|l| !l.is_empty())
            .collect();
        assert_eq!(
            education,
            vec!["BSc Computer Science", "State University", "09/2014 - 06/2018"]
        );
    }

    #[test]
    fn test_lines_before_first_header_form_the_header_block() {
        let split = split_sections(RESUME);
        let block: Vec<&String> = split.header_block.iter().filter(|l| !l.is_empty()).collect();
        assert_eq!(block, vec!["Jane Doe", "jane@example.com", "https://example.com/jane"]);
    }

    #[test]
    fn test_headerless_resume_degrades_to_header_block_only() {
        let split = split_sections("just some text\nand another line\n");
        assert!(split.sections.is_empty());
        assert_eq!(split.header_block.len(), 2);
    }

    #[test]
    fn test_header_candidate_at_eof_is_ordinary_content() {
        let split = split_sections("Name\n\nEducation");
        assert!(split.sections.is_empty());
        assert!(split.header_block.contains(&"Education".to_string()));
    }

    #[test]
    fn test_lines_with_url_or_at_are_never_headers() {
        let text = "jane@example.com\n---\nbody line\n";
        let split = split_sections(text);
        assert!(split.sections.is_empty());
        assert_eq!(split.header_block, vec!["jane@example.com", "body line"]);
    }

    #[test]
    fn test_dashed_lines_are_dropped_everywhere() {
        let split = split_sections(RESUME);
        for section in &split.sections {
            assert!(section.lines.iter().all(|l| !l.starts_with("---")));
        }
    }

    #[test]
    fn test_blank_lines_between_header_and_dashes_are_skipped() {
        let text = "Projects\n\n-----\nentry line\n";
        let split = split_sections(text);
        assert_eq!(split.sections.len(), 1);
        assert_eq!(split.sections[0].title, "Projects");
    }

    #[test]
    fn test_repeated_title_continues_the_earlier_section() {
        let text = "Skills\n---\n- Rust\n\nSkills\n---\n- Go\n";
        let split = split_sections(text);
        assert_eq!(split.sections.len(), 1);
        let body: Vec<&String> = split.body("Skills").iter().filter(|l| !l.is_empty()).collect();
        assert_eq!(body, vec!["- Rust", "- Go"]);
    }
}
