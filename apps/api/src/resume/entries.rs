//! Entry Parsers — per-section-type parsers that turn body lines into
//! structured entries.

use regex::Regex;

use crate::resume::model::Entry;

/// Date-range line: `MM/YYYY - MM/YYYY` or `MM/YYYY - Present`.
fn date_range_re() -> Regex {
    Regex::new(r"(?i)\b\d{2}/\d{4}\s*-\s*(Present|\d{2}/\d{4})\b").expect("invalid date regex")
}

/// Groups body lines into blocks separated by blank lines; each block is one
/// candidate entry.
pub fn split_entries(block_lines: &[String]) -> Vec<Vec<String>> {
    let mut entries = Vec::new();
    let mut current: Vec<String> = Vec::new();
    for line in block_lines {
        if line.trim().is_empty() {
            if !current.is_empty() {
                entries.push(std::mem::take(&mut current));
            }
            continue;
        }
        current.push(line.clone());
    }
    if !current.is_empty() {
        entries.push(current);
    }
    entries
}

fn strip_bullet(line: &str) -> &str {
    line.trim_start_matches('-').trim()
}

/// Education block: degree / school / date lines, then `-` bullets.
/// Lines starting with "courses" (any case) are dropped.
pub fn parse_education(block_lines: &[String]) -> Vec<Entry> {
    let mut entries = Vec::new();
    for lines in split_entries(block_lines) {
        let mut entry = Entry {
            title: lines.first().cloned().unwrap_or_default(),
            subtitle: lines.get(1).cloned().unwrap_or_default(),
            date: lines.get(2).cloned().unwrap_or_default(),
            bullets: Vec::new(),
        };
        for line in lines.iter().skip(3) {
            if line.to_lowercase().starts_with("courses") {
                continue;
            }
            if line.starts_with('-') {
                entry.bullets.push(strip_bullet(line).to_string());
            }
        }
        entries.push(entry);
    }
    entries
}

/// An experience/project entry plus the joined raw block text, retained for
/// relevance scoring against job keywords.
#[derive(Debug, Clone, PartialEq)]
pub struct ExperienceEntry {
    pub entry: Entry,
    pub raw: String,
}

/// Experience block: title line, optional date-range second line, then `-`
/// bullets.
pub fn parse_experience(block_lines: &[String]) -> Vec<ExperienceEntry> {
    let date_range = date_range_re();
    let mut entries = Vec::new();
    for lines in split_entries(block_lines) {
        let title = lines.first().cloned().unwrap_or_default();
        let (date, bullet_start) = match lines.get(1) {
            Some(second) if date_range.is_match(second) => (second.clone(), 2),
            _ => (String::new(), 1),
        };
        let bullets = lines
            .iter()
            .skip(bullet_start)
            .filter(|l| l.starts_with('-'))
            .map(|l| strip_bullet(l).to_string())
            .collect();
        entries.push(ExperienceEntry {
            entry: Entry {
                title,
                subtitle: String::new(),
                date,
                bullets,
            },
            raw: lines.join(" "),
        });
    }
    entries
}

/// Skills block: every line is split on `|` or `,` into individual skill
/// tokens, deduplicated case-insensitively preserving first occurrence.
pub fn parse_skills(block_lines: &[String]) -> Vec<String> {
    let mut skills: Vec<String> = Vec::new();
    let mut seen: Vec<String> = Vec::new();
    for line in block_lines {
        let line = if line.starts_with('-') {
            strip_bullet(line)
        } else {
            line.as_str()
        };
        for part in line.split(['|', ',']) {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            let key = part.to_lowercase();
            if !seen.contains(&key) {
                seen.push(key);
                skills.push(part.to_string());
            }
        }
    }
    skills
}

/// Flat list block (certificates, interests): one item per non-empty line,
/// bullet prefix stripped.
pub fn parse_list(block_lines: &[String]) -> Vec<String> {
    block_lines
        .iter()
        .map(|line| {
            if line.starts_with('-') {
                strip_bullet(line).to_string()
            } else {
                line.clone()
            }
        })
        .filter(|line| !line.is_empty())
        .collect()
}

/// Titles matching these substrings are paid work; everything else parsed
/// from the same block is a project. A fixed, deterministic classifier —
/// not semantic understanding.
const EXPERIENCE_TITLE_MARKERS: &[&str] = &["independent contractor", "web developer", "driver"];

pub fn is_experience_title(title: &str) -> bool {
    let title = title.to_lowercase();
    EXPERIENCE_TITLE_MARKERS.iter().any(|m| title.contains(m))
}

/// Splits raw work entries into (experience, projects) by title.
pub fn split_work_entries(
    entries: Vec<ExperienceEntry>,
) -> (Vec<ExperienceEntry>, Vec<ExperienceEntry>) {
    entries
        .into_iter()
        .partition(|e| is_experience_title(&e.entry.title))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_split_entries_on_blank_lines() {
        let blocks = split_entries(&lines(&["a", "b", "", "c", "", ""]));
        assert_eq!(blocks, vec![lines(&["a", "b"]), lines(&["c"])]);
    }

    #[test]
    fn test_parse_education_block() {
        let entries = parse_education(&lines(&[
            "BSc Computer Science",
            "State University",
            "09/2014 - 06/2018",
            "Courses: algorithms, networking",
            "- Graduated with distinction",
        ]));
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "BSc Computer Science");
        assert_eq!(entries[0].subtitle, "State University");
        assert_eq!(entries[0].date, "09/2014 - 06/2018");
        assert_eq!(entries[0].bullets, vec!["Graduated with distinction"]);
    }

    #[test]
    fn test_parse_experience_consumes_date_line() {
        let entries = parse_experience(&lines(&[
            "Backend Engineer",
            "01/2020 - Present",
            "- Built service X",
            "- Cut latency by 40%",
        ]));
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].entry.date, "01/2020 - Present");
        assert_eq!(entries[0].entry.bullets.len(), 2);
    }

    #[test]
    fn test_parse_experience_without_date_line() {
        let entries = parse_experience(&lines(&["Chess engine", "- Wrote a UCI engine in Rust"]));
        assert!(entries[0].entry.date.is_empty());
        assert_eq!(entries[0].entry.bullets, vec!["Wrote a UCI engine in Rust"]);
    }

    #[test]
    fn test_parse_experience_retains_raw_block_text() {
        let entries = parse_experience(&lines(&["Chess engine", "- Rust and bitboards"]));
        assert_eq!(entries[0].raw, "Chess engine - Rust and bitboards");
    }

    #[test]
    fn test_parse_skills_splits_and_dedupes_case_insensitively() {
        let skills = parse_skills(&lines(&["- Rust | Python, rust", "Docker"]));
        assert_eq!(skills, vec!["Rust", "Python", "Docker"]);
    }

    #[test]
    fn test_parse_list_strips_bullet_prefixes() {
        let items = parse_list(&lines(&["- AWS Certified", "Chess"]));
        assert_eq!(items, vec!["AWS Certified", "Chess"]);
    }

    #[test]
    fn test_independent_contractor_is_experience() {
        assert!(is_experience_title("Independent Contractor \u{2014} Web Systems"));
    }

    #[test]
    fn test_other_titles_are_projects() {
        let (experience, projects) = split_work_entries(parse_experience(&lines(&[
            "Distributed cache",
            "- Implemented consistent hashing",
            "",
            "Web Developer",
            "01/2021 - Present",
            "- Client sites",
        ])));
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].entry.title, "Distributed cache");
        assert_eq!(experience.len(), 1);
        assert_eq!(experience[0].entry.title, "Web Developer");
    }
}
