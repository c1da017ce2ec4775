//! Page-Fit Trimmer — removes the least-important unit of content from a
//! section list.
//!
//! `trim_once` is the single operation; the fit loop applies it repeatedly
//! until the rendered document meets the page budget or it returns false.
//! Greedy, priority-ordered, monotonically shrinking: every successful call
//! deletes exactly one unit (bullet, skill, paragraph, or empty section)
//! from the tail, never reordering or merging content.

use crate::resume::model::Section;

/// Sections eligible for trimming, least-important first. Titles are matched
/// case-insensitively; sections outside this list are never trimmed.
const TRIM_PRIORITY: &[&str] = &[
    "additional information",
    "certifications",
    "projects",
    "professional experience",
    "education",
    "key skills / technical skills",
    "key skills",
    "technical skills",
    "professional summary",
];

/// Removes one unit of content and returns true, or returns false when every
/// priority section is exhausted — the caller must accept the current state.
///
/// Rules are tried in order for the first priority section present; the
/// applicability checks are explicit and mutually exclusive so exactly one
/// rule fires per call:
/// 1. last bullet of the last entry that still has bullets;
/// 2. last flat bullet;
/// 3. last skill;
/// 4. last paragraph — except the sole remaining paragraph of
///    "professional summary";
/// 5. the section itself, once it has no content left.
pub fn trim_once(sections: &mut Vec<Section>) -> bool {
    for title in TRIM_PRIORITY {
        let Some(ix) = sections
            .iter()
            .position(|s| s.title.eq_ignore_ascii_case(title))
        else {
            continue;
        };

        let section = &mut sections[ix];

        for entry in section.entries.iter_mut().rev() {
            if entry.bullets.pop().is_some() {
                return true;
            }
        }
        if section.bullets.pop().is_some() {
            return true;
        }
        if section.skills.pop().is_some() {
            return true;
        }
        let is_sole_summary_paragraph =
            *title == "professional summary" && section.paragraphs.len() <= 1;
        if !section.paragraphs.is_empty() && !is_sole_summary_paragraph {
            section.paragraphs.pop();
            return true;
        }
        if !section.has_content() {
            sections.remove(ix);
            return true;
        }
        // Section still has untrimmable content (e.g. entry headings, or a
        // protected summary paragraph) — try the next priority title.
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resume::model::Entry;

    fn section(title: &str) -> Section {
        Section::new(title)
    }

    fn total_units(sections: &[Section]) -> usize {
        sections
            .iter()
            .map(|s| {
                s.bullets.len()
                    + s.skills.len()
                    + s.paragraphs.len()
                    + s.entries.iter().map(|e| e.bullets.len()).sum::<usize>()
            })
            .sum::<usize>()
            + sections.len()
    }

    #[test]
    fn test_trims_last_bullet_of_last_entry_with_bullets() {
        let mut sections = vec![Section {
            title: "Projects".to_string(),
            entries: vec![
                Entry {
                    title: "A".to_string(),
                    bullets: vec!["a1".to_string()],
                    ..Entry::default()
                },
                Entry {
                    title: "B".to_string(),
                    bullets: vec!["b1".to_string(), "b2".to_string()],
                    ..Entry::default()
                },
            ],
            ..Section::default()
        }];
        assert!(trim_once(&mut sections));
        assert_eq!(sections[0].entries[1].bullets, vec!["b1"]);
        assert_eq!(sections[0].entries[0].bullets, vec!["a1"]);
    }

    #[test]
    fn test_reverse_scan_skips_bulletless_tail_entries() {
        let mut sections = vec![Section {
            title: "Projects".to_string(),
            entries: vec![
                Entry {
                    title: "A".to_string(),
                    bullets: vec!["a1".to_string()],
                    ..Entry::default()
                },
                Entry {
                    title: "B".to_string(),
                    ..Entry::default()
                },
            ],
            ..Section::default()
        }];
        assert!(trim_once(&mut sections));
        assert!(sections[0].entries[0].bullets.is_empty());
    }

    #[test]
    fn test_priority_order_prefers_additional_information() {
        let mut additional = section("Additional Information");
        additional.bullets.push("extra".to_string());
        let mut summary = section("Professional Summary");
        summary.paragraphs.push("p1".to_string());
        summary.paragraphs.push("p2".to_string());
        let mut sections = vec![summary, additional];

        assert!(trim_once(&mut sections));
        // The summary is untouched; additional information loses its bullet.
        assert_eq!(sections[0].paragraphs.len(), 2);
        assert!(sections[1].bullets.is_empty());
    }

    #[test]
    fn test_sole_summary_paragraph_is_protected() {
        let mut summary = section("Professional Summary");
        summary.paragraphs.push("the one paragraph".to_string());
        let mut sections = vec![summary];
        // The sole paragraph is protected and the section therefore still has
        // content, so nothing is trimmable.
        assert!(!trim_once(&mut sections));
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].paragraphs.len(), 1);
    }

    #[test]
    fn test_skills_trim_from_the_tail() {
        let mut skills = section("Technical Skills");
        skills.skills = vec!["Rust".to_string(), "Go".to_string()];
        let mut sections = vec![skills];
        assert!(trim_once(&mut sections));
        assert_eq!(sections[0].skills, vec!["Rust"]);
    }

    #[test]
    fn test_single_bullet_then_section_then_false() {
        let mut projects = section("Projects");
        projects.bullets.push("only bullet".to_string());
        let mut sections = vec![projects];

        assert!(trim_once(&mut sections), "first call removes the bullet");
        assert_eq!(sections.len(), 1);
        assert!(sections[0].bullets.is_empty());

        assert!(trim_once(&mut sections), "second call removes the empty section");
        assert!(sections.is_empty());

        assert!(!trim_once(&mut sections), "third call has nothing left");
    }

    #[test]
    fn test_each_successful_trim_removes_exactly_one_unit() {
        let mut sections = vec![
            Section {
                title: "Projects".to_string(),
                entries: vec![Entry {
                    title: "A".to_string(),
                    bullets: vec!["a1".to_string(), "a2".to_string()],
                    ..Entry::default()
                }],
                ..Section::default()
            },
            Section {
                title: "Technical Skills".to_string(),
                skills: vec!["Rust".to_string()],
                ..Section::default()
            },
        ];

        let mut before = total_units(&sections);
        while trim_once(&mut sections) {
            let after = total_units(&sections);
            assert_eq!(after, before - 1, "trim must remove exactly one unit");
            before = after;
        }
    }

    #[test]
    fn test_termination_on_any_model() {
        let mut sections = vec![
            Section {
                title: "Professional Summary".to_string(),
                paragraphs: vec!["p1".to_string(), "p2".to_string()],
                ..Section::default()
            },
            Section {
                title: "Education".to_string(),
                entries: vec![Entry {
                    title: "BSc".to_string(),
                    bullets: vec!["b".to_string()],
                    ..Entry::default()
                }],
                ..Section::default()
            },
        ];
        let mut calls = 0;
        while trim_once(&mut sections) {
            calls += 1;
            assert!(calls < 100, "trim loop must terminate");
        }
        // Education keeps its titled (but bullet-less) entry; the summary
        // keeps its protected final paragraph.
        assert!(!sections.is_empty());
    }

    #[test]
    fn test_sections_outside_priority_list_are_untouched() {
        let mut volunteer = section("Volunteer Experience");
        volunteer.bullets.push("kept".to_string());
        let mut sections = vec![volunteer];
        assert!(!trim_once(&mut sections));
        assert_eq!(sections[0].bullets, vec!["kept"]);
    }
}
