//! Structured résumé document model.
//!
//! `Header` and `Section`s are built once per generation run from immutable
//! source text. The page-fit trimmer mutates an exclusively-owned
//! `Vec<Section>` in place; nothing survives across runs.

use serde::{Deserialize, Serialize};

/// The name/contact block that precedes the first section of a résumé.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Header {
    pub name: String,
    /// Emails, URLs, phone numbers, etc. — one item per source line.
    pub contact: Vec<String>,
}

/// One structured item within a section: a job, a project, or a degree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub title: String,
    pub subtitle: String,
    /// Free-form, typically "MM/YYYY - MM/YYYY" or "MM/YYYY - Present".
    pub date: String,
    pub bullets: Vec<String>,
}

impl Entry {
    /// True if any field carries text. Entries that fail this check are
    /// invisible in rendered output and count as empty for trimming.
    pub fn has_content(&self) -> bool {
        !self.title.is_empty()
            || !self.subtitle.is_empty()
            || !self.date.is_empty()
            || !self.bullets.is_empty()
    }
}

/// A named block of résumé content.
///
/// Well-formed input populates at most one of `entries` / `bullets` /
/// `paragraphs` / `skills` densely, but the model tolerates any mix — the
/// renderer and trimmer handle each list independently.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    pub entries: Vec<Entry>,
    pub bullets: Vec<String>,
    pub paragraphs: Vec<String>,
    pub skills: Vec<String>,
}

impl Section {
    pub fn new(title: impl Into<String>) -> Self {
        Section {
            title: title.into(),
            ..Section::default()
        }
    }

    /// True if the section still renders anything: a skill, bullet, or
    /// paragraph, or at least one entry with content.
    pub fn has_content(&self) -> bool {
        !self.skills.is_empty()
            || !self.bullets.is_empty()
            || !self.paragraphs.is_empty()
            || self.entries.iter().any(Entry::has_content)
    }
}
