//! Section Renderer + Document Assembler — converts the structured model
//! into markup fragments and composes the final HTML document.

use crate::resume::model::{Header, Section};

/// Render order used when the caller supplies no allow-list.
pub const DEFAULT_SECTION_ORDER: &[&str] = &[
    "professional summary",
    "key skills / technical skills",
    "key skills",
    "technical skills",
    "professional experience",
    "projects",
    "education",
    "certifications",
    "additional information",
];

/// Extra rules appended to the template stylesheet for generated documents.
const DOC_EXTRA_CSS: &str = "\
.section-title { font-weight: 700; margin-top: 16px; }
.summary { margin: 6px 0; }
ul { margin: 6px 0 12px 18px; }";

/// Print tweak so the first page does not hug the sheet edge.
pub const PRINT_PAGE_CSS: &str = "\n@media print { .page { padding-top: 6mm; } }\n";

/// Minimal HTML escaping for text interpolated into markup.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// A contact line: URLs become anchors labelled without the scheme,
/// everything else renders as text.
fn render_contact_item(item: &str) -> String {
    if item.starts_with("http") {
        let label = item
            .trim_start_matches("https://")
            .trim_start_matches("http://");
        format!(
            r#"<a href="{}">{}</a>"#,
            escape_html(item),
            escape_html(label)
        )
    } else {
        escape_html(item)
    }
}

/// Renders the name/tagline/contact header block.
pub fn render_header_html(header: &Header, tagline: &str) -> String {
    let contact = header
        .contact
        .iter()
        .map(|c| render_contact_item(c))
        .collect::<Vec<_>>()
        .join(" <span>\u{b7}</span> ");
    format!(
        "<div class=\"header\">\n  <h1>{}</h1>\n  <div class=\"tagline\">{}</div>\n  <div class=\"contact-row\">{}</div>\n</div>\n",
        escape_html(&header.name),
        escape_html(tagline),
        contact
    )
}

/// Renders sections as markup fragments, ordered by the preferred list
/// (allow-list positions first, unknown titles alphabetical after).
/// "Additional Information" is parsed and trimmed but never rendered.
pub fn render_sections_to_html(sections: &[Section], preferred_order: &[String]) -> String {
    let order: Vec<String> = if preferred_order.is_empty() {
        DEFAULT_SECTION_ORDER.iter().map(|s| s.to_string()).collect()
    } else {
        preferred_order.iter().map(|s| s.to_lowercase()).collect()
    };

    let sort_key = |s: &Section| -> (u8, usize, String) {
        let title = s.title.to_lowercase();
        match order.iter().position(|p| *p == title) {
            Some(index) => (0, index, String::new()),
            None => (1, 0, title),
        }
    };

    let mut ordered: Vec<&Section> = sections.iter().collect();
    ordered.sort_by(|a, b| sort_key(a).cmp(&sort_key(b)));

    let mut html = Vec::new();
    for section in ordered {
        if section.title.eq_ignore_ascii_case("additional information") {
            continue;
        }
        html.push("<div class=\"section\">".to_string());
        html.push(format!(
            "<div class=\"section-title\">{}</div>",
            escape_html(&section.title)
        ));

        if !section.skills.is_empty() {
            html.push("<div class=\"skills-grid\">".to_string());
            for skill in &section.skills {
                html.push(format!(
                    "<span class=\"skill-tag\">{}</span>",
                    escape_html(skill)
                ));
            }
            html.push("</div>".to_string());
        }

        for paragraph in &section.paragraphs {
            html.push(format!("<p class=\"summary\">{}</p>", escape_html(paragraph)));
        }

        for entry in &section.entries {
            html.push("<div class=\"entry\">".to_string());
            html.push("<div class=\"entry-header\">".to_string());
            html.push(format!(
                "<span class=\"entry-title\">{}</span>",
                escape_html(&entry.title)
            ));
            if !entry.date.is_empty() {
                html.push(format!(
                    "<span class=\"entry-date\">{}</span>",
                    escape_html(&entry.date)
                ));
            }
            html.push("</div>".to_string());
            if !entry.subtitle.is_empty() {
                html.push(format!(
                    "<div class=\"entry-subtitle\">{}</div>",
                    escape_html(&entry.subtitle)
                ));
            }
            if !entry.bullets.is_empty() {
                html.push("<ul>".to_string());
                for bullet in &entry.bullets {
                    html.push(format!("<li>{}</li>", escape_html(bullet)));
                }
                html.push("</ul>".to_string());
            }
            html.push("</div>".to_string());
        }

        if !section.bullets.is_empty() {
            html.push("<ul>".to_string());
            for bullet in &section.bullets {
                html.push(format!("<li>{}</li>", escape_html(bullet)));
            }
            html.push("</ul>".to_string());
        }

        html.push("</div>".to_string());
    }

    html.join("\n")
}

/// Composes a complete HTML document: stylesheet in the head, body wrapped
/// in the template's `.page` container.
pub fn assemble_document(title: &str, style_css: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{}</title>
<style>
{}
{}
</style>
</head>
<body>
<div class="page">
{}
</div>
</body>
</html>
"#,
        escape_html(title),
        style_css,
        DOC_EXTRA_CSS,
        body
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resume::model::Entry;

    fn section_with_skills() -> Section {
        Section {
            title: "Key Skills".to_string(),
            skills: vec!["Rust".to_string(), "C++".to_string()],
            ..Section::default()
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a<b> & \"c\""), "a&lt;b&gt; &amp; &quot;c&quot;");
    }

    #[test]
    fn test_skills_render_as_tags_and_escape() {
        let html = render_sections_to_html(&[section_with_skills()], &[]);
        assert!(html.contains(r#"<span class="skill-tag">Rust</span>"#));
        assert!(html.contains(r#"<span class="skill-tag">C++</span>"#));
    }

    #[test]
    fn test_entry_markup_includes_date_and_subtitle() {
        let section = Section {
            title: "Professional Experience".to_string(),
            entries: vec![Entry {
                title: "Backend Engineer".to_string(),
                subtitle: "Acme".to_string(),
                date: "01/2020 - Present".to_string(),
                bullets: vec!["Built service X".to_string()],
            }],
            ..Section::default()
        };
        let html = render_sections_to_html(&[section], &[]);
        assert!(html.contains(r#"<span class="entry-title">Backend Engineer</span>"#));
        assert!(html.contains(r#"<span class="entry-date">01/2020 - Present</span>"#));
        assert!(html.contains(r#"<div class="entry-subtitle">Acme</div>"#));
        assert!(html.contains("<li>Built service X</li>"));
    }

    #[test]
    fn test_sections_follow_allow_list_order() {
        let sections = vec![
            Section::new("Projects"),
            Section::new("Professional Summary"),
        ];
        let order = vec!["professional summary".to_string(), "projects".to_string()];
        let html = render_sections_to_html(&sections, &order);
        let summary_pos = html.find("Professional Summary").unwrap();
        let projects_pos = html.find("Projects").unwrap();
        assert!(summary_pos < projects_pos);
    }

    #[test]
    fn test_unknown_sections_sort_alphabetically_after_known() {
        let sections = vec![
            Section::new("Zebra"),
            Section::new("Alpha"),
            Section::new("Education"),
        ];
        let order = vec!["education".to_string()];
        let html = render_sections_to_html(&sections, &order);
        let education = html.find("Education").unwrap();
        let alpha = html.find("Alpha").unwrap();
        let zebra = html.find("Zebra").unwrap();
        assert!(education < alpha && alpha < zebra);
    }

    #[test]
    fn test_additional_information_is_never_rendered() {
        let sections = vec![Section {
            title: "Additional Information".to_string(),
            bullets: vec!["secret".to_string()],
            ..Section::default()
        }];
        let html = render_sections_to_html(&sections, &[]);
        assert!(!html.contains("secret"));
    }

    #[test]
    fn test_header_renders_urls_as_anchors() {
        let header = Header {
            name: "Jane Doe".to_string(),
            contact: vec![
                "jane@example.com".to_string(),
                "https://example.com/jane".to_string(),
            ],
        };
        let html = render_header_html(&header, "Rust Engineer");
        assert!(html.contains("<h1>Jane Doe</h1>"));
        assert!(html.contains(r#"<a href="https://example.com/jane">example.com/jane</a>"#));
        assert!(html.contains(r#"<div class="tagline">Rust Engineer</div>"#));
    }

    #[test]
    fn test_assemble_document_wraps_body_in_page() {
        let doc = assemble_document("Tailored Resume", ".page {}", "<p>hi</p>");
        assert!(doc.starts_with("<!DOCTYPE html>"));
        assert!(doc.contains(".page {}"));
        assert!(doc.contains("<div class=\"page\">\n<p>hi</p>"));
        assert!(doc.contains("<title>Tailored Resume</title>"));
    }
}
