//! HTML template helpers — pulls the stylesheet, header block, and section
//! allow-list out of a base résumé template.

use regex::Regex;

/// Extracts the contents of the first `<style>` block, or empty.
pub fn extract_style_css(template_text: &str) -> String {
    let re = Regex::new(r"(?is)<style>(.*?)</style>").expect("invalid style regex");
    re.captures(template_text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}

/// Extracts the template's `<div class="header">…</div>` block, balancing
/// nested divs with a depth counter.
pub fn extract_template_header(template_text: &str) -> Option<String> {
    let start = template_text.find(r#"<div class="header">"#)?;
    let tail = &template_text[start..];
    let mut depth = 0usize;
    for (offset, _) in tail.char_indices() {
        if tail[offset..].starts_with("<div") {
            depth += 1;
        } else if tail[offset..].starts_with("</div>") {
            depth -= 1;
            if depth == 0 {
                let end = offset + "</div>".len();
                return Some(tail[..end].to_string());
            }
        }
    }
    None
}

/// Section titles present in the template, in order, inner tags stripped.
/// "Additional Information" never makes the allow-list.
pub fn extract_template_sections(template_text: &str) -> Vec<String> {
    let re = Regex::new(r#"(?is)<div\s+class="section-title"\s*>\s*(.*?)\s*</div>"#)
        .expect("invalid section-title regex");
    let strip_tags = Regex::new(r"<[^>]*>").expect("invalid tag regex");
    re.captures_iter(template_text)
        .filter_map(|c| c.get(1))
        .map(|m| strip_tags.replace_all(m.as_str(), "").trim().to_string())
        .filter(|t| !t.is_empty() && !t.eq_ignore_ascii_case("additional information"))
        .collect()
}

/// Replaces the text inside the header's tagline div. Returns the header
/// unchanged when there is no tagline slot.
pub fn apply_tagline_to_header(header_html: &str, tagline: &str) -> String {
    if tagline.is_empty() {
        return header_html.to_string();
    }
    let open = r#"<div class="tagline">"#;
    let Some(start) = header_html.find(open) else {
        return header_html.to_string();
    };
    let start = start + open.len();
    let Some(end) = header_html[start..].find("</div>") else {
        return header_html.to_string();
    };
    format!(
        "{}{}{}",
        &header_html[..start],
        tagline,
        &header_html[start + end..]
    )
}
