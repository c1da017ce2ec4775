//! Header Parser — name and contact lines from the block before the first
//! section.

use crate::resume::model::Header;

/// Marker some résumé exporters prepend to contact lines; everything up to
/// and including it is dropped.
const COLOR_MARKER: &str = "x-t-c2-color:";

/// First non-blank line is the name; remaining non-blank lines are contact
/// items.
pub fn parse_header(header_lines: &[String]) -> Header {
    let mut non_blank = header_lines.iter().filter(|l| !l.trim().is_empty());

    let name = non_blank.next().cloned().unwrap_or_default();

    let contact = non_blank
        .map(|line| match line.rfind(COLOR_MARKER) {
            Some(pos) => line[pos + COLOR_MARKER.len()..].trim().to_string(),
            None => line.clone(),
        })
        .filter(|line| !line.is_empty())
        .collect();

    Header { name, contact }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_first_non_blank_line_is_name() {
        let header = parse_header(&lines(&["", "Jane Doe", "jane@example.com"]));
        assert_eq!(header.name, "Jane Doe");
        assert_eq!(header.contact, vec!["jane@example.com"]);
    }

    #[test]
    fn test_color_marker_is_stripped() {
        let header = parse_header(&lines(&[
            "Jane Doe",
            "x-t-c2-color: jane@example.com",
        ]));
        assert_eq!(header.contact, vec!["jane@example.com"]);
    }

    #[test]
    fn test_empty_block_yields_empty_header() {
        let header = parse_header(&[]);
        assert!(header.name.is_empty());
        assert!(header.contact.is_empty());
    }

    #[test]
    fn test_marker_only_line_is_dropped() {
        let header = parse_header(&lines(&["Jane Doe", "x-t-c2-color:"]));
        assert!(header.contact.is_empty());
    }
}
