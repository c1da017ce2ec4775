//! Text normalization applied to every line of résumé and job text before
//! any pattern matching. Idempotent: `normalize(normalize(s)) == normalize(s)`.

use regex::Regex;

/// Punctuation variants that show up in exported résumés, mapped to the
/// ASCII forms the rest of the parsing pipeline matches against.
const REPLACEMENTS: &[(char, &str)] = &[
    ('\u{2013}', "-"), // en dash
    ('\u{2014}', "-"), // em dash
    ('\u{00b7}', "-"), // middle dot
    ('\u{2022}', "-"), // bullet
    ('\u{00d7}', "x"), // multiplication sign
];

/// Maps known non-ASCII dash/bullet/multiplication variants to ASCII and
/// collapses runs of 2+ horizontal whitespace to a single space.
pub fn normalize_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match REPLACEMENTS.iter().find(|(src, _)| *src == ch) {
            Some((_, dst)) => out.push_str(dst),
            None => out.push(ch),
        }
    }
    let squeeze = Regex::new(r"[ \t]{2,}").expect("invalid whitespace regex");
    squeeze.replace_all(&out, " ").into_owned()
}
