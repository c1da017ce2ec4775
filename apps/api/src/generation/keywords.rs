//! Keyword Extractor — derives relevant terms from a job description and the
//! résumé's known skills, and scores/filters content against them.

use std::collections::HashMap;

use regex::Regex;

use crate::resume::normalize::normalize_text;

/// Filler words excluded from frequency counting. Includes job-posting
/// boilerplate ("role", "team", "experience") alongside ordinary stopwords.
pub const STOPWORDS: &[&str] = &[
    "the", "and", "a", "an", "to", "of", "in", "for", "with", "on", "at", "by", "from", "as",
    "is", "are", "be", "this", "that", "it", "or", "we", "you", "your", "our", "their", "they",
    "i", "me", "my", "us", "will", "can", "may", "must", "should", "could", "would", "role",
    "position", "team", "work", "working", "experience", "skills", "ability", "strong",
];

/// How many frequency-derived tokens to append after matched skills.
const TOP_TOKEN_COUNT: usize = 8;

pub fn is_stopword(word: &str) -> bool {
    STOPWORDS.contains(&word)
}

/// Word-like token: a letter followed by alphanumerics or `+`, `#`, `-`.
fn token_re() -> Regex {
    Regex::new(r"[a-zA-Z][a-zA-Z0-9+#\-]+").expect("invalid token regex")
}

/// Lower-cased word-like tokens of `text`, in order of occurrence.
pub fn tokenize(text: &str) -> Vec<String> {
    token_re()
        .find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .collect()
}

/// Frequency-counting tokens: stopwords and tokens shorter than 3 chars are
/// dropped before counting.
pub fn counting_tokens(text: &str) -> Vec<String> {
    tokenize(text)
        .into_iter()
        .filter(|w| w.len() >= 3 && !is_stopword(w))
        .collect()
}

/// Top `n` tokens by descending frequency. Ties break by first occurrence
/// index in the token stream, so output is deterministic for a given input.
pub fn top_frequency_tokens(tokens: &[String], n: usize) -> Vec<String> {
    let mut stats: HashMap<&str, (usize, usize)> = HashMap::new();
    for (index, token) in tokens.iter().enumerate() {
        let entry = stats.entry(token).or_insert((0, index));
        entry.0 += 1;
    }
    let mut ranked: Vec<(&str, usize, usize)> =
        stats.into_iter().map(|(t, (c, i))| (t, c, i)).collect();
    ranked.sort_by_key(|&(_, count, first)| (std::cmp::Reverse(count), first));
    ranked
        .into_iter()
        .take(n)
        .map(|(t, _, _)| t.to_string())
        .collect()
}

/// Builds the keyword list for a job description: known skills found
/// verbatim in the job text (in skills-list order), then the top frequency
/// tokens not already present. Deduplicated case-insensitively.
pub fn extract_keywords(job_text: &str, skills: &[String]) -> Vec<String> {
    if job_text.trim().is_empty() {
        return Vec::new();
    }
    let job_text_l = normalize_text(job_text).to_lowercase();

    let mut keywords: Vec<String> = Vec::new();
    let mut seen: Vec<String> = Vec::new();
    let push_unique = |kw: &str, keywords: &mut Vec<String>, seen: &mut Vec<String>| {
        let key = kw.to_lowercase();
        if !seen.contains(&key) {
            seen.push(key);
            keywords.push(kw.to_string());
        }
    };

    for skill in skills {
        if job_text_l.contains(&skill.to_lowercase()) {
            push_unique(skill, &mut keywords, &mut seen);
        }
    }
    for token in top_frequency_tokens(&counting_tokens(&job_text_l), TOP_TOKEN_COUNT) {
        push_unique(&token, &mut keywords, &mut seen);
    }
    keywords
}

/// Relevance of a text blob to the keyword list: how many keywords occur in
/// it as case-insensitive substrings. Used as a descending sort key for
/// experience/project ordering.
pub fn relevance_score(text: &str, keywords: &[String]) -> usize {
    if keywords.is_empty() {
        return 0;
    }
    let text = text.to_lowercase();
    keywords
        .iter()
        .filter(|k| text.contains(&k.to_lowercase()))
        .count()
}

/// Reorders skills in place: keyword-matching skills first, each group
/// alphabetical. Stable with respect to equal keys.
pub fn order_skills_by_keywords(skills: &mut [String], keywords: &[String]) {
    let keyword_set: Vec<String> = keywords.iter().map(|k| k.to_lowercase()).collect();
    skills.sort_by_key(|s| {
        let key = s.to_lowercase();
        (!keyword_set.contains(&key), key)
    });
}

/// Selects the skills to show for a job: skills that match the job text
/// (scored, best first), padded with remaining résumé skills so the section
/// is never sparse.
///
/// Scoring: +5 when the whole skill appears in the job text, +1 per skill
/// token present in the job's token set.
pub fn filter_skills_for_job(
    skills: &[String],
    job_text: &str,
    max_skills: usize,
    min_skills: usize,
) -> Vec<String> {
    if skills.is_empty() {
        return Vec::new();
    }
    if job_text.trim().is_empty() {
        return skills.iter().take(max_skills).cloned().collect();
    }

    let job_norm = normalize_text(job_text).to_lowercase();
    let job_words = counting_tokens(&job_norm);

    let mut scored: Vec<(usize, usize, &String)> = Vec::new();
    for (index, skill) in skills.iter().enumerate() {
        let skill_norm = normalize_text(skill).to_lowercase();
        let mut score = 0;
        if !skill_norm.is_empty() && job_norm.contains(&skill_norm) {
            score += 5;
        }
        for token in tokenize(&skill_norm) {
            if job_words.contains(&token) {
                score += 1;
            }
        }
        scored.push((score, index, skill));
    }

    let mut matches: Vec<&(usize, usize, &String)> =
        scored.iter().filter(|(score, _, _)| *score > 0).collect();
    matches.sort_by_key(|&&(score, index, _)| (std::cmp::Reverse(score), index));

    let mut selected: Vec<String> = Vec::new();
    let mut selected_keys: Vec<String> = Vec::new();
    for &&(_, _, skill) in &matches {
        let key = skill.to_lowercase();
        if !selected_keys.contains(&key) {
            selected_keys.push(key);
            selected.push(skill.clone());
        }
        if selected.len() >= max_skills {
            break;
        }
    }

    // Pad with remaining résumé skills to avoid an overly sparse section.
    for skill in skills {
        let key = skill.to_lowercase();
        if selected_keys.contains(&key) {
            continue;
        }
        if selected.len() >= max_skills {
            break;
        }
        selected_keys.push(key);
        selected.push(skill.clone());
        if selected.len() >= min_skills && !matches.is_empty() {
            break;
        }
    }

    selected.truncate(max_skills);
    selected
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skills(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_matched_skill_precedes_frequency_tokens() {
        let job = "We run Kubernetes clusters. Kubernetes experience required. \
                   Deployment deployment deployment pipelines.";
        let keywords = extract_keywords(job, &skills(&["Kubernetes", "Rust"]));
        let kube_pos = keywords.iter().position(|k| k == "Kubernetes");
        let deploy_pos = keywords.iter().position(|k| k == "deployment");
        assert_eq!(kube_pos, Some(0));
        assert!(deploy_pos.unwrap() > kube_pos.unwrap());
    }

    #[test]
    fn test_keywords_deduplicate_case_insensitively() {
        let job = "rust rust rust services";
        let keywords = extract_keywords(job, &skills(&["Rust"]));
        let rust_count = keywords
            .iter()
            .filter(|k| k.eq_ignore_ascii_case("rust"))
            .count();
        assert_eq!(rust_count, 1);
    }

    #[test]
    fn test_empty_job_text_yields_no_keywords() {
        assert!(extract_keywords("", &skills(&["Rust"])).is_empty());
    }

    #[test]
    fn test_stopwords_and_short_tokens_are_excluded() {
        let keywords = extract_keywords("the team will go go", &skills(&[]));
        assert!(!keywords.iter().any(|k| k == "the" || k == "team" || k == "go"));
    }

    #[test]
    fn test_frequency_ties_break_by_first_occurrence() {
        // "alpha" and "beta" both occur once; "alpha" appears first.
        let keywords = extract_keywords("alpha beta", &skills(&[]));
        assert_eq!(keywords, vec!["alpha", "beta"]);
    }

    #[test]
    fn test_relevance_score_counts_keyword_substrings() {
        let keywords = skills(&["Rust", "Kubernetes"]);
        assert_eq!(relevance_score("Built a Rust service on kubernetes", &keywords), 2);
        assert_eq!(relevance_score("Wrote Java", &keywords), 0);
    }

    #[test]
    fn test_order_skills_puts_keyword_matches_first() {
        let mut s = skills(&["Zig", "Rust", "Ada"]);
        order_skills_by_keywords(&mut s, &skills(&["rust"]));
        assert_eq!(s, vec!["Rust", "Ada", "Zig"]);
    }

    #[test]
    fn test_filter_skills_prefers_job_matches() {
        let s = skills(&["COBOL", "Rust", "Fortran"]);
        let filtered = filter_skills_for_job(&s, "Rust services at scale", 16, 10);
        assert_eq!(filtered.first().map(String::as_str), Some("Rust"));
        // Padding keeps the rest of the résumé skills in order.
        assert!(filtered.contains(&"COBOL".to_string()));
    }

    #[test]
    fn test_filter_skills_without_job_text_truncates() {
        let s = skills(&["a1", "b2", "c3", "d4"]);
        assert_eq!(filter_skills_for_job(&s, "", 2, 1), vec!["a1", "b2"]);
    }

    #[test]
    fn test_filter_skills_caps_at_max() {
        let many: Vec<String> = (0..30).map(|i| format!("skill{i}")).collect();
        let filtered = filter_skills_for_job(&many, "skill0 skill1 skill2", 16, 10);
        assert!(filtered.len() <= 16);
    }
}
