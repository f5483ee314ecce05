use regex::Regex;
use std::sync::LazyLock;

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace regex should be valid"));

static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_\-]+").expect("non-word regex should be valid"));

static HYPHEN_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-{2,}").expect("hyphen regex should be valid"));

/// Normalize free text into a lowercase, hyphen-separated token safe for branch names.
pub fn slugify(text: &str) -> String {
    let lower = text.to_lowercase();
    let hyphenated = WHITESPACE.replace_all(&lower, "-");
    let stripped = NON_WORD.replace_all(&hyphenated, "");
    let collapsed = HYPHEN_RUNS.replace_all(&stripped, "-");
    collapsed.trim_matches('-').to_string()
}
