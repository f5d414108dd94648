use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::catalog::{is_card_class, is_reserved, RawRecord, CARD_CLASS};

// Cards whose attributes appear in the canonical order: category, name, description.
static CARD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r#"<div[^>]*class="(?:[^"]*\s)?{CARD_CLASS}(?:\s[^"]*)?"[^>]*data-category="([^"]*)"[^>]*data-name="([^"]*)"[^>]*data-description="([^"]*)"[^>]*>"#,
    ))
    .unwrap()
});
static CLASS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"(?:^|\s)class="([^"]*)""#).unwrap());
static CATEGORY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"data-category="([^"]*)""#).unwrap());
static NAME_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"data-name="([^"]*)""#).unwrap());
static DESCRIPTION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"data-description="([^"]*)""#).unwrap());
static TOPICS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"data-topics="([^"]*)""#).unwrap());

/// Structured pass first; falls back to a line scan only when it finds nothing.
pub fn extract_cards(markup: &str) -> Vec<RawRecord> {
    let cards = scan_tags(markup);
    if !cards.is_empty() {
        debug!(count = cards.len(), "card pattern matched");
        return cards;
    }
    let cards = scan_lines(markup);
    debug!(count = cards.len(), "line scan fallback");
    cards
}

/// Match full card start tags (which may span lines).
pub fn scan_tags(markup: &str) -> Vec<RawRecord> {
    CARD_RE
        .captures_iter(markup)
        .filter_map(|caps| {
            let tag = caps.get(0)?.as_str();
            let topics = capture(&TOPICS_RE, tag).unwrap_or_default();
            build_record(&caps[2], &caps[1], &caps[3], topics)
        })
        .collect()
}

/// Line-oriented scan tolerating any attribute order. Each card must keep
/// its attributes on one line; name and category are required.
pub fn scan_lines(markup: &str) -> Vec<RawRecord> {
    markup
        .lines()
        .map(str::trim)
        .filter(|line| capture(&CLASS_RE, line).is_some_and(is_card_class) && line.contains("data-category="))
        .filter_map(|line| {
            let category = capture(&CATEGORY_RE, line)?;
            let name = capture(&NAME_RE, line)?;
            let description = capture(&DESCRIPTION_RE, line).unwrap_or_default();
            let topics = capture(&TOPICS_RE, line).unwrap_or_default();
            build_record(name, category, description, topics)
        })
        .collect()
}

fn capture<'a>(re: &Regex, haystack: &'a str) -> Option<&'a str> {
    re.captures(haystack)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

fn build_record(name: &str, category: &str, description: &str, topics: &str) -> Option<RawRecord> {
    if name.is_empty() || is_reserved(name) {
        return None;
    }
    Some(RawRecord {
        name: name.to_string(),
        original_category: category.to_string(),
        description: description.trim().to_lowercase(),
        topics: topics.trim().to_lowercase(),
    })
}
