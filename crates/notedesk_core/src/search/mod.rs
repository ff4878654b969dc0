//! Keyword search over items.
//!
//! # Responsibility
//! - Provide case-insensitive title/content search with typed hits.
//! - Shape snippets from markdown-sanitized text, marking the match.
//!
//! # Invariants
//! - Blank queries and a zero limit return no hits.
//! - Result ordering is deterministic: title hits before content-only
//!   hits, then `updated_at` descending, then `id` ascending.

use crate::model::item::{Item, ItemId, ItemType};
use once_cell::sync::Lazy;
use regex::Regex;

static MARKDOWN_IMAGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[[^\]]*\]\([^)]*\)").expect("valid image regex"));
static MARKDOWN_LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]\([^)]*\)").expect("valid link regex"));
static MARKDOWN_SYMBOL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[*_`#>~]+").expect("valid markdown symbol regex"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Characters of context kept on each side of a snippet match.
const SNIPPET_CONTEXT_CHARS: usize = 30;

/// Search options.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    /// User query text, matched as a literal (case-insensitive).
    pub text: String,
    /// Optional kind filter.
    pub kind: Option<ItemType>,
    /// Optional tag-id filter.
    pub tag: Option<i64>,
    /// Maximum number of hits to return.
    pub limit: u32,
}

impl SearchQuery {
    /// Query with default pagination and no filters.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: None,
            tag: None,
            limit: 20,
        }
    }
}

/// Single hit returned by [`search_items`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub item_id: ItemId,
    pub kind: ItemType,
    pub title: String,
    /// Sanitized excerpt with the match wrapped in `[`..`]`.
    pub snippet: String,
}

/// Searches items and returns ranked hits.
///
/// The match is looked up in the title first, then in the
/// markdown-stripped content, so the snippet always comes from readable
/// text.
pub fn search_items(items: &[Item], query: &SearchQuery) -> Vec<SearchHit> {
    let needle = query.text.trim();
    if needle.is_empty() || query.limit == 0 {
        return Vec::new();
    }

    let pattern = Regex::new(&format!("(?i){}", regex::escape(needle)))
        .expect("escaped literal is a valid pattern");

    let mut ranked: Vec<(bool, &Item, String)> = Vec::new();
    for item in items {
        if let Some(kind) = query.kind {
            if item.kind != kind {
                continue;
            }
        }
        if let Some(tag_id) = query.tag {
            if !item.tags.iter().any(|tag| tag.id == tag_id) {
                continue;
            }
        }

        if let Some(found) = pattern.find(&item.title) {
            let snippet = mark_match(&item.title, found.start(), found.end());
            ranked.push((true, item, snippet));
            continue;
        }

        let plain = strip_markdown(&item.content);
        if let Some(found) = pattern.find(&plain) {
            let snippet = mark_match(&plain, found.start(), found.end());
            ranked.push((false, item, snippet));
        }
    }

    ranked.sort_by(|(a_title, a, _), (b_title, b, _)| {
        b_title
            .cmp(a_title)
            .then_with(|| b.updated_at.cmp(&a.updated_at))
            .then_with(|| a.id.cmp(&b.id))
    });

    ranked
        .into_iter()
        .take(query.limit as usize)
        .map(|(_, item, snippet)| SearchHit {
            item_id: item.id,
            kind: item.kind,
            title: item.title.clone(),
            snippet,
        })
        .collect()
}

/// Reduces markdown to plain text for snippet shaping.
///
/// Images are dropped, links keep their label, emphasis/heading/quote
/// markers are stripped and whitespace is collapsed.
pub fn strip_markdown(content: &str) -> String {
    let text = MARKDOWN_IMAGE_RE.replace_all(content, "");
    let text = MARKDOWN_LINK_RE.replace_all(&text, "$1");
    let text = MARKDOWN_SYMBOL_RE.replace_all(&text, "");
    WHITESPACE_RE.replace_all(&text, " ").trim().to_string()
}

/// Cuts a window around the matched byte range and wraps the match in
/// `[`..`]`, with ellipses where the window truncates the text.
fn mark_match(text: &str, start: usize, end: usize) -> String {
    let head = &text[..start];
    let window_start = head
        .char_indices()
        .rev()
        .take(SNIPPET_CONTEXT_CHARS)
        .last()
        .map_or(start, |(index, _)| index);

    let tail = &text[end..];
    let window_end = tail
        .char_indices()
        .nth(SNIPPET_CONTEXT_CHARS)
        .map_or(text.len(), |(index, _)| end + index);

    let mut snippet = String::new();
    if window_start > 0 {
        snippet.push_str("... ");
    }
    snippet.push_str(&text[window_start..start]);
    snippet.push('[');
    snippet.push_str(&text[start..end]);
    snippet.push(']');
    snippet.push_str(&text[end..window_end]);
    if window_end < text.len() {
        snippet.push_str(" ...");
    }
    snippet
}
