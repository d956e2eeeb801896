//! Document preview projection.
//!
//! Rules:
//! - Start from the plain-text export.
//! - Drop lines made only of rule characters (dividers, table rules).
//! - Collapse every whitespace run into one space.
//! - Keep the first 100 chars; blank results become `None`.

use crate::model::block::Block;
use crate::serialize::plain_text::to_plain_text;
use once_cell::sync::Lazy;
use regex::Regex;

const PREVIEW_MAX_CHARS: usize = 100;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));
static RULE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*[─\-+|]{3,}[ \t]*$").expect("valid rule regex"));

/// Derives the short list preview stored alongside a document.
pub fn derive_preview(blocks: &[Block]) -> Option<String> {
    let text = to_plain_text(blocks);
    let without_rules = RULE_RE.replace_all(&text, " ");
    let normalized = WHITESPACE_RE.replace_all(&without_rules, " ");
    let trimmed = normalized.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.chars().take(PREVIEW_MAX_CHARS).collect())
    }
}
