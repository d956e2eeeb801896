//! Code blocks and the language picker.
//!
//! # Invariants
//! - The picker only sets tags from `CODE_LANGUAGE_SUGGESTIONS`; any other
//!   tag must go through `EditorStore::update_block`.

use crate::editor::outcome::{EditOutcome, IgnoreReason};
use crate::editor::store::EditorStore;
use crate::model::block::{BlockContent, BlockId, CodeContent};

/// Language tags offered by the picker, in display order.
pub const CODE_LANGUAGE_SUGGESTIONS: [&str; 16] = [
    "plaintext",
    "javascript",
    "typescript",
    "python",
    "rust",
    "go",
    "java",
    "c",
    "cpp",
    "csharp",
    "html",
    "css",
    "json",
    "sql",
    "bash",
    "markdown",
];

/// Returns whether `language` is offered by the picker (case-insensitive).
pub fn is_suggested_language(language: &str) -> bool {
    CODE_LANGUAGE_SUGGESTIONS
        .iter()
        .any(|suggestion| suggestion.eq_ignore_ascii_case(language.trim()))
}

/// Sets the language from a picker suggestion.
pub fn select_language(store: &mut EditorStore, block_id: BlockId, language: &str) -> EditOutcome {
    let normalized = language.trim().to_ascii_lowercase();
    store.edit_content("code_select_language", block_id, move |content| {
        let code = code_mut(content)?;
        if !is_suggested_language(&normalized) {
            return Err(IgnoreReason::UnsupportedLanguage(normalized));
        }
        code.language = normalized;
        Ok(())
    })
}

pub fn set_code(store: &mut EditorStore, block_id: BlockId, code: impl Into<String>) -> EditOutcome {
    let code = code.into();
    store.edit_content("code_set_code", block_id, move |content| {
        code_mut(content)?.code = code;
        Ok(())
    })
}

fn code_mut(content: &mut BlockContent) -> Result<&mut CodeContent, IgnoreReason> {
    match content {
        BlockContent::Code(code) => Ok(code),
        other => Err(IgnoreReason::KindMismatch(other.kind())),
    }
}
