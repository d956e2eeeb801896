//! Keystroke semantics of text-like and todo blocks.
//!
//! - Enter (no shift) inserts a fresh block after the current one and selects
//!   it: a paragraph after text-like blocks, a todo after todos.
//! - Backspace on empty text deletes the block.
//! - `/` on empty text opens the command palette at the caret.

use crate::editor::outcome::{EditOutcome, IgnoreReason};
use crate::editor::store::EditorStore;
use crate::model::block::{BlockContent, BlockId, BlockKind};
use crate::model::factory::create_block;
use crate::palette::state::AnchorPosition;

/// Enter key on a text-like or todo block.
///
/// Returns the ID of the inserted block.
pub fn press_enter(store: &mut EditorStore, id: BlockId, shift: bool) -> EditOutcome<BlockId> {
    let kind = match line_block_kind(store, id) {
        Ok(kind) => kind,
        Err(reason) => return EditOutcome::Ignored(reason),
    };
    if shift {
        // Shift+Enter is a soft line break inside the text.
        return EditOutcome::Ignored(IgnoreReason::NotApplicable);
    }

    let next_kind = if kind == BlockKind::Todo {
        BlockKind::Todo
    } else {
        BlockKind::Paragraph
    };
    store.add_block(create_block(next_kind), Some(id))
}

/// Backspace key on a text-like or todo block; deletes it when empty.
pub fn press_backspace(store: &mut EditorStore, id: BlockId) -> EditOutcome {
    if let Err(reason) = line_block_kind(store, id) {
        return EditOutcome::Ignored(reason);
    }
    if !line_is_empty(store, id) {
        return EditOutcome::Ignored(IgnoreReason::NotApplicable);
    }
    store.delete_block(id)
}

/// `/` typed as the first character of a text-like or todo block.
pub fn type_slash(store: &mut EditorStore, id: BlockId, caret: AnchorPosition) -> EditOutcome {
    if let Err(reason) = line_block_kind(store, id) {
        return EditOutcome::Ignored(reason);
    }
    if !line_is_empty(store, id) {
        return EditOutcome::Ignored(IgnoreReason::NotApplicable);
    }
    store.open_slash_menu(caret)
}

/// Replaces the line text of a text-like or todo block.
pub fn set_text(store: &mut EditorStore, id: BlockId, text: impl Into<String>) -> EditOutcome {
    let text = text.into();
    store.edit_content("set_text", id, move |content| match content {
        BlockContent::Paragraph(line)
        | BlockContent::Heading1(line)
        | BlockContent::Heading2(line)
        | BlockContent::Heading3(line)
        | BlockContent::Quote(line) => {
            line.text = text;
            Ok(())
        }
        BlockContent::Todo(todo) => {
            todo.text = text;
            Ok(())
        }
        other => Err(IgnoreReason::KindMismatch(other.kind())),
    })
}

/// Flips the `checked` flag of a todo block.
pub fn toggle_todo(store: &mut EditorStore, id: BlockId) -> EditOutcome {
    store.edit_content("toggle_todo", id, |content| match content {
        BlockContent::Todo(todo) => {
            todo.checked = !todo.checked;
            Ok(())
        }
        other => Err(IgnoreReason::KindMismatch(other.kind())),
    })
}

fn line_block_kind(store: &EditorStore, id: BlockId) -> Result<BlockKind, IgnoreReason> {
    if store.is_read_only() {
        return Err(IgnoreReason::ReadOnly);
    }
    let block = store.block(id).ok_or(IgnoreReason::BlockNotFound(id))?;
    let kind = block.kind();
    if kind.is_text_like() || kind == BlockKind::Todo {
        Ok(kind)
    } else {
        Err(IgnoreReason::KindMismatch(kind))
    }
}

fn line_is_empty(store: &EditorStore, id: BlockId) -> bool {
    store
        .block(id)
        .and_then(|block| block.content.line_text())
        .is_some_and(str::is_empty)
}
