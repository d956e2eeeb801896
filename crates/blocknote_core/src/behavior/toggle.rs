//! Collapsible toggle blocks.
//!
//! Title and body are edited independently; `is_open` only gates whether
//! hosts render the body.

use crate::editor::outcome::{EditOutcome, IgnoreReason};
use crate::editor::store::EditorStore;
use crate::model::block::{BlockContent, BlockId, ToggleContent};

pub fn set_open(store: &mut EditorStore, block_id: BlockId, is_open: bool) -> EditOutcome {
    store.edit_content("toggle_set_open", block_id, |content| {
        toggle_mut(content)?.is_open = is_open;
        Ok(())
    })
}

/// Flips `is_open`; returns the new state.
pub fn toggle_open(store: &mut EditorStore, block_id: BlockId) -> EditOutcome<bool> {
    store.edit_content("toggle_flip", block_id, |content| {
        let toggle = toggle_mut(content)?;
        toggle.is_open = !toggle.is_open;
        Ok(toggle.is_open)
    })
}

pub fn set_title(store: &mut EditorStore, block_id: BlockId, title: impl Into<String>) -> EditOutcome {
    let title = title.into();
    store.edit_content("toggle_set_title", block_id, move |content| {
        toggle_mut(content)?.title = title;
        Ok(())
    })
}

pub fn set_body(store: &mut EditorStore, block_id: BlockId, body: impl Into<String>) -> EditOutcome {
    let body = body.into();
    store.edit_content("toggle_set_body", block_id, move |content| {
        toggle_mut(content)?.body = body;
        Ok(())
    })
}

fn toggle_mut(content: &mut BlockContent) -> Result<&mut ToggleContent, IgnoreReason> {
    match content {
        BlockContent::ToggleList(toggle) => Ok(toggle),
        other => Err(IgnoreReason::KindMismatch(other.kind())),
    }
}
