//! Callout blocks: icon and color come from closed sets, so changing either
//! is a plain payload edit.

use crate::editor::outcome::{EditOutcome, IgnoreReason};
use crate::editor::store::EditorStore;
use crate::model::block::{BlockColor, BlockContent, BlockId, CalloutContent, CalloutIcon};

pub fn set_icon(store: &mut EditorStore, block_id: BlockId, icon: CalloutIcon) -> EditOutcome {
    store.edit_content("callout_set_icon", block_id, |content| {
        callout_mut(content)?.icon = icon;
        Ok(())
    })
}

pub fn set_color(store: &mut EditorStore, block_id: BlockId, color: BlockColor) -> EditOutcome {
    store.edit_content("callout_set_color", block_id, |content| {
        callout_mut(content)?.color = color;
        Ok(())
    })
}

pub fn set_text(store: &mut EditorStore, block_id: BlockId, text: impl Into<String>) -> EditOutcome {
    let text = text.into();
    store.edit_content("callout_set_text", block_id, move |content| {
        callout_mut(content)?.text = text;
        Ok(())
    })
}

fn callout_mut(content: &mut BlockContent) -> Result<&mut CalloutContent, IgnoreReason> {
    match content {
        BlockContent::Callout(callout) => Ok(callout),
        other => Err(IgnoreReason::KindMismatch(other.kind())),
    }
}
