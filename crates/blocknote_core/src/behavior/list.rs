//! Item-level editing of bullet and numbered lists.
//!
//! Items live inside one list block, not as separate document blocks.
//!
//! # Invariants
//! - A list block always has at least one item; removing the last item
//!   deletes the whole block instead.
//! - Only top-level items are edited; nested `children` are carried as-is.

use crate::editor::outcome::{EditOutcome, IgnoreReason};
use crate::editor::store::EditorStore;
use crate::model::block::{BlockContent, BlockId, ListContent, ListItem, ListItemId};

/// What Backspace on an empty item did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemRemoval {
    /// Item removed; focus moved to this item.
    Removed { focused: ListItemId },
    /// The item was the only one, so the list block was deleted.
    BlockDeleted,
}

/// Enter on an item: inserts an empty item right after it and focuses it.
pub fn press_enter_on_item(
    store: &mut EditorStore,
    block_id: BlockId,
    item_id: ListItemId,
) -> EditOutcome<ListItemId> {
    let outcome = store.edit_content("list_insert_item", block_id, |content| {
        let list = list_mut(content)?;
        let index = item_index(list, item_id)?;
        let item = ListItem::new("");
        let new_id = item.id;
        list.items.insert(index + 1, item);
        Ok(new_id)
    });

    if let EditOutcome::Applied(new_id) = &outcome {
        store.focus_item(Some(*new_id));
    }
    outcome
}

/// Backspace on an item: removes it when its text is empty.
///
/// Focus moves to the previous item (or the next one when the first item
/// was removed). Removing the only item deletes the list block.
pub fn press_backspace_on_item(
    store: &mut EditorStore,
    block_id: BlockId,
    item_id: ListItemId,
) -> EditOutcome<ItemRemoval> {
    let only_item = match store.block(block_id).map(|block| &block.content) {
        Some(BlockContent::BulletList(list)) | Some(BlockContent::NumberedList(list)) => {
            match list.items.iter().find(|item| item.id == item_id) {
                Some(item) if !item.text.is_empty() => {
                    return EditOutcome::Ignored(IgnoreReason::NotApplicable)
                }
                Some(_) => list.items.len() == 1,
                None => return EditOutcome::Ignored(IgnoreReason::ElementNotFound(item_id)),
            }
        }
        Some(other) => return EditOutcome::Ignored(IgnoreReason::KindMismatch(other.kind())),
        None => return EditOutcome::Ignored(IgnoreReason::BlockNotFound(block_id)),
    };

    if only_item {
        return match store.delete_block(block_id) {
            EditOutcome::Applied(()) => EditOutcome::Applied(ItemRemoval::BlockDeleted),
            EditOutcome::Ignored(reason) => EditOutcome::Ignored(reason),
        };
    }

    let outcome = store.edit_content("list_remove_item", block_id, |content| {
        let list = list_mut(content)?;
        let index = item_index(list, item_id)?;
        list.items.remove(index);
        let focused = list.items[index.saturating_sub(1)].id;
        Ok(ItemRemoval::Removed { focused })
    });

    if let EditOutcome::Applied(ItemRemoval::Removed { focused }) = &outcome {
        store.focus_item(Some(*focused));
    }
    outcome
}

/// Replaces the text of one item.
pub fn set_item_text(
    store: &mut EditorStore,
    block_id: BlockId,
    item_id: ListItemId,
    text: impl Into<String>,
) -> EditOutcome {
    let text = text.into();
    store.edit_content("list_set_item_text", block_id, move |content| {
        let list = list_mut(content)?;
        let index = item_index(list, item_id)?;
        list.items[index].text = text;
        Ok(())
    })
}

fn list_mut(content: &mut BlockContent) -> Result<&mut ListContent, IgnoreReason> {
    match content {
        BlockContent::BulletList(list) | BlockContent::NumberedList(list) => Ok(list),
        other => Err(IgnoreReason::KindMismatch(other.kind())),
    }
}

fn item_index(list: &ListContent, item_id: ListItemId) -> Result<usize, IgnoreReason> {
    list.items
        .iter()
        .position(|item| item.id == item_id)
        .ok_or(IgnoreReason::ElementNotFound(item_id))
}
