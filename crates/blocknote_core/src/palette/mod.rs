//! Command palette (slash menu).
//!
//! # Responsibility
//! - Filter the static command catalog by the typed query.
//! - Drive the Closed/Open state machine from keyboard and pointer input.
//! - Turn a chosen command into a new block inserted after the selection.
//!
//! # Invariants
//! - The palette owns no block data; it only calls the factory and
//!   `EditorStore::add_block`.
//! - The cursor is clamped to the visible list, never wrapped.
//! - Escape and outside clicks close without side effects.

pub mod catalog;
pub mod state;

pub use catalog::{filter_commands, PaletteCommand, COMMANDS};
pub use state::{AnchorPosition, OpenPalette, PaletteRegion, PaletteState};

use crate::editor::store::EditorStore;
use crate::model::block::BlockId;
use crate::model::factory::create_block;
use log::debug;

/// Keys the palette reacts to while open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteKey {
    Up,
    Down,
    Enter,
    Escape,
}

/// What a palette input did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteResponse {
    /// Palette is closed; input was not consumed.
    Inactive,
    /// Input was consumed without visible change.
    Unchanged,
    CursorMoved(usize),
    /// A block was created and inserted; palette closed.
    Inserted(BlockId),
    Closed,
}

/// Handles one key press while the palette may be open.
pub fn handle_palette_key(store: &mut EditorStore, key: PaletteKey) -> PaletteResponse {
    let PaletteState::Open(open) = store.palette_mut() else {
        return PaletteResponse::Inactive;
    };

    match key {
        PaletteKey::Down | PaletteKey::Up => {
            let visible = open.visible_commands().len();
            let next = match key {
                PaletteKey::Down => (open.cursor + 1).min(visible.saturating_sub(1)),
                _ => open.cursor.saturating_sub(1),
            };
            if next == open.cursor {
                return PaletteResponse::Unchanged;
            }
            open.cursor = next;
            PaletteResponse::CursorMoved(next)
        }
        PaletteKey::Enter => {
            let cursor = open.cursor;
            choose_command(store, cursor)
        }
        PaletteKey::Escape => {
            store.close_slash_menu();
            PaletteResponse::Closed
        }
    }
}

/// Invokes the visible command at `index` (keyboard Enter or mouse pick).
///
/// Creates a block of the command's kind, inserts it after the selected
/// block and closes the palette. An out-of-range index just closes.
pub fn choose_command(store: &mut EditorStore, index: usize) -> PaletteResponse {
    let Some(open) = store.palette().as_open() else {
        return PaletteResponse::Inactive;
    };
    let command = open.visible_commands().get(index).copied();
    store.close_slash_menu();

    let Some(command) = command else {
        debug!("event=palette_choose module=palette status=ignored reason=empty_selection");
        return PaletteResponse::Closed;
    };

    let anchor = store.selected();
    match store.add_block(create_block(command.kind), anchor).applied() {
        Some(id) => {
            debug!(
                "event=palette_choose module=palette status=ok kind={}",
                command.kind
            );
            PaletteResponse::Inserted(id)
        }
        None => PaletteResponse::Closed,
    }
}

/// Handles a pointer press; presses outside `region` close the palette.
pub fn click_at(
    store: &mut EditorStore,
    point: AnchorPosition,
    region: PaletteRegion,
) -> PaletteResponse {
    if !store.palette().is_open() {
        return PaletteResponse::Inactive;
    }
    if region.contains(point) {
        return PaletteResponse::Unchanged;
    }
    store.close_slash_menu();
    PaletteResponse::Closed
}
