//! Kind-specific editing behaviors.
//!
//! # Responsibility
//! - Translate key presses and picker choices into edits of one block.
//! - Keep nested structures (list items, table rows, kanban cards) consistent.
//!
//! # Invariants
//! - Every behavior goes through `EditorStore::edit_content` or the store's
//!   structural operations, so read-only and not-found handling is shared.
//! - Behaviors applied to the wrong kind are ignored with `KindMismatch`.
//!
//! Divider, image and link blocks have no behaviors beyond the store's
//! update/delete path.

pub mod callout;
pub mod code;
pub mod kanban;
pub mod list;
pub mod table;
pub mod text;
pub mod toggle;
