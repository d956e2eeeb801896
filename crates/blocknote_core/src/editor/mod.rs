//! Editing session over one block document.

pub mod outcome;
pub mod store;

pub use outcome::{EditOutcome, IgnoreReason};
pub use store::{DocumentObserver, EditorStore, MoveDirection};
