//! Apply-or-ignore result of editing operations.
//!
//! # Invariants
//! - Editing never fails with `Err`: rejected edits are `Ignored` with a
//!   reason, and the document is left exactly as it was.
//! - Not-found, floor, boundary and read-only conditions share this one type
//!   across every store operation and block behavior.

use crate::model::block::{BlockId, BlockKind};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Why an edit left the document unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Store is in view-only mode.
    ReadOnly,
    /// Target block is not in the document.
    BlockNotFound(BlockId),
    /// Target nested element (list item, row, column, card) is absent.
    ElementNotFound(Uuid),
    /// Positional target (e.g. a table column) is past the end.
    IndexOutOfRange(usize),
    /// A block with this ID already exists.
    DuplicateId(BlockId),
    /// Behavior does not apply to this block kind.
    KindMismatch(BlockKind),
    /// Move past the first/last position.
    Boundary,
    /// Deletion would break a structural minimum.
    FloorReached,
    /// Input does not trigger this behavior (e.g. Backspace on non-empty text).
    NotApplicable,
    /// Language is not one of the picker suggestions.
    UnsupportedLanguage(String),
    /// Payload patch is malformed or would produce an invalid block.
    InvalidPatch(String),
}

impl IgnoreReason {
    /// Stable code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::ReadOnly => "read_only",
            Self::BlockNotFound(_) => "block_not_found",
            Self::ElementNotFound(_) => "element_not_found",
            Self::IndexOutOfRange(_) => "index_out_of_range",
            Self::DuplicateId(_) => "duplicate_id",
            Self::KindMismatch(_) => "kind_mismatch",
            Self::Boundary => "boundary",
            Self::FloorReached => "floor_reached",
            Self::NotApplicable => "not_applicable",
            Self::UnsupportedLanguage(_) => "unsupported_language",
            Self::InvalidPatch(_) => "invalid_patch",
        }
    }
}

impl Display for IgnoreReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ReadOnly => write!(f, "editor is read-only"),
            Self::BlockNotFound(id) => write!(f, "block not found: {id}"),
            Self::ElementNotFound(id) => write!(f, "element not found: {id}"),
            Self::IndexOutOfRange(index) => write!(f, "index out of range: {index}"),
            Self::DuplicateId(id) => write!(f, "block id already present: {id}"),
            Self::KindMismatch(kind) => write!(f, "operation does not apply to `{kind}` blocks"),
            Self::Boundary => write!(f, "block is already at the document boundary"),
            Self::FloorReached => write!(f, "structural minimum reached"),
            Self::NotApplicable => write!(f, "input does not trigger this behavior"),
            Self::UnsupportedLanguage(value) => write!(f, "unsupported code language: `{value}`"),
            Self::InvalidPatch(details) => write!(f, "invalid payload patch: {details}"),
        }
    }
}

/// Result of one editing operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome<T = ()> {
    Applied(T),
    Ignored(IgnoreReason),
}

impl<T> EditOutcome<T> {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }

    /// Value produced by an applied edit.
    pub fn applied(self) -> Option<T> {
        match self {
            Self::Applied(value) => Some(value),
            Self::Ignored(_) => None,
        }
    }

    pub fn ignore_reason(&self) -> Option<&IgnoreReason> {
        match self {
            Self::Applied(_) => None,
            Self::Ignored(reason) => Some(reason),
        }
    }
}

impl<T> From<Result<T, IgnoreReason>> for EditOutcome<T> {
    fn from(value: Result<T, IgnoreReason>) -> Self {
        match value {
            Ok(applied) => Self::Applied(applied),
            Err(reason) => Self::Ignored(reason),
        }
    }
}
