//! Block-based document model.
//!
//! # Responsibility
//! - Define canonical block types used by editor, palette and serializers.
//! - Provide the pure factory that builds default blocks per kind.
//!
//! # Invariants
//! - Every block is identified by a stable `BlockId`.
//! - Deletion is structural (removal from the sequence), never a tombstone.

pub mod block;
pub mod factory;
