//! Document serializers.
//!
//! # Responsibility
//! - Export block sequences to Markdown and plain text.
//! - Encode/decode the persisted JSON array format.
//!
//! # Invariants
//! - Every function here is pure and takes the document by shared reference.
//! - Export is one-directional; there is no Markdown parser.

pub mod json;
pub mod markdown;
pub mod plain_text;
pub mod preview;

pub use json::{
    decode_document, encode_block, encode_document, DecodeStatus, DecodedDocument, EncodeError,
};
pub use markdown::to_markdown;
pub use plain_text::to_plain_text;
pub use preview::derive_preview;
