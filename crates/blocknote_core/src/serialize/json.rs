//! JSON persistence codec for documents.
//!
//! # Responsibility
//! - Encode a block sequence into the persisted JSON array format.
//! - Decode persisted JSON permissively: corrupt input becomes an empty
//!   document instead of an error.
//!
//! # Invariants
//! - Encode followed by decode is the identity for valid documents.
//! - Decode never panics and never returns `Err`.
//! - A decoded document has unique block IDs and only valid blocks.

use crate::model::block::Block;
use log::warn;
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Outcome classification for a permissive decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeStatus {
    /// Input was a well-formed, non-empty block array.
    Parsed,
    /// Input was a well-formed empty array (or blank string).
    Empty,
    /// Input could not be decoded; the document falls back to empty.
    Malformed(String),
}

/// Result of decoding a persisted document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedDocument {
    pub blocks: Vec<Block>,
    pub status: DecodeStatus,
}

impl DecodedDocument {
    fn malformed(reason: String) -> Self {
        warn!(
            "event=document_decode module=serialize status=malformed reason={}",
            reason
        );
        Self {
            blocks: Vec::new(),
            status: DecodeStatus::Malformed(reason),
        }
    }

    /// Returns whether decoding fell back because of corrupt input.
    pub fn is_malformed(&self) -> bool {
        matches!(self.status, DecodeStatus::Malformed(_))
    }
}

/// Encode failure. Only reachable when the serializer backend fails.
#[derive(Debug)]
pub struct EncodeError(serde_json::Error);

impl Display for EncodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "failed to encode document: {}", self.0)
    }
}

impl Error for EncodeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.0)
    }
}

impl From<serde_json::Error> for EncodeError {
    fn from(value: serde_json::Error) -> Self {
        Self(value)
    }
}

/// Encodes blocks as the persisted JSON array string.
pub fn encode_document(blocks: &[Block]) -> Result<String, EncodeError> {
    Ok(serde_json::to_string(blocks)?)
}

/// Encodes one block as a JSON object (same shape as an array element).
pub fn encode_block(block: &Block) -> Result<String, EncodeError> {
    Ok(serde_json::to_string(block)?)
}

/// Decodes a persisted JSON array string.
///
/// Non-JSON input, non-array JSON, elements that are not valid blocks, and
/// duplicate block IDs all yield an empty document flagged `Malformed`.
pub fn decode_document(raw: &str) -> DecodedDocument {
    if raw.trim().is_empty() {
        return DecodedDocument {
            blocks: Vec::new(),
            status: DecodeStatus::Empty,
        };
    }

    let value = match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(value) => value,
        Err(err) => return DecodedDocument::malformed(format!("invalid json: {err}")),
    };

    let serde_json::Value::Array(elements) = value else {
        return DecodedDocument::malformed("top-level value is not an array".to_string());
    };

    let mut blocks = Vec::with_capacity(elements.len());
    let mut seen = HashSet::with_capacity(elements.len());
    for (index, element) in elements.into_iter().enumerate() {
        let block = match serde_json::from_value::<Block>(element) {
            Ok(block) => block,
            Err(err) => {
                return DecodedDocument::malformed(format!("element {index} is not a block: {err}"))
            }
        };
        if let Err(err) = block.validate() {
            return DecodedDocument::malformed(format!("element {index} is invalid: {err}"));
        }
        if !seen.insert(block.id) {
            return DecodedDocument::malformed(format!("duplicate block id {}", block.id));
        }
        blocks.push(block);
    }

    let status = if blocks.is_empty() {
        DecodeStatus::Empty
    } else {
        DecodeStatus::Parsed
    };
    DecodedDocument { blocks, status }
}
