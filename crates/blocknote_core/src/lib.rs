//! Block document editor engine.
//!
//! A document is an ordered sequence of typed blocks. This crate owns the
//! block model, the editing store and its behaviors, the command palette,
//! the Markdown/plain-text/JSON serializers and local document storage.

pub mod behavior;
pub mod config;
pub mod db;
pub mod editor;
pub mod logging;
pub mod model;
pub mod palette;
pub mod repo;
pub mod serialize;
pub mod service;

pub use config::{ConfigError, EditorConfig};
pub use editor::{DocumentObserver, EditOutcome, EditorStore, IgnoreReason, MoveDirection};
pub use logging::{
    default_log_level, init_logging, init_logging_from_config, logging_status, LogSettings,
    LoggingError,
};
pub use model::block::{
    Block, BlockColor, BlockContent, BlockId, BlockKind, BlockValidationError, CalloutIcon,
    UnknownBlockKind,
};
pub use model::factory::{create_block, create_block_from_tag};
pub use palette::{PaletteCommand, PaletteKey, PaletteResponse, PaletteState};
pub use repo::document_repo::{
    DocumentId, DocumentRecord, DocumentRepository, RepoError, RepoResult,
    SqliteDocumentRepository,
};
pub use serialize::{
    decode_document, encode_block, encode_document, to_markdown, to_plain_text, DecodeStatus,
    DecodedDocument, EncodeError,
};
pub use service::document_service::{DocumentService, DocumentServiceError, OpenedDocument};

/// Minimal health-check API for host integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
