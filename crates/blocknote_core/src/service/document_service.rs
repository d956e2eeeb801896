//! Document use-case service.
//!
//! # Responsibility
//! - Bridge saved documents and live editor sessions: open, save, export.
//! - Derive the plain-text preview stored next to each document.
//!
//! # Invariants
//! - Stored content is always produced by `encode_document`.
//! - Opening never fails on corrupt content: the session starts empty and
//!   the decode status tells the caller what happened.
//! - Document listing is sorted by `updated_at DESC, uuid ASC`.

use crate::config::EditorConfig;
use crate::editor::store::EditorStore;
use crate::model::block::Block;
use crate::repo::document_repo::{
    normalize_document_limit, DocumentId, DocumentListQuery, DocumentRecord, DocumentRepository,
    RepoError,
};
use crate::serialize::{
    decode_document, derive_preview, encode_document, to_markdown, to_plain_text, DecodeStatus,
    EncodeError,
};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Title used when the caller supplies a blank one.
pub const UNTITLED_DOCUMENT: &str = "Untitled";

/// Service error for document use-cases.
#[derive(Debug)]
pub enum DocumentServiceError {
    /// Target document does not exist.
    DocumentNotFound(DocumentId),
    /// Blocks could not be encoded for storage.
    Encode(EncodeError),
    /// Persistence-layer failure.
    Repo(RepoError),
    /// Internal consistency mismatch between write and read-back.
    InconsistentState(&'static str),
}

impl Display for DocumentServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DocumentNotFound(id) => write!(f, "document not found: {id}"),
            Self::Encode(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => {
                write!(f, "inconsistent document state: {details}")
            }
        }
    }
}

impl Error for DocumentServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Encode(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for DocumentServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::DocumentNotFound(id),
            other => Self::Repo(other),
        }
    }
}

impl From<EncodeError> for DocumentServiceError {
    fn from(value: EncodeError) -> Self {
        Self::Encode(value)
    }
}

/// Editor session hydrated from a stored document.
pub struct OpenedDocument {
    pub id: DocumentId,
    pub title: String,
    pub store: EditorStore,
    /// How the stored content decoded; `Malformed` means the session is empty.
    pub status: DecodeStatus,
}

/// List result envelope used by service callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentsListResult {
    /// Sorted by `updated_at DESC, uuid ASC`.
    pub items: Vec<DocumentRecord>,
    /// Effective normalized limit used by the query.
    pub applied_limit: u32,
}

/// Document service facade over repository implementations.
pub struct DocumentService<R: DocumentRepository> {
    repo: R,
}

impl<R: DocumentRepository> DocumentService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Stores a new document built from `blocks`.
    pub fn create_document(
        &self,
        title: &str,
        blocks: &[Block],
    ) -> Result<DocumentRecord, DocumentServiceError> {
        let content_json = encode_document(blocks)?;
        let record = DocumentRecord::new(normalize_title(title), content_json, derive_preview(blocks));

        let id = self.repo.create_document(&record)?;
        info!(
            "event=document_create module=service status=ok document_id={} blocks={}",
            id,
            blocks.len()
        );
        self.read_back(id, "created document not found in read-back")
    }

    /// Opens an editing session over a stored document.
    ///
    /// # Errors
    /// - `DocumentNotFound` when no document has `id`.
    pub fn open_editor(
        &self,
        id: DocumentId,
        config: &EditorConfig,
    ) -> Result<OpenedDocument, DocumentServiceError> {
        let record = self.load(id)?;
        let decoded = decode_document(&record.content_json);
        info!(
            "event=document_open module=service status=ok document_id={} blocks={} malformed={}",
            id,
            decoded.blocks.len(),
            decoded.is_malformed()
        );

        Ok(OpenedDocument {
            id,
            title: record.title,
            store: EditorStore::with_blocks(config, decoded.blocks),
            status: decoded.status,
        })
    }

    /// Persists the current block sequence of `store` under `id`.
    pub fn save_editor(
        &self,
        id: DocumentId,
        store: &EditorStore,
    ) -> Result<DocumentRecord, DocumentServiceError> {
        let content_json = store.encode()?;
        let preview = derive_preview(store.blocks());
        self.repo
            .update_document(id, &content_json, preview.as_deref())?;
        info!(
            "event=document_save module=service status=ok document_id={} blocks={} revision={}",
            id,
            store.len(),
            store.revision()
        );
        self.read_back(id, "saved document not found in read-back")
    }

    pub fn rename_document(
        &self,
        id: DocumentId,
        title: &str,
    ) -> Result<DocumentRecord, DocumentServiceError> {
        self.repo.rename_document(id, &normalize_title(title))?;
        self.read_back(id, "renamed document not found in read-back")
    }

    pub fn get_document(&self, id: DocumentId) -> Result<Option<DocumentRecord>, DocumentServiceError> {
        Ok(self.repo.get_document(id)?)
    }

    pub fn list_documents(
        &self,
        limit: Option<u32>,
        offset: u32,
    ) -> Result<DocumentsListResult, DocumentServiceError> {
        let applied_limit = normalize_document_limit(limit);
        let items = self.repo.list_documents(&DocumentListQuery {
            limit: Some(applied_limit),
            offset,
        })?;
        Ok(DocumentsListResult {
            items,
            applied_limit,
        })
    }

    pub fn delete_document(&self, id: DocumentId) -> Result<(), DocumentServiceError> {
        self.repo.delete_document(id)?;
        info!("event=document_delete module=service status=ok document_id={id}");
        Ok(())
    }

    /// Renders a stored document as Markdown.
    pub fn export_markdown(&self, id: DocumentId) -> Result<String, DocumentServiceError> {
        let record = self.load(id)?;
        Ok(to_markdown(&decode_document(&record.content_json).blocks))
    }

    /// Renders a stored document as plain text.
    pub fn export_plain_text(&self, id: DocumentId) -> Result<String, DocumentServiceError> {
        let record = self.load(id)?;
        Ok(to_plain_text(&decode_document(&record.content_json).blocks))
    }

    fn load(&self, id: DocumentId) -> Result<DocumentRecord, DocumentServiceError> {
        self.repo
            .get_document(id)?
            .ok_or(DocumentServiceError::DocumentNotFound(id))
    }

    fn read_back(
        &self,
        id: DocumentId,
        details: &'static str,
    ) -> Result<DocumentRecord, DocumentServiceError> {
        self.repo
            .get_document(id)?
            .ok_or(DocumentServiceError::InconsistentState(details))
    }
}

fn normalize_title(title: &str) -> String {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        UNTITLED_DOCUMENT.to_string()
    } else {
        trimmed.to_string()
    }
}
