//! Document repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD APIs over the `documents` table.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - `content_json` is stored verbatim; decoding is the service's job.
//! - `updated_at` never moves backwards on update.
//! - Listing is always sorted by `updated_at DESC, uuid ASC`.

use crate::db::DbError;
use crate::model::block::now_epoch_ms;
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const DOCUMENTS_DEFAULT_LIMIT: u32 = 20;
const DOCUMENTS_LIMIT_MAX: u32 = 100;

const DOCUMENT_SELECT_SQL: &str = "SELECT
    uuid,
    title,
    content_json,
    preview_text,
    created_at,
    updated_at
FROM documents";

/// Stable document identifier.
pub type DocumentId = Uuid;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for document persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound(DocumentId),
    /// A row with this ID already exists.
    AlreadyExists(DocumentId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "document not found: {id}"),
            Self::AlreadyExists(id) => write!(f, "document already exists: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted document data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::AlreadyExists(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// One persisted document row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRecord {
    pub id: DocumentId,
    pub title: String,
    /// Block array in the JSON wire format.
    pub content_json: String,
    /// Derived plain-text summary (nullable).
    pub preview_text: Option<String>,
    /// Epoch milliseconds.
    pub created_at: i64,
    /// Epoch milliseconds.
    pub updated_at: i64,
}

impl DocumentRecord {
    /// Builds a new record with a fresh ID and current timestamps.
    pub fn new(
        title: impl Into<String>,
        content_json: impl Into<String>,
        preview_text: Option<String>,
    ) -> Self {
        let now = now_epoch_ms();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            content_json: content_json.into(),
            preview_text,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Pagination options for listing documents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentListQuery {
    /// Maximum rows to return. Defaults to 20 and clamps to 100.
    pub limit: Option<u32>,
    pub offset: u32,
}

/// Repository interface for document persistence.
pub trait DocumentRepository {
    fn create_document(&self, record: &DocumentRecord) -> RepoResult<DocumentId>;
    /// Replaces stored content and preview; bumps `updated_at`.
    fn update_document(
        &self,
        id: DocumentId,
        content_json: &str,
        preview_text: Option<&str>,
    ) -> RepoResult<()>;
    fn rename_document(&self, id: DocumentId, title: &str) -> RepoResult<()>;
    fn get_document(&self, id: DocumentId) -> RepoResult<Option<DocumentRecord>>;
    fn list_documents(&self, query: &DocumentListQuery) -> RepoResult<Vec<DocumentRecord>>;
    fn delete_document(&self, id: DocumentId) -> RepoResult<()>;
}

/// SQLite-backed document repository.
pub struct SqliteDocumentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteDocumentRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl DocumentRepository for SqliteDocumentRepository<'_> {
    fn create_document(&self, record: &DocumentRecord) -> RepoResult<DocumentId> {
        if self.get_document(record.id)?.is_some() {
            return Err(RepoError::AlreadyExists(record.id));
        }

        self.conn.execute(
            "INSERT INTO documents (
                uuid,
                title,
                content_json,
                preview_text,
                created_at,
                updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                record.id.to_string(),
                record.title.as_str(),
                record.content_json.as_str(),
                record.preview_text.as_deref(),
                record.created_at,
                record.updated_at,
            ],
        )?;

        Ok(record.id)
    }

    fn update_document(
        &self,
        id: DocumentId,
        content_json: &str,
        preview_text: Option<&str>,
    ) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE documents
             SET
                content_json = ?2,
                preview_text = ?3,
                updated_at = MAX(updated_at, ?4)
             WHERE uuid = ?1;",
            params![id.to_string(), content_json, preview_text, now_epoch_ms()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }

    fn rename_document(&self, id: DocumentId, title: &str) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE documents
             SET title = ?2, updated_at = MAX(updated_at, ?3)
             WHERE uuid = ?1;",
            params![id.to_string(), title, now_epoch_ms()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }

    fn get_document(&self, id: DocumentId) -> RepoResult<Option<DocumentRecord>> {
        let sql = format!("{DOCUMENT_SELECT_SQL} WHERE uuid = ?1;");
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query([id.to_string()])?;

        if let Some(row) = rows.next()? {
            return Ok(Some(parse_document_row(row)?));
        }
        Ok(None)
    }

    fn list_documents(&self, query: &DocumentListQuery) -> RepoResult<Vec<DocumentRecord>> {
        let sql = format!(
            "{DOCUMENT_SELECT_SQL} ORDER BY updated_at DESC, uuid ASC LIMIT ?1 OFFSET ?2;"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let limit = normalize_document_limit(query.limit);
        let mut rows = stmt.query(params![i64::from(limit), i64::from(query.offset)])?;

        let mut documents = Vec::new();
        while let Some(row) = rows.next()? {
            documents.push(parse_document_row(row)?);
        }
        Ok(documents)
    }

    fn delete_document(&self, id: DocumentId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM documents WHERE uuid = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }
}

/// Normalizes list limit: 0/None -> default, large values clamp to max.
pub fn normalize_document_limit(limit: Option<u32>) -> u32 {
    match limit {
        Some(0) | None => DOCUMENTS_DEFAULT_LIMIT,
        Some(value) => value.min(DOCUMENTS_LIMIT_MAX),
    }
}

fn parse_document_row(row: &Row<'_>) -> RepoResult<DocumentRecord> {
    let uuid_text: String = row.get("uuid")?;
    let id = Uuid::parse_str(&uuid_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{uuid_text}` in documents.uuid"))
    })?;

    Ok(DocumentRecord {
        id,
        title: row.get("title")?,
        content_json: row.get("content_json")?,
        preview_text: row.get("preview_text")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}
