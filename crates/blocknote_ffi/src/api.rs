//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level functions to Dart via FRB.
//! - Exchange documents as the JSON block array so Dart owns no block logic.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Malformed document JSON is reported, never written to storage.

use blocknote_core::db::open_db;
use blocknote_core::palette::filter_commands;
use blocknote_core::{
    core_version as core_version_inner, create_block_from_tag, decode_document, encode_block,
    init_logging as init_logging_inner, ping as ping_inner, to_markdown, to_plain_text,
    DecodeStatus, DocumentId, DocumentRecord, DocumentRepository, DocumentService, EditorConfig,
    EditorStore, LogSettings, SqliteDocumentRepository,
};
use log::warn;
use std::path::PathBuf;
use std::sync::OnceLock;

const DOCUMENT_DB_FILE_NAME: &str = "blocknote_documents.sqlite3";
static DOCUMENT_DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match LogSettings::new(&level, &log_dir).and_then(|settings| init_logging_inner(&settings)) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// One slash-menu entry for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteItem {
    /// Wire kind tag, e.g. `heading1`.
    pub kind: String,
    pub label: String,
    pub description: String,
    pub shortcut: Option<String>,
}

/// Generic response envelope for block/document actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockActionResponse {
    pub ok: bool,
    /// JSON payload: one block, or a document array, depending on the call.
    pub json: Option<String>,
    /// Stable document ID when the call touched storage.
    pub document_id: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl BlockActionResponse {
    fn success(message: impl Into<String>, json: Option<String>, document_id: Option<String>) -> Self {
        Self {
            ok: true,
            json,
            document_id,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            json: None,
            document_id: None,
            message: message.into(),
        }
    }
}

/// Stored document summary for list screens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSummary {
    pub document_id: String,
    pub title: String,
    pub preview_text: Option<String>,
    pub updated_at: i64,
}

/// Lists slash-menu commands matching `filter`.
#[flutter_rust_bridge::frb(sync)]
pub fn palette_search(filter: String) -> Vec<PaletteItem> {
    filter_commands(&filter)
        .into_iter()
        .map(|command| PaletteItem {
            kind: command.kind.as_str().to_string(),
            label: command.label.to_string(),
            description: command.description.to_string(),
            shortcut: command.shortcut.map(str::to_string),
        })
        .collect()
}

/// Builds a default block of the given wire kind tag as JSON.
///
/// # FFI contract
/// - Unknown tags fail with a message; no fallback kind is substituted.
#[flutter_rust_bridge::frb(sync)]
pub fn create_block_json(kind: String) -> BlockActionResponse {
    let block = match create_block_from_tag(kind.trim()) {
        Ok(block) => block,
        Err(err) => return BlockActionResponse::failure(format!("create_block failed: {err}")),
    };
    match encode_block(&block) {
        Ok(json) => BlockActionResponse::success("Block created.", Some(json), None),
        Err(err) => BlockActionResponse::failure(format!("create_block failed: {err}")),
    }
}

/// Renders a document JSON array as Markdown; corrupt input renders empty.
#[flutter_rust_bridge::frb(sync)]
pub fn document_to_markdown(content_json: String) -> String {
    to_markdown(&decode_document(&content_json).blocks)
}

/// Renders a document JSON array as plain text; corrupt input renders empty.
#[flutter_rust_bridge::frb(sync)]
pub fn document_to_plain_text(content_json: String) -> String {
    to_plain_text(&decode_document(&content_json).blocks)
}

/// Stores a new document.
#[flutter_rust_bridge::frb(sync)]
pub fn document_create(title: String, content_json: String) -> BlockActionResponse {
    let decoded = decode_document(&content_json);
    if decoded.is_malformed() {
        return BlockActionResponse::failure("document_create failed: malformed document JSON");
    }
    match with_document_service(|service| service.create_document(&title, &decoded.blocks)) {
        Ok(record) => BlockActionResponse::success(
            "Document created.",
            Some(record.content_json),
            Some(record.id.to_string()),
        ),
        Err(err) => BlockActionResponse::failure(format!("document_create failed: {err}")),
    }
}

/// Replaces the stored blocks of one document.
#[flutter_rust_bridge::frb(sync)]
pub fn document_save(document_id: String, content_json: String) -> BlockActionResponse {
    let id = match parse_document_id(&document_id) {
        Ok(id) => id,
        Err(message) => return BlockActionResponse::failure(message),
    };
    let decoded = decode_document(&content_json);
    if decoded.is_malformed() {
        warn!("event=ffi_document_save module=ffi status=rejected reason=malformed_json document_id={id}");
        return BlockActionResponse::failure("document_save failed: malformed document JSON");
    }

    let store = EditorStore::with_blocks(&EditorConfig::default(), decoded.blocks);
    match with_document_service(|service| service.save_editor(id, &store)) {
        Ok(record) => BlockActionResponse::success(
            "Document saved.",
            Some(record.content_json),
            Some(record.id.to_string()),
        ),
        Err(err) => BlockActionResponse::failure(format!("document_save failed: {err}")),
    }
}

/// Loads the stored block array of one document.
///
/// # FFI contract
/// - Stored content that no longer decodes fails with a message; it is never
///   returned as an empty document the host could save back over the original.
#[flutter_rust_bridge::frb(sync)]
pub fn document_load(document_id: String) -> BlockActionResponse {
    let id = match parse_document_id(&document_id) {
        Ok(id) => id,
        Err(message) => return BlockActionResponse::failure(message),
    };
    with_document_service(|service| Ok(load_document(service, id)))
        .unwrap_or_else(|err| BlockActionResponse::failure(format!("document_load failed: {err}")))
}

/// Lists stored documents, most recently edited first.
#[flutter_rust_bridge::frb(sync)]
pub fn document_list(limit: Option<u32>) -> Vec<DocumentSummary> {
    match with_document_service(|service| service.list_documents(limit, 0)) {
        Ok(result) => result.items.into_iter().map(to_document_summary).collect(),
        Err(err) => {
            warn!("event=ffi_document_list module=ffi status=error error={err}");
            Vec::new()
        }
    }
}

fn parse_document_id(raw: &str) -> Result<DocumentId, String> {
    DocumentId::parse_str(raw.trim()).map_err(|_| format!("invalid document id `{raw}`"))
}

fn load_document<R: DocumentRepository>(
    service: &DocumentService<R>,
    id: DocumentId,
) -> BlockActionResponse {
    let opened = match service.open_editor(id, &EditorConfig::default()) {
        Ok(opened) => opened,
        Err(err) => return BlockActionResponse::failure(format!("document_load failed: {err}")),
    };
    if let DecodeStatus::Malformed(reason) = &opened.status {
        warn!("event=ffi_document_load module=ffi status=rejected reason=malformed_json document_id={id}");
        return BlockActionResponse::failure(format!(
            "document_load failed: stored content is malformed: {reason}"
        ));
    }
    match opened.store.encode() {
        Ok(json) => {
            BlockActionResponse::success("Document loaded.", Some(json), Some(id.to_string()))
        }
        Err(err) => BlockActionResponse::failure(format!("document_load failed: {err}")),
    }
}

fn resolve_document_db_path() -> PathBuf {
    DOCUMENT_DB_PATH
        .get_or_init(|| document_db_path(EditorConfig::db_path_from_env()))
        .clone()
}

fn document_db_path(configured: Option<PathBuf>) -> PathBuf {
    configured.unwrap_or_else(|| std::env::temp_dir().join(DOCUMENT_DB_FILE_NAME))
}

fn with_document_service<T>(
    f: impl FnOnce(
        &DocumentService<SqliteDocumentRepository<'_>>,
    ) -> Result<T, blocknote_core::DocumentServiceError>,
) -> Result<T, String> {
    let db_path = resolve_document_db_path();
    let conn = open_db(&db_path).map_err(|err| format!("document DB open failed: {err}"))?;
    let service = DocumentService::new(SqliteDocumentRepository::new(&conn));
    f(&service).map_err(|err| err.to_string())
}

fn to_document_summary(record: DocumentRecord) -> DocumentSummary {
    DocumentSummary {
        document_id: record.id.to_string(),
        title: record.title,
        preview_text: record.preview_text,
        updated_at: record.updated_at,
    }
}
