use blocknote_core::behavior::text::set_text;
use blocknote_core::db::{open_db, open_db_in_memory};
use blocknote_core::model::block::TextContent;
use blocknote_core::repo::document_repo::DocumentListQuery;
use blocknote_core::{
    create_block, Block, BlockContent, BlockKind, DecodeStatus, DocumentRecord,
    DocumentRepository, DocumentService, DocumentServiceError, EditorConfig, RepoError,
    SqliteDocumentRepository,
};
use uuid::Uuid;

fn heading_and_body() -> Vec<Block> {
    vec![
        Block::new(BlockContent::Heading1(TextContent {
            text: "Title".to_string(),
        })),
        Block::new(BlockContent::Paragraph(TextContent {
            text: "Body".to_string(),
        })),
    ]
}

#[test]
fn repository_create_get_and_delete() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDocumentRepository::new(&conn);

    let record = DocumentRecord::new("Plan", "[]", None);
    let id = repo.create_document(&record).unwrap();
    assert_eq!(repo.get_document(id).unwrap(), Some(record.clone()));

    assert!(matches!(
        repo.create_document(&record),
        Err(RepoError::AlreadyExists(existing)) if existing == id
    ));

    repo.delete_document(id).unwrap();
    assert_eq!(repo.get_document(id).unwrap(), None);
    assert!(matches!(
        repo.delete_document(id),
        Err(RepoError::NotFound(missing)) if missing == id
    ));
}

#[test]
fn repository_update_of_missing_document_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDocumentRepository::new(&conn);
    let ghost = Uuid::new_v4();

    assert!(matches!(
        repo.update_document(ghost, "[]", None),
        Err(RepoError::NotFound(missing)) if missing == ghost
    ));
}

#[test]
fn repository_lists_most_recent_first() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDocumentRepository::new(&conn);

    let mut older = DocumentRecord::new("older", "[]", None);
    older.updated_at = 1_000;
    let mut newer = DocumentRecord::new("newer", "[]", None);
    newer.updated_at = 2_000;
    repo.create_document(&older).unwrap();
    repo.create_document(&newer).unwrap();

    let titles = repo
        .list_documents(&DocumentListQuery::default())
        .unwrap()
        .into_iter()
        .map(|record| record.title)
        .collect::<Vec<_>>();
    assert_eq!(titles, vec!["newer", "older"]);
}

#[test]
fn service_create_stores_encoded_blocks_and_preview() {
    let conn = open_db_in_memory().unwrap();
    let service = DocumentService::new(SqliteDocumentRepository::new(&conn));

    let record = service.create_document("  ", &heading_and_body()).unwrap();
    assert_eq!(record.title, "Untitled");
    assert_eq!(record.preview_text.as_deref(), Some("Title Body"));
    assert!(record.content_json.starts_with('['));
    assert_eq!(service.export_markdown(record.id).unwrap(), "# Title\n\nBody");
    assert_eq!(service.export_plain_text(record.id).unwrap(), "Title\n\nBody");
}

#[test]
fn service_open_edit_save_round_trip() {
    let conn = open_db_in_memory().unwrap();
    let service = DocumentService::new(SqliteDocumentRepository::new(&conn));
    let created = service.create_document("Notes", &heading_and_body()).unwrap();

    let mut opened = service
        .open_editor(created.id, &EditorConfig::default())
        .unwrap();
    assert_eq!(opened.status, DecodeStatus::Parsed);
    assert_eq!(opened.title, "Notes");
    assert_eq!(opened.store.len(), 2);

    let body = opened.store.blocks()[1].id;
    set_text(&mut opened.store, body, "Edited").applied().unwrap();
    opened
        .store
        .add_block(create_block(BlockKind::Divider), None)
        .applied()
        .unwrap();
    let saved = service.save_editor(created.id, &opened.store).unwrap();
    assert!(saved.updated_at >= created.updated_at);
    assert_eq!(saved.preview_text.as_deref(), Some("Title Edited"));

    let reopened = service
        .open_editor(created.id, &EditorConfig::default())
        .unwrap();
    assert_eq!(reopened.store.blocks(), opened.store.blocks());
}

#[test]
fn service_opens_corrupt_content_as_empty_session() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDocumentRepository::new(&conn);
    let record = DocumentRecord::new("Broken", "not json", None);
    repo.create_document(&record).unwrap();

    let service = DocumentService::new(repo);
    let opened = service
        .open_editor(record.id, &EditorConfig::read_only())
        .unwrap();
    assert!(matches!(opened.status, DecodeStatus::Malformed(_)));
    assert!(opened.store.is_empty());
    assert!(opened.store.is_read_only());
    assert_eq!(service.export_markdown(record.id).unwrap(), "");
}

#[test]
fn service_reports_missing_documents() {
    let conn = open_db_in_memory().unwrap();
    let service = DocumentService::new(SqliteDocumentRepository::new(&conn));
    let ghost = Uuid::new_v4();

    assert!(matches!(
        service.open_editor(ghost, &EditorConfig::default()),
        Err(DocumentServiceError::DocumentNotFound(missing)) if missing == ghost
    ));
    assert!(matches!(
        service.rename_document(ghost, "x"),
        Err(DocumentServiceError::DocumentNotFound(_))
    ));
}

#[test]
fn service_rename_and_list() {
    let conn = open_db_in_memory().unwrap();
    let service = DocumentService::new(SqliteDocumentRepository::new(&conn));
    let created = service.create_document("Draft", &[]).unwrap();

    let renamed = service.rename_document(created.id, " Final ").unwrap();
    assert_eq!(renamed.title, "Final");

    let listed = service.list_documents(Some(0), 0).unwrap();
    assert_eq!(listed.applied_limit, 20);
    assert_eq!(listed.items.len(), 1);
    assert_eq!(listed.items[0].preview_text, None);
}

#[test]
fn documents_survive_reopening_file_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("docs.db");

    let id = {
        let conn = open_db(&path).unwrap();
        let service = DocumentService::new(SqliteDocumentRepository::new(&conn));
        service
            .create_document("Persisted", &heading_and_body())
            .unwrap()
            .id
    };

    let conn = open_db(&path).unwrap();
    let service = DocumentService::new(SqliteDocumentRepository::new(&conn));
    assert_eq!(service.export_markdown(id).unwrap(), "# Title\n\nBody");
}
