//! Repository layer for saved documents.
//!
//! # Responsibility
//! - Define the document data access contract.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`NotFound`, `AlreadyExists`) in
//!   addition to DB transport errors.

pub mod document_repo;
