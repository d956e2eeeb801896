//! Document use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep FFI and CLI layers decoupled from storage details.

pub mod document_service;
