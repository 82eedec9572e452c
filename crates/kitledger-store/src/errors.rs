//! Error handling for kitledger-store
//!
//! Wraps kitledger-core `ExError` with store-specific helpers

use kitledger_core::errors::{ExError, ExErrorKind};
use thiserror::Error;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Failures of the embedded migration framework
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MigrationError {
    #[error("Migration {migration_id} failed: {reason}")]
    Failed {
        migration_id: String,
        reason: String,
    },

    /// An applied migration no longer matches the embedded SQL
    #[error("Checksum mismatch for migration {migration_id}: expected {expected}, got {actual}")]
    ChecksumMismatch {
        migration_id: String,
        expected: String,
        actual: String,
    },
}

impl From<MigrationError> for ExError {
    fn from(err: MigrationError) -> Self {
        let message = err.to_string();
        let migration_id = match &err {
            MigrationError::Failed { migration_id, .. }
            | MigrationError::ChecksumMismatch { migration_id, .. } => migration_id.clone(),
        };
        ExError::new(ExErrorKind::Persistence)
            .with_op("apply_migrations")
            .with_entity_id(migration_id)
            .with_message(message)
    }
}

/// Create a database error from rusqlite::Error
pub fn from_rusqlite(err: rusqlite::Error) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("sqlite")
        .with_message(err.to_string())
}

/// Create a database error tagged with the operation that hit it
pub fn persistence(op: &str, err: rusqlite::Error) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op(op)
        .with_message(err.to_string())
}

/// A stored row that no longer decodes
pub fn corrupt_row(op: &str, id: i64, reason: impl std::fmt::Display) -> ExError {
    ExError::new(ExErrorKind::Serialization)
        .with_op(op)
        .with_entity_id(id)
        .with_message(format!("Stored row cannot be decoded: {}", reason))
}
