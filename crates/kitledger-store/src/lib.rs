//! kitledger store - SQLite persistence for catalog snapshots
//!
//! Provides:
//! - SQLite schema with an embedded, checksummed migrations framework
//! - A `CatalogReader` over the live catalog tables
//! - A `SnapshotSink` writing the immutable snapshot ledger
//! - Atomic capture entry points, snapshot group lifecycle and read-back
//!   queries

pub mod catalog;
pub mod db;
pub mod errors;
pub mod migrations;
pub mod snapshot;

// Re-export key types
pub use catalog::SqliteCatalog;
pub use errors::Result;
pub use snapshot::SqliteSink;
