//! kitledger core - catalog model and hierarchical snapshot engine
//!
//! This crate provides:
//! - Read-side views of the live product catalog (finished units, material
//!   units, materials, finished goods and their composition rows)
//! - Immutable snapshot definitions and records
//! - The snapshot engine: leaf writers, the recursive composite writer and
//!   the component resolver, guarded against cycles and runaway depth
//! - The structured error facility, configuration and logging facility
//!
//! Storage lives in `kitledger-store`; everything here works against the
//! `CatalogReader` and `SnapshotSink` traits.

pub mod catalog;
pub mod config;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod snapshot;

// Re-exported for the logging macros
pub use kitledger_core_types;

pub use catalog::{CatalogReader, MemoryCatalog};
pub use config::SnapshotConfig;
pub use errors::{ExError, ExErrorKind, Result, SnapshotError};
pub use snapshot::{CompositeSnapshotWriter, SnapshotSink};
