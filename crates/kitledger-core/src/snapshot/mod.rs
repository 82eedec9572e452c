//! Hierarchical snapshot engine
//!
//! Freezes catalog items into immutable snapshot records:
//!
//! - [`capture_finished_unit`] / [`capture_material_unit`] for single leaves
//! - [`CompositeSnapshotWriter`] for a finished good and its full tree
//!
//! The engine is storage-agnostic. It reads through a
//! [`CatalogReader`](crate::catalog::CatalogReader) and writes through a
//! [`SnapshotSink`]; atomicity is the sink owner's job (see
//! `kitledger-store`, which runs every capture inside one savepoint).

pub mod composite;
pub mod leaf;
mod resolver;
pub mod sink;

pub use composite::CompositeSnapshotWriter;
pub use leaf::{capture_finished_unit, capture_material_unit};
pub use sink::{MemorySink, NewSnapshot, SnapshotSink, StoredSnapshot};
