//! Snapshot capture entry points.
//!
//! Each entry point binds the core engine to a connection: the catalog is
//! read and every row written inside a single savepoint. Any failure
//! anywhere in the tree rolls the whole capture back. When the caller
//! already holds a transaction the savepoint nests inside it, so the
//! capture commits or rolls back with the caller's business write.

#![allow(clippy::result_large_err)]

use std::time::Instant;

use crate::catalog::SqliteCatalog;
use crate::db::with_savepoint;
use crate::errors::Result;
use crate::snapshot::persist::SqliteSink;
use kitledger_core::model::{
    FinishedGoodSnapshot, FinishedUnitSnapshot, MaterialUnitSnapshot, SnapshotTag,
};
use kitledger_core::snapshot::{capture_finished_unit, capture_material_unit};
use kitledger_core::{log_op_end, log_op_error, log_op_start};
use kitledger_core::{CompositeSnapshotWriter, ExError, SnapshotConfig};
use rusqlite::Connection;

/// Snapshot a finished good and its whole component tree.
///
/// Children are written before their parents; the returned record is the
/// root, whose definition references every child by snapshot id.
///
/// # Errors
///
/// - `NotFound` when the root or any referenced leaf is missing
/// - `CircularReference` / `MaxDepthExceeded` for a malformed catalog
/// - `Persistence` for SQLite failures
///
/// In every case no snapshot row from this call remains.
pub fn create_finished_good_snapshot(
    conn: &Connection,
    source_id: i64,
    tag: &SnapshotTag,
    config: &SnapshotConfig,
) -> Result<FinishedGoodSnapshot> {
    let op = "create_finished_good_snapshot";
    let start = Instant::now();
    log_op_start!(op, source_id = source_id, max_depth = config.max_depth as u64);

    let result = with_savepoint(conn, "finished_good_snapshot", |conn| {
        let catalog = SqliteCatalog::new(conn);
        let mut sink = SqliteSink::new(conn);
        CompositeSnapshotWriter::new(&catalog, &mut sink, config, tag).create(source_id)
    });

    let duration_ms = start.elapsed().as_millis() as u64;
    match result {
        Ok(snapshot) => {
            log_op_end!(
                op,
                duration_ms = duration_ms,
                snapshot_id = snapshot.id,
                component_count = snapshot.definition.components.len() as u64
            );
            Ok(snapshot)
        }
        Err(err) => Err(log_failure(op, err, duration_ms, source_id)),
    }
}

/// Snapshot a single finished unit with no parent composite.
///
/// # Errors
///
/// - `NotFound` when the finished unit is missing
/// - `Persistence` for SQLite failures
pub fn create_finished_unit_snapshot(
    conn: &Connection,
    source_id: i64,
    tag: &SnapshotTag,
) -> Result<FinishedUnitSnapshot> {
    let op = "create_finished_unit_snapshot";
    let start = Instant::now();
    log_op_start!(op, source_id = source_id);

    let result = with_savepoint(conn, "finished_unit_snapshot", |conn| {
        let catalog = SqliteCatalog::new(conn);
        let mut sink = SqliteSink::new(conn);
        capture_finished_unit(&catalog, &mut sink, source_id, tag)
    });

    let duration_ms = start.elapsed().as_millis() as u64;
    match result {
        Ok(snapshot) => {
            log_op_end!(op, duration_ms = duration_ms, snapshot_id = snapshot.id);
            Ok(snapshot)
        }
        Err(err) => Err(log_failure(op, err, duration_ms, source_id)),
    }
}

/// Snapshot a single material unit with no parent composite.
///
/// # Errors
///
/// - `NotFound` when the material unit is missing
/// - `Persistence` for SQLite failures
pub fn create_material_unit_snapshot(
    conn: &Connection,
    source_id: i64,
    tag: &SnapshotTag,
) -> Result<MaterialUnitSnapshot> {
    let op = "create_material_unit_snapshot";
    let start = Instant::now();
    log_op_start!(op, source_id = source_id);

    let result = with_savepoint(conn, "material_unit_snapshot", |conn| {
        let catalog = SqliteCatalog::new(conn);
        let mut sink = SqliteSink::new(conn);
        capture_material_unit(&catalog, &mut sink, source_id, tag)
    });

    let duration_ms = start.elapsed().as_millis() as u64;
    match result {
        Ok(snapshot) => {
            log_op_end!(op, duration_ms = duration_ms, snapshot_id = snapshot.id);
            Ok(snapshot)
        }
        Err(err) => Err(log_failure(op, err, duration_ms, source_id)),
    }
}

fn log_failure(op: &str, err: ExError, duration_ms: u64, source_id: i64) -> ExError {
    log_op_error!(op, err, duration_ms = duration_ms, source_id = source_id);
    err
}
