//! Snapshot persistence layer.
//!
//! ## Responsibilities
//!
//! - Store snapshot rows produced by the `kitledger-core` engine
//! - Run every capture inside one savepoint so a failed tree leaves no rows
//! - Snapshot group lifecycle: create, load with its snapshots, cascading
//!   delete, list by context
//! - Read back snapshots and rebuild a frozen tree from snapshot ids alone
//!
//! ## Non-Responsibilities
//!
//! - Tree walking, cycle and depth guards (handled by `kitledger-core`)
//! - Writing the live catalog

use std::time::Instant;

use crate::errors::Result;
use kitledger_core::model::SnapshotKind;
use kitledger_core::{log_op_end, log_op_error, log_op_start};

pub mod group;
pub mod persist;
pub mod query;
pub mod writer;

pub use group::{create_group, delete_group, get_group, get_groups_by_context};
pub use persist::SqliteSink;
pub use query::{reconstruct_tree, ResolvedChild, SnapshotTree, TreeNode};
pub use writer::{
    create_finished_good_snapshot, create_finished_unit_snapshot, create_material_unit_snapshot,
};

/// Table and source-id column holding one snapshot family
pub(crate) fn table_for(kind: SnapshotKind) -> (&'static str, &'static str) {
    match kind {
        SnapshotKind::FinishedUnit => ("finished_unit_snapshots", "finished_unit_id"),
        SnapshotKind::MaterialUnit => ("material_unit_snapshots", "material_unit_id"),
        SnapshotKind::FinishedGood => ("finished_good_snapshots", "finished_good_id"),
    }
}

pub(crate) const ALL_KINDS: [SnapshotKind; 3] = [
    SnapshotKind::FinishedUnit,
    SnapshotKind::MaterialUnit,
    SnapshotKind::FinishedGood,
];

/// Run a read or bookkeeping operation between start and end/end_error logs
pub(crate) fn logged<T>(op: &'static str, f: impl FnOnce() -> Result<T>) -> Result<T> {
    let start = Instant::now();
    log_op_start!(op);

    let result = f();

    let duration_ms = start.elapsed().as_millis() as u64;
    match &result {
        Ok(_) => {
            log_op_end!(op, duration_ms = duration_ms);
        }
        Err(err) => {
            log_op_error!(op, err, duration_ms = duration_ms);
        }
    }
    result
}
