//! Snapshot group lifecycle.
//!
//! A group tags every snapshot created by one operation. It owns them:
//! deleting the group deletes every tagged row. Its link to the external
//! context (an event) is weak and is cleared when the event goes away.

#![allow(clippy::result_large_err)]

use std::time::Instant;

use super::query::{count_group_snapshots, group_snapshots};
use super::{logged, table_for, ALL_KINDS};
use crate::db::with_savepoint;
use crate::errors::{corrupt_row, persistence, Result};
use chrono::DateTime;
use kitledger_core::model::{now_millis, GroupView, SnapshotGroup};
use kitledger_core::{log_op_end, log_op_error, log_op_start};
use rusqlite::{Connection, OptionalExtension, Row};

/// `(id, event_id, created_at, note)` as stored
type GroupRow = (i64, Option<i64>, i64, Option<String>);

fn group_from_row(row: &Row<'_>) -> rusqlite::Result<GroupRow> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
}

fn decode_group(raw: GroupRow, op: &str) -> Result<SnapshotGroup> {
    let (id, context_id, created_at, note) = raw;
    let created_at = DateTime::from_timestamp_millis(created_at)
        .ok_or_else(|| corrupt_row(op, id, "created_at out of range"))?;
    Ok(SnapshotGroup {
        id,
        context_id,
        created_at,
        note,
    })
}

/// Create a new, empty snapshot group.
///
/// # Errors
///
/// `Persistence` if the insert fails, including a `context_id` that names
/// no event.
pub fn create_group(
    conn: &Connection,
    context_id: Option<i64>,
    note: Option<&str>,
) -> Result<SnapshotGroup> {
    logged("create_group", || {
        let created_at = now_millis();
        conn.execute(
            "INSERT INTO snapshot_groups (event_id, created_at, note) VALUES (?1, ?2, ?3)",
            rusqlite::params![context_id, created_at.timestamp_millis(), note],
        )
        .map_err(|e| persistence("create_group", e))?;

        let group = SnapshotGroup {
            id: conn.last_insert_rowid(),
            context_id,
            created_at,
            note: note.map(str::to_string),
        };
        tracing::debug!(group_id = group.id, context_id = ?context_id, "Created snapshot group");

        Ok(group)
    })
}

/// Load a group, optionally with every snapshot tagged with it.
///
/// Returns `Ok(None)` if the group does not exist. With
/// `include_snapshots = false` the view's lists are empty and its total is 0.
///
/// # Errors
///
/// `Persistence` / `Serialization` on read failures.
pub fn get_group(
    conn: &Connection,
    group_id: i64,
    include_snapshots: bool,
) -> Result<Option<GroupView>> {
    logged("get_group", || {
        let raw = conn
            .query_row(
                "SELECT id, event_id, created_at, note FROM snapshot_groups WHERE id = ?1",
                [group_id],
                group_from_row,
            )
            .optional()
            .map_err(|e| persistence("get_group", e))?;

        let Some(raw) = raw else {
            return Ok(None);
        };
        let group = decode_group(raw, "get_group")?;

        if !include_snapshots {
            return Ok(Some(GroupView::bare(group)));
        }

        let tagged = group_snapshots(conn, group_id)?;
        Ok(Some(GroupView::new(
            group,
            tagged.finished_units,
            tagged.material_units,
            tagged.finished_goods,
        )))
    })
}

/// Delete a group and every snapshot tagged with it.
///
/// Returns `false` if the group did not exist. Rows and group go in one
/// savepoint, so a failure leaves both in place.
///
/// # Errors
///
/// `Persistence` on SQLite failures.
pub fn delete_group(conn: &Connection, group_id: i64) -> Result<bool> {
    let op = "delete_group";
    let start = Instant::now();
    log_op_start!(op, group_id = group_id);

    let result = with_savepoint(conn, "delete_snapshot_group", |conn| {
        let exists = conn
            .query_row(
                "SELECT 1 FROM snapshot_groups WHERE id = ?1",
                [group_id],
                |_| Ok(()),
            )
            .optional()
            .map_err(|e| persistence(op, e))?
            .is_some();
        if !exists {
            return Ok((false, 0));
        }

        let snapshot_count = count_group_snapshots(conn, group_id)?;
        // Children before the group; the foreign-key cascade covers the same
        // rows when enabled.
        for kind in ALL_KINDS {
            let (table, _) = table_for(kind);
            conn.execute(
                &format!("DELETE FROM {table} WHERE snapshot_group_id = ?1"),
                [group_id],
            )
            .map_err(|e| persistence(op, e))?;
        }
        conn.execute("DELETE FROM snapshot_groups WHERE id = ?1", [group_id])
            .map_err(|e| persistence(op, e))?;

        Ok((true, snapshot_count))
    });

    let duration_ms = start.elapsed().as_millis() as u64;
    match result {
        Ok((deleted, snapshot_count)) => {
            log_op_end!(
                op,
                duration_ms = duration_ms,
                deleted = deleted,
                snapshot_count = snapshot_count as u64
            );
            Ok(deleted)
        }
        Err(err) => {
            log_op_error!(op, err, duration_ms = duration_ms, group_id = group_id);
            Err(err)
        }
    }
}

/// Groups attached to one external context, oldest first.
///
/// # Errors
///
/// `Persistence` / `Serialization` on read failures.
pub fn get_groups_by_context(conn: &Connection, context_id: i64) -> Result<Vec<SnapshotGroup>> {
    let op = "get_groups_by_context";
    logged(op, || {
        let mut stmt = conn
            .prepare(
                "SELECT id, event_id, created_at, note FROM snapshot_groups
                 WHERE event_id = ?1
                 ORDER BY created_at, id",
            )
            .map_err(|e| persistence(op, e))?;

        let rows = stmt
            .query_map([context_id], group_from_row)
            .map_err(|e| persistence(op, e))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| persistence(op, e))?;

        rows.into_iter().map(|raw| decode_group(raw, op)).collect()
    })
}
