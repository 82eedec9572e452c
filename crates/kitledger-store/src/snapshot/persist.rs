//! Snapshot row persistence.
//!
//! [`SqliteSink`] is the `SnapshotSink` the engine writes through. It never
//! opens or commits anything itself: rows land in whatever savepoint or
//! transaction is active on the borrowed connection, and the new row id is
//! readable straight away.

#![allow(clippy::result_large_err)]

use super::table_for;
use crate::errors::{persistence, Result};
use kitledger_core::model::SnapshotKind;
use kitledger_core::snapshot::{NewSnapshot, SnapshotSink};
use rusqlite::Connection;

/// Snapshot sink over a borrowed connection
pub struct SqliteSink<'c> {
    conn: &'c Connection,
}

impl<'c> SqliteSink<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }
}

impl SnapshotSink for SqliteSink<'_> {
    fn insert_snapshot(&mut self, kind: SnapshotKind, row: NewSnapshot<'_>) -> Result<i64> {
        let (table, source_column) = table_for(kind);
        let sql = format!(
            "INSERT INTO {table} (
                {source_column}, snapshot_group_id, production_run_id,
                created_at, is_backfilled, definition_data
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)"
        );

        self.conn
            .execute(
                &sql,
                rusqlite::params![
                    row.source_id,
                    row.tag.group_id,
                    row.tag.run_id,
                    row.created_at.timestamp_millis(),
                    row.tag.backfilled,
                    row.definition,
                ],
            )
            .map_err(|e| {
                persistence("insert_snapshot", e).with_entity_id(row.source_id)
            })?;

        Ok(self.conn.last_insert_rowid())
    }
}
