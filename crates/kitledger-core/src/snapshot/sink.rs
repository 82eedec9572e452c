//! Write interface for snapshot records

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::errors::{ExError, ExErrorKind, Result};
use crate::model::{now_millis, Snapshot, SnapshotKind, SnapshotTag};

/// A snapshot row ready to be inserted
#[derive(Debug, Clone, Copy)]
pub struct NewSnapshot<'a> {
    pub source_id: i64,
    pub tag: &'a SnapshotTag,
    pub created_at: DateTime<Utc>,
    /// Serialized definition document
    pub definition: &'a str,
}

/// Destination for snapshot records.
///
/// Inserts happen inside whatever unit of work the implementation is bound
/// to; the returned id must be usable immediately, before that unit of work
/// ends.
#[allow(clippy::result_large_err)]
pub trait SnapshotSink {
    /// Insert one immutable snapshot record and return its id.
    ///
    /// # Errors
    ///
    /// Backing-store failures (constraint violations, I/O).
    fn insert_snapshot(&mut self, kind: SnapshotKind, row: NewSnapshot<'_>) -> Result<i64>;
}

impl<T: SnapshotSink + ?Sized> SnapshotSink for &mut T {
    fn insert_snapshot(&mut self, kind: SnapshotKind, row: NewSnapshot<'_>) -> Result<i64> {
        (**self).insert_snapshot(kind, row)
    }
}

/// Serialize a definition, hand it to the sink and build the returned record.
#[allow(clippy::result_large_err)]
pub(crate) fn record_snapshot<S, D>(
    sink: &mut S,
    kind: SnapshotKind,
    source_id: i64,
    tag: &SnapshotTag,
    definition: D,
) -> Result<Snapshot<D>>
where
    S: SnapshotSink + ?Sized,
    D: Serialize,
{
    let payload = serde_json::to_string(&definition)?;
    let created_at = now_millis();
    let id = sink.insert_snapshot(
        kind,
        NewSnapshot {
            source_id,
            tag,
            created_at,
            definition: &payload,
        },
    )?;

    tracing::debug!(
        kind = kind.as_str(),
        snapshot_id = id,
        source_id = source_id,
        size_bytes = payload.len(),
        "Recorded snapshot"
    );

    Ok(Snapshot {
        id,
        source_id,
        group_id: tag.group_id,
        run_id: tag.run_id,
        created_at,
        is_backfilled: tag.backfilled,
        definition,
    })
}

/// A row held by `MemorySink`
#[derive(Debug, Clone, PartialEq)]
pub struct StoredSnapshot {
    pub id: i64,
    pub kind: SnapshotKind,
    pub source_id: i64,
    pub group_id: Option<i64>,
    pub run_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub is_backfilled: bool,
    pub definition: serde_json::Value,
}

/// In-memory sink with sequential ids
///
/// Optionally refuses inserts after a fixed number of rows, to exercise
/// error propagation mid-tree.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    rows: Vec<StoredSnapshot>,
    fail_after: Option<usize>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sink that accepts `limit` rows and fails every insert after that
    pub fn failing_after(limit: usize) -> Self {
        Self {
            rows: Vec::new(),
            fail_after: Some(limit),
        }
    }

    pub fn rows(&self) -> &[StoredSnapshot] {
        &self.rows
    }

    pub fn count(&self, kind: SnapshotKind) -> usize {
        self.rows.iter().filter(|r| r.kind == kind).count()
    }

    pub fn get(&self, kind: SnapshotKind, id: i64) -> Option<&StoredSnapshot> {
        self.rows.iter().find(|r| r.kind == kind && r.id == id)
    }
}

impl SnapshotSink for MemorySink {
    fn insert_snapshot(&mut self, kind: SnapshotKind, row: NewSnapshot<'_>) -> Result<i64> {
        if self.fail_after.is_some_and(|limit| self.rows.len() >= limit) {
            return Err(ExError::new(ExErrorKind::Persistence)
                .with_op("insert_snapshot")
                .with_message("memory sink is full"));
        }
        let definition: serde_json::Value = serde_json::from_str(row.definition)?;
        let id = self.rows.len() as i64 + 1;
        self.rows.push(StoredSnapshot {
            id,
            kind,
            source_id: row.source_id,
            group_id: row.tag.group_id,
            run_id: row.tag.run_id,
            created_at: row.created_at,
            is_backfilled: row.tag.backfilled,
            definition,
        });
        Ok(id)
    }
}
