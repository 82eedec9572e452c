//! Read-only snapshot query operations.
//!
//! Everything here reads the snapshot tables only. In particular
//! [`reconstruct_tree`] rebuilds a frozen composition from snapshot ids
//! alone, so it answers the same way after the live catalog has changed.

#![allow(clippy::result_large_err)]

use super::{logged, table_for, ALL_KINDS};
use crate::errors::{corrupt_row, persistence, Result};
use chrono::DateTime;
use kitledger_core::errors::{ExError, ExErrorKind};
use kitledger_core::model::{
    ComponentEntry, ComponentType, FinishedGoodSnapshot, FinishedUnitSnapshot,
    MaterialUnitSnapshot, Snapshot, SnapshotKind,
};
use rusqlite::{Connection, Row};
use serde::de::DeserializeOwned;

/// A raw row from one of the snapshot tables
struct RawSnapshot {
    id: i64,
    source_id: i64,
    group_id: Option<i64>,
    run_id: Option<i64>,
    created_at: i64,
    is_backfilled: bool,
    definition: String,
}

impl RawSnapshot {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            source_id: row.get(1)?,
            group_id: row.get(2)?,
            run_id: row.get(3)?,
            created_at: row.get(4)?,
            is_backfilled: row.get(5)?,
            definition: row.get(6)?,
        })
    }

    fn decode<D: DeserializeOwned>(self, op: &str) -> Result<Snapshot<D>> {
        let created_at = DateTime::from_timestamp_millis(self.created_at)
            .ok_or_else(|| corrupt_row(op, self.id, "created_at out of range"))?;
        let definition =
            serde_json::from_str(&self.definition).map_err(|e| corrupt_row(op, self.id, e))?;
        Ok(Snapshot {
            id: self.id,
            source_id: self.source_id,
            group_id: self.group_id,
            run_id: self.run_id,
            created_at,
            is_backfilled: self.is_backfilled,
            definition,
        })
    }
}

/// Column a snapshot lookup filters on
#[derive(Clone, Copy)]
enum Filter {
    Id,
    Source,
    Group,
    Run,
}

fn select<D: DeserializeOwned>(
    conn: &Connection,
    kind: SnapshotKind,
    filter: Filter,
    value: i64,
    op: &str,
) -> Result<Vec<Snapshot<D>>> {
    let (table, source_column) = table_for(kind);
    let column = match filter {
        Filter::Id => "id",
        Filter::Source => source_column,
        Filter::Group => "snapshot_group_id",
        Filter::Run => "production_run_id",
    };
    let sql = format!(
        "SELECT id, {source_column}, snapshot_group_id, production_run_id,
                created_at, is_backfilled, definition_data
         FROM {table} WHERE {column} = ?1
         ORDER BY created_at, id"
    );

    let mut stmt = conn.prepare(&sql).map_err(|e| persistence(op, e))?;
    let rows = stmt
        .query_map([value], RawSnapshot::from_row)
        .map_err(|e| persistence(op, e))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| persistence(op, e))?;

    rows.into_iter().map(|raw| raw.decode(op)).collect()
}

fn select_one<D: DeserializeOwned>(
    conn: &Connection,
    kind: SnapshotKind,
    id: i64,
    op: &str,
) -> Result<Option<Snapshot<D>>> {
    Ok(select(conn, kind, Filter::Id, id, op)?.into_iter().next())
}

/// Fetch a finished unit snapshot by id
pub fn get_finished_unit_snapshot(
    conn: &Connection,
    id: i64,
) -> Result<Option<FinishedUnitSnapshot>> {
    let op = "get_finished_unit_snapshot";
    logged(op, || select_one(conn, SnapshotKind::FinishedUnit, id, op))
}

/// Fetch a material unit snapshot by id
pub fn get_material_unit_snapshot(
    conn: &Connection,
    id: i64,
) -> Result<Option<MaterialUnitSnapshot>> {
    let op = "get_material_unit_snapshot";
    logged(op, || select_one(conn, SnapshotKind::MaterialUnit, id, op))
}

/// Fetch a finished good snapshot by id
pub fn get_finished_good_snapshot(
    conn: &Connection,
    id: i64,
) -> Result<Option<FinishedGoodSnapshot>> {
    let op = "get_finished_good_snapshot";
    logged(op, || select_one(conn, SnapshotKind::FinishedGood, id, op))
}

/// Every capture of one finished unit, oldest first
pub fn finished_unit_history(
    conn: &Connection,
    source_id: i64,
) -> Result<Vec<FinishedUnitSnapshot>> {
    let op = "finished_unit_history";
    logged(op, || select(conn, SnapshotKind::FinishedUnit, Filter::Source, source_id, op))
}

/// Every capture of one material unit, oldest first
pub fn material_unit_history(
    conn: &Connection,
    source_id: i64,
) -> Result<Vec<MaterialUnitSnapshot>> {
    let op = "material_unit_history";
    logged(op, || select(conn, SnapshotKind::MaterialUnit, Filter::Source, source_id, op))
}

/// Every capture of one finished good, oldest first
pub fn finished_good_history(
    conn: &Connection,
    source_id: i64,
) -> Result<Vec<FinishedGoodSnapshot>> {
    let op = "finished_good_history";
    logged(op, || select(conn, SnapshotKind::FinishedGood, Filter::Source, source_id, op))
}

/// Snapshots tagged with one value, split by family
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaggedSnapshots {
    pub finished_units: Vec<FinishedUnitSnapshot>,
    pub material_units: Vec<MaterialUnitSnapshot>,
    pub finished_goods: Vec<FinishedGoodSnapshot>,
}

impl TaggedSnapshots {
    pub fn total(&self) -> usize {
        self.finished_units.len() + self.material_units.len() + self.finished_goods.len()
    }
}

fn tagged(conn: &Connection, filter: Filter, value: i64, op: &str) -> Result<TaggedSnapshots> {
    Ok(TaggedSnapshots {
        finished_units: select(conn, SnapshotKind::FinishedUnit, filter, value, op)?,
        material_units: select(conn, SnapshotKind::MaterialUnit, filter, value, op)?,
        finished_goods: select(conn, SnapshotKind::FinishedGood, filter, value, op)?,
    })
}

/// All snapshots captured for one production run
pub fn get_run_snapshots(conn: &Connection, run_id: i64) -> Result<TaggedSnapshots> {
    let op = "get_run_snapshots";
    logged(op, || tagged(conn, Filter::Run, run_id, op))
}

pub(crate) fn group_snapshots(conn: &Connection, group_id: i64) -> Result<TaggedSnapshots> {
    tagged(conn, Filter::Group, group_id, "get_group")
}

/// Number of snapshot rows tagged with a group
pub(crate) fn count_group_snapshots(conn: &Connection, group_id: i64) -> Result<usize> {
    let mut total = 0usize;
    for kind in ALL_KINDS {
        let (table, _) = table_for(kind);
        let count: i64 = conn
            .query_row(
                &format!("SELECT COUNT(*) FROM {table} WHERE snapshot_group_id = ?1"),
                [group_id],
                |row| row.get(0),
            )
            .map_err(|e| persistence("count_group_snapshots", e))?;
        total += count as usize;
    }
    Ok(total)
}

/// A frozen finished good with every child snapshot loaded
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotTree {
    pub snapshot: FinishedGoodSnapshot,
    /// In the stored component order
    pub components: Vec<TreeNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    pub entry: ComponentEntry,
    pub child: ResolvedChild,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedChild {
    FinishedUnit(FinishedUnitSnapshot),
    MaterialUnit(MaterialUnitSnapshot),
    FinishedGood(Box<SnapshotTree>),
    /// Generic component; only the entry's label exists
    Placeholder,
}

impl SnapshotTree {
    /// Snapshot records in the tree, root included
    pub fn snapshot_count(&self) -> usize {
        1 + self
            .components
            .iter()
            .map(|node| match &node.child {
                ResolvedChild::FinishedUnit(_) | ResolvedChild::MaterialUnit(_) => 1,
                ResolvedChild::FinishedGood(tree) => tree.snapshot_count(),
                ResolvedChild::Placeholder => 0,
            })
            .sum::<usize>()
    }
}

/// Rebuild a finished good snapshot and all of its children.
///
/// Returns `Ok(None)` when no finished good snapshot has this id.
///
/// # Errors
///
/// - `NotFound` when an entry references a child snapshot that is gone
/// - `Serialization` for an undecodable row
/// - `Persistence` for SQLite failures
pub fn reconstruct_tree(conn: &Connection, snapshot_id: i64) -> Result<Option<SnapshotTree>> {
    let op = "reconstruct_tree";
    logged(op, || {
        match select_one(conn, SnapshotKind::FinishedGood, snapshot_id, op)? {
            Some(snapshot) => build_tree(conn, snapshot).map(Some),
            None => Ok(None),
        }
    })
}

fn build_tree(conn: &Connection, snapshot: FinishedGoodSnapshot) -> Result<SnapshotTree> {
    let mut components = Vec::with_capacity(snapshot.definition.components.len());

    for entry in &snapshot.definition.components {
        let child = match (entry.component_type, entry.snapshot_id) {
            (_, None) | (ComponentType::Material, Some(_)) => ResolvedChild::Placeholder,
            (ComponentType::FinishedUnit, Some(id)) => ResolvedChild::FinishedUnit(
                select_one(conn, SnapshotKind::FinishedUnit, id, "reconstruct_tree")?
                    .ok_or_else(|| dangling(SnapshotKind::FinishedUnit, id, snapshot.id))?,
            ),
            (ComponentType::MaterialUnit, Some(id)) => ResolvedChild::MaterialUnit(
                select_one(conn, SnapshotKind::MaterialUnit, id, "reconstruct_tree")?
                    .ok_or_else(|| dangling(SnapshotKind::MaterialUnit, id, snapshot.id))?,
            ),
            (ComponentType::FinishedGood, Some(id)) => {
                // Children are always written before their parent
                if id >= snapshot.id {
                    return Err(corrupt_row(
                        "reconstruct_tree",
                        snapshot.id,
                        format!("child finished good snapshot {} is not older", id),
                    ));
                }
                let child = select_one(conn, SnapshotKind::FinishedGood, id, "reconstruct_tree")?
                    .ok_or_else(|| dangling(SnapshotKind::FinishedGood, id, snapshot.id))?;
                ResolvedChild::FinishedGood(Box::new(build_tree(conn, child)?))
            }
        };
        components.push(TreeNode {
            entry: entry.clone(),
            child,
        });
    }

    Ok(SnapshotTree {
        snapshot,
        components,
    })
}

fn dangling(kind: SnapshotKind, child_id: i64, parent_id: i64) -> ExError {
    ExError::new(ExErrorKind::NotFound)
        .with_op("reconstruct_tree")
        .with_entity_id(child_id)
        .with_message(format!(
            "{} snapshot {} referenced by finished good snapshot {} is missing",
            kind, child_id, parent_id
        ))
}
