//! Leaf snapshot writers
//!
//! One writer per leaf family. Each loads the live item with its parent
//! grouping, freezes it into a definition and records exactly one row.

#![allow(clippy::result_large_err)]

use super::sink::{record_snapshot, SnapshotSink};
use crate::catalog::CatalogReader;
use crate::errors::{ExError, Result, SnapshotError};
use crate::model::{
    FinishedUnitDefinition, FinishedUnitSnapshot, MaterialUnitDefinition, MaterialUnitSnapshot,
    SnapshotKind, SnapshotTag,
};

pub(crate) fn source_not_found(kind: SnapshotKind, source_id: i64) -> ExError {
    ExError::from(SnapshotError::SourceNotFound { kind, source_id })
        .with_op(format!("capture_{}", kind.as_str()))
}

/// Capture a finished unit as it exists right now.
///
/// Every call records a new row, even when the live item is unchanged.
///
/// # Errors
///
/// - `NotFound` if the finished unit does not exist
/// - whatever the catalog or sink report
pub fn capture_finished_unit<C, S>(
    catalog: &C,
    sink: &mut S,
    source_id: i64,
    tag: &SnapshotTag,
) -> Result<FinishedUnitSnapshot>
where
    C: CatalogReader + ?Sized,
    S: SnapshotSink + ?Sized,
{
    let unit = catalog
        .finished_unit(source_id)?
        .ok_or_else(|| source_not_found(SnapshotKind::FinishedUnit, source_id))?;

    record_snapshot(
        sink,
        SnapshotKind::FinishedUnit,
        source_id,
        tag,
        FinishedUnitDefinition::from(&unit),
    )
}

/// Capture a material unit as it exists right now.
///
/// # Errors
///
/// - `NotFound` if the material unit does not exist
/// - whatever the catalog or sink report
pub fn capture_material_unit<C, S>(
    catalog: &C,
    sink: &mut S,
    source_id: i64,
    tag: &SnapshotTag,
) -> Result<MaterialUnitSnapshot>
where
    C: CatalogReader + ?Sized,
    S: SnapshotSink + ?Sized,
{
    let unit = catalog
        .material_unit(source_id)?
        .ok_or_else(|| source_not_found(SnapshotKind::MaterialUnit, source_id))?;

    record_snapshot(
        sink,
        SnapshotKind::MaterialUnit,
        source_id,
        tag,
        MaterialUnitDefinition::from(&unit),
    )
}
