use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use super::definition::{FinishedGoodDefinition, FinishedUnitDefinition, MaterialUnitDefinition};

/// Snapshot family, one per stored record shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapshotKind {
    FinishedUnit,
    MaterialUnit,
    FinishedGood,
}

impl SnapshotKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SnapshotKind::FinishedUnit => "finished_unit",
            SnapshotKind::MaterialUnit => "material_unit",
            SnapshotKind::FinishedGood => "finished_good",
        }
    }
}

impl std::fmt::Display for SnapshotKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            SnapshotKind::FinishedUnit => "Finished unit",
            SnapshotKind::MaterialUnit => "Material unit",
            SnapshotKind::FinishedGood => "Finished good",
        };
        f.write_str(label)
    }
}

/// How a capture is tagged for later retrieval
///
/// Conventionally only one of `group_id` / `run_id` is set, but both are
/// accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnapshotTag {
    pub group_id: Option<i64>,
    pub run_id: Option<i64>,
    /// Set when the capture happens after its triggering event
    pub backfilled: bool,
}

impl SnapshotTag {
    pub fn for_group(group_id: i64) -> Self {
        Self {
            group_id: Some(group_id),
            ..Self::default()
        }
    }

    pub fn for_run(run_id: i64) -> Self {
        Self {
            run_id: Some(run_id),
            ..Self::default()
        }
    }

    pub fn backfilled(mut self) -> Self {
        self.backfilled = true;
        self
    }
}

/// Immutable point-in-time record of one catalog item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot<D> {
    pub id: i64,
    /// Id of the live item the definition was copied from
    pub source_id: i64,
    pub group_id: Option<i64>,
    pub run_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub is_backfilled: bool,
    pub definition: D,
}

pub type FinishedUnitSnapshot = Snapshot<FinishedUnitDefinition>;
pub type MaterialUnitSnapshot = Snapshot<MaterialUnitDefinition>;
pub type FinishedGoodSnapshot = Snapshot<FinishedGoodDefinition>;

/// Container tagging the snapshots created by one operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotGroup {
    pub id: i64,
    /// External context (e.g. an event); cleared if the context is deleted
    pub context_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub note: Option<String>,
}

/// A group together with every snapshot tagged with it
#[derive(Debug, Clone, PartialEq)]
pub struct GroupView {
    pub group: SnapshotGroup,
    pub finished_units: Vec<FinishedUnitSnapshot>,
    pub material_units: Vec<MaterialUnitSnapshot>,
    pub finished_goods: Vec<FinishedGoodSnapshot>,
    pub total_snapshots: usize,
}

impl GroupView {
    /// View with no snapshots loaded
    pub fn bare(group: SnapshotGroup) -> Self {
        Self {
            group,
            finished_units: Vec::new(),
            material_units: Vec::new(),
            finished_goods: Vec::new(),
            total_snapshots: 0,
        }
    }

    pub fn new(
        group: SnapshotGroup,
        finished_units: Vec<FinishedUnitSnapshot>,
        material_units: Vec<MaterialUnitSnapshot>,
        finished_goods: Vec<FinishedGoodSnapshot>,
    ) -> Self {
        let total_snapshots = finished_units.len() + material_units.len() + finished_goods.len();
        Self {
            group,
            finished_units,
            material_units,
            finished_goods,
            total_snapshots,
        }
    }
}

/// Current time at the millisecond precision snapshots are stored with
pub fn now_millis() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}
