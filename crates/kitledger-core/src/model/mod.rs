pub mod catalog;
pub mod definition;
pub mod snapshot;

pub use catalog::{
    ComponentKind, ComponentRef, FinishedGood, FinishedUnit, Material, MaterialRef, MaterialUnit,
    RecipeRef,
};
pub use definition::{
    ComponentEntry, ComponentType, FinishedGoodDefinition, FinishedUnitDefinition,
    MaterialUnitDefinition,
};
pub use snapshot::{
    now_millis, FinishedGoodSnapshot, FinishedUnitSnapshot, GroupView, MaterialUnitSnapshot,
    Snapshot, SnapshotGroup, SnapshotKind, SnapshotTag,
};
