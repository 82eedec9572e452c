//! Component resolution
//!
//! Turns one live composition row into one entry of a frozen finished
//! good, creating child snapshots on the way.
//!
//! | kind | action | `snapshot_id` |
//! |---|---|---|
//! | finished unit | capture leaf | child id |
//! | material unit | capture leaf | child id |
//! | finished good | recurse | child id |
//! | material (generic) | label only | `None` |
//! | packaging | skipped | no entry |
//!
//! Any row flagged `is_generic`, nested finished goods included, is treated
//! as a placeholder too: the concrete item is chosen later, so nothing is
//! captured for it. Material entries are always stored as generic.

#![allow(clippy::result_large_err)]

use super::composite::{CompositeSnapshotWriter, Walk};
use super::leaf::{capture_finished_unit, capture_material_unit};
use super::sink::SnapshotSink;
use crate::catalog::CatalogReader;
use crate::errors::Result;
use crate::model::definition::{material_label, UNKNOWN_LABEL};
use crate::model::{ComponentEntry, ComponentKind, ComponentRef, ComponentType};

struct Resolved {
    component_type: ComponentType,
    snapshot_id: Option<i64>,
    name: String,
    slug: Option<String>,
}

impl Resolved {
    fn placeholder(component_type: ComponentType, label: Option<(String, Option<String>)>) -> Self {
        let (name, slug) = label.unwrap_or_else(|| (UNKNOWN_LABEL.to_string(), None));
        Self {
            component_type,
            snapshot_id: None,
            name,
            slug,
        }
    }

    /// Merge with the per-use attributes of the live row
    fn into_entry(self, component: &ComponentRef) -> ComponentEntry {
        ComponentEntry {
            component_type: self.component_type,
            original_id: component.kind.target_id(),
            snapshot_id: self.snapshot_id,
            component_quantity: component.quantity,
            component_notes: component.notes.clone(),
            sort_order: component.sort_order,
            is_generic: component.is_generic
                || self.component_type == ComponentType::Material,
            component_name: self.name,
            component_slug: self.slug,
        }
    }
}

impl<C, S> CompositeSnapshotWriter<'_, C, S>
where
    C: CatalogReader + ?Sized,
    S: SnapshotSink + ?Sized,
{
    /// Resolve one composition row; `Ok(None)` means the row is skipped.
    pub(crate) fn resolve_component(
        &mut self,
        component: &ComponentRef,
        walk: &mut Walk,
        depth: usize,
    ) -> Result<Option<ComponentEntry>> {
        let resolved = match component.kind {
            ComponentKind::FinishedUnit(id) if component.is_generic => {
                let label = self
                    .catalog
                    .finished_unit(id)?
                    .map(|u| (u.display_name, Some(u.slug)));
                Resolved::placeholder(ComponentType::FinishedUnit, label)
            }
            ComponentKind::FinishedUnit(id) => {
                let snap = capture_finished_unit(self.catalog, &mut *self.sink, id, self.tag)?;
                Resolved {
                    component_type: ComponentType::FinishedUnit,
                    snapshot_id: Some(snap.id),
                    name: snap.definition.display_name,
                    slug: Some(snap.definition.slug),
                }
            }
            ComponentKind::MaterialUnit(id) if component.is_generic => {
                let label = self
                    .catalog
                    .material_unit(id)?
                    .map(|u| (u.name, Some(u.slug)));
                Resolved::placeholder(ComponentType::MaterialUnit, label)
            }
            ComponentKind::MaterialUnit(id) => {
                let snap = capture_material_unit(self.catalog, &mut *self.sink, id, self.tag)?;
                Resolved {
                    component_type: ComponentType::MaterialUnit,
                    snapshot_id: Some(snap.id),
                    name: snap.definition.name,
                    slug: Some(snap.definition.slug),
                }
            }
            ComponentKind::FinishedGood(id) if component.is_generic => {
                let label = self
                    .catalog
                    .finished_good(id)?
                    .map(|g| (g.display_name, Some(g.slug)));
                Resolved::placeholder(ComponentType::FinishedGood, label)
            }
            ComponentKind::FinishedGood(id) => {
                let snap = self.create_nested(id, walk, depth + 1)?;
                Resolved {
                    component_type: ComponentType::FinishedGood,
                    snapshot_id: Some(snap.id),
                    name: snap.definition.display_name,
                    slug: Some(snap.definition.slug),
                }
            }
            ComponentKind::Material(id) => {
                let material = self.catalog.material(id)?;
                Resolved::placeholder(
                    ComponentType::Material,
                    Some(material_label(material.as_ref())),
                )
            }
            ComponentKind::Packaging(id) => {
                tracing::debug!(
                    composition_id = component.id,
                    packaging_product_id = id,
                    "Skipping packaging component"
                );
                return Ok(None);
            }
        };

        Ok(Some(resolved.into_entry(component)))
    }
}
