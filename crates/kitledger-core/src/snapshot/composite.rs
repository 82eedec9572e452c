//! Composite (finished good) snapshot writer
//!
//! Walks a finished good's component list depth-first, capturing every leaf
//! it touches and recursing into nested finished goods. The walk is guarded
//! by a depth bound and a visited set that together reject runaway and
//! cyclic catalogs before anything past the offending node is written.

#![allow(clippy::result_large_err)]

use std::collections::HashSet;

use super::leaf::source_not_found;
use super::sink::{record_snapshot, SnapshotSink};
use crate::catalog::CatalogReader;
use crate::config::SnapshotConfig;
use crate::errors::{ExError, Result, SnapshotError};
use crate::model::{FinishedGoodDefinition, FinishedGoodSnapshot, SnapshotKind, SnapshotTag};

/// Recursion state owned by one root `create` call.
///
/// `visited` only grows: a finished good seen anywhere earlier in the same
/// tree is rejected, not just one on the current ancestor chain.
/// `ancestors` is the live chain used to report a readable path.
#[derive(Debug, Default)]
pub(crate) struct Walk {
    visited: HashSet<i64>,
    ancestors: Vec<i64>,
}

impl Walk {
    fn path_to(&self, id: i64) -> Vec<i64> {
        let mut path = self.ancestors.clone();
        path.push(id);
        path
    }
}

/// Captures a finished good and everything beneath it.
pub struct CompositeSnapshotWriter<'a, C: ?Sized, S: ?Sized> {
    pub(crate) catalog: &'a C,
    pub(crate) sink: &'a mut S,
    pub(crate) config: &'a SnapshotConfig,
    pub(crate) tag: &'a SnapshotTag,
}

impl<'a, C, S> CompositeSnapshotWriter<'a, C, S>
where
    C: CatalogReader + ?Sized,
    S: SnapshotSink + ?Sized,
{
    pub fn new(
        catalog: &'a C,
        sink: &'a mut S,
        config: &'a SnapshotConfig,
        tag: &'a SnapshotTag,
    ) -> Self {
        Self {
            catalog,
            sink,
            config,
            tag,
        }
    }

    /// Snapshot `source_id` and its whole component tree.
    ///
    /// Rows are handed to the sink bottom-up (children before parents). The
    /// caller owns the unit of work and must discard it on error.
    ///
    /// # Errors
    ///
    /// - `MaxDepthExceeded` when nesting goes deeper than `config.max_depth`
    /// - `CircularReference` when a finished good appears twice in the tree
    /// - `NotFound` when any referenced item is missing
    /// - whatever the catalog or sink report
    pub fn create(&mut self, source_id: i64) -> Result<FinishedGoodSnapshot> {
        let mut walk = Walk::default();
        self.create_nested(source_id, &mut walk, 0)
    }

    pub(crate) fn create_nested(
        &mut self,
        source_id: i64,
        walk: &mut Walk,
        depth: usize,
    ) -> Result<FinishedGoodSnapshot> {
        // Depth first: bounds the work even when a cycle would also fire.
        if depth > self.config.max_depth {
            return Err(ExError::from(SnapshotError::MaxDepthExceeded {
                depth,
                max: self.config.max_depth,
            })
            .with_entity_id(source_id)
            .with_op("capture_finished_good"));
        }

        if walk.visited.contains(&source_id) {
            return Err(ExError::from(SnapshotError::CircularReference {
                source_id,
                path: walk.path_to(source_id),
            })
            .with_op("capture_finished_good"));
        }
        walk.visited.insert(source_id);

        let good = self
            .catalog
            .finished_good(source_id)?
            .ok_or_else(|| source_not_found(SnapshotKind::FinishedGood, source_id))?;
        let components = self.catalog.components(source_id)?;

        walk.ancestors.push(source_id);
        let mut entries = Vec::with_capacity(components.len());
        for component in &components {
            if let Some(entry) = self.resolve_component(component, walk, depth)? {
                entries.push(entry);
            }
        }
        walk.ancestors.pop();

        // Stable: equal sort keys keep catalog order.
        entries.sort_by_key(|entry| entry.sort_order);

        tracing::debug!(
            source_id = source_id,
            depth = depth,
            component_count = entries.len(),
            "Resolved finished good components"
        );

        record_snapshot(
            &mut *self.sink,
            SnapshotKind::FinishedGood,
            source_id,
            self.tag,
            FinishedGoodDefinition::new(&good, entries),
        )
    }
}
