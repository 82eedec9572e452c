//! Read interface onto the live catalog
//!
//! The snapshot engine only ever reads the catalog. Implementations decide
//! where the rows come from; `kitledger-store` reads SQLite, `MemoryCatalog`
//! holds everything in maps.

pub mod memory;

pub use memory::MemoryCatalog;

use crate::errors::Result;
use crate::model::{ComponentRef, FinishedGood, FinishedUnit, Material, MaterialUnit};

/// Live catalog lookups required by the snapshot engine.
///
/// Lookups return `Ok(None)` for a missing row; errors are reserved for
/// failures of the backing store.
#[allow(clippy::result_large_err)]
pub trait CatalogReader {
    /// Finished unit with its recipe attached.
    ///
    /// # Errors
    ///
    /// Backing-store failures only.
    fn finished_unit(&self, id: i64) -> Result<Option<FinishedUnit>>;

    /// Material unit with its material attached.
    ///
    /// # Errors
    ///
    /// Backing-store failures only.
    fn material_unit(&self, id: i64) -> Result<Option<MaterialUnit>>;

    /// Generic material, used only to label placeholders.
    ///
    /// # Errors
    ///
    /// Backing-store failures only.
    fn material(&self, id: i64) -> Result<Option<Material>>;

    /// Finished good scalar fields.
    ///
    /// # Errors
    ///
    /// Backing-store failures only.
    fn finished_good(&self, id: i64) -> Result<Option<FinishedGood>>;

    /// Composition rows of an assembly. Order is not guaranteed.
    ///
    /// # Errors
    ///
    /// Backing-store failures, or a row that cannot be classified.
    fn components(&self, assembly_id: i64) -> Result<Vec<ComponentRef>>;
}

impl<T: CatalogReader + ?Sized> CatalogReader for &T {
    fn finished_unit(&self, id: i64) -> Result<Option<FinishedUnit>> {
        (**self).finished_unit(id)
    }

    fn material_unit(&self, id: i64) -> Result<Option<MaterialUnit>> {
        (**self).material_unit(id)
    }

    fn material(&self, id: i64) -> Result<Option<Material>> {
        (**self).material(id)
    }

    fn finished_good(&self, id: i64) -> Result<Option<FinishedGood>> {
        (**self).finished_good(id)
    }

    fn components(&self, assembly_id: i64) -> Result<Vec<ComponentRef>> {
        (**self).components(assembly_id)
    }
}
