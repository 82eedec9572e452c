use std::collections::HashMap;

use super::CatalogReader;
use crate::errors::Result;
use crate::model::{ComponentRef, FinishedGood, FinishedUnit, Material, MaterialUnit};

/// In-memory catalog
///
/// Composition rows are returned in the order they were added, which lets
/// callers feed the engine deliberately unsorted component lists.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    finished_units: HashMap<i64, FinishedUnit>,
    material_units: HashMap<i64, MaterialUnit>,
    materials: HashMap<i64, Material>,
    finished_goods: HashMap<i64, FinishedGood>,
    components: HashMap<i64, Vec<ComponentRef>>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_finished_unit(&mut self, unit: FinishedUnit) {
        self.finished_units.insert(unit.id, unit);
    }

    pub fn insert_material_unit(&mut self, unit: MaterialUnit) {
        self.material_units.insert(unit.id, unit);
    }

    pub fn insert_material(&mut self, material: Material) {
        self.materials.insert(material.id, material);
    }

    pub fn insert_finished_good(&mut self, good: FinishedGood) {
        self.finished_goods.insert(good.id, good);
    }

    /// Append a composition row to its assembly
    pub fn add_component(&mut self, component: ComponentRef) {
        self.components
            .entry(component.assembly_id)
            .or_default()
            .push(component);
    }

    pub fn remove_finished_unit(&mut self, id: i64) -> Option<FinishedUnit> {
        self.finished_units.remove(&id)
    }

    pub fn remove_material(&mut self, id: i64) -> Option<Material> {
        self.materials.remove(&id)
    }
}

impl CatalogReader for MemoryCatalog {
    fn finished_unit(&self, id: i64) -> Result<Option<FinishedUnit>> {
        Ok(self.finished_units.get(&id).cloned())
    }

    fn material_unit(&self, id: i64) -> Result<Option<MaterialUnit>> {
        Ok(self.material_units.get(&id).cloned())
    }

    fn material(&self, id: i64) -> Result<Option<Material>> {
        Ok(self.materials.get(&id).cloned())
    }

    fn finished_good(&self, id: i64) -> Result<Option<FinishedGood>> {
        Ok(self.finished_goods.get(&id).cloned())
    }

    fn components(&self, assembly_id: i64) -> Result<Vec<ComponentRef>> {
        Ok(self
            .components
            .get(&assembly_id)
            .cloned()
            .unwrap_or_default())
    }
}
