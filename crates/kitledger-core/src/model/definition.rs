//! Snapshot definition payloads
//!
//! A definition is the frozen, self-describing document stored with every
//! snapshot. Historical rows are permanent, so every optional field carries
//! `#[serde(default)]` and unknown fields are ignored: a payload written today
//! must still parse after the live schema grows.

use serde::{Deserialize, Serialize};

use super::catalog::{FinishedGood, FinishedUnit, Material, MaterialUnit};

/// Frozen copy of a finished unit, with its recipe denormalized
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinishedUnitDefinition {
    pub slug: String,
    pub display_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub recipe_id: Option<i64>,
    #[serde(default)]
    pub recipe_name: Option<String>,
    #[serde(default)]
    pub recipe_category: Option<String>,
    #[serde(default)]
    pub yield_mode: Option<String>,
    #[serde(default)]
    pub items_per_batch: Option<i64>,
    #[serde(default)]
    pub item_unit: Option<String>,
    #[serde(default)]
    pub batch_percentage: Option<f64>,
    #[serde(default)]
    pub portion_description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub production_notes: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl From<&FinishedUnit> for FinishedUnitDefinition {
    fn from(unit: &FinishedUnit) -> Self {
        Self {
            slug: unit.slug.clone(),
            display_name: unit.display_name.clone(),
            description: unit.description.clone(),
            recipe_id: unit.recipe.as_ref().map(|r| r.id),
            recipe_name: unit.recipe.as_ref().map(|r| r.name.clone()),
            recipe_category: unit.recipe.as_ref().and_then(|r| r.category.clone()),
            yield_mode: unit.yield_mode.clone(),
            items_per_batch: unit.items_per_batch,
            item_unit: unit.item_unit.clone(),
            batch_percentage: unit.batch_percentage,
            portion_description: unit.portion_description.clone(),
            category: unit.category.clone(),
            production_notes: unit.production_notes.clone(),
            notes: unit.notes.clone(),
        }
    }
}

/// Frozen copy of a material unit, with its material denormalized
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialUnitDefinition {
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_quantity")]
    pub quantity_per_unit: f64,
    #[serde(default)]
    pub material_id: Option<i64>,
    #[serde(default)]
    pub material_name: Option<String>,
    #[serde(default)]
    pub material_category: Option<String>,
}

fn default_quantity() -> f64 {
    1.0
}

impl From<&MaterialUnit> for MaterialUnitDefinition {
    fn from(unit: &MaterialUnit) -> Self {
        Self {
            slug: unit.slug.clone(),
            name: unit.name.clone(),
            description: unit.description.clone(),
            quantity_per_unit: unit.quantity_per_unit,
            material_id: unit.material.as_ref().map(|m| m.id),
            material_name: unit.material.as_ref().map(|m| m.name.clone()),
            material_category: unit.material.as_ref().and_then(|m| m.category.clone()),
        }
    }
}

/// Component family recorded in a composite definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentType {
    FinishedUnit,
    MaterialUnit,
    FinishedGood,
    Material,
}

/// One resolved component of a frozen finished good
///
/// `snapshot_id` points at the child snapshot created in the same capture;
/// it is `None` for generic placeholders, which only keep a label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentEntry {
    pub component_type: ComponentType,
    pub original_id: i64,
    pub snapshot_id: Option<i64>,
    pub component_quantity: f64,
    #[serde(default)]
    pub component_notes: Option<String>,
    #[serde(default)]
    pub sort_order: i64,
    #[serde(default)]
    pub is_generic: bool,
    pub component_name: String,
    #[serde(default)]
    pub component_slug: Option<String>,
}

impl ComponentEntry {
    /// Whether this entry stands for a concrete item chosen later
    pub fn is_placeholder(&self) -> bool {
        self.snapshot_id.is_none()
    }
}

/// Frozen copy of a finished good and its fully resolved components
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinishedGoodDefinition {
    pub slug: String,
    /// Canonical name; mirrors `display_name` for historical readers
    pub name: String,
    pub display_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub assembly_type: Option<String>,
    #[serde(default)]
    pub packaging_instructions: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub components: Vec<ComponentEntry>,
}

impl FinishedGoodDefinition {
    /// Freeze a finished good's own fields around an already-resolved
    /// component list.
    pub fn new(good: &FinishedGood, components: Vec<ComponentEntry>) -> Self {
        Self {
            slug: good.slug.clone(),
            name: good.display_name.clone(),
            display_name: good.display_name.clone(),
            description: good.description.clone(),
            assembly_type: good.assembly_type.clone(),
            packaging_instructions: good.packaging_instructions.clone(),
            notes: good.notes.clone(),
            components,
        }
    }
}

/// Label used for a placeholder whose live material is gone
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Display label for a generic material placeholder
pub fn material_label(material: Option<&Material>) -> (String, Option<String>) {
    match material {
        Some(m) => (m.name.clone(), m.slug.clone()),
        None => (UNKNOWN_LABEL.to_string(), None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::catalog::RecipeRef;

    #[test]
    fn test_finished_unit_definition_denormalizes_recipe() {
        let mut unit = FinishedUnit::new(1, "sugar-cookie", "Sugar Cookie");
        unit.recipe = Some(RecipeRef {
            id: 9,
            name: "Sugar Cookies".to_string(),
            category: Some("Cookies".to_string()),
        });

        let def = FinishedUnitDefinition::from(&unit);
        assert_eq!(def.recipe_id, Some(9));
        assert_eq!(def.recipe_name.as_deref(), Some("Sugar Cookies"));
        assert_eq!(def.recipe_category.as_deref(), Some("Cookies"));
    }

    #[test]
    fn test_placeholder_entry_serializes_null_snapshot_id() {
        let entry = ComponentEntry {
            component_type: ComponentType::Material,
            original_id: 4,
            snapshot_id: None,
            component_quantity: 2.0,
            component_notes: None,
            sort_order: 1,
            is_generic: true,
            component_name: "Ribbon".to_string(),
            component_slug: None,
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert!(json["snapshot_id"].is_null());
        assert_eq!(json["component_type"], "material");
    }

    #[test]
    fn test_old_payload_without_optional_fields_still_parses() {
        let raw = r#"{
            "slug": "gift-box",
            "name": "Gift Box",
            "display_name": "Gift Box",
            "components": [
                {"component_type": "finished_unit", "original_id": 1,
                 "snapshot_id": 10, "component_quantity": 12.0,
                 "component_name": "Cookie"}
            ],
            "added_in_a_later_version": true
        }"#;
        let def: FinishedGoodDefinition = serde_json::from_str(raw).unwrap();
        assert_eq!(def.components.len(), 1);
        assert_eq!(def.components[0].sort_order, 0);
        assert!(!def.components[0].is_generic);
    }
}
