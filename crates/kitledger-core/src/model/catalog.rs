//! Read-side views of the live catalog
//!
//! These are the shapes the snapshot engine consumes. The catalog itself is
//! owned by other services; nothing here is ever written back.

use serde::{Deserialize, Serialize};

use crate::errors::{ExError, ExErrorKind, Result};

/// Recipe a finished unit is produced from (its parent grouping)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeRef {
    pub id: i64,
    pub name: String,
    pub category: Option<String>,
}

/// Finished unit - a single baked item (leaf family A)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinishedUnit {
    pub id: i64,
    pub slug: String,
    pub display_name: String,
    pub description: Option<String>,

    /// Recipe this unit is made from, if still linked
    pub recipe: Option<RecipeRef>,

    /// How the recipe yield is expressed (`discrete_count`, `batch_portion`)
    pub yield_mode: Option<String>,
    pub items_per_batch: Option<i64>,
    pub item_unit: Option<String>,
    pub batch_percentage: Option<f64>,
    pub portion_description: Option<String>,
    pub category: Option<String>,
    pub production_notes: Option<String>,
    pub notes: Option<String>,
}

impl FinishedUnit {
    /// Create a finished unit with only its identifying fields set
    pub fn new(id: i64, slug: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id,
            slug: slug.into(),
            display_name: display_name.into(),
            description: None,
            recipe: None,
            yield_mode: None,
            items_per_batch: None,
            item_unit: None,
            batch_percentage: None,
            portion_description: None,
            category: None,
            production_notes: None,
            notes: None,
        }
    }
}

/// Material a material unit is cut from (its parent grouping)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialRef {
    pub id: i64,
    pub name: String,
    pub category: Option<String>,
}

/// Material unit - a concrete consumable packaging unit (leaf family B)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialUnit {
    pub id: i64,
    pub slug: String,
    pub name: String,
    pub description: Option<String>,
    pub quantity_per_unit: f64,
    pub material: Option<MaterialRef>,
}

impl MaterialUnit {
    pub fn new(id: i64, slug: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id,
            slug: slug.into(),
            name: name.into(),
            description: None,
            quantity_per_unit: 1.0,
            material: None,
        }
    }
}

/// Material - a category of acceptable material units
///
/// Referenced by generic placeholder components: the concrete unit is
/// chosen later, so only the material's label is ever captured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub id: i64,
    pub slug: Option<String>,
    pub name: String,
    pub category: Option<String>,
    pub base_unit_type: Option<String>,
}

impl Material {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            slug: None,
            name: name.into(),
            category: None,
            base_unit_type: None,
        }
    }
}

/// Finished good - an assembly of components (the composite)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinishedGood {
    pub id: i64,
    pub slug: String,
    pub display_name: String,
    pub description: Option<String>,

    /// Free-form assembly classification (`gift_box`, `variety_pack`, ...)
    pub assembly_type: Option<String>,
    pub packaging_instructions: Option<String>,
    pub notes: Option<String>,
}

impl FinishedGood {
    pub fn new(id: i64, slug: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id,
            slug: slug.into(),
            display_name: display_name.into(),
            description: None,
            assembly_type: None,
            packaging_instructions: None,
            notes: None,
        }
    }
}

/// What a composition row points at
///
/// Exactly one target is set per live row. The kind is decided once, when
/// the row is loaded, and everything downstream dispatches on this tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum ComponentKind {
    FinishedUnit(i64),
    MaterialUnit(i64),
    FinishedGood(i64),
    /// Generic placeholder: any unit of this material
    Material(i64),
    /// Packaging products are tracked elsewhere and never snapshotted here
    Packaging(i64),
}

impl ComponentKind {
    /// Classify a row from its five nullable target columns.
    ///
    /// Columns are checked in declaration order and the first populated one
    /// wins.
    ///
    /// # Errors
    ///
    /// `InvalidInput` when no target column is populated.
    pub fn from_targets(
        finished_unit_id: Option<i64>,
        material_unit_id: Option<i64>,
        finished_good_id: Option<i64>,
        material_id: Option<i64>,
        packaging_product_id: Option<i64>,
    ) -> Result<Self> {
        if let Some(id) = finished_unit_id {
            return Ok(ComponentKind::FinishedUnit(id));
        }
        if let Some(id) = material_unit_id {
            return Ok(ComponentKind::MaterialUnit(id));
        }
        if let Some(id) = finished_good_id {
            return Ok(ComponentKind::FinishedGood(id));
        }
        if let Some(id) = material_id {
            return Ok(ComponentKind::Material(id));
        }
        if let Some(id) = packaging_product_id {
            return Ok(ComponentKind::Packaging(id));
        }
        Err(ExError::new(ExErrorKind::InvalidInput)
            .with_op("classify_component")
            .with_message("composition row has no target"))
    }

    /// Id of the live item this component points at
    pub fn target_id(&self) -> i64 {
        match *self {
            ComponentKind::FinishedUnit(id)
            | ComponentKind::MaterialUnit(id)
            | ComponentKind::FinishedGood(id)
            | ComponentKind::Material(id)
            | ComponentKind::Packaging(id) => id,
        }
    }
}

/// One live composition row: a component used by an assembly
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentRef {
    /// Composition row id
    pub id: i64,
    pub assembly_id: i64,
    pub kind: ComponentKind,
    pub quantity: f64,
    pub notes: Option<String>,
    pub sort_order: i64,
    pub is_generic: bool,
}

impl ComponentRef {
    pub fn new(id: i64, assembly_id: i64, kind: ComponentKind, quantity: f64) -> Self {
        Self {
            id,
            assembly_id,
            kind,
            quantity,
            notes: None,
            sort_order: 0,
            is_generic: false,
        }
    }

    pub fn with_sort_order(mut self, sort_order: i64) -> Self {
        self.sort_order = sort_order;
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn generic(mut self) -> Self {
        self.is_generic = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_targets_picks_the_populated_column() {
        let kind = ComponentKind::from_targets(None, None, Some(7), None, None).unwrap();
        assert_eq!(kind, ComponentKind::FinishedGood(7));
        assert_eq!(kind.target_id(), 7);
    }

    #[test]
    fn test_from_targets_without_target_is_invalid() {
        let err = ComponentKind::from_targets(None, None, None, None, None).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidInput);
    }

    #[test]
    fn test_packaging_is_classified() {
        let kind = ComponentKind::from_targets(None, None, None, None, Some(3)).unwrap();
        assert_eq!(kind, ComponentKind::Packaging(3));
    }
}
