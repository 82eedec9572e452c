//! SQLite-backed catalog reader
//!
//! Read-only view over the live catalog tables. Each lookup joins the
//! item's parent grouping so leaf definitions can denormalize it.

#![allow(clippy::result_large_err)]

use crate::errors::{persistence, Result};
use kitledger_core::model::{
    ComponentKind, ComponentRef, FinishedGood, FinishedUnit, Material, MaterialRef, MaterialUnit,
    RecipeRef,
};
use kitledger_core::CatalogReader;
use rusqlite::{Connection, OptionalExtension};

/// Catalog lookups against an open connection
///
/// Borrows the connection shared, so it can sit next to a
/// [`SqliteSink`](crate::snapshot::SqliteSink) inside one savepoint.
pub struct SqliteCatalog<'c> {
    conn: &'c Connection,
}

impl<'c> SqliteCatalog<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }
}

/// Composition row as stored, before its target is classified
struct CompositionRow {
    id: i64,
    assembly_id: i64,
    targets: [Option<i64>; 5],
    quantity: f64,
    notes: Option<String>,
    sort_order: i64,
    is_generic: bool,
}

impl CompositionRow {
    fn into_component(self) -> Result<ComponentRef> {
        let [fu, mu, fg, m, pp] = self.targets;
        let kind = ComponentKind::from_targets(fu, mu, fg, m, pp)
            .map_err(|e| e.with_entity_id(self.id))?;
        Ok(ComponentRef {
            id: self.id,
            assembly_id: self.assembly_id,
            kind,
            quantity: self.quantity,
            notes: self.notes,
            sort_order: self.sort_order,
            is_generic: self.is_generic,
        })
    }
}

impl CatalogReader for SqliteCatalog<'_> {
    fn finished_unit(&self, id: i64) -> Result<Option<FinishedUnit>> {
        self.conn
            .query_row(
                "SELECT fu.id, fu.slug, fu.display_name, fu.description, fu.yield_mode,
                        fu.items_per_batch, fu.item_unit, fu.batch_percentage,
                        fu.portion_description, fu.category, fu.production_notes, fu.notes,
                        r.id, r.name, r.category
                 FROM finished_units fu
                 LEFT JOIN recipes r ON r.id = fu.recipe_id
                 WHERE fu.id = ?1",
                [id],
                |row| {
                    let recipe = match row.get::<_, Option<i64>>(12)? {
                        Some(recipe_id) => Some(RecipeRef {
                            id: recipe_id,
                            name: row.get(13)?,
                            category: row.get(14)?,
                        }),
                        None => None,
                    };
                    Ok(FinishedUnit {
                        id: row.get(0)?,
                        slug: row.get(1)?,
                        display_name: row.get(2)?,
                        description: row.get(3)?,
                        recipe,
                        yield_mode: row.get(4)?,
                        items_per_batch: row.get(5)?,
                        item_unit: row.get(6)?,
                        batch_percentage: row.get(7)?,
                        portion_description: row.get(8)?,
                        category: row.get(9)?,
                        production_notes: row.get(10)?,
                        notes: row.get(11)?,
                    })
                },
            )
            .optional()
            .map_err(|e| persistence("load_finished_unit", e))
    }

    fn material_unit(&self, id: i64) -> Result<Option<MaterialUnit>> {
        self.conn
            .query_row(
                "SELECT mu.id, mu.slug, mu.name, mu.description, mu.quantity_per_unit,
                        m.id, m.name, m.category
                 FROM material_units mu
                 LEFT JOIN materials m ON m.id = mu.material_id
                 WHERE mu.id = ?1",
                [id],
                |row| {
                    let material = match row.get::<_, Option<i64>>(5)? {
                        Some(material_id) => Some(MaterialRef {
                            id: material_id,
                            name: row.get(6)?,
                            category: row.get(7)?,
                        }),
                        None => None,
                    };
                    Ok(MaterialUnit {
                        id: row.get(0)?,
                        slug: row.get(1)?,
                        name: row.get(2)?,
                        description: row.get(3)?,
                        quantity_per_unit: row.get(4)?,
                        material,
                    })
                },
            )
            .optional()
            .map_err(|e| persistence("load_material_unit", e))
    }

    fn material(&self, id: i64) -> Result<Option<Material>> {
        self.conn
            .query_row(
                "SELECT id, slug, name, category, base_unit_type FROM materials WHERE id = ?1",
                [id],
                |row| {
                    Ok(Material {
                        id: row.get(0)?,
                        slug: row.get(1)?,
                        name: row.get(2)?,
                        category: row.get(3)?,
                        base_unit_type: row.get(4)?,
                    })
                },
            )
            .optional()
            .map_err(|e| persistence("load_material", e))
    }

    fn finished_good(&self, id: i64) -> Result<Option<FinishedGood>> {
        self.conn
            .query_row(
                "SELECT id, slug, display_name, description, assembly_type,
                        packaging_instructions, notes
                 FROM finished_goods WHERE id = ?1",
                [id],
                |row| {
                    Ok(FinishedGood {
                        id: row.get(0)?,
                        slug: row.get(1)?,
                        display_name: row.get(2)?,
                        description: row.get(3)?,
                        assembly_type: row.get(4)?,
                        packaging_instructions: row.get(5)?,
                        notes: row.get(6)?,
                    })
                },
            )
            .optional()
            .map_err(|e| persistence("load_finished_good", e))
    }

    fn components(&self, assembly_id: i64) -> Result<Vec<ComponentRef>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, assembly_id, finished_unit_id, material_unit_id, finished_good_id,
                        material_id, packaging_product_id, component_quantity, component_notes,
                        sort_order, is_generic
                 FROM compositions WHERE assembly_id = ?1
                 ORDER BY id",
            )
            .map_err(|e| persistence("load_components", e))?;

        let rows = stmt
            .query_map([assembly_id], |row| {
                Ok(CompositionRow {
                    id: row.get(0)?,
                    assembly_id: row.get(1)?,
                    targets: [row.get(2)?, row.get(3)?, row.get(4)?, row.get(5)?, row.get(6)?],
                    quantity: row.get(7)?,
                    notes: row.get(8)?,
                    sort_order: row.get(9)?,
                    is_generic: row.get(10)?,
                })
            })
            .map_err(|e| persistence("load_components", e))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| persistence("load_components", e))?;

        rows.into_iter()
            .map(CompositionRow::into_component)
            .collect()
    }
}
