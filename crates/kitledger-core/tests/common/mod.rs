#![allow(dead_code)]

use kitledger_core::model::{
    ComponentKind, ComponentRef, FinishedGood, FinishedUnit, Material, MaterialRef, MaterialUnit,
    RecipeRef,
};
use kitledger_core::MemoryCatalog;

pub const GIFT_BOX: i64 = 100;
pub const RIBBON_SET: i64 = 200;
pub const COOKIE: i64 = 1;
pub const RIBBON: i64 = 2;

/// GiftBox = [Cookie x12, RibbonSet x1]; RibbonSet = [Ribbon x2]
pub fn gift_box_catalog() -> MemoryCatalog {
    let mut catalog = MemoryCatalog::new();

    let mut cookie = FinishedUnit::new(COOKIE, "sugar-cookie", "Cookie");
    cookie.recipe = Some(RecipeRef {
        id: 10,
        name: "Sugar Cookies".to_string(),
        category: Some("Cookies".to_string()),
    });
    cookie.items_per_batch = Some(48);
    catalog.insert_finished_unit(cookie);

    let mut ribbon = MaterialUnit::new(RIBBON, "red-ribbon", "Ribbon");
    ribbon.material = Some(MaterialRef {
        id: 20,
        name: "Satin Ribbon".to_string(),
        category: Some("Ribbons".to_string()),
    });
    catalog.insert_material_unit(ribbon);

    let mut gift_box = FinishedGood::new(GIFT_BOX, "gift-box", "GiftBox");
    gift_box.assembly_type = Some("gift_box".to_string());
    catalog.insert_finished_good(gift_box);
    catalog.insert_finished_good(FinishedGood::new(RIBBON_SET, "ribbon-set", "RibbonSet"));

    catalog.add_component(
        ComponentRef::new(1, GIFT_BOX, ComponentKind::FinishedUnit(COOKIE), 12.0)
            .with_sort_order(0),
    );
    catalog.add_component(
        ComponentRef::new(2, GIFT_BOX, ComponentKind::FinishedGood(RIBBON_SET), 1.0)
            .with_sort_order(1),
    );
    catalog.add_component(
        ComponentRef::new(3, RIBBON_SET, ComponentKind::MaterialUnit(RIBBON), 2.0)
            .with_sort_order(0),
    );

    catalog
}

/// Root finished good 1 with `nested` levels of finished goods beneath it.
///
/// Goods are numbered 1..=nested+1; the innermost one holds a single cookie.
pub fn chain_catalog(nested: i64) -> MemoryCatalog {
    let mut catalog = MemoryCatalog::new();
    catalog.insert_finished_unit(FinishedUnit::new(COOKIE, "cookie", "Cookie"));

    for id in 1..=nested + 1 {
        catalog.insert_finished_good(FinishedGood::new(
            id,
            format!("level-{id}"),
            format!("Level {id}"),
        ));
        let kind = if id <= nested {
            ComponentKind::FinishedGood(id + 1)
        } else {
            ComponentKind::FinishedUnit(COOKIE)
        };
        catalog.add_component(ComponentRef::new(id, id, kind, 1.0));
    }

    catalog
}

pub fn add_material(catalog: &mut MemoryCatalog, id: i64, name: &str) {
    let mut material = Material::new(id, name);
    material.slug = Some(name.to_lowercase().replace(' ', "-"));
    catalog.insert_material(material);
}
