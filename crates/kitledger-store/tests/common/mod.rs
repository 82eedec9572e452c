#![allow(dead_code)]

use kitledger_core::model::ComponentKind;
use kitledger_store::db;
use kitledger_store::migrations::apply_migrations;
use rusqlite::{params, Connection};
use tempfile::TempDir;

/// Fresh in-memory database, migrated and configured
pub fn setup() -> Connection {
    let mut conn = db::open_in_memory().unwrap();
    apply_migrations(&mut conn).unwrap();
    db::configure(&conn).unwrap();
    conn
}

/// On-disk database in a scratch directory
pub fn setup_on_disk() -> (TempDir, Connection) {
    let dir = TempDir::new().unwrap();
    let mut conn = db::open(dir.path().join("kitledger.db")).unwrap();
    apply_migrations(&mut conn).unwrap();
    db::configure(&conn).unwrap();
    (dir, conn)
}

pub fn insert_event(conn: &Connection, name: &str) -> i64 {
    conn.execute(
        "INSERT INTO events (name, created_at) VALUES (?1, 0)",
        [name],
    )
    .unwrap();
    conn.last_insert_rowid()
}

pub fn insert_recipe(conn: &Connection, name: &str, category: Option<&str>) -> i64 {
    conn.execute(
        "INSERT INTO recipes (name, category) VALUES (?1, ?2)",
        params![name, category],
    )
    .unwrap();
    conn.last_insert_rowid()
}

pub fn insert_finished_unit(
    conn: &Connection,
    slug: &str,
    display_name: &str,
    recipe_id: Option<i64>,
) -> i64 {
    conn.execute(
        "INSERT INTO finished_units (slug, display_name, recipe_id, items_per_batch)
         VALUES (?1, ?2, ?3, 24)",
        params![slug, display_name, recipe_id],
    )
    .unwrap();
    conn.last_insert_rowid()
}

pub fn insert_material(conn: &Connection, slug: &str, name: &str) -> i64 {
    conn.execute(
        "INSERT INTO materials (slug, name, category) VALUES (?1, ?2, 'Ribbons')",
        params![slug, name],
    )
    .unwrap();
    conn.last_insert_rowid()
}

pub fn insert_material_unit(
    conn: &Connection,
    slug: &str,
    name: &str,
    material_id: Option<i64>,
) -> i64 {
    conn.execute(
        "INSERT INTO material_units (slug, name, quantity_per_unit, material_id)
         VALUES (?1, ?2, 1.5, ?3)",
        params![slug, name, material_id],
    )
    .unwrap();
    conn.last_insert_rowid()
}

pub fn insert_finished_good(conn: &Connection, slug: &str, display_name: &str) -> i64 {
    conn.execute(
        "INSERT INTO finished_goods (slug, display_name) VALUES (?1, ?2)",
        params![slug, display_name],
    )
    .unwrap();
    conn.last_insert_rowid()
}

/// Add a composition row pointing at `kind`'s target
pub fn add_component(
    conn: &Connection,
    assembly_id: i64,
    kind: ComponentKind,
    quantity: f64,
    sort_order: i64,
) -> i64 {
    let column = match kind {
        ComponentKind::FinishedUnit(_) => "finished_unit_id",
        ComponentKind::MaterialUnit(_) => "material_unit_id",
        ComponentKind::FinishedGood(_) => "finished_good_id",
        ComponentKind::Material(_) => "material_id",
        ComponentKind::Packaging(_) => "packaging_product_id",
    };
    let is_generic = matches!(kind, ComponentKind::Material(_));
    conn.execute(
        &format!(
            "INSERT INTO compositions
                (assembly_id, {column}, component_quantity, sort_order, is_generic)
             VALUES (?1, ?2, ?3, ?4, ?5)"
        ),
        params![assembly_id, kind.target_id(), quantity, sort_order, is_generic],
    )
    .unwrap();
    conn.last_insert_rowid()
}

/// Ids of the GiftBox fixture
pub struct GiftBox {
    pub gift_box: i64,
    pub ribbon_set: i64,
    pub cookie: i64,
    pub ribbon: i64,
    pub satin: i64,
}

/// GiftBox = [Cookie x12, RibbonSet x1]; RibbonSet = [Ribbon x2]
pub fn seed_gift_box(conn: &Connection) -> GiftBox {
    let recipe = insert_recipe(conn, "Sugar Cookies", Some("Cookies"));
    let cookie = insert_finished_unit(conn, "sugar-cookie", "Cookie", Some(recipe));
    let satin = insert_material(conn, "satin-ribbon", "Satin Ribbon");
    let ribbon = insert_material_unit(conn, "red-ribbon", "Ribbon", Some(satin));
    let gift_box = insert_finished_good(conn, "gift-box", "GiftBox");
    let ribbon_set = insert_finished_good(conn, "ribbon-set", "RibbonSet");

    add_component(conn, gift_box, ComponentKind::FinishedUnit(cookie), 12.0, 0);
    add_component(conn, gift_box, ComponentKind::FinishedGood(ribbon_set), 1.0, 1);
    add_component(conn, ribbon_set, ComponentKind::MaterialUnit(ribbon), 2.0, 0);

    GiftBox {
        gift_box,
        ribbon_set,
        cookie,
        ribbon,
        satin,
    }
}

pub fn count_rows(conn: &Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))
        .unwrap()
}

/// Rows across all three snapshot tables
pub fn total_snapshot_rows(conn: &Connection) -> i64 {
    count_rows(conn, "finished_unit_snapshots")
        + count_rows(conn, "material_unit_snapshots")
        + count_rows(conn, "finished_good_snapshots")
}
