// Integration tests for snapshot group lifecycle

mod common;

use common::*;
use kitledger_core::model::SnapshotTag;
use kitledger_core::SnapshotConfig;
use kitledger_store::snapshot::{
    create_finished_good_snapshot, create_finished_unit_snapshot, create_group, delete_group,
    get_group, get_groups_by_context,
};

fn capture_gift_box(conn: &rusqlite::Connection, ids: &GiftBox, group_id: i64) {
    create_finished_good_snapshot(
        conn,
        ids.gift_box,
        &SnapshotTag::for_group(group_id),
        &SnapshotConfig::default(),
    )
    .unwrap();
}

#[test]
fn test_get_group_aggregates_tagged_snapshots() {
    let conn = setup();
    let ids = seed_gift_box(&conn);
    let event = insert_event(&conn, "Holiday Market");
    let group = create_group(&conn, Some(event), Some("plan v1")).unwrap();
    capture_gift_box(&conn, &ids, group.id);

    let view = get_group(&conn, group.id, true).unwrap().unwrap();

    assert_eq!(view.group, group);
    assert_eq!(view.total_snapshots, 4);
    assert_eq!(view.finished_goods.len(), 2);
    assert_eq!(view.finished_units.len(), 1);
    assert_eq!(view.material_units.len(), 1);
    assert!(view.finished_goods.iter().all(|s| s.group_id == Some(group.id)));
}

#[test]
fn test_get_group_without_snapshots_is_bare() {
    let conn = setup();
    let ids = seed_gift_box(&conn);
    let group = create_group(&conn, None, None).unwrap();
    capture_gift_box(&conn, &ids, group.id);

    let view = get_group(&conn, group.id, false).unwrap().unwrap();

    assert_eq!(view.total_snapshots, 0);
    assert!(view.finished_goods.is_empty());
    assert_eq!(view.group.context_id, None);
}

#[test]
fn test_get_missing_group_is_none() {
    let conn = setup();
    assert!(get_group(&conn, 77, true).unwrap().is_none());
}

#[test]
fn test_delete_group_removes_all_tagged_snapshots() {
    let conn = setup();
    let ids = seed_gift_box(&conn);
    let group = create_group(&conn, None, None).unwrap();
    capture_gift_box(&conn, &ids, group.id);
    assert_eq!(total_snapshot_rows(&conn), 4);

    assert!(delete_group(&conn, group.id).unwrap());

    assert_eq!(total_snapshot_rows(&conn), 0);
    assert!(get_group(&conn, group.id, true).unwrap().is_none());
    assert!(!delete_group(&conn, group.id).unwrap());
}

#[test]
fn test_delete_missing_group_returns_false() {
    let conn = setup();
    assert!(!delete_group(&conn, 12345).unwrap());
}

#[test]
fn test_delete_group_leaves_other_groups_alone() {
    let conn = setup();
    let ids = seed_gift_box(&conn);
    let doomed = create_group(&conn, None, None).unwrap();
    let kept = create_group(&conn, None, None).unwrap();
    capture_gift_box(&conn, &ids, doomed.id);
    capture_gift_box(&conn, &ids, kept.id);
    create_finished_unit_snapshot(&conn, ids.cookie, &SnapshotTag::for_run(1)).unwrap();

    delete_group(&conn, doomed.id).unwrap();

    let view = get_group(&conn, kept.id, true).unwrap().unwrap();
    assert_eq!(view.total_snapshots, 4);
    // 4 from the surviving group plus the untagged run capture
    assert_eq!(total_snapshot_rows(&conn), 5);
}

#[test]
fn test_groups_by_context_are_chronological() {
    let conn = setup();
    let market = insert_event(&conn, "Market");
    let other = insert_event(&conn, "Other");
    let first = create_group(&conn, Some(market), Some("first")).unwrap();
    create_group(&conn, Some(other), None).unwrap();
    let second = create_group(&conn, Some(market), Some("second")).unwrap();
    let third = create_group(&conn, Some(market), Some("third")).unwrap();

    let groups = get_groups_by_context(&conn, market).unwrap();

    let ids: Vec<i64> = groups.iter().map(|g| g.id).collect();
    assert_eq!(ids, vec![first.id, second.id, third.id]);
    assert!(groups.windows(2).all(|w| w[0].created_at <= w[1].created_at));
}

#[test]
fn test_deleting_context_keeps_group() {
    let conn = setup();
    let ids = seed_gift_box(&conn);
    let event = insert_event(&conn, "Cancelled Fair");
    let group = create_group(&conn, Some(event), None).unwrap();
    capture_gift_box(&conn, &ids, group.id);

    conn.execute("DELETE FROM events WHERE id = ?1", [event])
        .unwrap();

    let view = get_group(&conn, group.id, true).unwrap().unwrap();
    assert_eq!(view.group.context_id, None);
    assert_eq!(view.total_snapshots, 4);
    assert!(get_groups_by_context(&conn, event).unwrap().is_empty());
}

#[test]
fn test_group_for_unknown_context_is_rejected() {
    let conn = setup();
    assert!(create_group(&conn, Some(404), None).is_err());
}
