use std::thread;
use std::time::Duration;

use health_tracker::maintenance;
use health_tracker::{Metric, SqliteStore, UserProfile};
use tempfile::TempDir;

fn temp_store() -> (TempDir, SqliteStore) {
    let dir = tempfile::tempdir().unwrap();
    let store = SqliteStore::open(&dir.path().join("health_tracker.db")).unwrap();
    (dir, store)
}

#[test]
fn entries_match_number_of_adds_for_every_metric() {
    let (_dir, store) = temp_store();
    for metric in Metric::all() {
        for value in [1.0, 2.5, 3.75, 4.0] {
            store.add_entry(*metric, value).unwrap();
        }
        let entries = store.entries(*metric).unwrap();
        assert_eq!(entries.len(), 4);
        assert!(entries.windows(2).all(|w| w[0].created_at <= w[1].created_at));
        let values: Vec<f64> = entries.iter().map(|e| e.value).collect();
        assert_eq!(values, vec![1.0, 2.5, 3.75, 4.0]);
    }
}

#[test]
fn latest_value_round_trips_rounded() {
    let (_dir, store) = temp_store();
    let cases = [
        (70.456, 70.46),
        (0.125, 0.12),
        (0.375, 0.38),
        (2.675, 2.67),
        (0.015, 0.01),
        (0.025, 0.03),
        (99.999, 100.0),
    ];
    for (input, expected) in cases {
        store.add_weight(input).unwrap();
        let latest = store.get_weight_entries().unwrap().into_iter().max_by_key(|e| e.id).unwrap();
        assert_eq!(latest.value, expected, "stored {input}");
    }
}

#[test]
fn schema_init_twice_is_harmless() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("health_tracker.db");
    let first = SqliteStore::open(&path).unwrap();
    first.add_water(8.0).unwrap();

    let second = SqliteStore::open(&path).unwrap();
    second.initialize_schema().unwrap();
    assert_eq!(second.table_names().unwrap().len(), 4);
    assert_eq!(second.get_water_history().unwrap().len(), 1);
}

#[test]
fn delete_removes_only_that_row_and_repeats_quietly() {
    let (_dir, store) = temp_store();
    store.add_distance(2.5).unwrap();
    store.add_distance(1.0).unwrap();
    store.add_distance(3.25).unwrap();

    let entries = store.get_distance_entries().unwrap();
    let target = entries[1].id;
    store.delete_distance(target).unwrap();

    let remaining = store.get_distance_entries().unwrap();
    assert_eq!(remaining.len(), 2);
    assert_eq!(remaining[0], entries[0]);
    assert_eq!(remaining[1], entries[2]);

    store.delete_distance(target).unwrap();
    assert_eq!(store.get_distance_entries().unwrap(), remaining);
}

#[test]
fn profile_absent_then_saved() {
    let (_dir, store) = temp_store();
    assert!(store.get_profile().unwrap().is_none());

    let profile = UserProfile::new("Jane", "Doe")
        .with_gender("Female")
        .with_age(30)
        .with_height_inches(65.0);
    store.save_profile(&profile).unwrap();
    assert_eq!(store.get_profile().unwrap(), Some(profile));
}

#[test]
fn profile_save_replaces_instead_of_merging() {
    let (_dir, store) = temp_store();
    store
        .save_profile(&UserProfile::new("Old", "Name").with_gender("Other").with_age(30))
        .unwrap();
    store
        .save_profile(&UserProfile {
            first_name: "New".to_string(),
            ..Default::default()
        })
        .unwrap();

    let loaded = store.get_profile().unwrap().unwrap();
    assert_eq!(loaded.first_name, "New");
    assert_eq!(loaded.last_name, "");
    assert_eq!(loaded.gender, "");
    assert_eq!(loaded.age, None);
    assert_eq!(loaded.height_inches, None);
}

#[test]
fn weight_history_end_to_end() {
    let (_dir, store) = temp_store();
    // CURRENT_TIMESTAMP has one-second resolution
    store.add_weight(70.5).unwrap();
    thread::sleep(Duration::from_millis(1100));
    store.add_weight(71.0).unwrap();
    thread::sleep(Duration::from_millis(1100));
    store.add_weight(71.25).unwrap();

    let history = store.get_weight_history().unwrap();
    let values: Vec<f64> = history.iter().map(|p| p.value).collect();
    assert_eq!(values, vec![70.5, 71.0, 71.25]);
    assert!(history[0].created_at < history[1].created_at);
    assert!(history[1].created_at < history[2].created_at);

    let middle = store
        .get_weight_entries()
        .unwrap()
        .into_iter()
        .find(|e| e.value == 71.0)
        .unwrap();
    store.delete_weight(middle.id).unwrap();

    let after = store.get_weight_history().unwrap();
    assert_eq!(after, vec![history[0].clone(), history[2].clone()]);
}

#[test]
fn backup_restore_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("health_tracker.db");
    let backup = dir.path().join("health_tracker_backup.db");

    let store = SqliteStore::open(&db).unwrap();
    store.add_weight(70.0).unwrap();
    maintenance::create_backup(&db, &backup, false).unwrap();

    store.add_weight(80.0).unwrap();
    assert_eq!(store.count(Metric::Weight).unwrap(), 2);

    let report = maintenance::restore_backup(&backup, &db).unwrap();
    assert_eq!(report.safety_copy, Some(dir.path().join("health_tracker.db.bak")));
    assert_eq!(store.count(Metric::Weight).unwrap(), 1);

    let aside = SqliteStore::open(&dir.path().join("health_tracker.db.bak")).unwrap();
    assert_eq!(aside.count(Metric::Weight).unwrap(), 2);
}

#[test]
fn migrate_appends_to_existing_target() {
    let dir = tempfile::tempdir().unwrap();
    let source = SqliteStore::open(&dir.path().join("health_tacker.db")).unwrap();
    source.add_weight(70.0).unwrap();
    source.add_water(16.0).unwrap();
    source.add_water(8.0).unwrap();
    source.save_profile(&UserProfile::new("Jane", "Doe")).unwrap();

    let target = SqliteStore::open(&dir.path().join("health_tracker.db")).unwrap();
    target.add_weight(72.0).unwrap();

    let report = maintenance::migrate(source.path(), target.path()).unwrap();
    assert_eq!(report.total(), 3);
    assert_eq!(target.count(Metric::Weight).unwrap(), 2);
    assert_eq!(target.count(Metric::Water).unwrap(), 2);
    assert!(target.get_profile().unwrap().is_none());
}
