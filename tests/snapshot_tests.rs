use labweek::{
    AgendaStore, SlotUpdate, SqliteAgendaStore, WeekDay, load_week_from_json,
    save_availability_to_csv, save_week_to_json,
};
use std::fs;
use tempfile::NamedTempFile;

fn seeded_store() -> (NamedTempFile, SqliteAgendaStore) {
    let file = NamedTempFile::new().expect("temp db file");
    let store = SqliteAgendaStore::new(file.path()).expect("open store");
    store.add_staff("Alice", "Fisica").expect("add staff");
    (file, store)
}

#[test]
fn json_snapshot_round_trips_statuses_and_missions() {
    let (_file, store) = seeded_store();

    let update = SlotUpdate {
        day: WeekDay::Quarta,
        time_range: "14:00 as 15:00".to_string(),
        status: "Aula".to_string(),
    };
    store
        .set_availability("Alice", std::slice::from_ref(&update))
        .expect("update");
    let mission_id = store
        .add_mission("Alice", "Calibrate the rig")
        .expect("add mission");

    let snapshot_file = NamedTempFile::new().expect("temp json file");
    save_week_to_json(&store, "Alice", snapshot_file.path()).expect("save");

    // Wipe the changes, then restore.
    let revert = SlotUpdate {
        day: WeekDay::Quarta,
        time_range: "14:00 as 15:00".to_string(),
        status: "Livre".to_string(),
    };
    store
        .set_availability("Alice", std::slice::from_ref(&revert))
        .expect("revert");
    store.delete_mission(mission_id).expect("delete mission");
    assert!(store.pending_missions("Alice").expect("pending").is_empty());

    let snapshot = load_week_from_json(&store, snapshot_file.path()).expect("load");
    assert_eq!(snapshot.staff, "Alice");

    let slots = store.get_availability("Alice").expect("availability");
    let restored = slots
        .iter()
        .find(|slot| slot.day == WeekDay::Quarta && slot.time_range == "14:00 as 15:00")
        .expect("slot exists");
    assert_eq!(restored.status, "Aula");

    let pending = store.pending_missions("Alice").expect("pending");
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].text, "Calibrate the rig");
}

#[test]
fn restoring_twice_does_not_duplicate_missions() {
    let (_file, store) = seeded_store();
    store.add_mission("Alice", "Write the report").expect("add");

    let snapshot_file = NamedTempFile::new().expect("temp json file");
    save_week_to_json(&store, "Alice", snapshot_file.path()).expect("save");

    load_week_from_json(&store, snapshot_file.path()).expect("first load");
    load_week_from_json(&store, snapshot_file.path()).expect("second load");

    let pending = store.pending_missions("Alice").expect("pending");
    assert_eq!(pending.len(), 1);
}

#[test]
fn csv_export_is_the_pivoted_grid() {
    let (_file, store) = seeded_store();

    let csv_file = NamedTempFile::new().expect("temp csv file");
    save_availability_to_csv(&store, "Alice", csv_file.path()).expect("save csv");

    let content = fs::read_to_string(csv_file.path()).expect("read csv");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 16);
    assert_eq!(lines[0], "Tempo,segunda,terca,quarta,quinta,sexta");
    assert!(lines[1].starts_with("08:00 as 09:00"));
    assert!(lines[15].starts_with("22:00 as 23:00"));
}
