use super::{AgendaStore, SlotUpdate, StoreResult};
use crate::pivot::grid_rows;
use crate::week::{AvailabilitySlot, Mission, WeekDay};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

/// Everything the store holds for one staff member, in file form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekSnapshot {
    pub staff: String,
    pub availability: Vec<AvailabilitySlot>,
    pub missions: Vec<Mission>,
}

pub fn snapshot_week(store: &dyn AgendaStore, staff: &str) -> StoreResult<WeekSnapshot> {
    let availability = store.get_availability(staff)?;
    let mut missions = store.pending_missions(staff)?;
    missions.extend(store.completed_missions(staff)?);
    Ok(WeekSnapshot {
        staff: staff.to_string(),
        availability,
        missions,
    })
}

pub fn save_week_to_json<P: AsRef<Path>>(
    store: &dyn AgendaStore,
    staff: &str,
    path: P,
) -> StoreResult<()> {
    let snapshot = snapshot_week(store, staff)?;
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, &snapshot)?;
    Ok(())
}

/// Restores a snapshot into the store: statuses are written back cell by
/// cell, and pending missions absent from the store are re-added.
/// Completed missions are history and are not recreated.
pub fn load_week_from_json<P: AsRef<Path>>(
    store: &dyn AgendaStore,
    path: P,
) -> StoreResult<WeekSnapshot> {
    let file = File::open(path)?;
    let snapshot: WeekSnapshot = serde_json::from_reader(file)?;

    let updates: Vec<SlotUpdate> = snapshot
        .availability
        .iter()
        .map(|slot| SlotUpdate {
            day: slot.day,
            time_range: slot.time_range.clone(),
            status: slot.status.clone(),
        })
        .collect();
    store.set_availability(&snapshot.staff, &updates)?;

    let present: Vec<String> = store
        .pending_missions(&snapshot.staff)?
        .into_iter()
        .map(|mission| mission.text)
        .collect();
    for mission in &snapshot.missions {
        if !mission.completed && !mission.text.is_empty() && !present.contains(&mission.text) {
            store.add_mission(&snapshot.staff, &mission.text)?;
        }
    }

    Ok(snapshot)
}

/// Writes the pivoted availability grid as CSV: a `Tempo` column followed
/// by the five day columns, one row per time range in store order.
pub fn save_availability_to_csv<P: AsRef<Path>>(
    store: &dyn AgendaStore,
    staff: &str,
    path: P,
) -> StoreResult<()> {
    let slots = store.get_availability(staff)?;
    let (times, statuses) = grid_rows(&slots);

    let mut writer = csv::Writer::from_path(path)?;
    let mut header = vec!["Tempo".to_string()];
    header.extend(WeekDay::ALL.iter().map(|day| day.as_str().to_string()));
    writer.write_record(&header)?;

    for time in &times {
        let mut record = vec![time.clone()];
        for day in WeekDay::ALL {
            record.push(
                statuses
                    .get(&(day, time.clone()))
                    .cloned()
                    .unwrap_or_default(),
            );
        }
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}
