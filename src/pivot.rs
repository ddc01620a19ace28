use crate::week::{AvailabilitySlot, WeekDay};
use polars::prelude::*;
use std::collections::HashMap;

/// Distinct time ranges in first-seen order plus a (day, time) -> status
/// lookup. The order is the store's row order, stable per staff member
/// since the grid is seeded once.
pub fn grid_rows(
    slots: &[AvailabilitySlot],
) -> (Vec<String>, HashMap<(WeekDay, String), String>) {
    let mut times: Vec<String> = Vec::new();
    let mut statuses = HashMap::with_capacity(slots.len());
    for slot in slots {
        if !times.contains(&slot.time_range) {
            times.push(slot.time_range.clone());
        }
        statuses.insert((slot.day, slot.time_range.clone()), slot.status.clone());
    }
    (times, statuses)
}

/// Reshapes availability rows into a table with one row per time range and
/// one column per day. Presentation only; the store keeps the flat rows.
pub fn availability_pivot(slots: &[AvailabilitySlot]) -> PolarsResult<DataFrame> {
    let (times, statuses) = grid_rows(slots);

    let mut columns: Vec<Column> = Vec::with_capacity(1 + WeekDay::ALL.len());
    columns.push(Series::new("Tempo".into(), times.clone()).into_column());
    for day in WeekDay::ALL {
        let values: Vec<String> = times
            .iter()
            .map(|time| {
                statuses
                    .get(&(day, time.clone()))
                    .cloned()
                    .unwrap_or_default()
            })
            .collect();
        columns.push(Series::new(day.as_str().into(), values).into_column());
    }
    DataFrame::new(columns)
}
