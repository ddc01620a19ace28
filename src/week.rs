use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Status a freshly seeded availability slot starts with.
pub const DEFAULT_STATUS: &str = "Livre";

/// Staff record whose time ranges are copied when seeding a new schedule.
pub const DEFAULT_TEMPLATE_STAFF: &str = "Geral";

/// The five working days of the schedule grid, stored under their
/// lower-case labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekDay {
    Segunda,
    Terca,
    Quarta,
    Quinta,
    Sexta,
}

impl WeekDay {
    pub const ALL: [WeekDay; 5] = [
        WeekDay::Segunda,
        WeekDay::Terca,
        WeekDay::Quarta,
        WeekDay::Quinta,
        WeekDay::Sexta,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            WeekDay::Segunda => "segunda",
            WeekDay::Terca => "terca",
            WeekDay::Quarta => "quarta",
            WeekDay::Quinta => "quinta",
            WeekDay::Sexta => "sexta",
        }
    }
}

impl fmt::Display for WeekDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWeekDayError(pub String);

impl fmt::Display for ParseWeekDayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown week day '{}'", self.0)
    }
}

impl std::error::Error for ParseWeekDayError {}

impl FromStr for WeekDay {
    type Err = ParseWeekDayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "segunda" => Ok(WeekDay::Segunda),
            "terca" => Ok(WeekDay::Terca),
            "quarta" => Ok(WeekDay::Quarta),
            "quinta" => Ok(WeekDay::Quinta),
            "sexta" => Ok(WeekDay::Sexta),
            other => Err(ParseWeekDayError(other.to_string())),
        }
    }
}

/// Fallback template when no template staff exists: hourly slots from
/// 08:00 to 23:00.
pub fn default_time_slots() -> Vec<String> {
    (8..23)
        .map(|h| format!("{:02}:00 as {:02}:00", h, h + 1))
        .collect()
}

/// One (day, time-range) cell of a staff member's weekly grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilitySlot {
    pub id: i64,
    pub staff: String,
    pub day: WeekDay,
    pub time_range: String,
    pub status: String,
}

/// A to-do item associated with one staff member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mission {
    pub id: i64,
    pub staff: String,
    pub text: String,
    pub completed: bool,
}

/// Monday and Friday of the week containing `today`.
pub fn week_span(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let monday = today - Duration::days(today.weekday().num_days_from_monday() as i64);
    (monday, monday + Duration::days(4))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn week_span_from_midweek() {
        let (monday, friday) = week_span(d(2025, 6, 11));
        assert_eq!(monday, d(2025, 6, 9));
        assert_eq!(friday, d(2025, 6, 13));
    }

    #[test]
    fn week_span_from_sunday() {
        let (monday, friday) = week_span(d(2025, 6, 15));
        assert_eq!(monday, d(2025, 6, 9));
        assert_eq!(friday, d(2025, 6, 13));
    }

    #[test]
    fn week_day_round_trips_through_labels() {
        for day in WeekDay::ALL {
            assert_eq!(day.as_str().parse::<WeekDay>().unwrap(), day);
        }
        assert!("domingo".parse::<WeekDay>().is_err());
    }

    #[test]
    fn default_template_has_fifteen_hourly_slots() {
        let slots = default_time_slots();
        assert_eq!(slots.len(), 15);
        assert_eq!(slots[0], "08:00 as 09:00");
        assert_eq!(slots[14], "22:00 as 23:00");
    }
}
