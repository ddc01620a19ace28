pub mod chart;
pub mod dataset;
pub mod measurement;
pub mod pivot;
pub mod regression;
pub mod store;
pub mod table;
pub mod week;

pub use chart::render_fit_chart;
pub use dataset::{ColumnSeries, DatasetError, load_table};
pub use measurement::{Measurement, parse_cell};
pub use pivot::availability_pivot;
pub use regression::{LinearFit, RegressionError, fit};
pub use store::{
    AgendaStore, SlotUpdate, SqliteAgendaStore, StoreError, StoreResult, WeekSnapshot,
    load_week_from_json, save_availability_to_csv, save_week_to_json, snapshot_week,
};
pub use table::text_table;
pub use week::{
    AvailabilitySlot, DEFAULT_STATUS, DEFAULT_TEMPLATE_STAFF, Mission, WeekDay, week_span,
};
