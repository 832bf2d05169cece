use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Number of cells in a month grid (6 weeks of 7 days)
pub const GRID_CELL_COUNT: usize = 42;

/// Shortest average cycle length the tracker accepts
pub const MIN_CYCLE_LENGTH: u32 = 21;

/// Longest average cycle length the tracker accepts
pub const MAX_CYCLE_LENGTH: u32 = 35;

/// Cycle length shown before the user adjusts anything
pub const DEFAULT_CYCLE_LENGTH: u32 = 28;

/// A single cell of the month grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarCell {
    /// Day number displayed in the cell (1-31)
    pub day: u32,
    /// False for the leading and trailing padding cells
    pub is_current_month: bool,
}

impl CalendarCell {
    /// Cell for a day of the displayed month
    pub fn current(day: u32) -> Self {
        Self { day, is_current_month: true }
    }

    /// Padding cell belonging to the previous or following month
    pub fn adjacent(day: u32) -> Self {
        Self { day, is_current_month: false }
    }
}

/// A displayed month: 42 cells in row-major, Sunday-first order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarMonth {
    pub year: i32,
    pub month: u32,
    pub first_day_of_week: u32, // 0 = Sunday, 1 = Monday, etc.
    pub cells: Vec<CalendarCell>,
}

impl CalendarMonth {
    /// Iterate the grid one week (row) at a time
    pub fn weeks(&self) -> impl Iterator<Item = &[CalendarCell]> {
        self.cells.chunks(7)
    }

    /// Cells belonging to the displayed month, in order
    pub fn current_month_cells(&self) -> impl Iterator<Item = &CalendarCell> {
        self.cells.iter().filter(|cell| cell.is_current_month)
    }
}

/// A grid cell with the render flags the calendar screen needs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarCellView {
    pub day: u32,
    pub is_current_month: bool,
    pub is_today: bool,
    pub is_selected: bool,
    /// Day of the displayed month strictly after today
    pub is_future: bool,
    pub is_selectable: bool,
}

/// Dates derived from a period start date and a cycle length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CyclePrediction {
    pub next_period_date: NaiveDate,
    pub ovulation_date: NaiveDate,
    pub fertile_window_start: NaiveDate,
    pub fertile_window_end: NaiveDate,
}

impl CyclePrediction {
    /// Whether `date` falls inside the fertile window (inclusive)
    pub fn is_in_fertile_window(&self, date: NaiveDate) -> bool {
        date >= self.fertile_window_start && date <= self.fertile_window_end
    }
}

/// Display-ready values for the prediction screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionSummary {
    pub next_period_day: u32,
    pub next_period_month_label: String, // e.g., "JAN"
    pub days_left: i64,
    pub fertile_window_label: String, // e.g., "JAN 10 - 16"
}

/// Step of the selection wizard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlowStep {
    /// Calendar screen, waiting for the first day of the last period
    #[default]
    AwaitingDate,
    /// Cycle length screen
    AwaitingCycleLength,
    /// Prediction screen
    ShowingPrediction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentDateResponse {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub formatted_date: String, // e.g., "June 19, 2025"
    pub iso_date: String,       // e.g., "2025-06-19"
}

/// Tracker configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CycleTrackerConfig {
    /// Cycle length the wizard starts with
    pub default_cycle_length: u32,
    /// Default tracing filter when RUST_LOG is not set
    pub log_level: String,
}

impl Default for CycleTrackerConfig {
    fn default() -> Self {
        Self {
            default_cycle_length: DEFAULT_CYCLE_LENGTH,
            log_level: "info".to_string(),
        }
    }
}
