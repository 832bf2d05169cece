//! Calendar domain logic for the cycle tracker.
//!
//! This module builds the 42-cell month grid shown on the "last period"
//! screen and owns the date rules around it: month lengths, month
//! navigation, header labels and which cells may be selected. The UI only
//! draws what this module returns.
//!
//! The grid is always six Sunday-first weeks. Leading cells carry the real
//! day numbers of the previous month. Trailing cells are numbered from 1
//! upwards without consulting the following month's length.

use chrono::{Datelike, Days, NaiveDate};
use shared::{CalendarCell, CalendarCellView, CalendarMonth, CurrentDateResponse, GRID_CELL_COUNT};
use thiserror::Error;
use tracing::debug;

use crate::clock::Clock;

/// Single-letter weekday headers, Sunday first
pub const DAY_HEADERS: [&str; 7] = ["S", "M", "T", "W", "T", "F", "S"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalendarError {
    #[error("Invalid month: {0}. Must be between 1 and 12")]
    InvalidMonth(u32),
    #[error("Invalid date: {year:04}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: u32, day: u32 },
}

/// Calendar service that handles all calendar-related business logic
#[derive(Debug, Clone, Default)]
pub struct CalendarService;

impl CalendarService {
    pub fn new() -> Self {
        Self
    }

    /// Build the display grid for the month containing `month_reference`
    pub fn build_grid(&self, month_reference: NaiveDate) -> CalendarMonth {
        let year = month_reference.year();
        let month = month_reference.month();
        let first_of_month = month_reference - Days::new(u64::from(month_reference.day() - 1));
        let first_day = first_of_month.weekday().num_days_from_sunday();
        let days_in_month = self.days_in_month(year, month);

        let (prev_year, prev_month) = self.previous_month(year, month);
        let days_in_prev_month = self.days_in_month(prev_year, prev_month);

        let mut cells = Vec::with_capacity(GRID_CELL_COUNT);

        for i in 0..first_day {
            cells.push(CalendarCell::adjacent(days_in_prev_month - first_day + i + 1));
        }

        for day in 1..=days_in_month {
            cells.push(CalendarCell::current(day));
        }

        // Display-only padding: numbered from 1, not checked against next month
        let remaining = GRID_CELL_COUNT - cells.len();
        for day in 1..=remaining as u32 {
            cells.push(CalendarCell::adjacent(day));
        }

        debug!(
            "🗓️ Built grid for {:04}-{:02}: {} leading, {} month days, {} trailing",
            year, month, first_day, days_in_month, remaining
        );

        CalendarMonth {
            year,
            month,
            first_day_of_week: first_day,
            cells,
        }
    }

    /// Build the grid from a raw year and month
    pub fn generate_calendar_month(
        &self,
        year: i32,
        month: u32,
    ) -> Result<CalendarMonth, CalendarError> {
        let first_of_month = self.month_start(year, month)?;
        Ok(self.build_grid(first_of_month))
    }

    /// First day of the given month
    pub fn month_start(&self, year: i32, month: u32) -> Result<NaiveDate, CalendarError> {
        if !(1..=12).contains(&month) {
            return Err(CalendarError::InvalidMonth(month));
        }
        NaiveDate::from_ymd_opt(year, month, 1).ok_or(CalendarError::InvalidDate {
            year,
            month,
            day: 1,
        })
    }

    /// Get the number of days in a given month and year
    pub fn days_in_month(&self, year: i32, month: u32) -> u32 {
        match month {
            2 => {
                if self.is_leap_year(year) {
                    29
                } else {
                    28
                }
            }
            4 | 6 | 9 | 11 => 30,
            _ => 31,
        }
    }

    pub fn is_leap_year(&self, year: i32) -> bool {
        year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
    }

    /// Get the first day of month (0 = Sunday, 1 = Monday, etc.)
    pub fn first_day_of_month(&self, year: i32, month: u32) -> Result<u32, CalendarError> {
        let first_of_month = self.month_start(year, month)?;
        Ok(first_of_month.weekday().num_days_from_sunday())
    }

    pub fn previous_month(&self, year: i32, month: u32) -> (i32, u32) {
        if month <= 1 {
            (year - 1, 12)
        } else {
            (year, month - 1)
        }
    }

    pub fn next_month(&self, year: i32, month: u32) -> (i32, u32) {
        if month >= 12 {
            (year + 1, 1)
        } else {
            (year, month + 1)
        }
    }

    /// Three-letter uppercase month name used in headers and labels
    pub fn month_abbreviation(&self, month: u32) -> &'static str {
        match month {
            1 => "JAN", 2 => "FEB", 3 => "MAR", 4 => "APR",
            5 => "MAY", 6 => "JUN", 7 => "JUL", 8 => "AUG",
            9 => "SEP", 10 => "OCT", 11 => "NOV", 12 => "DEC",
            _ => "???",
        }
    }

    pub fn month_name(&self, month: u32) -> &'static str {
        match month {
            1 => "January", 2 => "February", 3 => "March", 4 => "April",
            5 => "May", 6 => "June", 7 => "July", 8 => "August",
            9 => "September", 10 => "October", 11 => "November", 12 => "December",
            _ => "Invalid Month",
        }
    }

    /// Calendar header text, e.g. "JAN '24"
    pub fn month_label(&self, year: i32, month: u32) -> String {
        format!("{} '{:02}", self.month_abbreviation(month), year.rem_euclid(100))
    }

    /// Absolute date of a grid cell, if it belongs to the displayed month
    pub fn date_for_cell(&self, grid: &CalendarMonth, cell: CalendarCell) -> Option<NaiveDate> {
        if !cell.is_current_month {
            return None;
        }
        NaiveDate::from_ymd_opt(grid.year, grid.month, cell.day)
    }

    /// Resolve a tapped cell to the date it selects.
    ///
    /// Padding cells and days strictly after `today` are not selectable and
    /// yield `None`.
    pub fn resolve_selection(
        &self,
        grid: &CalendarMonth,
        cell: CalendarCell,
        today: NaiveDate,
    ) -> Option<NaiveDate> {
        self.date_for_cell(grid, cell).filter(|date| *date <= today)
    }

    /// Attach today/selected/future flags to every cell of a grid
    pub fn decorate(
        &self,
        grid: &CalendarMonth,
        today: NaiveDate,
        selected: Option<NaiveDate>,
    ) -> Vec<CalendarCellView> {
        grid.cells
            .iter()
            .map(|&cell| {
                let date = self.date_for_cell(grid, cell);
                let is_future = date.is_some_and(|d| d > today);
                CalendarCellView {
                    day: cell.day,
                    is_current_month: cell.is_current_month,
                    is_today: date == Some(today),
                    is_selected: date.is_some() && date == selected,
                    is_future,
                    is_selectable: date.is_some() && !is_future,
                }
            })
            .collect()
    }

    /// Get current date information from the injected clock
    pub fn get_current_date(&self, clock: &dyn Clock) -> CurrentDateResponse {
        let today = clock.today();
        let (year, month, day) = (today.year(), today.month(), today.day());

        CurrentDateResponse {
            year,
            month,
            day,
            formatted_date: format!("{} {}, {}", self.month_name(month), day, year),
            iso_date: today.format("%Y-%m-%d").to_string(),
        }
    }
}
