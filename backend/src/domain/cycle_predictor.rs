//! Cycle prediction for the cycle tracker.
//!
//! Predictions use fixed offsets from the next period start:
//! ovulation is 14 days before it, and the fertile window runs from five days
//! before ovulation through the day after. All arithmetic is on calendar
//! dates; nothing here reads the clock.

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime};
use shared::{CyclePrediction, PredictionSummary};
use tracing::debug;

use super::calendar::CalendarService;
use super::models::CycleLength;

/// Days between ovulation and the next period start
pub const LUTEAL_PHASE_DAYS: u64 = 14;

/// Fertile days before ovulation
pub const FERTILE_DAYS_BEFORE_OVULATION: u64 = 5;

/// Fertile days after ovulation
pub const FERTILE_DAYS_AFTER_OVULATION: u64 = 1;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

#[derive(Debug, Clone, Default)]
pub struct CyclePredictor {
    calendar: CalendarService,
}

impl CyclePredictor {
    pub fn new() -> Self {
        Self {
            calendar: CalendarService::new(),
        }
    }

    /// Predict the next cycle from the first day of the last period.
    ///
    /// # Panics
    ///
    /// Panics if the next period date would fall after `NaiveDate::MAX`.
    /// Selected dates never pass today, so reaching this is a caller bug.
    pub fn predict(&self, selected_date: NaiveDate, cycle_length: CycleLength) -> CyclePrediction {
        let next_period_date = selected_date + Days::new(u64::from(cycle_length.days()));
        let ovulation_date = next_period_date - Days::new(LUTEAL_PHASE_DAYS);
        let fertile_window_start = ovulation_date - Days::new(FERTILE_DAYS_BEFORE_OVULATION);
        let fertile_window_end = ovulation_date + Days::new(FERTILE_DAYS_AFTER_OVULATION);

        debug!(
            "🔮 Predicted from {} with {}: next period {}, ovulation {}",
            selected_date, cycle_length, next_period_date, ovulation_date
        );

        CyclePrediction {
            next_period_date,
            ovulation_date,
            fertile_window_start,
            fertile_window_end,
        }
    }

    /// Whole days until `next_period_date` starts, rounded up.
    ///
    /// Zero or negative once the date has been reached.
    pub fn days_left(&self, next_period_date: NaiveDate, now: NaiveDateTime) -> i64 {
        let millis = (next_period_date.and_time(NaiveTime::MIN) - now).num_milliseconds();
        -(-millis).div_euclid(MILLIS_PER_DAY)
    }

    /// Values shown on the prediction screen
    pub fn summarize(&self, prediction: &CyclePrediction, now: NaiveDateTime) -> PredictionSummary {
        let next = prediction.next_period_date;
        let start = prediction.fertile_window_start;
        let end = prediction.fertile_window_end;

        PredictionSummary {
            next_period_day: next.day(),
            next_period_month_label: self.calendar.month_abbreviation(next.month()).to_string(),
            days_left: self.days_left(next, now),
            fertile_window_label: format!(
                "{} {} - {}",
                self.calendar.month_abbreviation(start.month()),
                start.day(),
                end.day()
            ),
        }
    }
}
