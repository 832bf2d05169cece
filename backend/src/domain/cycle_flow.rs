//! Selection wizard for the cycle tracker.
//!
//! The widget walks the user through three steps:
//!
//! ```text
//! AwaitingDate --select day--> AwaitingCycleLength --confirm--> ShowingPrediction
//!      ^                                                              |
//!      +---------------------------- reset ---------------------------+
//! ```
//!
//! Inputs that do not apply in the current step, future dates, padding cells
//! and cycle-length adjustments past either bound are ignored. Every
//! mutating call reports whether it changed anything.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use shared::{
    CalendarCell, CalendarCellView, CalendarMonth, CyclePrediction, CycleTrackerConfig, FlowStep,
    PredictionSummary,
};
use tracing::{debug, info, warn};

use super::calendar::CalendarService;
use super::cycle_predictor::CyclePredictor;
use super::models::CycleLength;

#[derive(Debug, Clone)]
pub struct CycleFlow {
    calendar: CalendarService,
    predictor: CyclePredictor,
    step: FlowStep,
    /// First day of the month shown on the calendar
    viewed_month: NaiveDate,
    selected_date: Option<NaiveDate>,
    cycle_length: CycleLength,
    prediction: Option<CyclePrediction>,
}

impl CycleFlow {
    /// Start a flow showing the month that contains `today`
    pub fn new(today: NaiveDate) -> Self {
        Self::with_cycle_length(today, CycleLength::default())
    }

    pub fn with_config(today: NaiveDate, config: &CycleTrackerConfig) -> Self {
        let cycle_length = CycleLength::clamped(config.default_cycle_length);
        if cycle_length.days() != config.default_cycle_length {
            warn!(
                "⚠️ Configured cycle length {} is out of range, using {}",
                config.default_cycle_length, cycle_length
            );
        }
        Self::with_cycle_length(today, cycle_length)
    }

    pub fn with_cycle_length(today: NaiveDate, cycle_length: CycleLength) -> Self {
        let calendar = CalendarService::new();
        let viewed_month = calendar.month_start(today.year(), today.month()).unwrap_or(today);

        Self {
            calendar,
            predictor: CyclePredictor::new(),
            step: FlowStep::AwaitingDate,
            viewed_month,
            selected_date: None,
            cycle_length,
            prediction: None,
        }
    }

    pub fn step(&self) -> FlowStep {
        self.step
    }

    /// Year and month currently shown on the calendar
    pub fn viewed_month(&self) -> (i32, u32) {
        (self.viewed_month.year(), self.viewed_month.month())
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.selected_date
    }

    pub fn cycle_length(&self) -> CycleLength {
        self.cycle_length
    }

    pub fn prediction(&self) -> Option<&CyclePrediction> {
        self.prediction.as_ref()
    }

    /// Grid for the viewed month
    pub fn grid(&self) -> CalendarMonth {
        self.calendar.build_grid(self.viewed_month)
    }

    /// Grid for the viewed month with render flags relative to `today`
    pub fn grid_view(&self, today: NaiveDate) -> Vec<CalendarCellView> {
        self.calendar.decorate(&self.grid(), today, self.selected_date)
    }

    /// Header text for the viewed month, e.g. "JAN '24"
    pub fn month_label(&self) -> String {
        let (year, month) = self.viewed_month();
        self.calendar.month_label(year, month)
    }

    pub fn show_previous_month(&mut self) -> bool {
        let (year, month) = self.viewed_month();
        let (year, month) = self.calendar.previous_month(year, month);
        self.show_month(year, month)
    }

    pub fn show_next_month(&mut self) -> bool {
        let (year, month) = self.viewed_month();
        let (year, month) = self.calendar.next_month(year, month);
        self.show_month(year, month)
    }

    fn show_month(&mut self, year: i32, month: u32) -> bool {
        match self.calendar.month_start(year, month) {
            Ok(first_of_month) => {
                self.viewed_month = first_of_month;
                debug!("📅 Showing {}", self.month_label());
                true
            }
            Err(e) => {
                debug!("📅 Cannot navigate: {}", e);
                false
            }
        }
    }

    /// Select a tapped cell of the viewed month
    pub fn select_day(&mut self, cell: CalendarCell, today: NaiveDate) -> bool {
        let grid = self.grid();
        match self.calendar.date_for_cell(&grid, cell) {
            Some(date) => self.select_date(date, today),
            None => {
                debug!("Ignoring selection of padding cell {}", cell.day);
                false
            }
        }
    }

    /// Record the first day of the last period and move on to the cycle
    /// length step. Dates after `today` are ignored.
    pub fn select_date(&mut self, date: NaiveDate, today: NaiveDate) -> bool {
        if self.step != FlowStep::AwaitingDate {
            debug!("Ignoring date selection while in {:?}", self.step);
            return false;
        }
        if date > today {
            debug!("Ignoring future date {} (today is {})", date, today);
            return false;
        }

        self.selected_date = Some(date);
        self.step = FlowStep::AwaitingCycleLength;
        info!("📅 Selected last period start {}", date);
        true
    }

    pub fn increment_cycle_length(&mut self) -> bool {
        self.adjust_cycle_length(self.cycle_length.increment())
    }

    pub fn decrement_cycle_length(&mut self) -> bool {
        self.adjust_cycle_length(self.cycle_length.decrement())
    }

    fn adjust_cycle_length(&mut self, adjusted: Option<CycleLength>) -> bool {
        // The shown prediction must always match its inputs
        if self.step == FlowStep::ShowingPrediction {
            debug!("Ignoring cycle length change while showing a prediction");
            return false;
        }
        match adjusted {
            Some(length) => {
                self.cycle_length = length;
                debug!("Cycle length set to {}", length);
                true
            }
            None => {
                debug!("Cycle length already at {}", self.cycle_length);
                false
            }
        }
    }

    /// Compute the prediction for the selected date and cycle length
    pub fn confirm(&mut self) -> Option<CyclePrediction> {
        let selected_date = match (self.step, self.selected_date) {
            (FlowStep::AwaitingCycleLength, Some(date)) => date,
            _ => {
                debug!("Ignoring confirm while in {:?}", self.step);
                return None;
            }
        };

        let prediction = self.predictor.predict(selected_date, self.cycle_length);
        self.prediction = Some(prediction);
        self.step = FlowStep::ShowingPrediction;
        info!(
            "🔮 Next period expected {} (fertile {} to {})",
            prediction.next_period_date,
            prediction.fertile_window_start,
            prediction.fertile_window_end
        );
        Some(prediction)
    }

    /// Values for the prediction screen, relative to `now`
    pub fn summary(&self, now: NaiveDateTime) -> Option<PredictionSummary> {
        self.prediction
            .as_ref()
            .map(|prediction| self.predictor.summarize(prediction, now))
    }

    /// Return to the calendar, clearing the selection and prediction.
    ///
    /// The cycle length and viewed month are kept.
    pub fn reset(&mut self) -> bool {
        if self.step != FlowStep::ShowingPrediction {
            debug!("Ignoring reset while in {:?}", self.step);
            return false;
        }

        self.selected_date = None;
        self.prediction = None;
        self.step = FlowStep::AwaitingDate;
        info!("🔄 Flow reset");
        true
    }
}
