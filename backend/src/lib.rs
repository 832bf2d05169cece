//! # Cycle Tracker Backend
//!
//! Contains all non-UI logic for the cycle tracker widget.
//!
//! - **Domain**: calendar grid, cycle prediction and the selection wizard
//! - **Clock**: the injected source of "today" and the midnight refresher
//! - **Config / Logging**: startup settings and tracing setup
//!
//! The presentation layer owns an [`AppState`], starts a [`CycleFlow`] per
//! session and renders whatever the flow returns.

pub mod clock;
pub mod config;
pub mod domain;
pub mod logging;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use shared::{CurrentDateResponse, CycleTrackerConfig};
use tracing::info;

pub use clock::*;
pub use domain::*;

/// Services shared by every flow
#[derive(Clone)]
pub struct AppState {
    pub calendar_service: CalendarService,
    pub cycle_predictor: CyclePredictor,
    pub clock: Arc<dyn Clock>,
    pub config: CycleTrackerConfig,
}

impl AppState {
    /// Start a new selection flow on today's month
    pub fn start_flow(&self) -> CycleFlow {
        CycleFlow::with_config(self.clock.today(), &self.config)
    }

    pub fn current_date(&self) -> CurrentDateResponse {
        self.calendar_service.get_current_date(self.clock.as_ref())
    }

    /// Keep "today" fresh across midnights. Must be called inside a tokio runtime.
    pub fn spawn_midnight_refresher(&self) -> MidnightRefresher {
        MidnightRefresher::spawn(Arc::clone(&self.clock))
    }
}

/// Initialize the backend with the given clock and config
pub fn initialize_backend(clock: Arc<dyn Clock>, config: CycleTrackerConfig) -> AppState {
    info!("Setting up domain model");
    let calendar_service = CalendarService::new();
    let cycle_predictor = CyclePredictor::new();

    info!("Setting up application state (default cycle length {})", config.default_cycle_length);
    AppState {
        calendar_service,
        cycle_predictor,
        clock,
        config,
    }
}

/// Load the config file, install logging and build the state on the system clock
pub fn initialize_from_file(config_path: &Path) -> Result<AppState> {
    let config = config::load_config(config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;
    logging::init_logging(&config);

    Ok(initialize_backend(Arc::new(SystemClock), config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shared::{CalendarCell, FlowStep};
    use std::io::Write;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_app_state_starts_flow_on_clock_month() {
        let clock = FixedClock::at_date(date(2024, 1, 20));
        let state = initialize_backend(Arc::new(clock.clone()), CycleTrackerConfig::default());

        let mut flow = state.start_flow();
        assert_eq!(flow.viewed_month(), (2024, 1));
        assert!(flow.select_day(CalendarCell::current(1), state.clock.today()));
        assert_eq!(flow.step(), FlowStep::AwaitingCycleLength);

        clock.set(date(2024, 3, 2).and_hms_opt(9, 0, 0).unwrap());
        assert_eq!(state.start_flow().viewed_month(), (2024, 3));
        assert_eq!(state.current_date().iso_date, "2024-03-02");
    }

    #[test]
    fn test_initialize_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "default_cycle_length: 30").unwrap();

        let state = initialize_from_file(file.path()).unwrap();
        assert_eq!(state.config.default_cycle_length, 30);
        assert_eq!(state.start_flow().cycle_length().days(), 30);
    }

    #[test]
    fn test_initialize_from_file_reports_parse_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "default_cycle_length: [").unwrap();

        let err = initialize_from_file(file.path()).err().unwrap();
        assert!(err.to_string().starts_with("Failed to load config from"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_spawn_midnight_refresher_uses_state_clock() {
        let clock = FixedClock::at_date(date(2024, 6, 1));
        let state = initialize_backend(Arc::new(clock), CycleTrackerConfig::default());

        let mut refresher = state.spawn_midnight_refresher();
        assert_eq!(refresher.today(), date(2024, 6, 1));
        refresher.cancel();
        assert!(refresher.is_cancelled());
    }
}
