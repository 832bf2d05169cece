//! # Clock Module
//!
//! "Today" is owned by an injected [`Clock`] rather than read from ambient
//! global state, so the calendar and prediction logic can be driven by a
//! fixed date in tests and by local wall-clock time in the app.
//!
//! - **SystemClock**: local wall-clock time via chrono
//! - **FixedClock**: manually set and advanced time
//! - **MidnightRefresher**: background task that republishes today's date
//!   after every local midnight

pub mod midnight_refresher;

pub use midnight_refresher::*;

use chrono::{Duration, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use std::sync::{Arc, Mutex};

/// Source of the current local date and time
pub trait Clock: Send + Sync {
    /// Current local wall-clock time
    fn now(&self) -> NaiveDateTime;

    /// Current local date
    fn today(&self) -> NaiveDate {
        self.now().date()
    }

    /// Elapsed time from `now` until the next local midnight.
    ///
    /// Defaults to the wall-clock difference, which is only exact for clocks
    /// without daylight saving transitions.
    fn until_next_midnight(&self, now: NaiveDateTime) -> Duration {
        duration_until_next_midnight(now)
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now(&self) -> NaiveDateTime {
        (**self).now()
    }

    fn until_next_midnight(&self, now: NaiveDateTime) -> Duration {
        (**self).until_next_midnight(now)
    }
}

/// Clock backed by the platform's local time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }

    fn until_next_midnight(&self, now: NaiveDateTime) -> Duration {
        elapsed_until_next_midnight(&Local, now)
    }
}

/// Clock that only moves when told to
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Arc<Mutex<NaiveDateTime>>,
}

impl FixedClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now: Arc::new(Mutex::new(now)),
        }
    }

    /// Clock set to the start of `date`
    pub fn at_date(date: NaiveDate) -> Self {
        Self::new(date.and_time(NaiveTime::MIN))
    }

    pub fn set(&self, now: NaiveDateTime) {
        *self.now.lock().unwrap_or_else(|poisoned| poisoned.into_inner()) = now;
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        *now += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        *self.now.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Time remaining until the next local midnight after `now`
pub fn duration_until_next_midnight(now: NaiveDateTime) -> Duration {
    let next_midnight = now
        .date()
        .succ_opt()
        .map(|tomorrow| tomorrow.and_time(NaiveTime::MIN))
        .unwrap_or(NaiveDateTime::MAX);
    next_midnight - now
}

/// Real time between `now` and the next midnight in `tz`.
///
/// Differs from [`duration_until_next_midnight`] on days with a daylight
/// saving transition. Falls back to the wall-clock difference when either
/// end does not exist locally.
pub fn elapsed_until_next_midnight<Tz: TimeZone>(tz: &Tz, now: NaiveDateTime) -> Duration {
    let wall_clock = duration_until_next_midnight(now);
    let start = tz.from_local_datetime(&now).earliest();
    let end = tz.from_local_datetime(&(now + wall_clock)).earliest();

    match (start, end) {
        (Some(start), Some(end)) => end.signed_duration_since(start),
        _ => wall_clock,
    }
}
