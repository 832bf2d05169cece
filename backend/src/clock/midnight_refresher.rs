//! Keeps "today" fresh across local midnights.
//!
//! The refresher is a single tokio task that reads the clock, publishes the
//! date on a watch channel, then sleeps until the next local midnight. Each
//! firing schedules exactly one next firing, so runs never overlap.

use chrono::NaiveDate;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::Clock;

/// Handle to the background midnight task
#[derive(Debug)]
pub struct MidnightRefresher {
    today: watch::Receiver<NaiveDate>,
    task: Option<JoinHandle<()>>,
}

impl MidnightRefresher {
    /// Start refreshing from `clock`. Must be called inside a tokio runtime.
    pub fn spawn<C>(clock: C) -> Self
    where
        C: Clock + 'static,
    {
        let (tx, rx) = watch::channel(clock.today());
        let task = tokio::spawn(refresh_loop(clock, tx));
        info!("🕛 Midnight refresher started");

        Self {
            today: rx,
            task: Some(task),
        }
    }

    /// Most recently published date
    pub fn today(&self) -> NaiveDate {
        *self.today.borrow()
    }

    /// Receiver notified each time a new date is published
    pub fn subscribe(&self) -> watch::Receiver<NaiveDate> {
        self.today.clone()
    }

    /// Stop the refresher. Calling this again is a no-op.
    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            info!("🕛 Midnight refresher cancelled");
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.task.is_none()
    }
}

impl Drop for MidnightRefresher {
    fn drop(&mut self) {
        self.cancel();
    }
}

async fn refresh_loop<C: Clock>(clock: C, tx: watch::Sender<NaiveDate>) {
    loop {
        let now = clock.now();
        let today = now.date();

        let changed = tx.send_if_modified(|current| {
            if *current == today {
                false
            } else {
                *current = today;
                true
            }
        });
        if changed {
            info!("📅 Today is now {}", today);
        }

        let delay = clock.until_next_midnight(now).to_std().unwrap_or_default();
        debug!("🕛 Next refresh in {:?}", delay);
        tokio::time::sleep(delay).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::elapsed_until_next_midnight;
    use crate::clock::spring_forward::SpringForward;
    use chrono::{Duration, NaiveDateTime};
    use tokio::time::Instant;

    /// Wall clock that follows tokio's (pausable) time
    struct TokioClock {
        start: Instant,
        base: NaiveDateTime,
    }

    impl TokioClock {
        fn new(base: NaiveDateTime) -> Self {
            Self {
                start: Instant::now(),
                base,
            }
        }
    }

    impl Clock for TokioClock {
        fn now(&self) -> NaiveDateTime {
            self.base + Duration::from_std(self.start.elapsed()).unwrap()
        }
    }

    /// Local clock in a zone that springs forward on 2024-03-10
    struct SpringForwardClock {
        start: Instant,
        base: NaiveDateTime,
    }

    impl Clock for SpringForwardClock {
        fn now(&self) -> NaiveDateTime {
            let elapsed = Duration::from_std(self.start.elapsed()).unwrap();
            SpringForward.local_after(self.base, elapsed)
        }

        fn until_next_midnight(&self, now: NaiveDateTime) -> Duration {
            elapsed_until_next_midnight(&SpringForward, now)
        }
    }

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn late_evening(year: i32, month: u32, day: u32) -> NaiveDateTime {
        date(year, month, day).and_hms_opt(23, 0, 0).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_publishes_today_immediately() {
        let refresher = MidnightRefresher::spawn(TokioClock::new(late_evening(2024, 1, 31)));
        assert_eq!(refresher.today(), date(2024, 1, 31));
        assert!(!refresher.is_cancelled());
    }

    #[tokio::test(start_paused = true)]
    async fn test_publishes_once_per_midnight() {
        let started = Instant::now();
        let refresher = MidnightRefresher::spawn(TokioClock::new(late_evening(2024, 1, 31)));
        let mut today = refresher.subscribe();

        for expected in [date(2024, 2, 1), date(2024, 2, 2), date(2024, 2, 3)] {
            today.changed().await.unwrap();
            assert_eq!(*today.borrow_and_update(), expected);
        }

        // First firing one hour in, then one per day
        let elapsed = started.elapsed();
        assert!(elapsed >= std::time::Duration::from_secs(3600 + 2 * 86_400));
        assert!(elapsed < std::time::Duration::from_secs(3600 + 3 * 86_400));
        assert_eq!(refresher.today(), date(2024, 2, 3));
    }

    #[tokio::test(start_paused = true)]
    async fn test_refreshes_at_local_midnight_after_spring_forward() {
        let started = Instant::now();
        let clock = SpringForwardClock {
            start: started,
            base: date(2024, 3, 10).and_hms_opt(0, 0, 0).unwrap(),
        };
        let refresher = MidnightRefresher::spawn(clock);
        let mut today = refresher.subscribe();

        today.changed().await.unwrap();
        assert_eq!(*today.borrow_and_update(), date(2024, 3, 11));
        // The spring-forward day only lasts 23 hours
        let elapsed = started.elapsed();
        assert!(elapsed >= std::time::Duration::from_secs(23 * 3600));
        assert!(elapsed < std::time::Duration::from_secs(23 * 3600 + 60));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_refreshing_and_is_idempotent() {
        let mut refresher = MidnightRefresher::spawn(TokioClock::new(late_evening(2024, 12, 31)));
        let mut today = refresher.subscribe();

        refresher.cancel();
        assert!(refresher.is_cancelled());
        refresher.cancel();
        assert!(refresher.is_cancelled());

        tokio::time::advance(std::time::Duration::from_secs(2 * 86_400)).await;

        // Sender is dropped with the aborted task
        assert!(today.changed().await.is_err());
        assert_eq!(refresher.today(), date(2024, 12, 31));
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_task() {
        let refresher = MidnightRefresher::spawn(TokioClock::new(late_evening(2024, 3, 9)));
        let mut today = refresher.subscribe();
        drop(refresher);

        assert!(today.changed().await.is_err());
    }
}
