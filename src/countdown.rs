//! Decorative "next batch" countdown shown on the listing screen.
//!
//! It touches no data. The timer task lives exactly as long as its
//! `CountdownTimer` handle.

use std::fmt;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    remaining_secs: u64,
    reset_secs: u64,
}

impl Countdown {
    pub fn new(start: Duration, reset: Duration) -> Self {
        Self { remaining_secs: start.as_secs(), reset_secs: reset.as_secs() }
    }

    pub fn remaining(&self) -> Duration {
        Duration::from_secs(self.remaining_secs)
    }

    /// One second passes. At zero the countdown wraps to the reset value.
    pub fn tick(&mut self) {
        if self.remaining_secs == 0 {
            self.remaining_secs = self.reset_secs;
        } else {
            self.remaining_secs -= 1;
        }
    }

    pub fn hms(&self) -> (u64, u64, u64) {
        (self.remaining_secs / 3600, (self.remaining_secs % 3600) / 60, self.remaining_secs % 60)
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (h, m, s) = self.hms();
        write!(f, "{:02}:{:02}:{:02}", h, m, s)
    }
}

/// Ticks a `Countdown` on a fixed interval. Dropping it aborts the task.
#[derive(Debug)]
pub struct CountdownTimer {
    handle: JoinHandle<()>,
    rx: watch::Receiver<Countdown>,
}

impl CountdownTimer {
    /// Must be called from within a tokio runtime.
    pub fn start(initial: Countdown, period: Duration) -> Self {
        let (tx, rx) = watch::channel(initial);
        let mut interval = time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let handle = tokio::spawn(async move {
            // First tick completes immediately.
            interval.tick().await;
            loop {
                interval.tick().await;
                tx.send_modify(Countdown::tick);
            }
        });

        tracing::debug!(start = %initial, ?period, "Countdown timer started");
        Self { handle, rx }
    }

    pub fn current(&self) -> Countdown {
        *self.rx.borrow()
    }
}

impl Drop for CountdownTimer {
    fn drop(&mut self) {
        self.handle.abort();
        tracing::debug!("Countdown timer stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(n: u64) -> Duration {
        Duration::from_secs(n)
    }

    #[test]
    fn counts_down_across_minute_and_hour_boundaries() {
        let mut c = Countdown::new(secs(3600), secs(10800));
        c.tick();
        assert_eq!(c.to_string(), "00:59:59");
        assert_eq!(c.hms(), (0, 59, 59));
    }

    #[test]
    fn wraps_to_reset_value_at_zero() {
        let mut c = Countdown::new(secs(1), secs(10800));
        c.tick();
        assert_eq!(c.remaining(), Duration::ZERO);
        c.tick();
        assert_eq!(c.remaining(), secs(10800));
        assert_eq!(c.to_string(), "03:00:00");
    }

    #[test]
    fn never_underflows() {
        let mut c = Countdown::new(secs(2), secs(3));
        for _ in 0..100 {
            c.tick();
            assert!(c.remaining() <= secs(3));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn timer_publishes_ticks() {
        let timer = CountdownTimer::start(Countdown::new(secs(5), secs(10)), secs(1));
        let mut rx = timer.rx.clone();

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().remaining(), secs(4));

        rx.changed().await.unwrap();
        assert_eq!(timer.current().remaining(), secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_timer_stops_the_task() {
        let timer = CountdownTimer::start(Countdown::new(secs(5), secs(10)), secs(1));
        let mut rx = timer.rx.clone();
        drop(timer);

        // Sender goes away with the aborted task.
        assert!(rx.changed().await.is_err());
        assert_eq!(rx.borrow().remaining(), secs(5));
    }
}
