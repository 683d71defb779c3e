//! Timestamp source for invoked actions.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Utc};

/// Hands out strictly increasing timestamps with microsecond resolution.
///
/// The wall clock can step backwards; stamps never do. Microseconds match
/// the precision of a PostgreSQL `TIMESTAMPTZ`, so two stamps stay distinct
/// after a round trip through the database.
#[derive(Debug, Default)]
pub struct MonotonicClock {
    last_micros: AtomicI64,
}

impl MonotonicClock {
    /// Create a clock with no stamps issued yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new stamp, later than every stamp issued before.
    pub fn tick(&self) -> DateTime<Utc> {
        let wall = Utc::now().timestamp_micros();
        let previous = self
            .last_micros
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(wall.max(last + 1))
            })
            .unwrap_or(wall);
        to_datetime(wall.max(previous + 1))
    }

    /// Current time, never earlier than the last stamp issued.
    pub fn now(&self) -> DateTime<Utc> {
        let wall = Utc::now().timestamp_micros();
        to_datetime(wall.max(self.last_micros.load(Ordering::SeqCst)))
    }
}

fn to_datetime(micros: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_micros(micros).unwrap_or_else(Utc::now)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticks_strictly_increase() {
        let clock = MonotonicClock::new();
        let mut last = clock.tick();
        for _ in 0..1000 {
            let next = clock.tick();
            assert!(next > last);
            last = next;
        }
    }

    #[test]
    fn test_now_never_precedes_last_tick() {
        let clock = MonotonicClock::new();
        let stamped = clock.tick();
        assert!(clock.now() >= stamped);
    }
}
