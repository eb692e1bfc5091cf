//! Clock

use std::{
    fmt::Debug,
    sync::{Mutex, PoisonError},
};

use jiff::{Timestamp, Zoned, civil::Date};

/// Source of the current instant and calendar date.
pub trait Clock: Debug + Send + Sync {
    /// Current instant, used for audit timestamps.
    fn now(&self) -> Timestamp;

    /// Current local calendar date, used for age and hire date rules.
    fn today(&self) -> Date;
}

/// Reads the operating system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }

    fn today(&self) -> Date {
        Zoned::now().date()
    }
}

/// Clock pinned to a given instant and date. Used by tests and seeding tools.
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<Timestamp>,
    today: Date,
}

impl FixedClock {
    #[must_use]
    pub fn new(now: Timestamp, today: Date) -> Self {
        Self {
            now: Mutex::new(now),
            today,
        }
    }

    /// Move the instant returned by [`Clock::now`].
    pub fn set_now(&self, now: Timestamp) {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner) = now;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn today(&self) -> Date {
        self.today
    }
}
