//! Clock port — where "now" comes from.

use homesim_domain::time::{self, Timestamp};

/// Source of the current time for rule bookkeeping and hour conditions.
pub trait Clock {
    fn now(&self) -> Timestamp;

    /// Local wall-clock hour (0–23), as seen by `HourIs` conditions.
    fn local_hour(&self) -> u32 {
        time::local_hour(self.now())
    }
}

/// The machine's real-time clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        time::now()
    }
}
