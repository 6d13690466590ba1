use chrono::{DateTime, Duration, Local, Timelike};
use std::sync::Mutex;

/// Source of wall-clock time for the buddy.
///
/// Session duration, rate limiting and the time-of-day bucket all read from
/// here, so tests can drive them without sleeping.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;

    fn hour(&self) -> u32 {
        self.now().hour()
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    current: Mutex<DateTime<Local>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Local>) -> Self {
        ManualClock {
            current: Mutex::new(start),
        }
    }

    /// Start at today's date at the given local hour.
    pub fn at_hour(hour: u32) -> Self {
        let start = Local::now()
            .with_hour(hour)
            .and_then(|t| t.with_minute(0))
            .and_then(|t| t.with_second(0))
            .and_then(|t| t.with_nanosecond(0))
            .unwrap_or_else(Local::now);
        Self::new(start)
    }

    pub fn advance(&self, by: Duration) {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        *current += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Local> {
        *self.current.lock().unwrap_or_else(|e| e.into_inner())
    }
}
