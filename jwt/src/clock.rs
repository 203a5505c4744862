//! Time source of the verifier

use time::OffsetDateTime;

/// Source of the current time used by the verifier
pub trait Clock {
    /// Current time
    fn now(&self) -> OffsetDateTime;
}

/// Wall clock, in UTC
#[derive(Debug, Copy, Clone, Default)]
pub struct DefaultClock;

impl Clock for DefaultClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}

/// Clock frozen at a given instant
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct FixedClock(pub OffsetDateTime);

impl Clock for FixedClock {
    fn now(&self) -> OffsetDateTime {
        self.0
    }
}

impl From<OffsetDateTime> for FixedClock {
    fn from(now: OffsetDateTime) -> Self {
        Self(now)
    }
}
