//! Time source for tenant timestamps.

use chrono::{DateTime, TimeDelta, Utc};

/// Source of the current time.
///
/// Handlers read time only through this trait so tests can pin it.
pub trait Clock: Send + Sync {
    /// The current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// The instant `days` days after `from`, saturating at the latest
/// representable instant.
#[must_use]
pub fn days_after(from: DateTime<Utc>, days: u32) -> DateTime<Utc> {
    from.checked_add_signed(TimeDelta::days(i64::from(days)))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}
