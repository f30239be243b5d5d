// Time Provider Port (for testability)

use chrono::{DateTime, Duration, TimeZone, Utc};
use parking_lot::Mutex;

/// Time provider interface (allows deterministic clocks in tests)
///
/// Every timestamp a queue stores comes from exactly one provider, always in UTC.
pub trait TimeProvider: Send + Sync {
    /// Current time in UTC
    fn now(&self) -> DateTime<Utc>;
}

/// System time provider (production)
pub struct SystemTimeProvider;

impl TimeProvider for SystemTimeProvider {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Deterministic provider: starts at a fixed instant and advances by a fixed
/// step on every read, so consecutive admissions get strictly increasing times.
pub struct SteppingTimeProvider {
    next: Mutex<DateTime<Utc>>,
    step: Duration,
}

impl SteppingTimeProvider {
    pub fn new(start: DateTime<Utc>, step: Duration) -> Self {
        Self {
            next: Mutex::new(start),
            step,
        }
    }

    /// Starts `secs` after the Unix epoch, one second per read
    pub fn from_epoch_seconds(secs: i64) -> Self {
        let start = Utc
            .timestamp_opt(secs, 0)
            .single()
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH);
        Self::new(start, Duration::seconds(1))
    }
}

/// Starts at 2024-01-01 00:00:00 UTC
impl Default for SteppingTimeProvider {
    fn default() -> Self {
        Self::from_epoch_seconds(1_704_067_200)
    }
}

impl TimeProvider for SteppingTimeProvider {
    fn now(&self) -> DateTime<Utc> {
        let mut next = self.next.lock();
        let current = *next;
        *next = current + self.step;
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stepping_provider_is_strictly_increasing() {
        let clock = SteppingTimeProvider::default();
        let a = clock.now();
        let b = clock.now();
        let c = clock.now();

        assert!(a < b && b < c);
        assert_eq!(b - a, Duration::seconds(1));
        assert_eq!(a.format("%Y-%m-%d %H:%M:%S").to_string(), "2024-01-01 00:00:00");
    }
}
