use std::fmt::Debug;
use std::sync::Arc;
use time::UtcDateTime;

/// Source of "now" for entry timestamps and freshness checks.
pub trait Clock: Debug + Send + Sync {
    fn now(&self) -> UtcDateTime;
}

pub type ClockHandle = Arc<dyn Clock>;

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;
impl Clock for SystemClock {
    fn now(&self) -> UtcDateTime {
        UtcDateTime::now()
    }
}

/// A clock that only moves when told to, for simulating expiry in tests
/// without sleeping.
///
/// ```
/// use pricebot_cache::{Clock, MockClock};
/// use std::time::Duration;
///
/// let clock = MockClock::default();
/// let before = clock.now();
/// clock.advance(Duration::from_secs(30));
/// assert_eq!((clock.now() - before).whole_seconds(), 30);
/// ```
#[cfg(any(test, feature = "mock"))]
#[derive(Debug)]
pub struct MockClock {
    now: std::sync::Mutex<UtcDateTime>,
}
#[cfg(any(test, feature = "mock"))]
impl MockClock {
    pub fn starting_at(now: UtcDateTime) -> Self {
        Self { now: std::sync::Mutex::new(now) }
    }

    pub fn advance(&self, by: std::time::Duration) {
        let by = time::Duration::new(by.as_secs() as i64, by.subsec_nanos() as i32);
        let mut now = self.now.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        *now = *now + by;
    }
}
#[cfg(any(test, feature = "mock"))]
impl Default for MockClock {
    fn default() -> Self {
        Self::starting_at(UtcDateTime::now())
    }
}
#[cfg(any(test, feature = "mock"))]
impl Clock for MockClock {
    fn now(&self) -> UtcDateTime {
        *self.now.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}
