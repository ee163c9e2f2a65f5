//! Fake platform implementation for testing.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use crate::pal::{Platform, TimeSource};

/// Fake implementation of the platform abstraction for testing.
///
/// The clock starts at the instant the platform was created and only moves forward when the
/// test calls [`advance()`](Self::advance). All clones and all time sources created from the
/// same platform share one clock, so a test can hand the platform to a registry and still
/// control the time every stopwatch sees.
#[derive(Clone, Debug)]
pub(crate) struct FakePlatform {
    now: Arc<Mutex<Instant>>,
}

impl FakePlatform {
    pub(crate) fn new() -> Self {
        Self {
            now: Arc::new(Mutex::new(Instant::now())),
        }
    }

    /// Moves the shared clock forward.
    pub(crate) fn advance(&self, by: Duration) {
        let mut now = self.now.lock();
        *now = now
            .checked_add(by)
            .expect("fake clock advanced beyond the range of Instant");
    }

    pub(crate) fn advance_millis(&self, millis: u64) {
        self.advance(Duration::from_millis(millis));
    }
}

impl Platform for FakePlatform {
    type TimeSource = FakeTimeSource;

    fn new_time_source(&self) -> Self::TimeSource {
        FakeTimeSource {
            now: Arc::clone(&self.now),
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct FakeTimeSource {
    now: Arc<Mutex<Instant>>,
}

impl TimeSource for FakeTimeSource {
    fn now(&mut self) -> Instant {
        *self.now.lock()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn time_stands_still_until_advanced() {
        let platform = FakePlatform::new();
        let mut source = platform.new_time_source();

        let first = source.now();
        let second = source.now();

        assert_eq!(first, second);
    }

    #[test]
    fn advance_is_shared_between_sources_and_clones() {
        let platform = FakePlatform::new();
        let mut source1 = platform.new_time_source();
        let mut source2 = platform.clone().new_time_source();

        let before = source1.now();
        platform.advance_millis(150);

        assert_eq!(
            source1.now().duration_since(before),
            Duration::from_millis(150)
        );
        assert_eq!(source1.now(), source2.now());
    }
}
