use std::time::{Duration, Instant};

use crate::pal::{Platform, PlatformFacade, TimeSource, TimeSourceFacade};

/// The monotonic clock a single stopwatch reads its timestamps from.
#[derive(Debug)]
pub(crate) struct Clock {
    inner: TimeSourceFacade,
}

impl Clock {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self::from_pal(&PlatformFacade::real())
    }

    #[must_use]
    pub(crate) fn from_pal(pal: &PlatformFacade) -> Self {
        Self {
            inner: pal.new_time_source(),
        }
    }

    #[must_use]
    pub(crate) fn now(&mut self) -> Instant {
        self.inner.now()
    }
}

#[cfg(test)]
impl From<crate::pal::MockTimeSource> for Clock {
    fn from(ts: crate::pal::MockTimeSource) -> Self {
        Self { inner: ts.into() }
    }
}

/// Converts a duration to whole nanoseconds, saturating at `i64::MAX` (roughly 292 years).
#[must_use]
pub(crate) fn as_nanos(duration: Duration) -> i64 {
    i64::try_from(duration.as_nanos()).unwrap_or(i64::MAX)
}

/// Nanoseconds from `earlier` to `later`, or zero if `later` is not actually later.
#[must_use]
pub(crate) fn nanos_between(later: Instant, earlier: Instant) -> i64 {
    as_nanos(later.saturating_duration_since(earlier))
}
