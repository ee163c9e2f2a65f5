use std::time::Instant;

use crate::pal::{Platform, TimeSource};

/// Singleton instance of `BuildTargetPlatform`, used by public API types
/// to hook up to the real clock.
pub(crate) static BUILD_TARGET_PLATFORM: BuildTargetPlatform = BuildTargetPlatform;

#[derive(Debug)]
pub(crate) struct BuildTargetPlatform;

impl Platform for BuildTargetPlatform {
    type TimeSource = RealTimeSource;

    fn new_time_source(&self) -> Self::TimeSource {
        RealTimeSource
    }
}

#[derive(Clone, Debug)]
pub(crate) struct RealTimeSource;

impl TimeSource for RealTimeSource {
    fn now(&mut self) -> Instant {
        Instant::now()
    }
}
