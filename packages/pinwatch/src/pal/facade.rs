use std::fmt::{self, Debug};
use std::time::Instant;

#[cfg(test)]
use crate::pal::{FakePlatform, FakeTimeSource, MockTimeSource};
use crate::pal::{
    BUILD_TARGET_PLATFORM, BuildTargetPlatform, Platform, RealTimeSource, TimeSource,
};

#[derive(Clone)]
pub(crate) enum PlatformFacade {
    Real(&'static BuildTargetPlatform),

    #[cfg(test)]
    Fake(FakePlatform),
}

impl PlatformFacade {
    pub(crate) fn real() -> Self {
        Self::Real(&BUILD_TARGET_PLATFORM)
    }

    #[cfg(test)]
    pub(crate) fn fake(platform: FakePlatform) -> Self {
        Self::Fake(platform)
    }
}

impl Platform for PlatformFacade {
    type TimeSource = TimeSourceFacade;

    fn new_time_source(&self) -> TimeSourceFacade {
        match self {
            Self::Real(p) => p.new_time_source().into(),
            #[cfg(test)]
            Self::Fake(p) => p.new_time_source().into(),
        }
    }
}

impl Debug for PlatformFacade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Real(p) => p.fmt(f),
            #[cfg(test)]
            Self::Fake(p) => p.fmt(f),
        }
    }
}

pub(crate) enum TimeSourceFacade {
    Real(RealTimeSource),

    #[cfg(test)]
    Fake(FakeTimeSource),

    #[cfg(test)]
    Mock(MockTimeSource),
}

impl From<RealTimeSource> for TimeSourceFacade {
    fn from(ts: RealTimeSource) -> Self {
        Self::Real(ts)
    }
}

#[cfg(test)]
impl From<FakeTimeSource> for TimeSourceFacade {
    fn from(ts: FakeTimeSource) -> Self {
        Self::Fake(ts)
    }
}

#[cfg(test)]
impl From<MockTimeSource> for TimeSourceFacade {
    fn from(ts: MockTimeSource) -> Self {
        Self::Mock(ts)
    }
}

impl TimeSource for TimeSourceFacade {
    fn now(&mut self) -> Instant {
        match self {
            Self::Real(ts) => ts.now(),
            #[cfg(test)]
            Self::Fake(ts) => ts.now(),
            #[cfg(test)]
            Self::Mock(ts) => ts.now(),
        }
    }
}

impl Debug for TimeSourceFacade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Real(ts) => ts.fmt(f),
            #[cfg(test)]
            Self::Fake(ts) => ts.fmt(f),
            #[cfg(test)]
            Self::Mock(ts) => ts.fmt(f),
        }
    }
}
