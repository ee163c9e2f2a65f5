use std::fmt;

/// Lifecycle state of a [`Stopwatch`](crate::Stopwatch).
///
/// A stopwatch begins [`Ready`](Self::Ready), becomes [`Running`](Self::Running) on `start()`,
/// moves between running and [`Paused`](Self::Paused) via `pause()` and `keep()`, and ends
/// [`Stopped`](Self::Stopped) after `stop()` until it is restarted or reset.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum State {
    /// Not started, or reset. The timeline is empty.
    Ready,

    /// Started and accumulating elapsed time.
    Running,

    /// Started, but elapsed time is not accumulating.
    Paused,

    /// Stopped. Only `restart()` or `reset()` leave this state.
    Stopped,
}

impl State {
    /// Whether pins may be recorded in this state.
    #[must_use]
    pub const fn can_pin(self) -> bool {
        matches!(self, Self::Running | Self::Paused)
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Ready => "ready",
            Self::Running => "running",
            Self::Paused => "paused",
            Self::Stopped => "stopped",
        };

        f.write_str(name)
    }
}
