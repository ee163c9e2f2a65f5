use thiserror::Error;

use crate::State;

/// Errors returned when a stopwatch operation is not legal in the current state.
///
/// Lookups of pins that do not exist are not errors. Those return
/// [`NOT_FOUND`](crate::NOT_FOUND) instead.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// `start()` was called on a stopwatch that is not ready.
    #[error(
        "stopwatch '{name}' is {actual}: only a ready stopwatch can start, use reset or restart to clear its records"
    )]
    NotReady {
        /// Name of the stopwatch.
        name: String,

        /// The state the stopwatch was in when the call was made.
        actual: State,
    },

    /// A pin was requested from a stopwatch that is neither running nor paused.
    #[error("stopwatch '{name}' is {actual}: only a running or paused stopwatch can pin")]
    NotWorking {
        /// Name of the stopwatch.
        name: String,

        /// The state the stopwatch was in when the call was made.
        actual: State,
    },

    /// A timeline query needs more pins than the stopwatch has recorded.
    #[error(
        "stopwatch '{name}' has {available} pin(s) but at least {required} are needed, start or pin it first"
    )]
    NotEnoughPins {
        /// Name of the stopwatch.
        name: String,

        /// How many pins the query needs.
        required: usize,

        /// How many pins the stopwatch had.
        available: usize,
    },
}

/// A specialized `Result` type for stopwatch operations, returning the crate's
/// [`Error`] type as the error value.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::fmt::Debug;

    use static_assertions::assert_impl_all;

    use super::*;

    assert_impl_all!(Error: Send, Sync, Debug);

    #[test]
    fn not_ready_names_required_state() {
        let error = Error::NotReady {
            name: "db".to_string(),
            actual: State::Running,
        };

        let message = error.to_string();
        assert!(message.contains("'db'"));
        assert!(message.contains("running"));
        assert!(message.contains("only a ready stopwatch can start"));
    }

    #[test]
    fn not_working_names_required_state() {
        let error = Error::NotWorking {
            name: "db".to_string(),
            actual: State::Stopped,
        };

        let message = error.to_string();
        assert!(message.contains("stopped"));
        assert!(message.contains("running or paused"));
    }

    #[test]
    fn not_enough_pins_reports_counts() {
        let error = Error::NotEnoughPins {
            name: "db".to_string(),
            required: 2,
            available: 1,
        };

        assert_eq!(
            error.to_string(),
            "stopwatch 'db' has 1 pin(s) but at least 2 are needed, start or pin it first"
        );
    }
}
