use std::fmt;

const NANOS_PER_MICRO: i64 = 1_000;
const NANOS_PER_MILLI: i64 = 1_000_000;
const NANOS_PER_SECOND: i64 = 1_000_000_000;
const NANOS_PER_MINUTE: i64 = 60 * NANOS_PER_SECOND;
const NANOS_PER_HOUR: i64 = 60 * NANOS_PER_MINUTE;
const NANOS_PER_DAY: i64 = 24 * NANOS_PER_HOUR;

/// Unit in which the `*_in()` stopwatch queries report durations.
///
/// Stopwatches record nanoseconds. Conversion into a coarser unit truncates toward zero.
///
/// # Examples
///
/// ```
/// use pinwatch::TimeUnit;
///
/// assert_eq!(TimeUnit::Milliseconds.convert(2_500_000), 2);
/// assert_eq!(TimeUnit::Seconds.convert(2_500_000), 0);
///
/// // The "not found" sentinel passes through unchanged.
/// assert_eq!(TimeUnit::Hours.convert(pinwatch::NOT_FOUND), pinwatch::NOT_FOUND);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum TimeUnit {
    /// The base unit. Conversion is the identity.
    #[default]
    Nanoseconds,

    /// 10^3 nanoseconds.
    Microseconds,

    /// 10^6 nanoseconds.
    Milliseconds,

    /// 10^9 nanoseconds.
    Seconds,

    /// 60 seconds.
    Minutes,

    /// 60 minutes.
    Hours,

    /// 24 hours.
    Days,
}

impl TimeUnit {
    /// All units, finest first.
    pub const ALL: [Self; 7] = [
        Self::Nanoseconds,
        Self::Microseconds,
        Self::Milliseconds,
        Self::Seconds,
        Self::Minutes,
        Self::Hours,
        Self::Days,
    ];

    /// How many nanoseconds make up one of this unit.
    #[must_use]
    pub const fn nanos_per_unit(self) -> i64 {
        match self {
            Self::Nanoseconds => 1,
            Self::Microseconds => NANOS_PER_MICRO,
            Self::Milliseconds => NANOS_PER_MILLI,
            Self::Seconds => NANOS_PER_SECOND,
            Self::Minutes => NANOS_PER_MINUTE,
            Self::Hours => NANOS_PER_HOUR,
            Self::Days => NANOS_PER_DAY,
        }
    }

    /// Converts a nanosecond value into this unit.
    ///
    /// Values less than 1 are returned unchanged. This keeps [`NOT_FOUND`](crate::NOT_FOUND)
    /// recognizable after conversion, and it applies equally to zero and to negative intervals.
    #[must_use]
    #[expect(
        clippy::integer_division,
        reason = "truncation to whole units is the intended conversion"
    )]
    pub const fn convert(self, nanos: i64) -> i64 {
        if nanos < 1 {
            return nanos;
        }

        nanos / self.nanos_per_unit()
    }

    /// Short suffix used when rendering durations, e.g. `ms`.
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Nanoseconds => "ns",
            Self::Microseconds => "µs",
            Self::Milliseconds => "ms",
            Self::Seconds => "s",
            Self::Minutes => "min",
            Self::Hours => "h",
            Self::Days => "d",
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::NOT_FOUND;

    #[test]
    fn sentinel_is_unchanged_in_every_unit() {
        for unit in TimeUnit::ALL {
            assert_eq!(unit.convert(NOT_FOUND), NOT_FOUND, "{unit:?}");
        }
    }

    #[test]
    fn zero_and_negative_are_unchanged() {
        for unit in TimeUnit::ALL {
            assert_eq!(unit.convert(0), 0);
            assert_eq!(unit.convert(-5 * NANOS_PER_DAY), -5 * NANOS_PER_DAY);
        }
    }

    #[test]
    fn converts_by_truncating_division() {
        let nanos = 2 * NANOS_PER_DAY + 3 * NANOS_PER_HOUR + 999;

        assert_eq!(TimeUnit::Nanoseconds.convert(nanos), nanos);
        assert_eq!(TimeUnit::Microseconds.convert(nanos), 183_600_000_000);
        assert_eq!(TimeUnit::Milliseconds.convert(nanos), 183_600_000);
        assert_eq!(TimeUnit::Seconds.convert(nanos), 183_600);
        assert_eq!(TimeUnit::Minutes.convert(nanos), 3_060);
        assert_eq!(TimeUnit::Hours.convert(nanos), 51);
        assert_eq!(TimeUnit::Days.convert(nanos), 2);
    }

    #[test]
    fn positive_values_below_one_unit_truncate_to_zero() {
        assert_eq!(TimeUnit::Milliseconds.convert(999_999), 0);
        assert_eq!(TimeUnit::Milliseconds.convert(1), 0);
        assert_eq!(TimeUnit::Nanoseconds.convert(1), 1);
    }

    #[test]
    fn units_are_ordered_finest_first() {
        for pair in TimeUnit::ALL.windows(2) {
            let [finer, coarser] = pair else {
                unreachable!("windows(2) yields pairs");
            };
            assert!(finer.nanos_per_unit() < coarser.nanos_per_unit());
        }
    }
}
