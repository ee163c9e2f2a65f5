//! The stopwatch state machine and its timeline queries.

use std::fmt;
use std::thread;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::clock::{Clock, as_nanos, nanos_between};
use crate::{Error, Result, State, TimeUnit};

/// Returned by pin and pin-interval lookups when the requested pin does not exist.
///
/// Unit conversion leaves this value unchanged, so it can be checked after any `*_in()` call.
pub const NOT_FOUND: i64 = -1;

#[derive(Debug)]
struct Pin {
    nanos: i64,
    label: Option<String>,
}

#[derive(Debug)]
struct Inner {
    state: State,
    pins: Vec<Pin>,

    // Captured by start(). Pin values are measured from here.
    start_anchor: Option<Instant>,

    // Captured by pause(), consumed by keep().
    pause_anchor: Option<Instant>,

    cumulative_pause: Duration,

    clock: Clock,
}

impl Inner {
    fn new(clock: Clock) -> Self {
        Self {
            state: State::Ready,
            pins: Vec::new(),
            start_anchor: None,
            pause_anchor: None,
            cumulative_pause: Duration::ZERO,
            clock,
        }
    }

    fn clear(&mut self) {
        self.pins.clear();
        self.state = State::Ready;
        self.start_anchor = None;
        self.pause_anchor = None;
        self.cumulative_pause = Duration::ZERO;
    }

    /// Start effect without the state check. Returns the value of the implicit first pin.
    fn begin(&mut self) -> i64 {
        self.start_anchor = Some(self.clock.now());
        self.pause_anchor = None;
        self.cumulative_pause = Duration::ZERO;
        self.state = State::Running;
        self.record(None)
    }

    /// Elapsed nanoseconds since start, excluding paused time.
    ///
    /// While paused, time is frozen at the moment of the pause.
    fn reading(&mut self) -> i64 {
        let Some(start) = self.start_anchor else {
            return 0;
        };

        let at = match (self.state, self.pause_anchor) {
            (State::Paused, Some(paused_at)) => paused_at,
            _ => self.clock.now(),
        };

        as_nanos(
            at.saturating_duration_since(start)
                .saturating_sub(self.cumulative_pause),
        )
    }

    fn record(&mut self, label: Option<String>) -> i64 {
        let nanos = self.reading();
        self.pins.push(Pin { nanos, label });
        nanos
    }

    fn require_pins(&self, name: &str, required: usize) -> Result<()> {
        if self.pins.len() >= required {
            Ok(())
        } else {
            Err(Error::NotEnoughPins {
                name: name.to_owned(),
                required,
                available: self.pins.len(),
            })
        }
    }

    fn first(&self) -> Option<i64> {
        self.pins.first().map(|pin| pin.nanos)
    }

    fn last(&self) -> Option<i64> {
        self.pins.last().map(|pin| pin.nanos)
    }

    fn position(&self, label: &str) -> Option<usize> {
        self.pins
            .iter()
            .position(|pin| pin.label.as_deref() == Some(label))
    }

    fn nanos_at(&self, index: usize) -> Option<i64> {
        self.pins.get(index).map(|pin| pin.nanos)
    }

    fn interval_between(&self, from: Option<usize>, to: Option<usize>) -> i64 {
        match (
            from.and_then(|i| self.nanos_at(i)),
            to.and_then(|i| self.nanos_at(i)),
        ) {
            (Some(from), Some(to)) => to.saturating_sub(from),
            _ => NOT_FOUND,
        }
    }

    fn interval_to_previous(&self, index: Option<usize>) -> i64 {
        let previous = index.and_then(|i| i.checked_sub(1));
        self.interval_between(previous, index)
    }
}

/// A named stopwatch that records a timeline of pins and excludes paused time from it.
///
/// Each pin records the nanoseconds elapsed since [`start()`](Self::start), minus all time
/// spent paused up to that moment. The implicit pin recorded by `start()` is therefore always
/// `0`, and the difference between any two pins is the un-paused time that passed between them.
///
/// The stopwatch is a small state machine:
///
/// | Operation | Legal in | Afterwards |
/// |---|---|---|
/// | [`start()`](Self::start) | ready | running |
/// | [`pin()`](Self::pin), [`pin_named()`](Self::pin_named) | running, paused | unchanged |
/// | [`pause()`](Self::pause) | running (ignored otherwise) | paused |
/// | [`keep()`](Self::keep) | paused (ignored otherwise) | running |
/// | [`stop()`](Self::stop) | running, paused | stopped |
/// | [`restart()`](Self::restart) | any | running |
/// | [`reset()`](Self::reset) | any | ready |
///
/// Pin and interval lookups return [`NOT_FOUND`] when the pin does not exist. Queries that
/// need a non-empty timeline return [`Error::NotEnoughPins`] instead.
///
/// All operations take `&self` and are serialized by an internal lock, so a stopwatch can be
/// shared between threads through an `Arc` (as the [`Registry`](crate::Registry) does).
///
/// # Examples
///
/// ```
/// use pinwatch::{Stopwatch, TimeUnit};
///
/// let watch = Stopwatch::with_name("checkout");
/// watch.start()?;
///
/// // ... load the cart ...
/// watch.pin_named("cart_loaded")?;
///
/// watch.pause();
/// // ... time spent here is not counted ...
/// watch.keep();
///
/// // ... charge the card ...
/// watch.pin_named("charged")?;
/// watch.stop()?;
///
/// let charging = watch.pin_interval_in("cart_loaded", "charged", TimeUnit::Milliseconds);
/// println!("charging took {charging} ms");
/// # Ok::<(), pinwatch::Error>(())
/// ```
#[derive(Debug)]
pub struct Stopwatch {
    name: String,
    inner: Mutex<Inner>,
}

impl Stopwatch {
    /// Creates a ready stopwatch named after the current thread.
    ///
    /// Threads without a name contribute their thread ID instead.
    #[must_use]
    pub fn new() -> Self {
        let current = thread::current();
        let name = current
            .name()
            .map_or_else(|| format!("{:?}", current.id()), str::to_owned);

        Self::with_name(name)
    }

    /// Creates a ready stopwatch with the given name.
    #[must_use]
    pub fn with_name(name: impl Into<String>) -> Self {
        Self::with_clock(name.into(), Clock::new())
    }

    #[must_use]
    pub(crate) fn with_clock(name: String, clock: Clock) -> Self {
        Self {
            name,
            inner: Mutex::new(Inner::new(clock)),
        }
    }

    /// The name the stopwatch was created with.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The current lifecycle state.
    #[must_use]
    pub fn state(&self) -> State {
        self.inner.lock().state
    }

    /// Whether the stopwatch is ready to [`start()`](Self::start).
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.state() == State::Ready
    }

    /// Whether the stopwatch is running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state() == State::Running
    }

    /// Whether the stopwatch is paused.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.state() == State::Paused
    }

    /// Whether the stopwatch has been stopped.
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.state() == State::Stopped
    }

    /// Starts the stopwatch and records the first pin, whose value is always `0`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotReady`] unless the stopwatch is ready. Use
    /// [`restart()`](Self::restart) or [`reset()`](Self::reset) to start over.
    pub fn start(&self) -> Result<i64> {
        let mut inner = self.inner.lock();

        if inner.state != State::Ready {
            return Err(Error::NotReady {
                name: self.name.clone(),
                actual: inner.state,
            });
        }

        let nanos = inner.begin();
        debug!(name = %self.name, "stopwatch started");
        Ok(nanos)
    }

    /// Records an unlabeled pin and returns its value in nanoseconds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotWorking`] unless the stopwatch is running or paused.
    pub fn pin(&self) -> Result<i64> {
        self.record(None)
    }

    /// Records a labeled pin and returns its value in nanoseconds.
    ///
    /// Labels need not be unique. Lookups by label find the earliest pin with that label.
    ///
    /// A pin recorded while paused carries the time at which the stopwatch was paused.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotWorking`] unless the stopwatch is running or paused.
    pub fn pin_named(&self, label: impl Into<String>) -> Result<i64> {
        self.record(Some(label.into()))
    }

    fn record(&self, label: Option<String>) -> Result<i64> {
        let mut inner = self.inner.lock();
        self.record_locked(&mut inner, label)
    }

    fn record_locked(&self, inner: &mut Inner, label: Option<String>) -> Result<i64> {
        if !inner.state.can_pin() {
            return Err(Error::NotWorking {
                name: self.name.clone(),
                actual: inner.state,
            });
        }

        let nanos = inner.record(label);
        trace!(
            name = %self.name,
            nanos,
            index = inner.pins.len().saturating_sub(1),
            "pin recorded"
        );
        Ok(nanos)
    }

    /// Pauses the stopwatch. Time spent paused is excluded from all later pins.
    ///
    /// Does nothing unless the stopwatch is running.
    pub fn pause(&self) {
        let mut inner = self.inner.lock();

        if inner.state != State::Running {
            trace!(name = %self.name, state = %inner.state, "pause ignored");
            return;
        }

        inner.pause_anchor = Some(inner.clock.now());
        inner.state = State::Paused;
        trace!(name = %self.name, "stopwatch paused");
    }

    /// Resumes a paused stopwatch.
    ///
    /// Does nothing unless the stopwatch is paused.
    pub fn keep(&self) {
        let mut inner = self.inner.lock();

        let (State::Paused, Some(paused_at)) = (inner.state, inner.pause_anchor) else {
            trace!(name = %self.name, state = %inner.state, "resume ignored");
            return;
        };

        let now = inner.clock.now();
        let paused_for = now.saturating_duration_since(paused_at);
        inner.cumulative_pause = inner.cumulative_pause.saturating_add(paused_for);
        inner.pause_anchor = None;
        inner.state = State::Running;
        trace!(
            name = %self.name,
            paused_nanos = nanos_between(now, paused_at),
            "stopwatch resumed"
        );
    }

    /// Records a final pin and stops the stopwatch. Returns the value of the final pin.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotWorking`] unless the stopwatch is running or paused.
    pub fn stop(&self) -> Result<i64> {
        let mut inner = self.inner.lock();

        let nanos = self.record_locked(&mut inner, None)?;
        inner.state = State::Stopped;
        debug!(name = %self.name, nanos, pins = inner.pins.len(), "stopwatch stopped");
        Ok(nanos)
    }

    /// Clears the timeline and starts again from any state. Returns the first pin (`0`).
    pub fn restart(&self) -> i64 {
        let mut inner = self.inner.lock();

        inner.clear();
        let nanos = inner.begin();
        debug!(name = %self.name, "stopwatch restarted");
        nanos
    }

    /// Clears the timeline and returns the stopwatch to the ready state.
    pub fn reset(&self) {
        self.inner.lock().clear();
        debug!(name = %self.name, "stopwatch reset");
    }

    /// Number of pins recorded since the last start.
    #[must_use]
    pub fn pin_count(&self) -> usize {
        self.inner.lock().pins.len()
    }

    /// Value of the first pin with the given label, or [`NOT_FOUND`].
    #[must_use]
    pub fn pin_time(&self, label: &str) -> i64 {
        let inner = self.inner.lock();
        inner
            .position(label)
            .and_then(|i| inner.nanos_at(i))
            .unwrap_or(NOT_FOUND)
    }

    /// Like [`pin_time()`](Self::pin_time) but converted to `unit`.
    #[must_use]
    pub fn pin_time_in(&self, label: &str, unit: TimeUnit) -> i64 {
        unit.convert(self.pin_time(label))
    }

    /// Value of the pin at `index`, or [`NOT_FOUND`] if `index` is not less than the pin count.
    #[must_use]
    pub fn pin_time_at(&self, index: usize) -> i64 {
        self.inner.lock().nanos_at(index).unwrap_or(NOT_FOUND)
    }

    /// Like [`pin_time_at()`](Self::pin_time_at) but converted to `unit`.
    #[must_use]
    pub fn pin_time_at_in(&self, index: usize, unit: TimeUnit) -> i64 {
        unit.convert(self.pin_time_at(index))
    }

    /// Value of the most recent pin.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotEnoughPins`] if no pin has been recorded.
    pub fn last(&self) -> Result<i64> {
        let inner = self.inner.lock();
        inner.require_pins(&self.name, 1)?;
        Ok(inner.last().unwrap_or_default())
    }

    /// Like [`last()`](Self::last) but converted to `unit`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotEnoughPins`] if no pin has been recorded.
    pub fn last_in(&self, unit: TimeUnit) -> Result<i64> {
        self.last().map(|nanos| unit.convert(nanos))
    }

    /// Value of the first pin, the one recorded by `start()`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotEnoughPins`] if no pin has been recorded.
    pub fn start_time(&self) -> Result<i64> {
        let inner = self.inner.lock();
        inner.require_pins(&self.name, 1)?;
        Ok(inner.first().unwrap_or_default())
    }

    /// Like [`start_time()`](Self::start_time) but converted to `unit`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotEnoughPins`] if no pin has been recorded.
    pub fn start_time_in(&self, unit: TimeUnit) -> Result<i64> {
        self.start_time().map(|nanos| unit.convert(nanos))
    }

    /// Interval between the last two pins.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotEnoughPins`] if fewer than two pins have been recorded.
    pub fn last_interval(&self) -> Result<i64> {
        let inner = self.inner.lock();
        inner.require_pins(&self.name, 2)?;

        let last = inner.pins.len().checked_sub(1);
        Ok(inner.interval_to_previous(last))
    }

    /// Like [`last_interval()`](Self::last_interval) but converted to `unit`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotEnoughPins`] if fewer than two pins have been recorded.
    pub fn last_interval_in(&self, unit: TimeUnit) -> Result<i64> {
        self.last_interval().map(|nanos| unit.convert(nanos))
    }

    /// Un-paused time from the last pin until now.
    ///
    /// While paused, "now" is the moment the stopwatch was paused.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotEnoughPins`] if no pin has been recorded.
    pub fn last_to_now(&self) -> Result<i64> {
        let mut inner = self.inner.lock();
        inner.require_pins(&self.name, 1)?;

        let last = inner.last().unwrap_or_default();
        Ok(inner.reading().saturating_sub(last))
    }

    /// Like [`last_to_now()`](Self::last_to_now) but converted to `unit`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotEnoughPins`] if no pin has been recorded.
    pub fn last_to_now_in(&self, unit: TimeUnit) -> Result<i64> {
        self.last_to_now().map(|nanos| unit.convert(nanos))
    }

    /// Un-paused time from the start until now.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotEnoughPins`] if no pin has been recorded.
    pub fn start_to_now(&self) -> Result<i64> {
        let mut inner = self.inner.lock();
        inner.require_pins(&self.name, 1)?;

        let first = inner.first().unwrap_or_default();
        Ok(inner.reading().saturating_sub(first))
    }

    /// Like [`start_to_now()`](Self::start_to_now) but converted to `unit`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotEnoughPins`] if no pin has been recorded.
    pub fn start_to_now_in(&self, unit: TimeUnit) -> Result<i64> {
        self.start_to_now().map(|nanos| unit.convert(nanos))
    }

    /// Interval between the first and the last pin.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotEnoughPins`] if no pin has been recorded.
    pub fn whole_interval(&self) -> Result<i64> {
        let inner = self.inner.lock();
        inner.require_pins(&self.name, 1)?;

        let first = inner.first().unwrap_or_default();
        let last = inner.last().unwrap_or_default();
        Ok(last.saturating_sub(first))
    }

    /// Like [`whole_interval()`](Self::whole_interval) but converted to `unit`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotEnoughPins`] if no pin has been recorded.
    pub fn whole_interval_in(&self, unit: TimeUnit) -> Result<i64> {
        self.whole_interval().map(|nanos| unit.convert(nanos))
    }

    /// Interval from the pin labeled `from` to the pin labeled `to`.
    ///
    /// Negative if `to` was recorded before `from`. [`NOT_FOUND`] if either label is missing.
    #[must_use]
    pub fn pin_interval(&self, from: &str, to: &str) -> i64 {
        let inner = self.inner.lock();
        inner.interval_between(inner.position(from), inner.position(to))
    }

    /// Like [`pin_interval()`](Self::pin_interval) but converted to `unit`.
    #[must_use]
    pub fn pin_interval_in(&self, from: &str, to: &str, unit: TimeUnit) -> i64 {
        unit.convert(self.pin_interval(from, to))
    }

    /// Interval from the pin at index `from` to the pin at index `to`.
    ///
    /// [`NOT_FOUND`] if either index is not less than the pin count.
    #[must_use]
    pub fn pin_interval_at(&self, from: usize, to: usize) -> i64 {
        self.inner.lock().interval_between(Some(from), Some(to))
    }

    /// Like [`pin_interval_at()`](Self::pin_interval_at) but converted to `unit`.
    #[must_use]
    pub fn pin_interval_at_in(&self, from: usize, to: usize, unit: TimeUnit) -> i64 {
        unit.convert(self.pin_interval_at(from, to))
    }

    /// Interval from the pin before the one labeled `label` to that pin.
    ///
    /// [`NOT_FOUND`] if the label is missing or belongs to the first pin.
    #[must_use]
    pub fn previous_interval(&self, label: &str) -> i64 {
        let inner = self.inner.lock();
        inner.interval_to_previous(inner.position(label))
    }

    /// Like [`previous_interval()`](Self::previous_interval) but converted to `unit`.
    #[must_use]
    pub fn previous_interval_in(&self, label: &str, unit: TimeUnit) -> i64 {
        unit.convert(self.previous_interval(label))
    }

    /// Interval from the pin at `index - 1` to the pin at `index`.
    ///
    /// [`NOT_FOUND`] if `index` is zero or not less than the pin count.
    #[must_use]
    pub fn previous_interval_at(&self, index: usize) -> i64 {
        self.inner.lock().interval_to_previous(Some(index))
    }

    /// Like [`previous_interval_at()`](Self::previous_interval_at) but converted to `unit`.
    #[must_use]
    pub fn previous_interval_at_in(&self, index: usize, unit: TimeUnit) -> i64 {
        unit.convert(self.previous_interval_at(index))
    }

    /// All pin values in recording order, in nanoseconds.
    #[must_use]
    pub fn timeline(&self) -> Vec<i64> {
        self.timeline_in(TimeUnit::Nanoseconds)
    }

    /// All pin values in recording order, converted to `unit`.
    #[must_use]
    pub fn timeline_in(&self, unit: TimeUnit) -> Vec<i64> {
        self.inner
            .lock()
            .pins
            .iter()
            .map(|pin| unit.convert(pin.nanos))
            .collect()
    }

    /// All pin labels in recording order, index-aligned with [`timeline()`](Self::timeline).
    #[must_use]
    pub fn pin_names(&self) -> Vec<Option<String>> {
        self.inner
            .lock()
            .pins
            .iter()
            .map(|pin| pin.label.clone())
            .collect()
    }

    /// Differences between consecutive pins, in nanoseconds. One shorter than the timeline.
    #[must_use]
    pub fn interval_line(&self) -> Vec<i64> {
        self.interval_line_in(TimeUnit::Nanoseconds)
    }

    /// Differences between consecutive pins, converted to `unit`.
    #[must_use]
    pub fn interval_line_in(&self, unit: TimeUnit) -> Vec<i64> {
        self.inner
            .lock()
            .pins
            .windows(2)
            .filter_map(|pair| match pair {
                [earlier, later] => Some(unit.convert(later.nanos.saturating_sub(earlier.nanos))),
                _ => None,
            })
            .collect()
    }
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Stopwatch {
    #[cfg_attr(test, mutants::skip)] // Layout is cosmetic, only the presence of data is tested.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.lock();

        writeln!(
            f,
            "stopwatch '{}' ({}), {} pin(s):",
            self.name,
            inner.state,
            inner.pins.len()
        )?;

        let mut previous = None;
        for (index, pin) in inner.pins.iter().enumerate() {
            let label = pin.label.as_deref().unwrap_or("-");
            let elapsed = Duration::from_nanos(u64::try_from(pin.nanos).unwrap_or_default());

            write!(f, "  [{index}] {label}: {elapsed:?}")?;
            if let Some(previous) = previous {
                let delta = nanos_between_pins(previous, pin.nanos);
                write!(f, " (+{delta:?})")?;
            }
            writeln!(f)?;

            previous = Some(pin.nanos);
        }

        Ok(())
    }
}

fn nanos_between_pins(earlier: i64, later: i64) -> Duration {
    Duration::from_nanos(u64::try_from(later.saturating_sub(earlier)).unwrap_or_default())
}
