#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Named stopwatches that record a timeline of labeled pins while excluding paused time.
//!
//! This package instruments code paths for latency measurement. The core types are:
//!
//! - [`Stopwatch`] - A state machine (ready, running, paused, stopped) that records pins,
//!   each holding the un-paused nanoseconds elapsed since the stopwatch was started.
//! - [`Registry`] - Hands out shared stopwatches by name so distant call sites can pin the
//!   same timeline.
//! - [`TimeUnit`] - Converts the nanosecond values reported by queries into coarser units.
//!
//! Time is read from the monotonic clock. Wall clock adjustments do not affect measurements.
//!
//! # Recording a timeline
//!
//! ```
//! use pinwatch::{Stopwatch, TimeUnit};
//!
//! let watch = Stopwatch::with_name("import");
//! watch.start()?;
//!
//! // ... read the file ...
//! watch.pin_named("read")?;
//!
//! // ... parse it ...
//! watch.pin_named("parsed")?;
//! watch.stop()?;
//!
//! println!(
//!     "parsing took {} µs",
//!     watch.pin_interval_in("read", "parsed", TimeUnit::Microseconds)
//! );
//! println!("{watch}");
//! # Ok::<(), pinwatch::Error>(())
//! ```
//!
//! # Excluding paused time
//!
//! Time between [`pause()`](Stopwatch::pause) and [`keep()`](Stopwatch::keep) does not count
//! toward any pin recorded afterwards:
//!
//! ```
//! use pinwatch::Stopwatch;
//!
//! let watch = Stopwatch::with_name("paused");
//! watch.start()?;
//!
//! watch.pause();
//! std::thread::sleep(std::time::Duration::from_millis(20));
//! watch.keep();
//!
//! // The 20 ms spent paused are not part of the elapsed time.
//! assert!(watch.pin()? < 20_000_000);
//! # Ok::<(), pinwatch::Error>(())
//! ```
//!
//! # Missing pins and illegal states
//!
//! Lookups of pins that do not exist return [`NOT_FOUND`] rather than failing. Calling
//! [`start()`](Stopwatch::start) or [`pin()`](Stopwatch::pin) in a state that does not allow
//! it, or querying an empty timeline, returns an [`Error`]. [`pause()`](Stopwatch::pause) and
//! [`keep()`](Stopwatch::keep) silently do nothing when they do not apply.
//!
//! # Threading
//!
//! Both [`Stopwatch`] and [`Registry`] are thread-safe. Every operation on a stopwatch is
//! serialized by a lock owned by that stopwatch, and the registry guards its name map with a
//! separate lock.

mod clock;
mod error;
mod pal;
mod registry;
mod state;
mod stopwatch;
mod unit;

pub use error::*;
pub use registry::*;
pub use state::*;
pub use stopwatch::*;
pub use unit::*;
