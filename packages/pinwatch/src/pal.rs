//! Platform abstraction layer for the monotonic clock.
//!
//! Stopwatches never call `std::time::Instant::now()` directly. They go through a
//! [`TimeSource`] created by a [`Platform`], which lets tests substitute a fake clock that only
//! moves when the test says so.

mod abstractions;
mod facade;
#[cfg(test)]
mod fake;
mod real;

pub(crate) use abstractions::*;
pub(crate) use facade::*;
#[cfg(test)]
pub(crate) use fake::*;
pub(crate) use real::*;
