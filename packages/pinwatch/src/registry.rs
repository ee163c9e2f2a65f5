//! Named stopwatch registry.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use crate::clock::Clock;
use crate::pal::PlatformFacade;
use crate::{Result, Stopwatch};

/// Hands out shared stopwatches by name.
///
/// Asking for the same name twice returns the same instance, so distant call sites can pin the
/// same timeline without passing the stopwatch around. The registry keeps one shared reference
/// per name. Removing a name only forgets that reference, any caller still holding the
/// stopwatch can keep using it.
///
/// Create one registry at program start and hand it (or an `Arc` of it) to the code that needs
/// it. The registry is safe to use from many threads at once and never creates two stopwatches
/// for one name.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use pinwatch::Registry;
///
/// let registry = Registry::new();
///
/// let request = registry.start("request")?;
/// request.pin_named("parsed")?;
///
/// // Elsewhere, the same stopwatch is found by name.
/// let same = registry.get_or_create("request");
/// assert!(Arc::ptr_eq(&request, &same));
/// same.stop()?;
///
/// assert!(registry.remove("request").is_some());
/// assert!(registry.get_or_create("request").is_ready());
/// # Ok::<(), pinwatch::Error>(())
/// ```
#[derive(Debug)]
pub struct Registry {
    watches: Mutex<HashMap<String, Arc<Stopwatch>>>,
    platform: PlatformFacade,
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::with_platform(PlatformFacade::real())
    }

    #[must_use]
    pub(crate) fn with_platform(platform: PlatformFacade) -> Self {
        Self {
            watches: Mutex::new(HashMap::new()),
            platform,
        }
    }

    /// Returns the stopwatch registered under `name`, creating a ready one if there is none.
    #[must_use]
    pub fn get_or_create(&self, name: impl Into<String>) -> Arc<Stopwatch> {
        let mut watches = self.watches.lock();

        let watch = watches.entry(name.into()).or_insert_with_key(|name| {
            debug!(name = %name, "stopwatch registered");
            Arc::new(Stopwatch::with_clock(
                name.clone(),
                Clock::from_pal(&self.platform),
            ))
        });

        Arc::clone(watch)
    }

    /// Returns the stopwatch registered under `name` after starting it.
    ///
    /// The stopwatch is created if there is none.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotReady`](crate::Error::NotReady) if the stopwatch already exists and
    /// is not ready.
    pub fn start(&self, name: impl Into<String>) -> Result<Arc<Stopwatch>> {
        // The registry lock is released before the stopwatch lock is taken.
        let watch = self.get_or_create(name);
        watch.start()?;
        Ok(watch)
    }

    /// Forgets the stopwatch registered under `name`, returning it if there was one.
    pub fn remove(&self, name: &str) -> Option<Arc<Stopwatch>> {
        let removed = self.watches.lock().remove(name);

        if removed.is_some() {
            debug!(name, "stopwatch removed");
        }

        removed
    }

    /// Whether a stopwatch is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.watches.lock().contains_key(name)
    }

    /// Number of registered stopwatches.
    #[must_use]
    pub fn len(&self) -> usize {
        self.watches.lock().len()
    }

    /// Whether no stopwatch is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.watches.lock().is_empty()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
