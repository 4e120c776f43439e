//! Shared application state for axum handlers.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use homesim_app::home::Home;

/// Application state shared across all axum handlers.
///
/// Generic over the clock and integration types to avoid dynamic dispatch.
/// `Clone` is implemented manually so the underlying types themselves do not
/// need to be `Clone`. Only the `Arc` is cloned.
pub struct AppState<C, I> {
    /// The simulated home, shared with the tick loop.
    pub home: Arc<Mutex<Home<C, I>>>,
    /// Page auto-refresh period.
    pub refresh: Duration,
    /// How long a flash notice stays visible.
    pub notice_ttl: Duration,
}

impl<C, I> Clone for AppState<C, I> {
    fn clone(&self) -> Self {
        Self {
            home: Arc::clone(&self.home),
            refresh: self.refresh,
            notice_ttl: self.notice_ttl,
        }
    }
}

impl<C, I> AppState<C, I> {
    /// Create a new state around a shared home.
    pub fn new(home: Arc<Mutex<Home<C, I>>>, refresh: Duration) -> Self {
        Self {
            home,
            refresh,
            notice_ttl: Duration::from_secs(10),
        }
    }

    /// Lock the home for the duration of one request. Poisoned locks are recovered.
    pub fn lock(&self) -> MutexGuard<'_, Home<C, I>> {
        self.home.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
