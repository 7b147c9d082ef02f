//! Single-slot value cache with an absolute expiry.

use std::sync::{Mutex, PoisonError};
use std::time::SystemTime;

use crate::time::{Clock, SystemClock};

/// Holds at most one value together with the instant it stops being valid.
///
/// [`TtlCache::get`] returns `None` both before the first
/// [`TtlCache::set`] and once `now >= expires_at`; callers treat the two
/// the same way. The value and its expiry are stored and read together
/// under one lock.
///
/// # Example
///
/// ```
/// use payments::auth::TtlCache;
/// use std::time::{Duration, SystemTime};
///
/// let cache = TtlCache::new();
/// assert_eq!(cache.get(), None);
///
/// cache.set("token".to_string(), SystemTime::now() + Duration::from_secs(10));
/// assert_eq!(cache.get().as_deref(), Some("token"));
/// ```
#[derive(Debug)]
pub struct TtlCache<T, C = SystemClock> {
    slot: Mutex<Option<(T, SystemTime)>>,
    clock: C,
}

impl<T: Clone> TtlCache<T, SystemClock> {
    /// Creates an empty cache reading the system clock.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl<T: Clone> Default for TtlCache<T, SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone, C: Clock> TtlCache<T, C> {
    /// Creates an empty cache reading `clock`.
    #[must_use]
    pub const fn with_clock(clock: C) -> Self {
        Self {
            slot: Mutex::new(None),
            clock,
        }
    }

    /// Stores `value`, replacing whatever was there.
    pub fn set(&self, value: T, expires_at: SystemTime) {
        *self.lock() = Some((value, expires_at));
    }

    /// Returns the value if one is stored and has not expired.
    #[must_use]
    pub fn get(&self) -> Option<T> {
        let now = self.clock.now();
        match &*self.lock() {
            Some((value, expires_at)) if now < *expires_at => Some(value.clone()),
            _ => None,
        }
    }

    /// Empties the slot.
    pub fn clear(&self) {
        *self.lock() = None;
    }

    /// Returns the clock this cache reads.
    pub const fn clock(&self) -> &C {
        &self.clock
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<(T, SystemTime)>> {
        // The slot is always a complete pair, so a poisoned lock is still consistent.
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
