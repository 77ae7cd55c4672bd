//! Environment abstraction for deterministic testing.
//!
//! Decouples timing logic (staggered marker delays) from the system clock.
//! Production uses tokio's clock, which tests can pause and advance
//! deterministically.

use std::{
    ops::{Add, Sub},
    time::Duration,
};

/// Abstract environment providing time and async sleeping.
///
/// Implementations MUST guarantee that `now()` never goes backwards.
pub trait Environment: Clone + Send + Sync + 'static {
    /// The specific instant type used by this environment.
    type Instant: Copy
        + Ord
        + Send
        + Sync
        + std::fmt::Debug
        + Sub<Output = Duration>
        + Add<Duration, Output = Self::Instant>
        + 'static;

    /// Current time (monotonic).
    fn now(&self) -> Self::Instant;

    /// Sleeps for the specified duration.
    fn sleep(&self, duration: Duration) -> impl std::future::Future<Output = ()> + Send;

    /// Sleeps until `deadline`. Returns immediately if it already passed.
    fn sleep_until(
        &self,
        deadline: Self::Instant,
    ) -> impl std::future::Future<Output = ()> + Send {
        let now = self.now();
        let remaining = if deadline > now { deadline - now } else { Duration::ZERO };
        self.sleep(remaining)
    }
}
