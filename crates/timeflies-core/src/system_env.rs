//! Production environment backed by the tokio clock.
//!
//! Using `tokio::time::Instant` rather than `std::time::Instant` lets tests
//! run the exact production environment under a paused clock
//! (`#[tokio::test(start_paused = true)]`).

use std::time::Duration;

use tokio::time::Instant;

use crate::env::Environment;

/// Production environment using the tokio clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnv;

impl SystemEnv {
    /// Create a new system environment.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Environment for SystemEnv {
    type Instant = Instant;

    fn now(&self) -> Self::Instant {
        Instant::now()
    }

    fn sleep(&self, duration: Duration) -> impl std::future::Future<Output = ()> + Send {
        tokio::time::sleep(duration)
    }
}
