//! Driver trait for abstracting I/O operations.
//!
//! The [`Driver`] trait decouples the runtime from a specific frontend. The
//! terminal frontend implements it with crossterm and ratatui; tests
//! implement it with scripted events and recorded frames.

use std::future::Future;

use crate::{AppEvent, view::View};

/// Abstracts input and rendering for the application runtime.
///
/// # Implementations
///
/// - **TUI**: crossterm events (keys, mouse movement, resize), ratatui output
/// - **Tests**: scripted event channel, recorded render trees
pub trait Driver: Send {
    /// Platform-specific error type.
    type Error: std::error::Error + Send + 'static;

    /// Wait for the next input event.
    ///
    /// Returns `None` when input is closed. Must be cancel-safe: the runtime
    /// drops this future whenever another source produces work first.
    fn poll_event(&mut self) -> impl Future<Output = Result<Option<AppEvent>, Self::Error>> + Send;

    /// Draw a render tree.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    fn render(&mut self, view: &View) -> Result<(), Self::Error>;

    /// Release frontend resources.
    fn stop(&mut self);
}
