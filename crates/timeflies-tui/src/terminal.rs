//! Terminal driver for the TUI.
//!
//! Implements the [`Driver`] trait for terminal I/O using crossterm for
//! keyboard and mouse events and ratatui for rendering. Mouse capture is
//! enabled so pointer movement reaches the marker streams.

use std::io::{self, Stdout, stdout};

use crossterm::{
    ExecutableCommand,
    event::{
        DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyCode, KeyEvent,
        KeyEventKind, KeyModifiers, MouseEventKind,
    },
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use thiserror::Error;
use timeflies_app::{AppEvent, Driver, KeyInput, view::View};
use timeflies_core::Position;

use crate::ui;

/// Terminal driver errors.
#[derive(Debug, Error)]
pub enum TerminalError {
    /// I/O error from terminal operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Terminal driver implementing the [`Driver`] trait.
///
/// Owns the terminal for its whole lifetime: raw mode, the alternate screen
/// and mouse capture are enabled on creation and restored on [`Driver::stop`]
/// or drop.
pub struct TerminalDriver {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    event_stream: EventStream,
    restored: bool,
}

impl TerminalDriver {
    /// Take over the terminal.
    pub fn new() -> Result<Self, TerminalError> {
        enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?;
        stdout().execute(EnableMouseCapture)?;

        let backend = CrosstermBackend::new(stdout());
        let terminal = Terminal::new(backend)?;
        let event_stream = EventStream::new();

        Ok(Self { terminal, event_stream, restored: false })
    }

    /// Convert a crossterm key event to `KeyInput`.
    fn convert_key(key: KeyEvent) -> Option<KeyInput> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(KeyInput::Interrupt);
        }

        match key.code {
            KeyCode::Char(c) => Some(KeyInput::Char(c)),
            KeyCode::Enter => Some(KeyInput::Enter),
            KeyCode::Backspace => Some(KeyInput::Backspace),
            KeyCode::Delete => Some(KeyInput::Delete),
            KeyCode::Esc => Some(KeyInput::Esc),
            KeyCode::Left => Some(KeyInput::Left),
            KeyCode::Right => Some(KeyInput::Right),
            KeyCode::Home => Some(KeyInput::Home),
            KeyCode::End => Some(KeyInput::End),
            _ => None,
        }
    }

    /// Convert a terminal event to an `AppEvent`. `None` for ignored events.
    fn convert_event(event: Event) -> Option<AppEvent> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                Self::convert_key(key).map(AppEvent::Key)
            },
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                    Some(AppEvent::PointerMoved(Position::from_cell(mouse.column, mouse.row)))
                },
                _ => None,
            },
            Event::Resize(..) => Some(AppEvent::Resize),
            _ => None,
        }
    }

    fn restore(&mut self) {
        if self.restored {
            return;
        }
        self.restored = true;

        let _ = stdout().execute(DisableMouseCapture);
        let _ = disable_raw_mode();
        let _ = stdout().execute(LeaveAlternateScreen);
    }
}

impl Driver for TerminalDriver {
    type Error = TerminalError;

    async fn poll_event(&mut self) -> Result<Option<AppEvent>, Self::Error> {
        loop {
            match self.event_stream.next().await {
                Some(Ok(event)) => {
                    if let Some(app_event) = Self::convert_event(event) {
                        return Ok(Some(app_event));
                    }
                },
                Some(Err(e)) => return Err(TerminalError::Io(e)),
                None => return Ok(None),
            }
        }
    }

    fn render(&mut self, view: &View) -> Result<(), Self::Error> {
        self.terminal.draw(|frame| {
            ui::render(frame, view);
        })?;
        Ok(())
    }

    fn stop(&mut self) {
        self.restore();
    }
}

impl Drop for TerminalDriver {
    fn drop(&mut self) {
        self.restore();
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{MouseButton, MouseEvent};

    use super::*;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent { kind, column, row, modifiers: KeyModifiers::NONE })
    }

    #[test]
    fn ctrl_c_interrupts() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(TerminalDriver::convert_key(key), Some(KeyInput::Interrupt));

        let plain = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE);
        assert_eq!(TerminalDriver::convert_key(plain), Some(KeyInput::Char('c')));
    }

    #[test]
    fn mouse_movement_becomes_pointer_in_view_units() {
        let event = TerminalDriver::convert_event(mouse(MouseEventKind::Moved, 3, 2));
        assert!(matches!(event, Some(AppEvent::PointerMoved(p)) if p == Position::new(30, 40)));

        let drag = TerminalDriver::convert_event(mouse(MouseEventKind::Drag(MouseButton::Left), 1, 1));
        assert!(matches!(drag, Some(AppEvent::PointerMoved(_))));
    }

    #[test]
    fn clicks_and_scrolls_are_ignored() {
        assert!(
            TerminalDriver::convert_event(mouse(MouseEventKind::Down(MouseButton::Left), 0, 0))
                .is_none()
        );
        assert!(TerminalDriver::convert_event(mouse(MouseEventKind::ScrollUp, 0, 0)).is_none());
    }

    #[test]
    fn resize_requests_redraw() {
        let event = TerminalDriver::convert_event(Event::Resize(100, 40));
        assert!(matches!(event, Some(AppEvent::Resize)));
    }

    #[test]
    fn key_release_is_ignored() {
        let mut key = KeyEvent::new(KeyCode::Char('l'), KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        assert!(TerminalDriver::convert_event(Event::Key(key)).is_none());
    }
}
