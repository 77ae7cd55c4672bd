//! UI rendering
//!
//! Drawing functions that turn a [`View`] render tree into terminal output
//! using ratatui widgets. All functions are pure (no I/O): every cell drawn
//! depends only on the render tree and the frame size.

mod features;
mod headline;
mod overlay;
mod status;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};
use timeflies_app::view::View;

/// Render the entire UI.
pub fn render(frame: &mut Frame, view: &View) {
    const HEADLINE_HEIGHT: u16 = 3;
    const FEATURES_HEIGHT: u16 = 4;
    const CANVAS_MIN_HEIGHT: u16 = 1;
    const STATUS_HEIGHT: u16 = 1;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADLINE_HEIGHT),
            Constraint::Length(FEATURES_HEIGHT),
            Constraint::Min(CANVAS_MIN_HEIGHT),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(frame.area());

    let [headline_area, features_area, _canvas_area, status_area] = chunks.as_ref() else {
        return;
    };

    headline::render(frame, &view.headline, *headline_area);
    features::render(frame, &view.features, *features_area);
    status::render(frame, view, *status_area);

    // Letters float above everything else
    overlay::render(frame, &view.overlay);
}
