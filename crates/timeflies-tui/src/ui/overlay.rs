//! Letter overlay
//!
//! Draws tracked letters at absolute positions, clipped to the frame.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Span,
};
use timeflies_app::view::OverlaySpan;
use timeflies_core::Position;

/// Render overlay letters.
pub fn render(frame: &mut Frame, spans: &[OverlaySpan]) {
    let area = frame.area();
    let style = Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD);

    for span in spans {
        let (x, y) = Position::new(span.x, span.y).to_cell();
        let cell = Rect::new(x, y, 1, 1).intersection(area);
        if cell.is_empty() {
            continue;
        }
        frame.render_widget(Span::styled(span.ch.to_string(), style), cell);
    }
}
