//! Status bar
//!
//! Displays peer link status and the transient status message.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use timeflies_app::{PeerState, view::View};

/// Render the status bar.
pub fn render(frame: &mut Frame, view: &View, area: Rect) {
    let peer_status = match view.peer {
        PeerState::Offline => Span::styled("Peer offline", Style::default().fg(Color::Gray)),
        PeerState::Online => Span::styled(
            "Peer online",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
    };

    let message = view.status.as_deref().map_or_else(String::new, |msg| format!(" | {msg}"));

    let status_line = Line::from(vec![
        Span::raw(" "),
        peer_status,
        Span::raw(message),
        Span::styled(" | [q] quit", Style::default().fg(Color::Gray)),
    ]);

    let paragraph =
        Paragraph::new(status_line).style(Style::default().bg(Color::DarkGray).fg(Color::White));

    frame.render_widget(paragraph, area);
}
