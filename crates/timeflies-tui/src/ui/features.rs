//! Feature status table
//!
//! One row per tracking mode with its on/off switch and toggle key.

use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Cell, Row, Table},
};
use timeflies_app::view::FeatureRow;

const SWITCH_ON: &str = "[ON ]";
const SWITCH_OFF: &str = "[OFF]";
const KEY_WIDTH: u16 = 3;
const SWITCH_WIDTH: u16 = 5;

/// Render the feature table.
pub fn render(frame: &mut Frame, features: &[FeatureRow], area: Rect) {
    let rows = features.iter().map(|feature| {
        let switch = if feature.enabled {
            Span::styled(SWITCH_ON, Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
        } else {
            Span::styled(SWITCH_OFF, Style::default().fg(Color::DarkGray))
        };

        Row::new(vec![
            Cell::from(format!("[{}]", feature.key)),
            Cell::from(feature.label),
            Cell::from(switch),
        ])
    });

    let table = Table::new(rows, [
        Constraint::Length(KEY_WIDTH),
        Constraint::Min(0),
        Constraint::Length(SWITCH_WIDTH),
    ])
    .block(Block::default().borders(Borders::ALL).title(" Features "));

    frame.render_widget(table, area);
}
