//! Text row
//!
//! Shows the display string, or the edit buffer with a cursor.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use timeflies_app::view::Headline;
use unicode_width::UnicodeWidthChar;

const PROMPT: &str = "> ";
const PROMPT_WIDTH: u16 = 2;
const BORDER_OFFSET: u16 = 1; // inside left/top border
const RIGHT_PADDING: u16 = 1; // inside right border

/// Render the text row.
pub fn render(frame: &mut Frame, headline: &Headline, area: Rect) {
    match headline {
        Headline::Showing { text } => {
            let block = Block::default().borders(Borders::ALL).title(" Text [e]dit ");
            let line = Line::from(Span::styled(
                text.as_str(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ));
            frame.render_widget(Paragraph::new(line).block(block), area);
        },
        Headline::Editing { text, cursor } => {
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title(" Editing [Enter] submit ");
            let line = Line::from(vec![Span::raw(PROMPT), Span::raw(text.as_str())]);
            frame.render_widget(Paragraph::new(line).block(block), area);

            let available_width =
                area.width.saturating_sub(PROMPT_WIDTH + BORDER_OFFSET + RIGHT_PADDING);
            let column = u16::try_from(cursor_column(text, *cursor)).unwrap_or(u16::MAX);
            let cursor_offset = column.min(available_width);

            let cursor_x = area
                .x
                .saturating_add(BORDER_OFFSET)
                .saturating_add(PROMPT_WIDTH)
                .saturating_add(cursor_offset);
            let cursor_y = area.y.saturating_add(BORDER_OFFSET);
            let max_x = area.x.saturating_add(area.width).saturating_sub(RIGHT_PADDING);

            frame.set_cursor_position((cursor_x.min(max_x), cursor_y));
        },
    }
}

/// Display columns covered by the first `cursor` characters of `text`.
fn cursor_column(text: &str, cursor: usize) -> usize {
    text.chars().take(cursor).map(|c| c.width().unwrap_or(0)).sum()
}
