//! Input line
//!
//! Displays the input buffer with cursor and a character counter. Typing is
//! only possible while paired; otherwise a placeholder is shown.

use randomchat_app::MAX_INPUT_CHARS;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
};

use crate::App;

const PROMPT_WIDTH: u16 = 2; // "> "
const INPUT_LINE_OFFSET_Y: u16 = 1; // inside top border
const BORDER_WIDTH: u16 = 1;

/// Render the input line.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    if !app.input_enabled() {
        let block = Block::default().borders(Borders::ALL);
        let placeholder = Paragraph::new("> waiting for a chat partner")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(placeholder, area);
        return;
    }

    let typed = app.input().chars().count();
    let block = Block::default()
        .borders(Borders::ALL)
        .title_bottom(format!(" {typed}/{MAX_INPUT_CHARS} "));

    let input_text = format!("> {}", app.input());
    let paragraph =
        Paragraph::new(input_text).style(Style::default().fg(Color::White)).block(block);

    frame.render_widget(paragraph, area);

    let cursor_offset = u16::try_from(typed).unwrap_or(u16::MAX);
    let cursor_x = area
        .x
        .saturating_add(BORDER_WIDTH)
        .saturating_add(PROMPT_WIDTH)
        .saturating_add(cursor_offset);
    let cursor_y = area.y.saturating_add(INPUT_LINE_OFFSET_Y);
    let max_x = area.x.saturating_add(area.width).saturating_sub(BORDER_WIDTH + 1);

    frame.set_cursor_position((cursor_x.min(max_x), cursor_y));
}
