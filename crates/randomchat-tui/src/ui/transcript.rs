//! Transcript pane
//!
//! Shows the newest transcript lines that fit, each prefixed by its origin.

use randomchat_app::{Origin, TranscriptEntry};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

/// Render the transcript, newest entries at the bottom.
pub fn render(frame: &mut Frame, entries: &[TranscriptEntry], area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" randomchat ");

    let visible = usize::from(area.height.saturating_sub(2));
    let skip = entries.len().saturating_sub(visible);

    let items: Vec<ListItem> = entries.iter().skip(skip).map(entry_line).collect();

    let list = List::new(items).block(block);
    frame.render_widget(list, area);
}

fn entry_line(entry: &TranscriptEntry) -> ListItem<'_> {
    let prefix = Span::styled(
        entry.origin().prefix(),
        origin_style(entry.origin()).add_modifier(Modifier::BOLD),
    );
    let body = match entry.origin() {
        Origin::System => Span::styled(entry.text(), Style::default().fg(Color::DarkGray)),
        Origin::SelfSent | Origin::Peer => Span::raw(entry.text()),
    };

    ListItem::new(Line::from(vec![prefix, Span::raw(" "), body]))
}

fn origin_style(origin: Origin) -> Style {
    match origin {
        Origin::SelfSent => Style::default().fg(Color::Cyan),
        Origin::Peer => Style::default().fg(Color::Magenta),
        Origin::System => Style::default().fg(Color::Yellow),
    }
}
