//! Status bar
//!
//! Displays the session phase, the online count and the key hints.

use randomchat_app::{Phase, Snapshot};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Render the status bar.
pub fn render(frame: &mut Frame, snapshot: &Snapshot<'_>, area: Rect) {
    let phase = match snapshot.phase {
        Phase::Idle => Span::styled("Not connected", Style::default().fg(Color::Gray)),
        Phase::Connecting => Span::styled("Connecting...", Style::default().fg(Color::Yellow)),
        Phase::WaitingForPeer => {
            Span::styled("Finding your match...", Style::default().fg(Color::Yellow))
        },
        Phase::PairedChatting => Span::styled(
            "Chatting",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
        Phase::Closed => Span::styled("Disconnected", Style::default().fg(Color::Red)),
    };

    let toggle = if snapshot.phase.is_active() { "Exit Chat" } else { "Start Chat" };

    let status_line = Line::from(vec![
        Span::raw(" "),
        phase,
        Span::styled(
            format!(" | Online: {} | Tab: {toggle} | Esc: Quit", snapshot.peer_count),
            Style::default().fg(Color::Gray),
        ),
    ]);

    let paragraph =
        Paragraph::new(status_line).style(Style::default().bg(Color::DarkGray).fg(Color::White));

    frame.render_widget(paragraph, area);
}
