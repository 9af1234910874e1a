//! Layout rendering (top bar, status line)

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use ratatui::widgets::Padding;

use crate::model::{AccountState, ActiveSection, FeedSource, FeedState, UiState};
use super::utils::border_style;

pub fn render_top_bar(frame: &mut Frame, area: Rect, ui_state: &UiState, account: &AccountState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),        // Search input
            Constraint::Length(28),    // Signed-in user
        ])
        .split(area);

    let is_focused = ui_state.active_section == ActiveSection::Search;
    let search_style = if is_focused {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::White)
    };

    let search_text = if ui_state.search_query.is_empty() {
        "Type an album name and press Enter..."
    } else {
        &ui_state.search_query
    };

    // Remind the user that typed text is not searched until submitted
    let title = if !ui_state.search_query.is_empty() && !ui_state.search_submitted {
        " Search (Enter to submit) "
    } else {
        " Search "
    };

    let search = Paragraph::new(search_text)
        .style(search_style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .padding(Padding::horizontal(1))
                .border_style(border_style(is_focused)),
        );
    frame.render_widget(search, chunks[0]);

    let (user_text, user_style) = match &account.user {
        Some(user) => (format!("👤 {}", user.username), Style::default().fg(Color::Cyan)),
        None => ("Not signed in".to_string(), Style::default().fg(Color::DarkGray)),
    };
    let user = Paragraph::new(user_text)
        .style(user_style)
        .block(Block::default().borders(Borders::ALL).title(" Account "));
    frame.render_widget(user, chunks[1]);
}

pub fn render_status_line(frame: &mut Frame, area: Rect, feed: &FeedState) {
    let source = match &feed.source {
        FeedSource::Discover => " Discover".to_string(),
        FeedSource::Search(query) => format!(" Results for \"{}\"", query.trim()),
    };

    let mut spans = vec![
        Span::styled(source, Style::default().fg(Color::White)),
        Span::styled(format!("  {} albums", feed.albums.len()), Style::default().fg(Color::DarkGray)),
    ];
    if feed.source == FeedSource::Discover && feed.skipped > 0 {
        spans.push(Span::styled(
            format!("  ({} skipped)", feed.skipped),
            Style::default().fg(Color::Yellow),
        ));
    }
    spans.push(Span::styled(
        "   Tab: sections  ?: help  Ctrl+Q: quit",
        Style::default().fg(Color::DarkGray),
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
