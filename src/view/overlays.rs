//! Overlay rendering (alert dialog, album detail, help popup)

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::model::{Album, Alert};
use super::utils::centered_rect;

pub fn render_alert(frame: &mut Frame, alert: &Alert) {
    let area = frame.area();

    // Fixed width popup (responsive to screen size)
    let popup_width = 52.min(area.width.saturating_sub(4));
    let inner_width = popup_width.saturating_sub(4).max(1) as usize; // account for borders

    // Calculate how many lines the message will take when wrapped
    let line_count = alert.message.chars().count().div_ceil(inner_width) as u16;

    // Height: top border (1) + message lines + bottom border (1)
    let popup_area = centered_rect(area, popup_width, 2 + line_count.max(1));

    // Clear the area behind the popup first
    frame.render_widget(Clear, popup_area);

    let color = if alert.is_error { Color::Red } else { Color::Cyan };
    let widget = Paragraph::new(alert.message.clone())
        .style(Style::default().fg(color))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color))
                .title(format!(" {} (Esc to dismiss) ", alert.title))
                .title_style(Style::default().fg(color).add_modifier(Modifier::BOLD))
                .style(Style::default().bg(Color::Black)),
        );

    frame.render_widget(widget, popup_area);
}

pub fn render_album_detail(frame: &mut Frame, album: &Album, is_favorite: bool) {
    let popup_area = centered_rect(frame.area(), 60, 11);
    frame.render_widget(Clear, popup_area);

    let label = Style::default().fg(Color::Green).add_modifier(Modifier::BOLD);
    let row = |name: &str, value: String| {
        Line::from(vec![
            Span::styled(format!("{:>8}", name), label),
            Span::raw("  "),
            Span::styled(value, Style::default().fg(Color::White)),
        ])
    };

    let cover = if album.cover_url.is_empty() { "-".to_string() } else { album.cover_url.clone() };
    let tracks = album.track_count.map(|n| n.to_string()).unwrap_or_else(|| "-".to_string());
    let year = match album.year_label() {
        y if y.is_empty() => "-".to_string(),
        y => y,
    };
    let lines = vec![
        row("Album", album.title.clone()),
        row("Artist", album.artist.clone()),
        row("Year", year),
        row("Tracks", tracks),
        row("Cover", cover),
        row("Id", album.id.clone()),
        Line::from(""),
        Line::from(Span::styled(
            if is_favorite { "★ In your favorites" } else { "F: add to favorites" },
            Style::default().fg(Color::Yellow),
        )),
    ];

    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Album (Esc to close) ")
                .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                .style(Style::default().bg(Color::Black)),
        );
    frame.render_widget(widget, popup_area);
}

pub fn render_help_popup(frame: &mut Frame) {
    let area = frame.area();

    // Define keybindings organized by category
    let keybindings = vec![
        ("", "── Navigation ──"),
        ("Tab / Shift+Tab", "Cycle sections"),
        ("↑ / ↓", "Move selection"),
        ("/", "Focus search"),
        ("", ""),
        ("", "── Albums ──"),
        ("Enter", "Show album details"),
        ("F", "Add to favorites"),
        ("R", "Load a new feed"),
        ("", ""),
        ("", "── Search ──"),
        ("Enter", "Search albums"),
        ("Esc", "Clear and show feed"),
        ("", ""),
        ("", "── Account ──"),
        ("Enter", "Log in / Register"),
        ("Ctrl+T", "Switch login / register"),
        ("L", "Log out"),
        ("R", "Refresh favorites"),
        ("", ""),
        ("", "── General ──"),
        ("?", "Toggle this help"),
        ("Q / Ctrl+Q", "Quit"),
    ];

    let popup_area = centered_rect(area, 62, keybindings.len() as u16 + 2);

    // Clear the area behind the popup
    frame.render_widget(Clear, popup_area);

    // Create help text lines
    let lines: Vec<Line> = keybindings
        .iter()
        .map(|(key, desc)| {
            if key.is_empty() {
                // Section header or empty line
                Line::from(Span::styled(
                    format!("{:^38}", desc),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(vec![
                    Span::styled(
                        format!("{:>18}", key),
                        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("  "),
                    Span::styled(
                        desc.to_string(),
                        Style::default().fg(Color::White),
                    ),
                ])
            }
        })
        .collect();

    let help_text = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Help (? or Esc to close) ")
                .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                .style(Style::default().bg(Color::Black)),
        )
        .style(Style::default().bg(Color::Black));

    frame.render_widget(help_text, popup_area);
}
