//! Account panel: login/registration form, or profile and favorites

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use ratatui::widgets::Padding;

use crate::flows::AccountMode;
use crate::model::{AccountState, ActiveSection, FormField, UiState, User};
use super::content::album_items;
use super::utils::{border_style, render_scrollable_list};

pub fn render_account_panel(frame: &mut Frame, area: Rect, ui_state: &UiState, account: &AccountState) {
    let is_focused = ui_state.active_section == ActiveSection::Account;

    if account.is_loading {
        let loading = Paragraph::new("Loading...")
            .style(Style::default().fg(Color::Yellow))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Account ")
                    .border_style(border_style(is_focused)),
            );
        frame.render_widget(loading, area);
        return;
    }

    match &account.user {
        Some(user) => render_profile(frame, area, user, account, is_focused),
        None => render_form(frame, area, ui_state, is_focused),
    }
}

fn render_form(frame: &mut Frame, area: Rect, ui_state: &UiState, is_focused: bool) {
    let (title, hint) = match ui_state.account_mode {
        AccountMode::Login => (" Log In ", "Ctrl+T: create an account"),
        AccountMode::Register => (" Create Account ", "Ctrl+T: back to log in"),
    };

    let mut lines = Vec::new();
    for field in FormField::visible(ui_state.account_mode) {
        let is_active = is_focused && *field == ui_state.form_field;
        let value = field.value(&ui_state.form);
        let shown = if *field == FormField::Password {
            "•".repeat(value.chars().count())
        } else {
            value.to_string()
        };
        let cursor = if is_active { "▏" } else { "" };

        let label_style = if is_active {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Cyan)
        };

        lines.push(Line::from(Span::styled(format!("{}:", field.label()), label_style)));
        lines.push(Line::from(format!("  {}{}", shown, cursor)));
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(
        "↑/↓: field  Enter: submit",
        Style::default().fg(Color::DarkGray),
    )));
    lines.push(Line::from(Span::styled(hint, Style::default().fg(Color::DarkGray))));

    let form = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .padding(Padding::horizontal(1))
            .border_style(border_style(is_focused)),
    );
    frame.render_widget(form, area);
}

fn render_profile(frame: &mut Frame, area: Rect, user: &User, account: &AccountState, is_focused: bool) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Profile
            Constraint::Min(0),    // Favorites
        ])
        .split(area);

    let profile = Paragraph::new(vec![
        Line::from(Span::styled(
            if user.display_name.is_empty() { user.username.clone() } else { user.display_name.clone() },
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("@{}", user.username)),
        Line::from(Span::styled(user.email.clone(), Style::default().fg(Color::DarkGray))),
        Line::from(Span::styled("L: log out  R: refresh", Style::default().fg(Color::DarkGray))),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Profile ")
            .padding(Padding::horizontal(1))
            .border_style(border_style(is_focused)),
    );
    frame.render_widget(profile, chunks[0]);

    let title = if account.unresolved.is_empty() {
        format!(" Favorites ({}) ", account.favorites.len())
    } else {
        format!(" Favorites ({}, {} unavailable) ", account.favorites.len(), account.unresolved.len())
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .padding(Padding::horizontal(1))
        .border_style(border_style(is_focused));

    if account.favorites.is_empty() {
        let empty = Paragraph::new("No favorite albums yet\n\nPress F on an album to add it")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, chunks[1]);
        return;
    }

    let content_width = chunks[1].width.saturating_sub(4) as usize;
    let items = album_items(&account.favorites, account.favorites_selected, is_focused, content_width, |_| true);
    render_scrollable_list(frame, chunks[1], items, account.favorites_selected + 1, block);
}
