//! Album list rendering (discover feed and search results)

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, ListItem, Paragraph},
    Frame,
};
use ratatui::widgets::Padding;

use crate::model::{AccountState, ActiveSection, Album, FeedSource, FeedState, UiState};
use super::utils::{border_style, calculate_num_width, render_scrollable_list, truncate_string};

pub fn render_album_feed(
    frame: &mut Frame,
    area: Rect,
    ui_state: &UiState,
    feed: &FeedState,
    account: &AccountState,
) {
    let is_focused = ui_state.active_section == ActiveSection::Albums;
    let title = match &feed.source {
        FeedSource::Discover => " Albums ",
        FeedSource::Search(_) => " Search Results ",
    };

    if feed.is_loading {
        let loading = Paragraph::new("Loading...")
            .style(Style::default().fg(Color::Yellow))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title)
                    .border_style(border_style(is_focused)),
            );
        frame.render_widget(loading, area);
        return;
    }

    if feed.albums.is_empty() {
        let hint = match &feed.source {
            FeedSource::Discover => "No albums to show\n\nPress R to load a new feed",
            FeedSource::Search(_) => "No albums found",
        };
        let empty = Paragraph::new(hint)
            .style(Style::default().fg(Color::DarkGray))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title)
                    .padding(Padding::horizontal(1))
                    .border_style(border_style(is_focused)),
            );
        frame.render_widget(empty, area);
        return;
    }

    let content_width = area.width.saturating_sub(4) as usize;
    let items = album_items(&feed.albums, feed.selected_index, is_focused, content_width, |album| {
        account.is_favorite(&album.id)
    });

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .padding(Padding::horizontal(1))
        .border_style(border_style(is_focused));

    // +1 for header row
    render_scrollable_list(frame, area, items, feed.selected_index + 1, block);
}

/// Header row plus one row per album: index, favorite star, title, artist, year
pub fn album_items(
    albums: &[Album],
    selected_index: usize,
    is_focused: bool,
    content_width: usize,
    is_favorite: impl Fn(&Album) -> bool,
) -> Vec<ListItem<'static>> {
    let num_width = calculate_num_width(albums.len());
    let star_width = 2;
    let year_width = 4;
    let fixed_width = 1 + num_width + 3 + star_width + 3 + 3 + 3 + year_width;
    let remaining = content_width.saturating_sub(fixed_width);
    let title_width = (remaining * 55) / 100;
    let artist_width = remaining.saturating_sub(title_width);

    let mut items = vec![
        ListItem::new(format!(
            " {:<num_w$}   {}   {:<title_w$}   {:<artist_w$}   {:>year_w$}",
            "#", "  ", "Album", "Artist", "Year",
            num_w = num_width,
            title_w = title_width,
            artist_w = artist_width,
            year_w = year_width
        ))
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
    ];

    let album_rows: Vec<ListItem> = albums.iter().enumerate().map(|(i, album)| {
        let style = if i == selected_index && is_focused {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else if i == selected_index {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };

        let star = if is_favorite(album) { "★ " } else { "  " };
        let title_str = truncate_string(&album.title, title_width);
        let artist_str = truncate_string(&album.artist, artist_width);

        ListItem::new(format!(
            " {:<num_w$}   {}   {}   {}   {:>year_w$}",
            i + 1, star, title_str, artist_str, album.year_label(),
            num_w = num_width,
            year_w = year_width
        )).style(style)
    }).collect();

    items.extend(album_rows);
    items
}
