//! View module - UI rendering
//!
//! This module handles all UI rendering for the application using ratatui.
//! It is organized into submodules by component type:
//!
//! - `utils`: Shared utility functions (truncation, scrollable lists, popups)
//! - `layout`: Main layout structure (top bar, status line)
//! - `content`: Album list rendering
//! - `account`: Account form, profile and favorites
//! - `overlays`: Modal overlays (alert, album detail, help)

mod utils;
mod layout;
mod content;
mod account;
mod overlays;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::model::{AccountState, FeedState, UiState};

pub struct AppView;

impl AppView {
    pub fn render(frame: &mut Frame, ui_state: &UiState, feed: &FeedState, account: &AccountState) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Search bar + account
                Constraint::Min(0),    // Albums + account panel
                Constraint::Length(1), // Status line
            ])
            .split(frame.area());

        // Top bar: Search + signed-in user
        layout::render_top_bar(frame, chunks[0], ui_state, account);

        let main_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(62), // Album list
                Constraint::Percentage(38), // Account panel
            ])
            .split(chunks[1]);

        content::render_album_feed(frame, main_chunks[0], ui_state, feed, account);
        account::render_account_panel(frame, main_chunks[1], ui_state, account);

        layout::render_status_line(frame, chunks[2], feed);

        // Album detail overlay (if open)
        if ui_state.show_album_detail {
            if let Some(album) = feed.selected() {
                overlays::render_album_detail(frame, album, account.is_favorite(&album.id));
            }
        }

        // Help popup overlay (if open)
        if ui_state.show_help_popup {
            overlays::render_help_popup(frame);
        }

        // Alert overlay goes on top of everything else
        if let Some(alert) = &ui_state.alert {
            overlays::render_alert(frame, alert);
        }
    }
}
