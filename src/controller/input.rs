//! Key event handling

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::model::ActiveSection;
use super::AppController;

impl AppController {
    pub async fn handle_key_event(&self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        let model = &self.model;

        // Ctrl+Q quits from anywhere, even while typing
        if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
            model.set_should_quit(true).await;
            return Ok(());
        }

        // Handle alert first (blocks all other interactions)
        if model.has_alert().await {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
                model.clear_alert().await;
            }
            return Ok(());
        }

        // Handle help popup
        if model.is_help_popup_open().await {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
                model.hide_help_popup().await;
            }
            return Ok(());
        }

        // Handle album detail overlay
        if model.is_album_detail_open().await {
            match key.code {
                KeyCode::Esc | KeyCode::Enter => model.set_album_detail(false).await,
                KeyCode::Char('f') | KeyCode::Char('F') => {
                    model.set_album_detail(false).await;
                    self.favorite_selected().await;
                }
                _ => {}
            }
            return Ok(());
        }

        match key.code {
            KeyCode::Tab => {
                if key.modifiers.contains(KeyModifiers::SHIFT) {
                    model.cycle_section_backward().await;
                } else {
                    model.cycle_section_forward().await;
                }
                return Ok(());
            }
            KeyCode::BackTab => {
                model.cycle_section_backward().await;
                return Ok(());
            }
            _ => {}
        }

        let ui_state = model.get_ui_state().await;
        match ui_state.active_section {
            ActiveSection::Search => self.handle_search_key(key).await,
            ActiveSection::Albums => self.handle_albums_key(key).await,
            ActiveSection::Account => self.handle_account_key(key).await,
        }
        Ok(())
    }

    async fn handle_search_key(&self, key: KeyEvent) {
        let model = &self.model;
        match key.code {
            KeyCode::Enter => {
                let query = model.get_ui_state().await.search_query;
                self.perform_search(query).await;
            }
            KeyCode::Esc => {
                if model.clear_search().await {
                    self.load_feed().await;
                }
            }
            KeyCode::Backspace => {
                // Emptying the box brings the discover feed back
                if model.backspace_search().await {
                    self.load_feed().await;
                }
            }
            KeyCode::Char(c) => {
                model.append_to_search(c).await;
            }
            _ => {}
        }
    }

    async fn handle_albums_key(&self, key: KeyEvent) {
        let model = &self.model;
        match key.code {
            KeyCode::Up => model.feed_move_up().await,
            KeyCode::Down => model.feed_move_down().await,
            KeyCode::Enter => {
                if model.get_selected_album().await.is_some() {
                    model.set_album_detail(true).await;
                }
            }
            KeyCode::Char('f') | KeyCode::Char('F') => self.favorite_selected().await,
            KeyCode::Char('r') | KeyCode::Char('R') => self.load_feed().await,
            KeyCode::Char('/') => model.set_active_section(ActiveSection::Search).await,
            KeyCode::Char('?') => model.show_help_popup().await,
            KeyCode::Char('q') | KeyCode::Char('Q') => model.set_should_quit(true).await,
            _ => {}
        }
    }

    async fn handle_account_key(&self, key: KeyEvent) {
        let model = &self.model;

        if model.is_authenticated().await {
            match key.code {
                KeyCode::Up => model.favorites_move_up().await,
                KeyCode::Down => model.favorites_move_down().await,
                KeyCode::Char('l') | KeyCode::Char('L') => self.logout().await,
                KeyCode::Char('r') | KeyCode::Char('R') => self.refresh_favorites().await,
                KeyCode::Char('?') => model.show_help_popup().await,
                KeyCode::Char('q') | KeyCode::Char('Q') => model.set_should_quit(true).await,
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Char('t') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                model.toggle_account_mode().await;
            }
            KeyCode::Down => model.form_next_field().await,
            KeyCode::Up => model.form_prev_field().await,
            KeyCode::Enter => self.submit_account_form().await,
            KeyCode::Backspace => model.form_backspace().await,
            KeyCode::Char(c) => model.form_push(c).await,
            _ => {}
        }
    }
}
