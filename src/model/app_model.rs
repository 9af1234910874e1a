//! Main application model with state management

use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;

use crate::flows::{AccountMode, AuthenticatedSession, ResolvedFavorites};
use super::album::Album;
use super::content::{AccountState, FeedSource, FeedState};
use super::types::{ActiveSection, Alert, FormField, UiState};
use super::user::User;

/// Seconds before an informational alert closes on its own
const INFO_ALERT_TTL_SECS: u64 = 4;

/// Main application model containing all state
pub struct AppModel {
    pub ui_state: Arc<Mutex<UiState>>,
    pub feed: Arc<Mutex<FeedState>>,
    pub account: Arc<Mutex<AccountState>>,
    pub should_quit: Arc<Mutex<bool>>,
}

impl AppModel {
    pub fn new() -> Self {
        Self {
            ui_state: Arc::new(Mutex::new(UiState::default())),
            feed: Arc::new(Mutex::new(FeedState::default())),
            account: Arc::new(Mutex::new(AccountState::default())),
            should_quit: Arc::new(Mutex::new(false)),
        }
    }

    pub async fn should_quit(&self) -> bool {
        *self.should_quit.lock().await
    }

    pub async fn set_should_quit(&self, quit: bool) {
        *self.should_quit.lock().await = quit;
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    pub async fn get_ui_state(&self) -> UiState {
        self.ui_state.lock().await.clone()
    }

    pub async fn cycle_section_forward(&self) {
        let mut state = self.ui_state.lock().await;
        state.active_section = state.active_section.next();
    }

    pub async fn cycle_section_backward(&self) {
        let mut state = self.ui_state.lock().await;
        state.active_section = state.active_section.prev();
    }

    pub async fn set_active_section(&self, section: ActiveSection) {
        let mut state = self.ui_state.lock().await;
        state.active_section = section;
    }

    // ========================================================================
    // Search box
    // ========================================================================

    pub async fn append_to_search(&self, c: char) {
        let mut state = self.ui_state.lock().await;
        state.search_query.push(c);
        state.search_submitted = false;
    }

    /// Remove the last character. Returns `true` when the box became empty.
    pub async fn backspace_search(&self) -> bool {
        let mut state = self.ui_state.lock().await;
        if state.search_query.pop().is_none() {
            return false;
        }
        state.search_submitted = false;
        state.search_query.is_empty()
    }

    /// Empty the box. Returns `true` if it held anything.
    pub async fn clear_search(&self) -> bool {
        let mut state = self.ui_state.lock().await;
        let had_text = !state.search_query.is_empty();
        state.search_query.clear();
        state.search_submitted = false;
        had_text
    }

    pub async fn mark_search_submitted(&self) {
        self.ui_state.lock().await.search_submitted = true;
    }

    // ========================================================================
    // Feed
    // ========================================================================

    pub async fn get_feed(&self) -> FeedState {
        self.feed.lock().await.clone()
    }

    pub async fn set_feed_loading(&self, loading: bool) {
        self.feed.lock().await.is_loading = loading;
    }

    pub async fn set_feed(&self, albums: Vec<Album>, source: FeedSource, skipped: usize) {
        self.feed.lock().await.replace(albums, source, skipped);
    }

    pub async fn clear_feed(&self, source: FeedSource) {
        self.feed.lock().await.replace(Vec::new(), source, 0);
    }

    pub async fn feed_move_up(&self) {
        self.feed.lock().await.move_up();
    }

    pub async fn feed_move_down(&self) {
        self.feed.lock().await.move_down();
    }

    pub async fn get_selected_album(&self) -> Option<Album> {
        self.feed.lock().await.selected().cloned()
    }

    // ========================================================================
    // Account panel
    // ========================================================================

    pub async fn get_account(&self) -> AccountState {
        self.account.lock().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.account.lock().await.user.is_some()
    }

    pub async fn set_account_loading(&self, loading: bool) {
        self.account.lock().await.is_loading = loading;
    }

    pub async fn set_session(&self, session: AuthenticatedSession) {
        let mut account = self.account.lock().await;
        account.user = Some(session.user);
        account.favorites = session.favorites.albums;
        account.unresolved = session.favorites.failed;
        account.favorites_selected = 0;
        account.is_loading = false;
    }

    /// Record a newly favorited album without refetching the whole list
    pub async fn add_favorite(&self, user: User, album: Album) {
        let mut account = self.account.lock().await;
        if !account.favorites.iter().any(|a| a.id == album.id) {
            account.favorites.push(album);
        }
        account.user = Some(user);
    }

    pub async fn set_favorites(&self, favorites: ResolvedFavorites) {
        let mut account = self.account.lock().await;
        account.favorites = favorites.albums;
        account.unresolved = favorites.failed;
        account.favorites_selected = 0;
        account.is_loading = false;
    }

    /// Drop the signed-in user. The form itself is blanked by the account flow.
    pub async fn sign_out(&self) {
        self.account.lock().await.sign_out();
        let mut state = self.ui_state.lock().await;
        state.account_mode = AccountMode::Login;
        state.form_field = FormField::Username;
    }

    pub async fn favorites_move_up(&self) {
        self.account.lock().await.move_up();
    }

    pub async fn favorites_move_down(&self) {
        self.account.lock().await.move_down();
    }

    // ========================================================================
    // Account form
    // ========================================================================

    pub async fn toggle_account_mode(&self) {
        let mut state = self.ui_state.lock().await;
        state.account_mode = state.account_mode.toggle();
        state.form_field = FormField::Username;
    }

    pub async fn set_account_mode(&self, mode: AccountMode) {
        let mut state = self.ui_state.lock().await;
        state.account_mode = mode;
        state.form_field = FormField::Username;
    }

    pub async fn form_next_field(&self) {
        let mut state = self.ui_state.lock().await;
        state.form_field = state.form_field.next(state.account_mode);
    }

    pub async fn form_prev_field(&self) {
        let mut state = self.ui_state.lock().await;
        state.form_field = state.form_field.prev(state.account_mode);
    }

    pub async fn form_push(&self, c: char) {
        let mut state = self.ui_state.lock().await;
        let field = state.form_field;
        field.value_mut(&mut state.form).push(c);
    }

    pub async fn form_backspace(&self) {
        let mut state = self.ui_state.lock().await;
        let field = state.form_field;
        field.value_mut(&mut state.form).pop();
    }

    // ========================================================================
    // Overlays
    // ========================================================================

    pub async fn show_alert(&self, alert: Alert) {
        let mut state = self.ui_state.lock().await;
        state.alert = Some(alert);
        state.alert_timestamp = Some(Instant::now());
    }

    pub async fn clear_alert(&self) {
        let mut state = self.ui_state.lock().await;
        state.alert = None;
        state.alert_timestamp = None;
    }

    pub async fn has_alert(&self) -> bool {
        self.ui_state.lock().await.alert.is_some()
    }

    /// Informational alerts close on their own; errors wait for the user.
    pub async fn auto_clear_old_alerts(&self) {
        let mut state = self.ui_state.lock().await;
        let expired = matches!(
            (&state.alert, state.alert_timestamp),
            (Some(alert), Some(ts)) if !alert.is_error && ts.elapsed().as_secs() > INFO_ALERT_TTL_SECS
        );
        if expired {
            state.alert = None;
            state.alert_timestamp = None;
        }
    }

    pub async fn show_help_popup(&self) {
        self.ui_state.lock().await.show_help_popup = true;
    }

    pub async fn hide_help_popup(&self) {
        self.ui_state.lock().await.show_help_popup = false;
    }

    pub async fn is_help_popup_open(&self) -> bool {
        self.ui_state.lock().await.show_help_popup
    }

    pub async fn set_album_detail(&self, open: bool) {
        self.ui_state.lock().await.show_album_detail = open;
    }

    pub async fn is_album_detail_open(&self) -> bool {
        self.ui_state.lock().await.show_album_detail
    }
}

impl Default for AppModel {
    fn default() -> Self {
        Self::new()
    }
}
