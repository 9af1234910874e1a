//! Content state: the album feed and the account panel

use super::album::Album;
use super::user::User;

/// Where the albums currently on screen came from
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum FeedSource {
    #[default]
    Discover,
    Search(String),
}

/// Album list shown in the main area
#[derive(Clone, Debug, Default)]
pub struct FeedState {
    pub albums: Vec<Album>,
    pub selected_index: usize,
    pub source: FeedSource,
    /// Random-album slots that produced nothing on the last discover load
    pub skipped: usize,
    pub is_loading: bool,
}

impl FeedState {
    pub fn selected(&self) -> Option<&Album> {
        self.albums.get(self.selected_index)
    }

    pub fn replace(&mut self, albums: Vec<Album>, source: FeedSource, skipped: usize) {
        self.albums = albums;
        self.source = source;
        self.skipped = skipped;
        self.selected_index = 0;
        self.is_loading = false;
    }

    pub fn move_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.selected_index < self.albums.len().saturating_sub(1) {
            self.selected_index += 1;
        }
    }
}

/// Signed-in user and their resolved favorites
#[derive(Clone, Debug, Default)]
pub struct AccountState {
    pub user: Option<User>,
    pub favorites: Vec<Album>,
    /// Favorite ids whose album lookup failed
    pub unresolved: Vec<String>,
    pub favorites_selected: usize,
    pub is_loading: bool,
}

impl AccountState {
    pub fn is_favorite(&self, album_id: &str) -> bool {
        self.user.as_ref().is_some_and(|u| u.is_favorite(album_id))
    }

    pub fn sign_out(&mut self) {
        *self = Self::default();
    }

    pub fn move_up(&mut self) {
        self.favorites_selected = self.favorites_selected.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.favorites_selected < self.favorites.len().saturating_sub(1) {
            self.favorites_selected += 1;
        }
    }
}
