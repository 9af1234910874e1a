//! In-memory fakes of the client traits shared by the integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use soundsnap::api::types::{AlbumSearchResult, LoginResponse};
use soundsnap::api::{AccountApi, CatalogApi};
use soundsnap::error::{ApiError, ApiResult};
use soundsnap::model::{Album, SessionHandle, SessionStore, User};

pub fn status_error(status: u16) -> ApiError {
    ApiError::Status { status, message: format!("status {}", status) }
}

/// Raw catalog album object
pub fn raw_album(id: &str, name: &str, release_date: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "artists": [{ "name": "Some Artist" }],
        "images": [{ "url": format!("https://img.example.com/{}.jpg", id) }],
        "release_date": release_date,
        "total_tracks": 10
    })
}

/// Search payload wrapping `items`
pub fn page(items: Vec<Value>) -> AlbumSearchResult {
    serde_json::from_value(json!({ "albums": { "items": items } })).unwrap()
}

pub fn album(id: &str) -> Album {
    Album {
        id: id.to_string(),
        title: format!("Album {}", id),
        artist: "Some Artist".to_string(),
        cover_url: String::new(),
        release_year: Some(2001),
        track_count: Some(10),
    }
}

pub fn user(username: &str, likes: &[&str]) -> User {
    let mut user = User::new(username);
    user.display_name = format!("{} Display", username);
    user.email = format!("{}@x.com", username);
    for id in likes {
        user.favorite_album_ids.insert(*id);
    }
    user
}

/// Session handle over a fresh file in `dir`
pub fn session_in(dir: &tempfile::TempDir) -> (SessionHandle, SessionStore) {
    let store = SessionStore::new(dir.path().join("session.json"));
    (SessionHandle::spawn(store.clone()), store)
}

// =============================================================================
// Catalog fake
// =============================================================================

type RandomResponder = Box<dyn Fn(usize) -> ApiResult<AlbumSearchResult> + Send + Sync>;
type SearchResponder = Box<dyn Fn(&str) -> ApiResult<AlbumSearchResult> + Send + Sync>;

pub struct FakeCatalog {
    random: RandomResponder,
    search: SearchResponder,
    random_delay: Duration,
    pub random_calls: AtomicUsize,
    pub search_calls: AtomicUsize,
    pub queries: Mutex<Vec<String>>,
}

impl FakeCatalog {
    /// Each random call gets album `r{n}`; every search returns nothing
    pub fn new() -> Self {
        Self {
            random: Box::new(|n| Ok(page(vec![raw_album(&format!("r{}", n), "Random", "1999-01-01")]))),
            search: Box::new(|_| Ok(page(vec![]))),
            random_delay: Duration::ZERO,
            random_calls: AtomicUsize::new(0),
            search_calls: AtomicUsize::new(0),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn with_random(
        mut self,
        responder: impl Fn(usize) -> ApiResult<AlbumSearchResult> + Send + Sync + 'static,
    ) -> Self {
        self.random = Box::new(responder);
        self
    }

    pub fn with_search(
        mut self,
        responder: impl Fn(&str) -> ApiResult<AlbumSearchResult> + Send + Sync + 'static,
    ) -> Self {
        self.search = Box::new(responder);
        self
    }

    /// Make every random fetch take `delay` before answering
    pub fn with_random_delay(mut self, delay: Duration) -> Self {
        self.random_delay = delay;
        self
    }

    pub fn random_calls(&self) -> usize {
        self.random_calls.load(Ordering::SeqCst)
    }

    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CatalogApi for FakeCatalog {
    async fn fetch_random_album(&self) -> ApiResult<AlbumSearchResult> {
        let n = self.random_calls.fetch_add(1, Ordering::SeqCst);
        if !self.random_delay.is_zero() {
            tokio::time::sleep(self.random_delay).await;
        }
        (self.random)(n)
    }

    async fn search_albums(&self, query: &str) -> ApiResult<AlbumSearchResult> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        self.queries.lock().unwrap().push(query.to_string());
        (self.search)(query)
    }
}

// =============================================================================
// Account fake
// =============================================================================

/// Account service backed by a map of users and a map of albums.
///
/// Login succeeds when the password matches `passwords`. Favorites answer
/// with `favorite_status`.
pub struct FakeAccount {
    pub users: Mutex<HashMap<String, User>>,
    pub passwords: Mutex<HashMap<String, String>>,
    pub albums: Mutex<HashMap<String, Album>>,
    pub favorite_status: Mutex<u16>,
    pub get_user_status: Mutex<u16>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeAccount {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(HashMap::new()),
            passwords: Mutex::new(HashMap::new()),
            albums: Mutex::new(HashMap::new()),
            favorite_status: Mutex::new(200),
            get_user_status: Mutex::new(200),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_user(self, user: User, password: &str) -> Self {
        self.passwords.lock().unwrap().insert(user.username.clone(), password.to_string());
        self.users.lock().unwrap().insert(user.username.clone(), user);
        self
    }

    pub fn with_album(self, album: Album) -> Self {
        self.albums.lock().unwrap().insert(album.id.clone(), album);
        self
    }

    pub fn set_favorite_status(&self, status: u16) {
        *self.favorite_status.lock().unwrap() = status;
    }

    pub fn set_get_user_status(&self, status: u16) {
        *self.get_user_status.lock().unwrap() = status;
    }

    /// Number of calls whose log entry starts with `operation`
    pub fn calls_to(&self, operation: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.split(':').next() == Some(operation))
            .count()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn record(&self, entry: String) {
        self.calls.lock().unwrap().push(entry);
    }
}

#[async_trait]
impl AccountApi for FakeAccount {
    async fn login(&self, username: &str, password: &str) -> ApiResult<LoginResponse> {
        self.record(format!("login:{}:{}", username, password));
        let success = self.passwords.lock().unwrap().get(username).is_some_and(|p| p == password);
        Ok(LoginResponse { success })
    }

    async fn get_user(&self, username: &str) -> ApiResult<User> {
        self.record(format!("get_user:{}", username));
        let status = *self.get_user_status.lock().unwrap();
        if status != 200 {
            return Err(status_error(status));
        }
        self.users
            .lock()
            .unwrap()
            .get(username)
            .cloned()
            .ok_or_else(|| status_error(404))
    }

    async fn register(
        &self,
        username: &str,
        full_name: &str,
        email: &str,
        password: &str,
    ) -> ApiResult<User> {
        self.record(format!("register:{}:{}:{}:{}", username, full_name, email, password));
        if self.users.lock().unwrap().contains_key(username) {
            return Err(status_error(409));
        }
        let mut user = User::new(username);
        user.display_name = full_name.to_string();
        user.email = email.to_string();
        self.users.lock().unwrap().insert(username.to_string(), user.clone());
        self.passwords.lock().unwrap().insert(username.to_string(), password.to_string());
        Ok(user)
    }

    async fn add_favorite(&self, username: &str, album_id: &str) -> ApiResult<()> {
        self.record(format!("add_favorite:{}:{}", username, album_id));
        let status = *self.favorite_status.lock().unwrap();
        if status != 200 {
            return Err(status_error(status));
        }
        if let Some(user) = self.users.lock().unwrap().get_mut(username) {
            user.favorite_album_ids.insert(album_id);
        }
        Ok(())
    }

    async fn get_album_by_id(&self, album_id: &str) -> ApiResult<Album> {
        self.record(format!("get_album_by_id:{}", album_id));
        self.albums
            .lock()
            .unwrap()
            .get(album_id)
            .cloned()
            .ok_or_else(|| status_error(404))
    }
}
