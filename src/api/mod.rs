//! API module - Remote clients
//!
//! - `catalog`: the third-party album catalog (search, random album)
//! - `account`: the account service (login, registration, favorites)
//! - `types`: wire types shared by both
//!
//! The flows talk to the clients through the [`CatalogApi`] and
//! [`AccountApi`] traits so that they can run against in-memory fakes.

mod account;
mod catalog;
pub mod types;

use async_trait::async_trait;
use reqwest::{Client, Url};

use crate::error::{ApiError, ApiResult};
use crate::model::{Album, User};
use types::{AlbumSearchResult, LoginResponse};

pub use account::{AccountClient, DEFAULT_AVATAR};
pub use catalog::CatalogClient;

/// Read operations against the album catalog
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// One arbitrary album, as a search page of at most one item
    async fn fetch_random_album(&self) -> ApiResult<AlbumSearchResult>;

    /// Albums matching `query`; the caller rejects blank queries
    async fn search_albums(&self, query: &str) -> ApiResult<AlbumSearchResult>;
}

/// Operations against the account service
#[async_trait]
pub trait AccountApi: Send + Sync {
    async fn login(&self, username: &str, password: &str) -> ApiResult<LoginResponse>;

    async fn get_user(&self, username: &str) -> ApiResult<User>;

    async fn register(
        &self,
        username: &str,
        full_name: &str,
        email: &str,
        password: &str,
    ) -> ApiResult<User>;

    async fn add_favorite(&self, username: &str, album_id: &str) -> ApiResult<()>;

    async fn get_album_by_id(&self, album_id: &str) -> ApiResult<Album>;
}

/// Parse a configured base URL, forcing a trailing slash so that relative
/// joins append instead of replacing the last segment.
pub(crate) fn base_url(raw: &str) -> ApiResult<Url> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ApiError::InvalidUrl("URL cannot be empty".into()));
    }
    if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
        return Err(ApiError::InvalidUrl(format!(
            "{} must start with http:// or https://",
            trimmed
        )));
    }

    let normalized = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{}/", trimmed)
    };
    Url::parse(&normalized).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", trimmed, e)))
}

/// Shared HTTP client. No request timeout is set; the platform default applies.
pub(crate) fn build_http_client() -> ApiResult<Client> {
    Client::builder()
        .user_agent(format!("Soundsnap/{}", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(ApiError::Transport)
}

pub(crate) fn map_send_error(e: reqwest::Error) -> ApiError {
    if e.is_connect() {
        tracing::warn!(error = %e, "Server unreachable");
    }
    ApiError::Transport(e)
}
