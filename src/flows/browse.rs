//! Catalog browsing: the random-album feed and album search

use std::sync::Arc;

use crate::api::CatalogApi;
use crate::error::{ApiError, AppError, Result};
use crate::model::Album;

/// Number of random-album requests behind the initial feed
pub const INITIAL_FEED_SIZE: usize = 20;

pub const EMPTY_QUERY_MESSAGE: &str = "Please enter a search term.";

/// Result of loading the initial feed
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Feed {
    pub albums: Vec<Album>,
    /// Slots that produced no album (empty page, item without id, undecodable payload)
    pub skipped: usize,
}

pub struct BrowseFlow<C: CatalogApi + ?Sized> {
    catalog: Arc<C>,
}

impl<C: CatalogApi + ?Sized> BrowseFlow<C> {
    pub fn new(catalog: Arc<C>) -> Self {
        Self { catalog }
    }

    /// Fetch [`INITIAL_FEED_SIZE`] random albums, one request after another.
    ///
    /// Slots without a usable album are skipped and counted. A transport or
    /// status failure aborts the whole feed.
    pub async fn load_initial_feed(&self) -> Result<Feed> {
        let mut feed = Feed::default();

        for slot in 0..INITIAL_FEED_SIZE {
            match self.catalog.fetch_random_album().await {
                Ok(page) => match page.into_items().into_iter().next().and_then(Album::from_raw) {
                    Some(album) => {
                        tracing::debug!(slot, album_id = %album.id, "Loaded feed album");
                        feed.albums.push(album);
                    }
                    None => {
                        tracing::debug!(slot, "Random album request returned nothing usable");
                        feed.skipped += 1;
                    }
                },
                Err(ApiError::Parse(reason)) => {
                    tracing::debug!(slot, reason = %reason, "Skipping malformed random album payload");
                    feed.skipped += 1;
                }
                Err(e) => {
                    tracing::error!(slot, error = %e, "Loading the feed failed");
                    return Err(e.into());
                }
            }
        }

        tracing::info!(loaded = feed.albums.len(), skipped = feed.skipped, "Initial feed loaded");
        Ok(feed)
    }

    /// Search albums by free text. Blank or absent queries are rejected
    /// without a request. An empty result is not an error.
    pub async fn search(&self, query: Option<&str>) -> Result<Vec<Album>> {
        let query = match query {
            Some(q) if !q.trim().is_empty() => q,
            _ => return Err(AppError::Validation(EMPTY_QUERY_MESSAGE.to_string())),
        };

        let page = self.catalog.search_albums(query).await?;
        let albums: Vec<Album> = page.into_items().into_iter().filter_map(Album::from_raw).collect();

        tracing::info!(query, results = albums.len(), "Album search completed");
        Ok(albums)
    }
}
