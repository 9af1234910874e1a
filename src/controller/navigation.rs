//! Navigation-related controller methods (feed, search)

use crate::error::AppError;
use crate::flows::EMPTY_QUERY_MESSAGE;
use crate::model::{ActiveSection, Alert, FeedSource};
use super::{Action, AppController};

impl AppController {
    /// Replace the album list with a fresh random feed in the background
    pub async fn load_feed(&self) {
        tracing::debug!("Loading discover feed");
        let model = self.model.clone();
        let browse = self.browse.clone();
        model.set_feed_loading(true).await;

        self.replace_feed_task(async move {
            match browse.load_initial_feed().await {
                Ok(feed) => {
                    model.set_feed(feed.albums, FeedSource::Discover, feed.skipped).await;
                }
                Err(e) => {
                    tracing::error!(error = %e, "Feed load failed");
                    model.clear_feed(FeedSource::Discover).await;
                    model.show_alert(Self::format_error(Action::Feed, &e)).await;
                }
            }
        })
        .await;
    }

    /// Search for the text in the search box in the background
    pub async fn perform_search(&self, query: String) {
        if query.trim().is_empty() {
            let error = AppError::Validation(EMPTY_QUERY_MESSAGE.to_string());
            self.model.show_alert(Self::format_error(Action::Search, &error)).await;
            return;
        }

        tracing::debug!(query = %query, "Performing search");
        let model = self.model.clone();
        let browse = self.browse.clone();
        model.set_feed_loading(true).await;
        model.mark_search_submitted().await;

        self.replace_feed_task(async move {
            match browse.search(Some(&query)).await {
                Ok(albums) => {
                    let empty = albums.is_empty();
                    model.set_feed(albums, FeedSource::Search(query.clone()), 0).await;
                    if empty {
                        model
                            .show_alert(Alert::info("Search", format!("No albums found for \"{}\".", query.trim())))
                            .await;
                    } else {
                        // Switch to the album list to show results
                        model.set_active_section(ActiveSection::Albums).await;
                    }
                }
                Err(e) => {
                    tracing::error!(query = %query, error = %e, "Search failed");
                    model.clear_feed(FeedSource::Search(query.clone())).await;
                    model.show_alert(Self::format_error(Action::Search, &e)).await;
                }
            }
        })
        .await;
    }
}
