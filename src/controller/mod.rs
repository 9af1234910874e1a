//! Controller module - Application logic and event handling
//!
//! This module contains the application controller that handles user input,
//! coordinates between the model and view, and drives the flows.
//! It is organized into submodules by responsibility:
//!
//! - `input`: Key event handling
//! - `navigation`: Feed loading and album search
//! - `account`: Login, registration, logout, restore and favorites

mod input;
mod navigation;
mod account;

use std::future::Future;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::api::{AccountApi, CatalogApi};
use crate::error::{ApiError, AppError};
use crate::flows::{AccountFlow, BrowseFlow, FavoritesFlow};
use crate::model::{Alert, AppModel, SessionHandle};

/// User action an error is reported against
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Action {
    Feed,
    Search,
    Login,
    Register,
    Favorite,
    Restore,
    Logout,
}

impl Action {
    fn failure_title(self) -> &'static str {
        match self {
            Action::Feed => "Could not load albums",
            Action::Search => "Search failed",
            Action::Login => "Login failed",
            Action::Register => "Registration failed",
            Action::Favorite => "Could not add favorite",
            Action::Restore => "Could not restore session",
            Action::Logout => "Logout failed",
        }
    }

    fn failure_message(self) -> &'static str {
        match self {
            Action::Feed => "The album catalog is unavailable right now. Try again later.",
            Action::Search => "The album catalog is unavailable right now. Try again later.",
            Action::Login => "Could not reach the account service. Please try again.",
            Action::Register => "Your account could not be created. Please try again.",
            Action::Favorite => "The album was not added to your favorites.",
            Action::Restore => "Your saved session could not be loaded. Please log in again.",
            Action::Logout => "Your saved session could not be removed.",
        }
    }
}

#[derive(Clone)]
pub struct AppController {
    pub(crate) model: Arc<AppModel>,
    pub(crate) browse: Arc<BrowseFlow<dyn CatalogApi>>,
    pub(crate) favorites: Arc<FavoritesFlow<dyn AccountApi>>,
    pub(crate) account: Arc<AccountFlow<dyn AccountApi>>,
    /// The in-flight feed load or search; a newer one aborts it
    feed_task: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl AppController {
    pub fn new(
        model: Arc<AppModel>,
        catalog: Arc<dyn CatalogApi>,
        account: Arc<dyn AccountApi>,
        session: SessionHandle,
    ) -> Self {
        Self {
            model,
            browse: Arc::new(BrowseFlow::new(catalog)),
            favorites: Arc::new(FavoritesFlow::new(account.clone(), session.clone())),
            account: Arc::new(AccountFlow::new(account, session)),
            feed_task: Arc::new(Mutex::new(None)),
        }
    }

    /// Run `task` as the current feed task, aborting the previous one
    pub(crate) async fn replace_feed_task<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let mut slot = self.feed_task.lock().await;
        if let Some(previous) = slot.take() {
            if !previous.is_finished() {
                tracing::debug!("Cancelling in-flight album request");
            }
            previous.abort();
        }
        *slot = Some(tokio::spawn(task));
    }

    /// Abort anything still in flight. Called once the UI loop has exited.
    pub async fn shutdown(&self) {
        if let Some(task) = self.feed_task.lock().await.take() {
            task.abort();
        }
    }

    pub(crate) fn format_error(action: Action, error: &AppError) -> Alert {
        match error {
            AppError::Validation(message) => Alert::error("Missing information", message.clone()),
            AppError::LoginRejected => {
                Alert::error(action.failure_title(), "Incorrect username or password.")
            }
            AppError::Api(ApiError::CatalogAuth(_)) => Alert::error(
                action.failure_title(),
                "The catalog rejected the configured credentials.",
            ),
            AppError::Api(_) | AppError::Session(_) => {
                Alert::error(action.failure_title(), action.failure_message())
            }
        }
    }
}
