//! Account and favorites controller methods

use crate::flows::{AccountMode, CredentialsForm, FavoriteOutcome};
use crate::model::{ActiveSection, Alert};
use super::{Action, AppController};

impl AppController {
    /// Load the persisted session at startup
    pub async fn restore_session(&self) {
        self.model.set_account_loading(true).await;

        match self.account.restore().await {
            Ok(Some(session)) => {
                tracing::info!(
                    username = %session.user.username,
                    favorites = session.favorites.albums.len(),
                    unresolved = session.favorites.failed.len(),
                    "Session restored"
                );
                self.model.set_session(session).await;
            }
            Ok(None) => {
                tracing::debug!("No saved session");
                self.model.set_account_loading(false).await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Session restore failed");
                self.model.set_account_loading(false).await;
                self.model.show_alert(Self::format_error(Action::Restore, &e)).await;
            }
        }
    }

    /// Submit whichever form the account panel is showing
    pub async fn submit_account_form(&self) {
        let ui_state = self.model.get_ui_state().await;
        match ui_state.account_mode {
            AccountMode::Login => self.login(&ui_state.form).await,
            AccountMode::Register => self.register(&ui_state.form).await,
        }
    }

    async fn login(&self, form: &CredentialsForm) {
        self.model.set_account_loading(true).await;

        match self.account.submit_login(form).await {
            Ok(session) => {
                if !session.favorites.failed.is_empty() {
                    tracing::warn!(unresolved = session.favorites.failed.len(), "Some favorites could not be loaded");
                }
                self.model.set_session(session).await;
                self.model.ui_state.lock().await.form.clear();
            }
            Err(e) => {
                tracing::error!(error = %e, "Login failed");
                self.model.set_account_loading(false).await;
                self.model.show_alert(Self::format_error(Action::Login, &e)).await;
            }
        }
    }

    async fn register(&self, form: &CredentialsForm) {
        self.model.set_account_loading(true).await;

        match self.account.submit_register(form).await {
            Ok(user) => {
                self.model.set_account_loading(false).await;
                self.model.set_account_mode(AccountMode::Login).await;
                self.model.ui_state.lock().await.form = CredentialsForm::login(&user.username, "");
                self.model
                    .show_alert(Alert::info("Account created", "You can now log in."))
                    .await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Registration failed");
                self.model.set_account_loading(false).await;
                self.model.show_alert(Self::format_error(Action::Register, &e)).await;
            }
        }
    }

    pub async fn logout(&self) {
        let result = {
            let mut ui_state = self.model.ui_state.lock().await;
            self.account.logout(&mut ui_state.form).await
        };

        // Local sign-out happens even if the file could not be removed
        self.model.sign_out().await;
        if let Err(e) = result {
            tracing::error!(error = %e, "Logout failed");
            self.model.show_alert(Self::format_error(Action::Logout, &e)).await;
        }
    }

    /// Favorite the album highlighted in the list
    pub async fn favorite_selected(&self) {
        let Some(album) = self.model.get_selected_album().await else {
            return;
        };

        match self.favorites.favorite(&album).await {
            Ok(FavoriteOutcome::RedirectToAccount) => {
                self.model.set_active_section(ActiveSection::Account).await;
                self.model.set_account_mode(AccountMode::Login).await;
                self.model
                    .show_alert(Alert::info("Favorites", "Log in to save albums to your favorites."))
                    .await;
            }
            Ok(FavoriteOutcome::Added { user, newly_added }) => {
                self.model.add_favorite(user, album.clone()).await;
                let message = if newly_added {
                    format!("\"{}\" was added to your favorites.", album.title)
                } else {
                    format!("\"{}\" is already in your favorites.", album.title)
                };
                self.model.show_alert(Alert::info("Favorites", message)).await;
            }
            Err(e) => {
                tracing::error!(album_id = %album.id, error = %e, "Favorite failed");
                self.model.show_alert(Self::format_error(Action::Favorite, &e)).await;
            }
        }
    }

    /// Fetch the signed-in user's favorite albums again
    pub async fn refresh_favorites(&self) {
        self.model.set_account_loading(true).await;
        let favorites = self.favorites.resolve_current().await;
        tracing::info!(
            resolved = favorites.albums.len(),
            unresolved = favorites.failed.len(),
            "Favorites refreshed"
        );
        self.model.set_favorites(favorites).await;
    }
}
