//! Account flow: login and registration forms, session restore and logout

use std::sync::Arc;

use crate::api::AccountApi;
use crate::error::{AppError, Result};
use crate::model::{SessionHandle, User};
use super::favorites::{resolve_favorites, ResolvedFavorites};

pub const MISSING_FIELDS_MESSAGE: &str = "Please fill in all required fields.";

/// Which form the account panel shows while nobody is signed in
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AccountMode {
    #[default]
    Login,
    Register,
}

impl AccountMode {
    pub fn toggle(self) -> Self {
        match self {
            AccountMode::Login => AccountMode::Register,
            AccountMode::Register => AccountMode::Login,
        }
    }
}

/// Text typed into the account form
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CredentialsForm {
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub password: String,
}

impl CredentialsForm {
    pub fn login(username: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
            ..Default::default()
        }
    }

    pub fn register(username: &str, full_name: &str, email: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            full_name: full_name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_blank(&self) -> bool {
        *self == Self::default()
    }

    fn require(fields: &[&str]) -> Result<()> {
        if fields.iter().any(|f| f.trim().is_empty()) {
            return Err(AppError::Validation(MISSING_FIELDS_MESSAGE.to_string()));
        }
        Ok(())
    }
}

/// What the account panel should display
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AccountView {
    Authenticated(User),
    Form(AccountMode),
}

/// A signed-in user together with their resolved favorites
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthenticatedSession {
    pub user: User,
    pub favorites: ResolvedFavorites,
}

pub struct AccountFlow<A: AccountApi + ?Sized> {
    account: Arc<A>,
    session: SessionHandle,
}

impl<A: AccountApi + ?Sized> AccountFlow<A> {
    pub fn new(account: Arc<A>, session: SessionHandle) -> Self {
        Self { account, session }
    }

    /// The authenticated branch whenever a session exists, the form otherwise.
    pub async fn view(&self, mode: AccountMode) -> AccountView {
        match self.session.current().await {
            Some(user) => AccountView::Authenticated(user),
            None => AccountView::Form(mode),
        }
    }

    /// Load the persisted session at startup.
    ///
    /// A stored user is reconciled against the account service, which holds
    /// the authoritative favorites. If that lookup fails the cached copy is
    /// kept.
    pub async fn restore(&self) -> Result<Option<AuthenticatedSession>> {
        let Some(cached) = self.session.load().await? else {
            return Ok(None);
        };

        let user = match self.account.get_user(&cached.username).await {
            Ok(fresh) => {
                self.session.replace(fresh.clone()).await?;
                fresh
            }
            Err(e) => {
                tracing::warn!(username = %cached.username, error = %e, "Using cached session, refresh failed");
                cached
            }
        };

        let favorites = resolve_favorites(self.account.as_ref(), user.favorite_album_ids.as_slice()).await;
        Ok(Some(AuthenticatedSession { user, favorites: favorites.into() }))
    }

    /// Log in with the form's username and password.
    ///
    /// On success the full user record is fetched, persisted, and its
    /// favorites resolved.
    pub async fn submit_login(&self, form: &CredentialsForm) -> Result<AuthenticatedSession> {
        CredentialsForm::require(&[form.username.as_str(), form.password.as_str()])?;
        let username = form.username.trim();

        let response = self.account.login(username, form.password.trim()).await?;
        if !response.success {
            tracing::info!(username, "Login rejected");
            return Err(AppError::LoginRejected);
        }

        let user = self.account.get_user(username).await?;
        self.session.replace(user.clone()).await?;
        tracing::info!(username = %user.username, favorites = user.favorite_album_ids.len(), "Logged in");

        let favorites = resolve_favorites(self.account.as_ref(), user.favorite_album_ids.as_slice()).await;
        Ok(AuthenticatedSession { user, favorites: favorites.into() })
    }

    /// Create an account. Registration does not sign the user in; the caller
    /// switches back to [`AccountMode::Login`].
    pub async fn submit_register(&self, form: &CredentialsForm) -> Result<User> {
        CredentialsForm::require(&[
            form.username.as_str(),
            form.full_name.as_str(),
            form.email.as_str(),
            form.password.as_str(),
        ])?;

        let user = self
            .account
            .register(
                form.username.trim(),
                form.full_name.trim(),
                form.email.trim(),
                form.password.trim(),
            )
            .await?;

        tracing::info!(username = %user.username, "Account registered");
        Ok(user)
    }

    /// Forget the session locally and blank the form. No remote call.
    pub async fn logout(&self, form: &mut CredentialsForm) -> Result<()> {
        form.clear();
        self.session.clear().await?;
        tracing::info!("Logged out");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_toggles_both_ways() {
        assert_eq!(AccountMode::Login.toggle(), AccountMode::Register);
        assert_eq!(AccountMode::Register.toggle(), AccountMode::Login);
        assert_eq!(AccountMode::default(), AccountMode::Login);
    }

    #[test]
    fn blank_fields_fail_validation() {
        assert!(CredentialsForm::require(&["alice", "pw"]).is_ok());
        assert!(CredentialsForm::require(&["alice", ""]).unwrap_err().is_validation());
        assert!(CredentialsForm::require(&["   ", "pw"]).unwrap_err().is_validation());
    }

    #[test]
    fn clear_blanks_every_field() {
        let mut form = CredentialsForm::register("alice", "Alice A", "a@x.com", "pw1");
        assert!(!form.is_blank());
        form.clear();
        assert!(form.is_blank());
    }
}
