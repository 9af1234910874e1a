//! Flows module - what happens when the user acts
//!
//! Each flow owns the clients it needs and, where it touches the signed-in
//! user, a [`SessionHandle`](crate::model::SessionHandle):
//!
//! - `browse`: random-album feed and album search
//! - `favorites`: add-favorite and favorite resolution
//! - `account`: login/registration forms, restore and logout

mod account;
mod browse;
mod favorites;

pub use account::{
    AccountFlow, AccountMode, AccountView, AuthenticatedSession, CredentialsForm,
    MISSING_FIELDS_MESSAGE,
};
pub use browse::{BrowseFlow, Feed, EMPTY_QUERY_MESSAGE, INITIAL_FEED_SIZE};
pub use favorites::{
    resolve_favorites, FavoriteOutcome, FavoriteResolution, FavoritesFlow, ResolvedFavorites,
};
