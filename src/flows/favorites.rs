//! Favorites: adding an album to the signed-in user's list and resolving the
//! stored ids back into albums

use std::sync::Arc;

use futures::future::join_all;

use crate::api::AccountApi;
use crate::error::{ApiResult, Result};
use crate::model::{Album, SessionHandle, User};

/// What happened when the user asked to favorite an album
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FavoriteOutcome {
    /// Nobody is signed in; the caller should show the account form
    RedirectToAccount,
    Added {
        user: User,
        /// `false` when the id was already in the list
        newly_added: bool,
    },
}

/// Lookup result for one favorited id
#[derive(Debug)]
pub struct FavoriteResolution {
    pub album_id: String,
    pub album: ApiResult<Album>,
}

/// Favorite ids split into the albums that resolved and the ids that did not
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResolvedFavorites {
    pub albums: Vec<Album>,
    pub failed: Vec<String>,
}

impl From<Vec<FavoriteResolution>> for ResolvedFavorites {
    fn from(resolutions: Vec<FavoriteResolution>) -> Self {
        let mut resolved = ResolvedFavorites::default();
        for resolution in resolutions {
            match resolution.album {
                Ok(album) => resolved.albums.push(album),
                Err(_) => resolved.failed.push(resolution.album_id),
            }
        }
        resolved
    }
}

/// Fetch every id concurrently. Each id gets its own outcome; an empty list
/// makes no requests.
pub async fn resolve_favorites<A: AccountApi + ?Sized>(
    account: &A,
    album_ids: &[String],
) -> Vec<FavoriteResolution> {
    if album_ids.is_empty() {
        return Vec::new();
    }

    tracing::debug!(count = album_ids.len(), "Resolving favorite albums");
    let lookups = album_ids.iter().map(|album_id| async move {
        let album = account.get_album_by_id(album_id).await;
        if let Err(e) = &album {
            tracing::warn!(album_id = %album_id, error = %e, "Could not resolve favorite album");
        }
        FavoriteResolution {
            album_id: album_id.clone(),
            album,
        }
    });

    join_all(lookups).await
}

pub struct FavoritesFlow<A: AccountApi + ?Sized> {
    account: Arc<A>,
    session: SessionHandle,
}

impl<A: AccountApi + ?Sized> FavoritesFlow<A> {
    pub fn new(account: Arc<A>, session: SessionHandle) -> Self {
        Self { account, session }
    }

    /// Favorite `album` for the signed-in user.
    ///
    /// The local list changes only after the account service confirms with
    /// a 200; any failure leaves the session untouched.
    pub async fn favorite(&self, album: &Album) -> Result<FavoriteOutcome> {
        let Some(user) = self.session.current().await else {
            tracing::debug!(album_id = %album.id, "Favorite requested without a session");
            return Ok(FavoriteOutcome::RedirectToAccount);
        };

        self.account.add_favorite(&user.username, &album.id).await?;

        match self.session.add_favorite(&user.username, &album.id).await? {
            Some((user, newly_added)) => {
                tracing::info!(
                    username = %user.username,
                    album_id = %album.id,
                    newly_added,
                    favorites = user.favorite_album_ids.len(),
                    "Album added to favorites"
                );
                Ok(FavoriteOutcome::Added { user, newly_added })
            }
            None => {
                // Signed out, or another user signed in, while the request was in flight
                tracing::warn!(
                    username = %user.username,
                    album_id = %album.id,
                    "Session changed before the favorite was stored"
                );
                Ok(FavoriteOutcome::RedirectToAccount)
            }
        }
    }

    pub async fn resolve_favorites(&self, album_ids: &[String]) -> Vec<FavoriteResolution> {
        resolve_favorites(self.account.as_ref(), album_ids).await
    }

    /// Resolve the current user's favorites, or nothing when signed out.
    pub async fn resolve_current(&self) -> ResolvedFavorites {
        match self.session.current().await {
            Some(user) => self
                .resolve_favorites(user.favorite_album_ids.as_slice())
                .await
                .into(),
            None => ResolvedFavorites::default(),
        }
    }
}
