//! Signed-in user record as stored by the account service and the session file

use serde::{Deserialize, Deserializer, Serialize};

use crate::api::types::{null_as_default, RawId};

/// Insertion-ordered set of favorited album ids
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FavoriteIds(Vec<String>);

impl FavoriteIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if the id was already present.
    pub fn insert(&mut self, album_id: impl Into<String>) -> bool {
        let album_id = album_id.into();
        if self.contains(&album_id) {
            return false;
        }
        self.0.push(album_id);
        true
    }

    pub fn contains(&self, album_id: &str) -> bool {
        self.0.iter().any(|id| id == album_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl<S: Into<String>> FromIterator<S> for FavoriteIds {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut ids = FavoriteIds::new();
        for id in iter {
            ids.insert(id);
        }
        ids
    }
}

impl<'de> Deserialize<'de> for FavoriteIds {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // The backend may send `null`, numbers, or repeated ids
        let raw: Option<Vec<RawId>> = Option::deserialize(deserializer)?;
        Ok(raw
            .unwrap_or_default()
            .into_iter()
            .map(RawId::into_string)
            .collect())
    }
}

/// User record. Field names on the wire follow the account service schema.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "usuario")]
    pub username: String,
    #[serde(rename = "nome", default, deserialize_with = "null_as_default")]
    pub display_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(rename = "imagem", default, deserialize_with = "null_as_default")]
    pub avatar_url: String,
    #[serde(rename = "likes", default)]
    pub favorite_album_ids: FavoriteIds,
}

impl User {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            display_name: String::new(),
            email: String::new(),
            avatar_url: String::new(),
            favorite_album_ids: FavoriteIds::new(),
        }
    }

    pub fn is_favorite(&self, album_id: &str) -> bool {
        self.favorite_album_ids.contains(album_id)
    }

    /// Copy of this user with `album_id` added to the favorites.
    pub fn with_favorite(&self, album_id: &str) -> (Self, bool) {
        let mut updated = self.clone();
        let inserted = updated.favorite_album_ids.insert(album_id);
        (updated, inserted)
    }
}
