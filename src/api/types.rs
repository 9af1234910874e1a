//! Wire types for the catalog API and the account service.
//!
//! Catalog payloads are decoded leniently: every field is optional so that a
//! missing artist or cover image degrades the display instead of failing the
//! whole response.

use serde::{Deserialize, Deserializer, Serialize};

/// Decode an explicit `null` the same way as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Identifier that the catalog or the backend may encode as text or as a number.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Text(String),
    Number(i64),
}

impl RawId {
    pub fn into_string(self) -> String {
        match self {
            RawId::Text(s) => s,
            RawId::Number(n) => n.to_string(),
        }
    }
}

/// Raw catalog album object as returned by search and by `/albums/{id}`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawAlbum {
    #[serde(default)]
    pub id: Option<RawId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub artists: Vec<Option<RawArtist>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub images: Vec<Option<RawImage>>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub total_tracks: Option<u32>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawArtist {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawImage {
    #[serde(default)]
    pub url: Option<String>,
}

/// Search payload: `{ albums: { items: [...] } }`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct AlbumSearchResult {
    #[serde(default)]
    pub albums: Option<AlbumPage>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct AlbumPage {
    // The catalog occasionally returns `null` entries in search pages
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<Option<RawAlbum>>,
}

impl AlbumSearchResult {
    /// Non-null items in API order.
    pub fn into_items(self) -> Vec<RawAlbum> {
        self.albums
            .map(|page| page.items.into_iter().flatten().collect())
            .unwrap_or_default()
    }

    pub fn item_count(&self) -> usize {
        self.albums
            .as_ref()
            .map(|page| page.items.iter().filter(|i| i.is_some()).count())
            .unwrap_or(0)
    }
}

/// Body of `POST /login/`.
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub usuario: String,
    pub senha: String,
}

/// Response of `POST /login/`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub success: bool,
}

/// Body of `POST /users/`.
#[derive(Debug, Serialize)]
pub struct RegisterRequest {
    pub usuario: String,
    pub nome: String,
    pub email: String,
    pub senha: String,
    pub imagem: String,
    pub likes: Vec<String>,
}

/// Response of the client-credentials token endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_expires_in")]
    pub expires_in: i64,
}

fn default_expires_in() -> i64 {
    3600
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_items_are_dropped() {
        let payload = r#"{"albums":{"items":[null,{"id":"a1","name":"One"}]}}"#;
        let result: AlbumSearchResult = serde_json::from_str(payload).unwrap();
        assert_eq!(result.item_count(), 1);
        let items = result.into_items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id.clone().map(RawId::into_string).as_deref(), Some("a1"));
    }

    #[test]
    fn missing_albums_key_means_no_items() {
        let result: AlbumSearchResult = serde_json::from_str("{}").unwrap();
        assert_eq!(result.item_count(), 0);
        assert!(result.into_items().is_empty());
    }

    #[test]
    fn null_lists_do_not_fail_the_page() {
        let payload = r#"{"albums":{"items":[
            {"id":"1","name":"One","artists":[{"name":"A"}],"images":[{"url":"u"}]},
            {"id":"2","name":"Two","artists":null,"images":null},
            {"id":"3","artists":[null],"images":[null]}
        ]}}"#;
        let result: AlbumSearchResult = serde_json::from_str(payload).unwrap();
        let items = result.into_items();
        assert_eq!(items.len(), 3);
        assert!(items[1].artists.is_empty());
        assert!(items[1].images.is_empty());
    }

    #[test]
    fn null_item_list_means_no_items() {
        let result: AlbumSearchResult =
            serde_json::from_str(r#"{"albums":{"items":null}}"#).unwrap();
        assert_eq!(result.item_count(), 0);
    }

    #[test]
    fn numeric_ids_become_strings() {
        let album: RawAlbum = serde_json::from_str(r#"{"id": 42}"#).unwrap();
        assert_eq!(album.id.map(RawId::into_string).as_deref(), Some("42"));
    }
}
