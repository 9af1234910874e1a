//! Album display record

use crate::api::types::{RawAlbum, RawId};

/// An album as shown in the feed, the search results and the favorites list
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Album {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub cover_url: String,
    pub release_year: Option<i32>,
    pub track_count: Option<u32>,
}

impl Album {
    /// Map a raw catalog object. Returns `None` when the item has no id, since
    /// an album that cannot be favorited or looked up again is not listable.
    pub fn from_raw(raw: RawAlbum) -> Option<Self> {
        let id = raw.id.map(RawId::into_string).filter(|id| !id.is_empty())?;

        Some(Self {
            id,
            title: raw.name.unwrap_or_default(),
            artist: raw
                .artists
                .into_iter()
                .flatten()
                .next()
                .and_then(|a| a.name)
                .unwrap_or_default(),
            cover_url: raw
                .images
                .into_iter()
                .flatten()
                .next()
                .and_then(|i| i.url)
                .unwrap_or_default(),
            release_year: raw.release_date.as_deref().and_then(parse_release_year),
            track_count: raw.total_tracks,
        })
    }

    /// Year as display text, blank when unknown
    pub fn year_label(&self) -> String {
        self.release_year.map(|y| y.to_string()).unwrap_or_default()
    }
}

/// Four-digit year at the start of a catalog release date.
///
/// The catalog reports dates at year, month or day precision
/// (`1999`, `1999-05`, `1999-05-12`).
pub fn parse_release_year(date: &str) -> Option<i32> {
    let year: String = date.trim().chars().take(4).collect();
    if year.len() == 4 && year.chars().all(|c| c.is_ascii_digit()) {
        year.parse().ok()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(json: &str) -> RawAlbum {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn maps_full_catalog_item() {
        let album = Album::from_raw(raw(
            r#"{
                "id": "4aawyAB9vmqN3uQ7FjRGTy",
                "name": "Global Warming",
                "artists": [{"name": "Pitbull"}, {"name": "Someone Else"}],
                "images": [{"url": "https://i.scdn.co/image/large"}, {"url": "https://i.scdn.co/image/small"}],
                "release_date": "2012-11-16",
                "total_tracks": 18
            }"#,
        ))
        .unwrap();

        assert_eq!(album.id, "4aawyAB9vmqN3uQ7FjRGTy");
        assert_eq!(album.title, "Global Warming");
        assert_eq!(album.artist, "Pitbull");
        assert_eq!(album.cover_url, "https://i.scdn.co/image/large");
        assert_eq!(album.release_year, Some(2012));
        assert_eq!(album.track_count, Some(18));
    }

    #[test]
    fn missing_fields_degrade_to_blank_values() {
        let album = Album::from_raw(raw(r#"{"id": 7}"#)).unwrap();
        assert_eq!(album.id, "7");
        assert_eq!(album.title, "");
        assert_eq!(album.artist, "");
        assert_eq!(album.cover_url, "");
        assert_eq!(album.release_year, None);
        assert_eq!(album.year_label(), "");
        assert_eq!(album.track_count, None);
    }

    #[test]
    fn items_without_id_are_not_listable() {
        assert!(Album::from_raw(raw(r#"{"name": "Nameless"}"#)).is_none());
        assert!(Album::from_raw(raw(r#"{"id": ""}"#)).is_none());
    }

    #[test]
    fn release_year_handles_every_precision() {
        assert_eq!(parse_release_year("1999"), Some(1999));
        assert_eq!(parse_release_year("1999-05"), Some(1999));
        assert_eq!(parse_release_year("1999-05-12"), Some(1999));
        assert_eq!(parse_release_year("0000"), Some(0));
        assert_eq!(parse_release_year("99"), None);
        assert_eq!(parse_release_year("unknown"), None);
        assert_eq!(parse_release_year(""), None);
    }
}
