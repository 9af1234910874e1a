//! Session store and session handle tests on temporary directories.

use soundsnap::model::{SessionHandle, SessionStore, User};
use tempfile::TempDir;

fn store_in(dir: &TempDir) -> SessionStore {
    SessionStore::new(dir.path().join("session.json"))
}

fn alice() -> User {
    let mut user = User::new("alice");
    user.display_name = "Alice A".into();
    user.email = "a@x.com".into();
    user.favorite_album_ids.insert("42");
    user
}

// =============================================================================
// Store Tests
// =============================================================================

mod store {
    use super::*;

    #[tokio::test]
    async fn saved_user_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.save(&alice()).await.unwrap();

        assert_eq!(store.load().await.unwrap(), Some(alice()));
    }

    #[tokio::test]
    async fn file_uses_account_service_field_names() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.save(&alice()).await.unwrap();

        let raw = std::fs::read_to_string(store.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["usuario"], "alice");
        assert_eq!(value["nome"], "Alice A");
        assert_eq!(value["likes"], serde_json::json!(["42"]));
    }

    #[tokio::test]
    async fn corrupt_record_is_cleared() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), "{ not json").unwrap();

        assert!(store.load().await.unwrap().is_none());
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn record_without_username_is_cleared() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), r#"{"nome": "Nobody", "likes": []}"#).unwrap();

        assert!(store.load().await.unwrap().is_none());
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn clear_removes_the_slot() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.save(&alice()).await.unwrap();

        store.clear().await.unwrap();
        store.clear().await.unwrap();

        assert!(store.load().await.unwrap().is_none());
    }
}

// =============================================================================
// Handle Tests
// =============================================================================

mod handle {
    use super::*;

    #[tokio::test]
    async fn load_publishes_stored_user() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.save(&alice()).await.unwrap();
        let handle = SessionHandle::spawn(store);

        assert!(handle.current().await.is_none());
        let loaded = handle.load().await.unwrap();

        assert_eq!(loaded, Some(alice()));
        assert_eq!(handle.current().await, Some(alice()));
        assert!(handle.is_authenticated().await);
    }

    #[tokio::test]
    async fn replace_writes_through() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let handle = SessionHandle::spawn(store.clone());

        handle.replace(alice()).await.unwrap();

        assert_eq!(store.load().await.unwrap(), Some(alice()));
        assert_eq!(handle.current().await, Some(alice()));
    }

    #[tokio::test]
    async fn add_favorite_without_user_does_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let handle = SessionHandle::spawn(store.clone());

        assert!(handle.add_favorite("alice", "1").await.unwrap().is_none());
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn add_favorite_keeps_set_semantics() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let handle = SessionHandle::spawn(store.clone());
        handle.replace(alice()).await.unwrap();

        let (user, inserted) = handle.add_favorite("alice", "7").await.unwrap().unwrap();
        assert!(inserted);
        assert_eq!(user.favorite_album_ids.as_slice(), ["42", "7"]);

        let (user, inserted) = handle.add_favorite("alice", "42").await.unwrap().unwrap();
        assert!(!inserted);
        assert_eq!(user.favorite_album_ids.as_slice(), ["42", "7"]);

        let stored = store.load().await.unwrap().unwrap();
        assert_eq!(stored.favorite_album_ids.as_slice(), ["42", "7"]);
    }

    #[tokio::test]
    async fn add_favorite_for_a_replaced_user_is_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let handle = SessionHandle::spawn(store.clone());
        handle.replace(User::new("bob")).await.unwrap();

        assert!(handle.add_favorite("alice", "7").await.unwrap().is_none());

        let stored = store.load().await.unwrap().unwrap();
        assert_eq!(stored.username, "bob");
        assert!(stored.favorite_album_ids.is_empty());
        assert!(handle.current().await.unwrap().favorite_album_ids.is_empty());
    }

    #[tokio::test]
    async fn clear_signs_out_everywhere() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let handle = SessionHandle::spawn(store.clone());
        handle.replace(alice()).await.unwrap();

        handle.clear().await.unwrap();

        assert!(handle.current().await.is_none());
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn clones_share_one_writer() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let handle = SessionHandle::spawn(store.clone());
        handle.replace(User::new("alice")).await.unwrap();

        let tasks: Vec<_> = (0..10)
            .map(|i| {
                let handle = handle.clone();
                tokio::spawn(async move { handle.add_favorite("alice", &i.to_string()).await })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        let stored = store.load().await.unwrap().unwrap();
        assert_eq!(stored.favorite_album_ids.len(), 10);
        assert_eq!(handle.current().await.unwrap().favorite_album_ids.len(), 10);
    }
}
