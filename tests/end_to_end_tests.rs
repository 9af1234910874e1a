//! Register, log in, favorite and log out against a mock account service.

use std::sync::Arc;

use serde_json::json;
use soundsnap::api::{AccountApi, AccountClient};
use soundsnap::config::AccountConfig;
use soundsnap::flows::{
    AccountFlow, AccountMode, AccountView, CredentialsForm, FavoriteOutcome, FavoritesFlow,
};
use soundsnap::model::{Album, SessionHandle, SessionStore};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn album_42() -> Album {
    Album {
        id: "42".into(),
        title: "The Album".into(),
        artist: "The Band".into(),
        cover_url: String::new(),
        release_year: Some(1969),
        track_count: Some(17),
    }
}

#[tokio::test]
async fn alice_registers_logs_in_favorites_and_logs_out() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/users/"))
        .and(body_json(json!({
            "usuario": "alice",
            "nome": "Alice A",
            "email": "a@x.com",
            "senha": "pw1",
            "imagem": "default_image_url",
            "likes": []
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "message": "User created" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/login/"))
        .and(body_json(json!({ "usuario": "alice", "senha": "pw1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/alice"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "usuario": "alice",
            "nome": "Alice A",
            "email": "a@x.com",
            "imagem": "default_image_url",
            "likes": []
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/addlike/alice/42"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::new(dir.path().join("session.json"));
    let session = SessionHandle::spawn(store.clone());
    let client: Arc<dyn AccountApi> = Arc::new(AccountClient::new(AccountConfig::new(server.uri())).unwrap());
    let account = AccountFlow::new(client.clone(), session.clone());
    let favorites = FavoritesFlow::new(client, session.clone());

    // Register: back to the login form, nobody signed in
    let mut mode = AccountMode::Register;
    let registered = account
        .submit_register(&CredentialsForm::register("alice", "Alice A", "a@x.com", "pw1"))
        .await
        .unwrap();
    assert_eq!(registered.username, "alice");
    mode = mode.toggle();
    assert_eq!(account.view(mode).await, AccountView::Form(AccountMode::Login));
    assert!(store.load().await.unwrap().is_none());

    // Login: session persisted with no favorites
    let mut form = CredentialsForm::login("alice", "pw1");
    let signed_in = account.submit_login(&form).await.unwrap();
    assert!(signed_in.favorites.albums.is_empty());
    let stored = store.load().await.unwrap().unwrap();
    assert_eq!(stored.username, "alice");
    assert!(stored.favorite_album_ids.is_empty());
    assert!(matches!(account.view(mode).await, AccountView::Authenticated(_)));

    // Favorite album 42
    let outcome = favorites.favorite(&album_42()).await.unwrap();
    assert!(matches!(outcome, FavoriteOutcome::Added { newly_added: true, .. }));
    let stored = store.load().await.unwrap().unwrap();
    assert_eq!(stored.favorite_album_ids.as_slice(), ["42"]);

    // Logout: store empty, form blank
    account.logout(&mut form).await.unwrap();
    assert!(store.load().await.unwrap().is_none());
    assert!(form.is_blank());
    assert_eq!(account.view(mode).await, AccountView::Form(AccountMode::Login));
}
