//! Catalog API client (album search and random album lookup)

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rand::Rng;
use reqwest::{Client, RequestBuilder, Url};
use tokio::sync::RwLock;

use crate::config::{CatalogAuth, CatalogConfig};
use crate::error::{ApiError, ApiResult};
use crate::{log_api_request, log_api_result};
use super::types::{AlbumSearchResult, TokenResponse};
use super::{base_url, build_http_client, map_send_error};
use super::CatalogApi;

/// Spotify rejects search offsets past 1000; stay under it with limit 1.
const RANDOM_OFFSET_MAX: u32 = 999;
const RANDOM_QUERY_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
/// Refresh a granted token when less than this many seconds remain
const TOKEN_REFRESH_MARGIN_SECS: i64 = 300;

#[derive(Clone, Debug)]
struct GrantedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

impl GrantedToken {
    fn needs_refresh(&self) -> bool {
        let remaining = self.expires_at - Utc::now();
        remaining.num_seconds() < TOKEN_REFRESH_MARGIN_SECS
    }
}

/// HTTP client for the catalog search endpoint
#[derive(Clone)]
pub struct CatalogClient {
    http: Client,
    base_url: Url,
    auth: CatalogAuth,
    search_limit: u32,
    granted_token: Arc<RwLock<Option<GrantedToken>>>,
}

impl CatalogClient {
    pub fn new(config: CatalogConfig) -> ApiResult<Self> {
        Ok(Self {
            http: build_http_client()?,
            base_url: base_url(&config.base_url)?,
            auth: config.auth,
            search_limit: config.search_limit,
            granted_token: Arc::new(RwLock::new(None)),
        })
    }

    fn search_url(&self) -> ApiResult<Url> {
        self.base_url
            .join("search")
            .map_err(|e| ApiError::InvalidUrl(e.to_string()))
    }

    async fn search(&self, query: &str, limit: u32, offset: u32) -> ApiResult<AlbumSearchResult> {
        let limit = limit.to_string();
        let offset = offset.to_string();
        let request = self.http.get(self.search_url()?).query(&[
            ("q", query),
            ("type", "album"),
            ("limit", limit.as_str()),
            ("offset", offset.as_str()),
        ]);

        let response = self.authorize(request).await?.send().await.map_err(map_send_error)?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ApiError::Status { status: status.as_u16(), message });
        }

        let body = response.text().await?;
        serde_json::from_str(&body)
            .map_err(|e| ApiError::Parse(format!("Failed to parse album search result: {}", e)))
    }

    async fn authorize(&self, request: RequestBuilder) -> ApiResult<RequestBuilder> {
        match &self.auth {
            CatalogAuth::Anonymous => Ok(request),
            CatalogAuth::Bearer(token) => Ok(request.bearer_auth(token)),
            CatalogAuth::ClientCredentials { client_id, client_secret, token_url } => {
                let token = self.granted_access_token(client_id, client_secret, token_url).await?;
                Ok(request.bearer_auth(token))
            }
        }
    }

    async fn granted_access_token(
        &self,
        client_id: &str,
        client_secret: &str,
        token_url: &str,
    ) -> ApiResult<String> {
        if let Some(token) = self.granted_token.read().await.as_ref() {
            if !token.needs_refresh() {
                return Ok(token.access_token.clone());
            }
        }

        let mut slot = self.granted_token.write().await;
        // Another caller may have refreshed while we waited for the lock
        if let Some(token) = slot.as_ref() {
            if !token.needs_refresh() {
                return Ok(token.access_token.clone());
            }
        }

        tracing::info!("Requesting catalog access token");
        let response = self
            .http
            .post(token_url)
            .basic_auth(client_id, Some(client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(map_send_error)?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), "Catalog token request rejected");
            return Err(ApiError::CatalogAuth(format!("status {}: {}", status.as_u16(), message)));
        }

        let granted: TokenResponse = response
            .json()
            .await
            .map_err(|e| ApiError::CatalogAuth(format!("unreadable token response: {}", e)))?;

        let token = GrantedToken {
            access_token: granted.access_token,
            expires_at: Utc::now() + chrono::Duration::seconds(granted.expires_in),
        };
        tracing::debug!(expires_at = %token.expires_at, "Catalog access token granted");
        let access_token = token.access_token.clone();
        *slot = Some(token);
        Ok(access_token)
    }
}

/// One random lowercase letter and an offset into its result set
fn random_query() -> (String, u32) {
    let mut rng = rand::thread_rng();
    let letter = RANDOM_QUERY_ALPHABET[rng.gen_range(0..RANDOM_QUERY_ALPHABET.len())] as char;
    let offset = rng.gen_range(0..=RANDOM_OFFSET_MAX);
    (letter.to_string(), offset)
}

#[async_trait]
impl CatalogApi for CatalogClient {
    async fn fetch_random_album(&self) -> ApiResult<AlbumSearchResult> {
        let (query, offset) = random_query();
        log_api_request!("fetch_random_album", query = %query, offset);
        let result = self.search(&query, 1, offset).await;
        log_api_result!("fetch_random_album", result);
        result
    }

    async fn search_albums(&self, query: &str) -> ApiResult<AlbumSearchResult> {
        log_api_request!("search_albums", query = %query, limit = self.search_limit);
        let result = self.search(query, self.search_limit, 0).await;
        log_api_result!("search_albums", result);
        result
    }
}
