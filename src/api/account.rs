//! Account service client (login, registration, favorites, album lookup)

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, Url};

use crate::config::AccountConfig;
use crate::error::{ApiError, ApiResult};
use crate::model::{Album, User};
use crate::{log_api_request, log_api_result};
use super::types::{LoginRequest, LoginResponse, RawAlbum, RawId, RegisterRequest};
use super::{base_url, build_http_client, map_send_error};
use super::AccountApi;

/// Avatar sent for freshly registered accounts
pub const DEFAULT_AVATAR: &str = "default_image_url";

/// HTTP client for the account service
#[derive(Clone)]
pub struct AccountClient {
    http: Client,
    base_url: Url,
}

impl AccountClient {
    pub fn new(config: AccountConfig) -> ApiResult<Self> {
        Ok(Self {
            http: build_http_client()?,
            base_url: base_url(&config.base_url)?,
        })
    }

    /// Append path segments to the base URL, percent-encoding each one.
    /// An empty trailing segment yields a trailing slash (`/login/`).
    fn endpoint(&self, segments: &[&str]) -> ApiResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn reject(response: Response) -> ApiError {
        let status = response.status().as_u16();
        let message = response.text().await.unwrap_or_default();
        ApiError::Status { status, message }
    }
}

#[async_trait]
impl AccountApi for AccountClient {
    async fn login(&self, username: &str, password: &str) -> ApiResult<LoginResponse> {
        log_api_request!("login", username = %username);
        let request = LoginRequest {
            usuario: username.to_string(),
            senha: password.to_string(),
        };

        let result = async {
            let response = self
                .http
                .post(self.endpoint(&["login", ""])?)
                .json(&request)
                .send()
                .await
                .map_err(map_send_error)?;

            if response.status() != StatusCode::OK {
                return Err(Self::reject(response).await);
            }
            response
                .json::<LoginResponse>()
                .await
                .map_err(|e| ApiError::Parse(format!("Failed to parse login response: {}", e)))
        }
        .await;

        log_api_result!("login", result);
        result
    }

    async fn get_user(&self, username: &str) -> ApiResult<User> {
        log_api_request!("get_user", username = %username);
        let result = async {
            let response = self
                .http
                .get(self.endpoint(&["users", username])?)
                .send()
                .await
                .map_err(map_send_error)?;

            if response.status() != StatusCode::OK {
                return Err(Self::reject(response).await);
            }
            response
                .json::<User>()
                .await
                .map_err(|e| ApiError::Parse(format!("Failed to parse user: {}", e)))
        }
        .await;

        log_api_result!("get_user", result);
        result
    }

    async fn register(
        &self,
        username: &str,
        full_name: &str,
        email: &str,
        password: &str,
    ) -> ApiResult<User> {
        log_api_request!("register", username = %username, email = %email);
        let request = RegisterRequest {
            usuario: username.to_string(),
            nome: full_name.to_string(),
            email: email.to_string(),
            senha: password.to_string(),
            imagem: DEFAULT_AVATAR.to_string(),
            likes: Vec::new(),
        };

        let result = async {
            let response = self
                .http
                .post(self.endpoint(&["users", ""])?)
                .json(&request)
                .send()
                .await
                .map_err(map_send_error)?;

            let status = response.status();
            if status != StatusCode::OK && status != StatusCode::CREATED {
                return Err(Self::reject(response).await);
            }

            let body = response.text().await?;
            let user = serde_json::from_str::<User>(&body).unwrap_or_else(|_| {
                tracing::debug!("Registration response is not a user record, using submitted fields");
                User {
                    username: request.usuario.clone(),
                    display_name: request.nome.clone(),
                    email: request.email.clone(),
                    avatar_url: request.imagem.clone(),
                    favorite_album_ids: Default::default(),
                }
            });
            Ok::<_, ApiError>(user)
        }
        .await;

        log_api_result!("register", result);
        result
    }

    async fn add_favorite(&self, username: &str, album_id: &str) -> ApiResult<()> {
        log_api_request!("add_favorite", username = %username, album_id = %album_id);
        let result = async {
            let response = self
                .http
                .put(self.endpoint(&["addlike", username, album_id])?)
                .send()
                .await
                .map_err(map_send_error)?;

            // Only a plain 200 counts; 201/204 are treated as failures
            if response.status() != StatusCode::OK {
                return Err(Self::reject(response).await);
            }
            Ok::<_, ApiError>(())
        }
        .await;

        log_api_result!("add_favorite", result);
        result
    }

    async fn get_album_by_id(&self, album_id: &str) -> ApiResult<Album> {
        log_api_request!("get_album_by_id", album_id = %album_id);
        let result = async {
            let response = self
                .http
                .get(self.endpoint(&["albums", album_id])?)
                .send()
                .await
                .map_err(map_send_error)?;

            if !response.status().is_success() {
                return Err(Self::reject(response).await);
            }

            let mut raw: RawAlbum = response
                .json()
                .await
                .map_err(|e| ApiError::Parse(format!("Failed to parse album: {}", e)))?;
            // The requested id is authoritative when the body omits it
            if raw.id.is_none() {
                raw.id = Some(RawId::Text(album_id.to_string()));
            }
            Album::from_raw(raw).ok_or_else(|| ApiError::Parse(format!("Album {} has no id", album_id)))
        }
        .await;

        log_api_result!("get_album_by_id", result);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> AccountClient {
        AccountClient::new(AccountConfig::new(base)).unwrap()
    }

    #[test]
    fn endpoints_keep_trailing_slash_where_required() {
        let client = client("https://accounts.example.com/");
        assert_eq!(
            client.endpoint(&["login", ""]).unwrap().as_str(),
            "https://accounts.example.com/login/"
        );
        assert_eq!(
            client.endpoint(&["users", "alice"]).unwrap().as_str(),
            "https://accounts.example.com/users/alice"
        );
    }

    #[test]
    fn path_segments_are_percent_encoded() {
        let client = client("https://accounts.example.com/api");
        assert_eq!(
            client.endpoint(&["addlike", "jo ana", "a/b"]).unwrap().as_str(),
            "https://accounts.example.com/api/addlike/jo%20ana/a%2Fb"
        );
    }
}
