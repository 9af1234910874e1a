//! Error types shared by the API clients, the session store and the flows.

use thiserror::Error;

/// Errors raised by the catalog and account service clients.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The request never produced a response (DNS, connect, TLS, body read)
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a status the operation does not accept
    #[error("Server error ({status}): {message}")]
    Status { status: u16, message: String },

    /// The response body did not have the expected shape
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// A configured base URL could not be used to build a request
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The catalog token endpoint refused the client credentials
    #[error("Catalog authorization failed: {0}")]
    CatalogAuth(String),
}

impl ApiError {
    /// HTTP status of the failed request, when one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Errors raised while reading or writing the persisted session.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Session storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Session could not be serialized: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Session writer has shut down")]
    Closed,
}

/// Errors surfaced by the browsing, favorites and account flows.
#[derive(Error, Debug)]
pub enum AppError {
    /// A required field or search term is missing; no request was made
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Session(#[from] SessionError),

    /// The account service answered the login with `success: false`
    #[error("Login rejected by the account service")]
    LoginRejected,
}

impl AppError {
    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::Validation(_))
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_is_exposed_for_status_errors() {
        let err = ApiError::Status { status: 404, message: "missing".into() };
        assert_eq!(err.status(), Some(404));
        assert_eq!(ApiError::Parse("bad".into()).status(), None);
    }

    #[test]
    fn validation_message_is_displayed_verbatim() {
        let err = AppError::Validation("Please enter a search term.".into());
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "Please enter a search term.");
    }
}
