//! Command line and environment configuration

use std::path::PathBuf;

use clap::Parser;

use crate::model::SessionStore;

pub const DEFAULT_ACCOUNT_URL: &str = "https://spotifyapi-hct0.onrender.com/";
pub const DEFAULT_CATALOG_URL: &str = "https://api.spotify.com/v1/";
pub const DEFAULT_CATALOG_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_SEARCH_LIMIT: u32 = 20;
pub const DEFAULT_LOG_DIR: &str = ".logs";

/// Terminal client for browsing albums and keeping a list of favorites
#[derive(Parser, Debug, Clone)]
#[command(name = "soundsnap", version, about)]
pub struct Cli {
    /// Base URL of the account service
    #[arg(long, env = "SOUNDSNAP_ACCOUNT_URL", default_value = DEFAULT_ACCOUNT_URL)]
    pub account_url: String,

    /// Base URL of the catalog API
    #[arg(long, env = "SOUNDSNAP_CATALOG_URL", default_value = DEFAULT_CATALOG_URL)]
    pub catalog_url: String,

    /// Static bearer token for the catalog API
    #[arg(long, env = "SOUNDSNAP_CATALOG_TOKEN", hide_env_values = true)]
    pub catalog_token: Option<String>,

    /// Client id for the catalog client-credentials grant
    #[arg(long, env = "SPOTIFY_CLIENT_ID", requires = "catalog_client_secret")]
    pub catalog_client_id: Option<String>,

    /// Client secret for the catalog client-credentials grant
    #[arg(long, env = "SPOTIFY_CLIENT_SECRET", hide_env_values = true, requires = "catalog_client_id")]
    pub catalog_client_secret: Option<String>,

    /// Token endpoint for the client-credentials grant
    #[arg(long, env = "SOUNDSNAP_CATALOG_TOKEN_URL", default_value = DEFAULT_CATALOG_TOKEN_URL)]
    pub catalog_token_url: String,

    /// Number of albums requested per search
    #[arg(long, env = "SOUNDSNAP_SEARCH_LIMIT", default_value_t = DEFAULT_SEARCH_LIMIT,
          value_parser = clap::value_parser!(u32).range(1..=50))]
    pub search_limit: u32,

    /// Where the signed-in user is persisted
    #[arg(long, env = "SOUNDSNAP_SESSION_FILE")]
    pub session_file: Option<PathBuf>,

    /// Directory for rolling log files
    #[arg(long, env = "SOUNDSNAP_LOG_DIR", default_value = DEFAULT_LOG_DIR)]
    pub log_dir: PathBuf,
}

/// How requests to the catalog are authorized
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CatalogAuth {
    /// No `Authorization` header (catalog behind a proxy)
    Anonymous,
    Bearer(String),
    ClientCredentials {
        client_id: String,
        client_secret: String,
        token_url: String,
    },
}

#[derive(Clone, Debug)]
pub struct CatalogConfig {
    pub base_url: String,
    pub auth: CatalogAuth,
    pub search_limit: u32,
}

impl CatalogConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            auth: CatalogAuth::Anonymous,
            search_limit: DEFAULT_SEARCH_LIMIT,
        }
    }

    pub fn with_auth(mut self, auth: CatalogAuth) -> Self {
        self.auth = auth;
        self
    }
}

#[derive(Clone, Debug)]
pub struct AccountConfig {
    pub base_url: String,
}

impl AccountConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into() }
    }
}

/// Resolved application configuration
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub catalog: CatalogConfig,
    pub account: AccountConfig,
    pub session_file: PathBuf,
    pub log_dir: PathBuf,
}

impl AppConfig {
    /// Resolve the CLI into a configuration. A static token wins over client
    /// credentials when both are given.
    pub fn from_cli(cli: Cli) -> Self {
        let auth = match (cli.catalog_token, cli.catalog_client_id, cli.catalog_client_secret) {
            (Some(token), _, _) if !token.trim().is_empty() => CatalogAuth::Bearer(token),
            (_, Some(client_id), Some(client_secret)) => CatalogAuth::ClientCredentials {
                client_id,
                client_secret,
                token_url: cli.catalog_token_url,
            },
            _ => CatalogAuth::Anonymous,
        };

        Self {
            catalog: CatalogConfig {
                base_url: cli.catalog_url,
                auth,
                search_limit: cli.search_limit,
            },
            account: AccountConfig::new(cli.account_url),
            session_file: cli.session_file.unwrap_or_else(SessionStore::default_path),
            log_dir: cli.log_dir,
        }
    }
}
