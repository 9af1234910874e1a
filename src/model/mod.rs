//! Model module - Application state and data types
//!
//! This module contains the domain records and all state the terminal UI
//! renders. It is organized into submodules by responsibility:
//!
//! - `album`: Album record normalized from catalog payloads
//! - `user`: User record and its ordered favorite-id set
//! - `session`: Persisted session slot and its single-writer handle
//! - `types`: Core UI type definitions (sections, form fields, alerts)
//! - `content`: Feed and account panel state
//! - `app_model`: Main application model with state management methods

mod album;
mod user;
mod session;
mod types;
mod content;
mod app_model;

// Re-export all public types for convenient access
pub use album::{parse_release_year, Album};
pub use user::{FavoriteIds, User};
pub use session::{SessionHandle, SessionStore};

pub use types::{ActiveSection, Alert, FormField, UiState};

pub use content::{AccountState, FeedSource, FeedState};

pub use app_model::AppModel;
