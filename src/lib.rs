//! Soundsnap: browse a music catalog and keep a list of favorite albums.
//!
//! The library holds the HTTP clients, the persisted session and the flows
//! that tie them together. The binary puts a terminal UI on top.

pub mod api;
pub mod config;
pub mod controller;
pub mod error;
pub mod flows;
pub mod logging;
pub mod model;
pub mod view;

pub use error::{ApiError, AppError, SessionError};
