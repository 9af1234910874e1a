//! Persisted session slot and the single-writer handle that guards it
//!
//! The store holds exactly one serialized [`User`]. All mutations go through
//! [`SessionHandle`], which forwards them to one background task so that a
//! login and a favorite racing each other are applied one after the other
//! against the latest state.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::{mpsc, oneshot, RwLock};

use crate::error::SessionError;
use super::user::User;

const SESSION_DIR: &str = "soundsnap";
const SESSION_FILE: &str = "session.json";
const FALLBACK_SESSION_FILE: &str = ".cache/session.json";
const COMMAND_QUEUE_DEPTH: usize = 32;

type SessionResult<T> = Result<T, SessionError>;

/// Single-slot JSON file holding the signed-in user
#[derive(Clone, Debug)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<data dir>/soundsnap/session.json`, or `.cache/session.json` when the
    /// platform has no data directory.
    pub fn default_path() -> PathBuf {
        dirs::data_local_dir()
            .map(|dir| dir.join(SESSION_DIR).join(SESSION_FILE))
            .unwrap_or_else(|| PathBuf::from(FALLBACK_SESSION_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored user.
    ///
    /// A record without a non-empty `usuario`, or one that cannot be decoded,
    /// is treated as corrupt: the slot is removed and `None` is returned.
    pub async fn load(&self) -> SessionResult<Option<User>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match decode_user(&content) {
            Some(user) => {
                tracing::debug!(username = %user.username, "Session loaded from disk");
                Ok(Some(user))
            }
            None => {
                tracing::warn!(path = %self.path.display(), "Stored session is corrupt, clearing it");
                self.clear().await?;
                Ok(None)
            }
        }
    }

    pub async fn save(&self, user: &User) -> SessionResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let content = serde_json::to_string(user)?;
        tokio::fs::write(&self.path, content).await?;
        tracing::debug!(username = %user.username, "Session saved to disk");
        Ok(())
    }

    /// Remove the slot. Clearing an empty slot is not an error.
    pub async fn clear(&self) -> SessionResult<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

fn decode_user(content: &str) -> Option<User> {
    let value: serde_json::Value = serde_json::from_str(content).ok()?;
    let has_username = value
        .get("usuario")
        .and_then(|u| u.as_str())
        .is_some_and(|u| !u.is_empty());
    if !has_username {
        return None;
    }
    serde_json::from_value(value).ok()
}

enum SessionCommand {
    Load {
        reply: oneshot::Sender<SessionResult<Option<User>>>,
    },
    Replace {
        user: User,
        reply: oneshot::Sender<SessionResult<()>>,
    },
    AddFavorite {
        username: String,
        album_id: String,
        reply: oneshot::Sender<SessionResult<Option<(User, bool)>>>,
    },
    Clear {
        reply: oneshot::Sender<SessionResult<()>>,
    },
}

/// Cloneable handle to the session writer task.
///
/// Reads of the in-memory user go straight to a shared snapshot; anything that
/// touches the store is queued.
#[derive(Clone)]
pub struct SessionHandle {
    commands: mpsc::Sender<SessionCommand>,
    current: Arc<RwLock<Option<User>>>,
}

impl SessionHandle {
    /// Start the writer task. Must be called inside a tokio runtime.
    pub fn spawn(store: SessionStore) -> Self {
        let (commands, rx) = mpsc::channel(COMMAND_QUEUE_DEPTH);
        let current = Arc::new(RwLock::new(None));
        tokio::spawn(run_writer(store, rx, current.clone()));
        Self { commands, current }
    }

    /// Snapshot of the signed-in user, if any
    pub async fn current(&self) -> Option<User> {
        self.current.read().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.current.read().await.is_some()
    }

    /// Reload the slot from disk into memory.
    pub async fn load(&self) -> SessionResult<Option<User>> {
        self.request(|reply| SessionCommand::Load { reply }).await
    }

    /// Overwrite the slot with `user` and make it the current session.
    pub async fn replace(&self, user: User) -> SessionResult<()> {
        self.request(|reply| SessionCommand::Replace { user, reply }).await
    }

    /// Add `album_id` to `username`'s favorites and persist the result.
    ///
    /// Returns the updated user and whether the id was new, or `None` when
    /// `username` is no longer the signed-in user by the time the command runs.
    pub async fn add_favorite(
        &self,
        username: &str,
        album_id: &str,
    ) -> SessionResult<Option<(User, bool)>> {
        let username = username.to_string();
        let album_id = album_id.to_string();
        self.request(|reply| SessionCommand::AddFavorite { username, album_id, reply })
            .await
    }

    pub async fn clear(&self) -> SessionResult<()> {
        self.request(|reply| SessionCommand::Clear { reply }).await
    }

    async fn request<T>(
        &self,
        command: impl FnOnce(oneshot::Sender<SessionResult<T>>) -> SessionCommand,
    ) -> SessionResult<T> {
        let (reply, rx) = oneshot::channel();
        self.commands
            .send(command(reply))
            .await
            .map_err(|_| SessionError::Closed)?;
        rx.await.map_err(|_| SessionError::Closed)?
    }
}

async fn run_writer(
    store: SessionStore,
    mut rx: mpsc::Receiver<SessionCommand>,
    current: Arc<RwLock<Option<User>>>,
) {
    while let Some(command) = rx.recv().await {
        match command {
            SessionCommand::Load { reply } => {
                let result = store.load().await;
                if let Ok(user) = &result {
                    *current.write().await = user.clone();
                }
                let _ = reply.send(result);
            }
            SessionCommand::Replace { user, reply } => {
                let result = store.save(&user).await;
                if result.is_ok() {
                    *current.write().await = Some(user);
                }
                let _ = reply.send(result);
            }
            SessionCommand::AddFavorite { username, album_id, reply } => {
                let snapshot = current.read().await.clone();
                let result = match snapshot {
                    Some(user) if user.username == username => {
                        let (updated, inserted) = user.with_favorite(&album_id);
                        match store.save(&updated).await {
                            Ok(()) => {
                                *current.write().await = Some(updated.clone());
                                Ok(Some((updated, inserted)))
                            }
                            Err(e) => Err(e),
                        }
                    }
                    _ => Ok(None),
                };
                let _ = reply.send(result);
            }
            SessionCommand::Clear { reply } => {
                let result = store.clear().await;
                *current.write().await = None;
                let _ = reply.send(result);
            }
        }
    }
    tracing::debug!("Session writer stopped");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_rejects_records_without_username() {
        assert!(decode_user(r#"{"nome": "No Name"}"#).is_none());
        assert!(decode_user(r#"{"usuario": ""}"#).is_none());
        assert!(decode_user(r#"{"usuario": 12}"#).is_none());
        assert!(decode_user("not json").is_none());
        assert!(decode_user(r#"{"usuario": "alice"}"#).is_some());
    }

    #[tokio::test]
    async fn missing_file_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("session.json"));
        assert!(store.load().await.unwrap().is_none());
        store.clear().await.unwrap();
    }

    #[tokio::test]
    async fn save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("nested/deeper/session.json"));
        store.save(&User::new("alice")).await.unwrap();
        assert_eq!(store.load().await.unwrap().map(|u| u.username).as_deref(), Some("alice"));
    }
}
