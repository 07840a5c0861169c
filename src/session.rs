// Local key-value storage holding the signed-in user and their token

use std::{collections::BTreeMap, path::PathBuf};

use anyhow::{Context, Result};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::models::User;

pub const USER_KEY: &str = "@billboard_user";
pub const TOKEN_KEY: &str = "@billboard_token";

/// String-to-string store persisted as one JSON object on disk. Missing or
/// unreadable files behave as an empty store.
pub struct SessionStore {
    path: PathBuf,
    // Serializes read-modify-write cycles on the file
    lock: Mutex<()>,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        SessionStore { path: path.into(), lock: Mutex::new(()) }
    }

    pub async fn get_item(&self, key: &str) -> Option<String> {
        let _guard = self.lock.lock().await;
        self.load().await.remove(key)
    }

    pub async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.write_entries(&[(key, value)], &[]).await
    }

    pub async fn multi_remove(&self, keys: &[&str]) -> Result<()> {
        self.write_entries(&[], keys).await
    }

    /// Stores the user and token together.
    pub async fn save_session(&self, user: &User, token: &str) -> Result<()> {
        let user_json = serde_json::to_string(user).context("Failed to serialize session user")?;
        self.write_entries(&[(USER_KEY, user_json.as_str()), (TOKEN_KEY, token)], &[]).await
    }

    /// Replaces the stored user, leaving the token as is.
    pub async fn save_user(&self, user: &User) -> Result<()> {
        let user_json = serde_json::to_string(user).context("Failed to serialize session user")?;
        self.set_item(USER_KEY, &user_json).await
    }

    pub async fn current_user(&self) -> Option<User> {
        let raw = self.get_item(USER_KEY).await?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                warn!("Stored session user is unreadable, ignoring it: {}", e);
                None
            }
        }
    }

    pub async fn token(&self) -> Option<String> {
        self.get_item(TOKEN_KEY).await
    }

    /// Logout: both keys go together.
    pub async fn clear(&self) -> Result<()> {
        self.multi_remove(&[USER_KEY, TOKEN_KEY]).await
    }

    async fn write_entries(&self, set: &[(&str, &str)], remove: &[&str]) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut entries = self.load().await;
        for (key, value) in set {
            entries.insert((*key).to_string(), (*value).to_string());
        }
        for key in remove {
            entries.remove(*key);
        }

        let json = serde_json::to_string_pretty(&entries).context("Failed to serialize session store")?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        tokio::fs::write(&self.path, json)
            .await
            .with_context(|| format!("Failed to write session store {}", self.path.display()))?;
        debug!("Session store written with {} keys", entries.len());
        Ok(())
    }

    async fn load(&self) -> BTreeMap<String, String> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return BTreeMap::new(),
            Err(e) => {
                warn!("Failed to read session store {}: {}", self.path.display(), e);
                return BTreeMap::new();
            }
        };
        serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!("Session store {} is corrupt, starting empty: {}", self.path.display(), e);
            BTreeMap::new()
        })
    }
}
