use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, Utc};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("storage error: {0}")]
    Storage(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct User {
    id: Uuid,
    username: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: Uuid,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            created_at: user.created_at,
        }
    }
}

/// Thread-safe user store with file persistence
#[derive(Clone)]
pub struct AuthStore {
    /// In-memory cache of users
    users: Arc<RwLock<HashMap<Uuid, User>>>,
    /// Path to the users JSON file
    file_path: PathBuf,
}

impl AuthStore {
    /// Create a new AuthStore with the given file path
    pub async fn new(file_path: PathBuf) -> Result<Self, AuthError> {
        let users = if file_path.exists() {
            let content = tokio::fs::read_to_string(&file_path)
                .await
                .map_err(|e| AuthError::Storage(format!("Failed to read users file: {}", e)))?;
            serde_json::from_str(&content)
                .map_err(|e| AuthError::Storage(format!("Failed to parse users file: {}", e)))?
        } else {
            HashMap::new()
        };

        Ok(Self {
            users: Arc::new(RwLock::new(users)),
            file_path,
        })
    }

    /// Register a new user. The username must be unused.
    pub async fn create_user(
        &self,
        username: &str,
        password: &str,
    ) -> Result<UserSummary, AuthError> {
        let username = username.trim();
        validate_username(username)?;
        validate_password(password)?;

        let mut users = self.users.write().await;
        if users.values().any(|u| u.username == username) {
            return Err(AuthError::Conflict(format!(
                "Username '{}' is already taken",
                username
            )));
        }

        let user = User {
            id: Uuid::new_v4(),
            username: username.to_string(),
            password_hash: hash_password(password),
            created_at: Utc::now(),
        };
        let summary = UserSummary::from(&user);
        users.insert(user.id, user);

        drop(users);
        self.persist().await?;
        Ok(summary)
    }

    /// Check a username/password pair, returning the user on success
    pub async fn authenticate_user(&self, username: &str, password: &str) -> Option<UserSummary> {
        let users = self.users.read().await;
        users
            .values()
            .find(|u| u.username == username.trim())
            .filter(|u| verify_password(&u.password_hash, password))
            .map(UserSummary::from)
    }

    /// Persist the current state to file
    async fn persist(&self) -> Result<(), AuthError> {
        let users = self.users.read().await;
        let content = serde_json::to_string_pretty(&*users)
            .map_err(|e| AuthError::Storage(format!("Failed to serialize users: {}", e)))?;

        // Ensure parent directory exists
        if let Some(parent) = self.file_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| AuthError::Storage(format!("Failed to create directory: {}", e)))?;
        }

        tokio::fs::write(&self.file_path, content)
            .await
            .map_err(|e| AuthError::Storage(format!("Failed to write users file: {}", e)))?;

        Ok(())
    }
}

fn validate_username(username: &str) -> Result<(), AuthError> {
    if username.is_empty() {
        return Err(AuthError::InvalidInput(
            "Username cannot be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.len() < 8 {
        return Err(AuthError::InvalidInput(
            "Password must be at least 8 characters".to_string(),
        ));
    }
    Ok(())
}

fn hash_password(password: &str) -> String {
    let mut salt = [0_u8; 16];
    rand::thread_rng().fill_bytes(&mut salt);

    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    let digest = hasher.finalize();

    format!(
        "v1${}${}",
        URL_SAFE_NO_PAD.encode(salt),
        URL_SAFE_NO_PAD.encode(digest)
    )
}

fn verify_password(stored_hash: &str, password: &str) -> bool {
    let mut parts = stored_hash.split('$');
    let version = parts.next();
    let encoded_salt = parts.next();
    let encoded_digest = parts.next();
    if version != Some("v1") || encoded_salt.is_none() || encoded_digest.is_none() {
        return false;
    }

    let salt = match URL_SAFE_NO_PAD.decode(encoded_salt.unwrap()) {
        Ok(value) => value,
        Err(_) => return false,
    };
    let expected_digest = match URL_SAFE_NO_PAD.decode(encoded_digest.unwrap()) {
        Ok(value) => value,
        Err(_) => return false,
    };

    let mut hasher = Sha256::new();
    hasher.update(&salt);
    hasher.update(password.as_bytes());
    let actual_digest = hasher.finalize();
    expected_digest == actual_digest.as_slice()
}
