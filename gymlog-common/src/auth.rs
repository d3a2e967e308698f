//! Credential verification primitives
//!
//! Users live in an operator-provisioned TOML file: one `[[users]]` entry per
//! account with a salt and a SHA-256 salted password hash, plus a `[session]`
//! section the external session layer consumes. This module contains only
//! pure functions and file loading — no HTTP framework dependencies; the
//! middleware lives with the UI service.

use crate::{Error, Result};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Parsed credentials file
#[derive(Debug, Clone, Deserialize)]
pub struct CredentialsFile {
    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub users: Vec<UserEntry>,
}

/// Session settings consumed by the external session/cookie layer
///
/// Parsed so the file format is validated in one place; nothing in the core
/// interprets these values.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,

    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

/// One account entry
#[derive(Debug, Clone, Deserialize)]
pub struct UserEntry {
    pub username: String,
    pub salt: String,
    /// Hex-encoded SHA-256 of `salt || password`
    pub password_hash: String,
}

fn default_cookie_name() -> String {
    "gymlog_session".to_string()
}

fn default_timeout_seconds() -> u64 {
    86400 // 1 day
}

/// Load and parse a credentials file
pub fn load_credentials(path: &Path) -> Result<CredentialsFile> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!("failed to read credentials file {}: {}", path.display(), e))
    })?;
    let credentials: CredentialsFile = toml::from_str(&text)
        .map_err(|e| Error::Config(format!("failed to parse credentials file: {}", e)))?;

    if credentials.users.is_empty() {
        return Err(Error::Config("credentials file defines no users".to_string()));
    }
    Ok(credentials)
}

/// Hex SHA-256 of `salt || password`
pub fn hash_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    let digest = hasher.finalize();
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}

impl CredentialsFile {
    /// Verify a username/password pair; returns the matching entry
    pub fn verify(&self, username: &str, password: &str) -> Option<&UserEntry> {
        let entry = self.users.iter().find(|u| u.username == username)?;
        if hash_password(&entry.salt, password) == entry.password_hash.to_lowercase() {
            Some(entry)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CredentialsFile {
        let hash = hash_password("pepper", "hunter2");
        toml::from_str(&format!(
            r#"
            [session]
            cookie_name = "gymlog_session"
            timeout_seconds = 3600

            [[users]]
            username = "alice"
            salt = "pepper"
            password_hash = "{}"
            "#,
            hash
        ))
        .unwrap()
    }

    #[test]
    fn hash_is_stable_hex() {
        let h = hash_password("salt", "password");
        assert_eq!(h.len(), 64);
        assert_eq!(h, hash_password("salt", "password"));
        assert_ne!(h, hash_password("other", "password"));
    }

    #[test]
    fn verify_accepts_correct_password() {
        let credentials = sample();
        let entry = credentials.verify("alice", "hunter2").expect("valid login");
        assert_eq!(entry.username, "alice");
    }

    #[test]
    fn verify_rejects_wrong_password_and_unknown_user() {
        let credentials = sample();
        assert!(credentials.verify("alice", "wrong").is_none());
        assert!(credentials.verify("bob", "hunter2").is_none());
    }

    #[test]
    fn session_defaults_apply() {
        let credentials: CredentialsFile = toml::from_str(
            r#"
            [[users]]
            username = "alice"
            salt = "s"
            password_hash = "00"
            "#,
        )
        .unwrap();
        assert_eq!(credentials.session.cookie_name, "gymlog_session");
        assert_eq!(credentials.session.timeout_seconds, 86400);
    }
}
