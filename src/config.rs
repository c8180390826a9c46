//! Configuration management for Playmood
//!
//! Handles config file loading/saving, backend URL resolution and the saved
//! session. Config is stored at ~/.config/playmood/config.toml

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::client::DEFAULT_API_URL;
use crate::models::User;

/// Environment override for the backend URL
pub const API_URL_ENV: &str = "PLAYMOOD_API_URL";

/// Default hero banner rotation period
pub const DEFAULT_BANNER_INTERVAL_SECS: u64 = 5;

/// Saved sign-in, enough to restore the user store on startup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

impl Session {
    pub fn from_user(user: &User) -> Self {
        Self {
            token: user.token.clone(),
            user_id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }

    /// User with empty likes/watchlist; membership is refreshed after
    /// the first successful action
    pub fn to_user(&self) -> User {
        User {
            id: self.user_id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            token: self.token.clone(),
            likes: Vec::new(),
            watchlist: Vec::new(),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Backend base URL
    pub api_url: Option<String>,
    /// Hero banner rotation period in seconds
    pub banner_interval_secs: Option<u64>,
    /// Saved sign-in
    pub session: Option<Session>,
    /// File this config was loaded from, if not the default
    #[serde(skip)]
    source: Option<PathBuf>,
}

impl Config {
    /// Get config file path (~/.config/playmood/config.toml)
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("playmood").join("config.toml"))
    }

    /// Load config from the default file, or return default if not found
    pub fn load() -> Self {
        Self::path()
            .map(|p| Self::load_from(&p))
            .unwrap_or_default()
    }

    /// Load config from `path`; missing or corrupt files yield the default
    pub fn load_from(path: &Path) -> Self {
        let mut config: Self = match std::fs::read_to_string(path) {
            Ok(s) => toml::from_str(&s).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable config");
                Self::default()
            }),
            Err(_) => Self::default(),
        };
        config.source = Some(path.to_path_buf());
        config
    }

    /// Save config back to the file it came from (or the default path)
    pub fn save(&self) -> Result<()> {
        let path = match &self.source {
            Some(path) => path.clone(),
            None => Self::path().ok_or_else(|| anyhow::anyhow!("Could not determine config path"))?,
        };
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create parent directory if needed
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml = toml::to_string_pretty(self)?;
        std::fs::write(path, toml)?;
        tracing::debug!(path = %path.display(), "config saved");
        Ok(())
    }

    /// Backend URL with fallback chain:
    /// 1. Environment variable PLAYMOOD_API_URL
    /// 2. `api_url` from the config file
    /// 3. Built-in default
    pub fn api_url(&self) -> String {
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.is_empty() {
                return url;
            }
        }
        self.api_url
            .clone()
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
    }

    pub fn banner_interval(&self) -> Duration {
        Duration::from_secs(
            self.banner_interval_secs
                .filter(|&s| s > 0)
                .unwrap_or(DEFAULT_BANNER_INTERVAL_SECS),
        )
    }

    pub fn remember(&mut self, user: &User) {
        self.session = Some(Session::from_user(user));
    }

    pub fn forget_session(&mut self) {
        self.session = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.api_url.is_none());
        assert!(config.session.is_none());
        assert_eq!(config.banner_interval(), Duration::from_secs(5));
    }

    #[test]
    fn test_zero_interval_falls_back() {
        let config = Config {
            banner_interval_secs: Some(0),
            ..Config::default()
        };
        assert_eq!(config.banner_interval(), Duration::from_secs(5));
    }

    #[test]
    fn test_roundtrip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::load_from(&path);
        assert!(config.session.is_none());

        config.api_url = Some("http://tv.local:5000".into());
        config.session = Some(Session {
            token: "tok".into(),
            user_id: "u1".into(),
            name: "Ana".into(),
            email: "ana@example.com".into(),
        });
        config.save().unwrap();

        let loaded = Config::load_from(&path);
        assert_eq!(loaded.api_url.as_deref(), Some("http://tv.local:5000"));
        assert_eq!(loaded.session.as_ref().map(|s| s.user_id.as_str()), Some("u1"));
    }

    #[test]
    fn test_corrupt_file_yields_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "api_url = [not toml").unwrap();
        let config = Config::load_from(&path);
        assert!(config.api_url.is_none());
    }

    #[test]
    fn test_session_user_roundtrip() {
        let session = Session {
            token: "t".into(),
            user_id: "u".into(),
            name: "N".into(),
            email: String::new(),
        };
        let user = session.to_user();
        assert_eq!(Session::from_user(&user), session);
    }
}
