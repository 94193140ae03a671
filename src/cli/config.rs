use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::database::models::User;

/// Login state persisted between invocations
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Session {
    pub server: Option<String>,
    pub token: Option<String>,
    pub user: Option<User>,
    pub logged_in_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Missing file means a fresh session
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Session::default());
        }

        let content = fs::read_to_string(path)?;
        let session: Session = serde_json::from_str(&content)?;
        Ok(session)
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn login(&mut self, server: &str, token: String, user: User) {
        self.server = Some(server.to_string());
        self.token = Some(token);
        self.user = Some(user);
        self.logged_in_at = Some(Utc::now());
    }

    /// Drops credentials but remembers the server
    pub fn logout(&mut self) {
        self.token = None;
        self.user = None;
        self.logged_in_at = None;
    }
}

pub fn get_config_dir() -> anyhow::Result<PathBuf> {
    let config_dir = if let Ok(custom_dir) = std::env::var("VILLAGE_CLI_CONFIG_DIR") {
        PathBuf::from(custom_dir)
    } else {
        let home = std::env::var("HOME")
            .map_err(|_| anyhow::anyhow!("HOME environment variable not set"))?;
        PathBuf::from(home).join(".config").join("village").join("cli")
    };

    Ok(config_dir)
}

pub fn session_path() -> anyhow::Result<PathBuf> {
    Ok(get_config_dir()?.join("session.json"))
}
