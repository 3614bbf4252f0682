use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tokio::fs as async_fs;

/// username -> plaintext password
pub type UserMap = BTreeMap<String, String>;

/// Accounts kept in a single JSON object file.
/// Every operation reads the whole file; every write rewrites it.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    /// Open the store at `path`, creating it as `{}` if missing.
    /// Runs once at startup, before any async runtime exists.
    pub fn open<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            log::info!("Creating user store {:?}", path);
            std::fs::write(&path, serde_json::to_string(&UserMap::new())?)
                .with_context(|| format!("Failed to create user store {:?}", path))?;
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every account in the store
    pub async fn load(&self) -> anyhow::Result<UserMap> {
        let raw = async_fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read user store {:?}", self.path))?;
        serde_json::from_str(&raw).with_context(|| format!("Corrupt user store {:?}", self.path))
    }

    /// Create or overwrite the account for `username`
    pub async fn save(&self, username: &str, password: &str) -> anyhow::Result<()> {
        let mut users = self.load().await?;
        users.insert(username.to_string(), password.to_string());
        write_users(&self.path, &users).await
    }

    /// True iff the account exists and the password matches exactly
    pub async fn validate(&self, username: &str, password: &str) -> anyhow::Result<bool> {
        let users = self.load().await?;
        Ok(users.get(username).is_some_and(|stored| stored == password))
    }
}

async fn write_users(path: &Path, users: &UserMap) -> anyhow::Result<()> {
    let raw = serde_json::to_string(users)?;
    async_fs::write(path, raw)
        .await
        .with_context(|| format!("Failed to write user store {:?}", path))
}
