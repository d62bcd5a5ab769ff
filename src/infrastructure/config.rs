//! Application configuration

use std::collections::HashMap;
use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::warn;

/// Configuration for the Foundry data installation this service reads.
#[derive(Debug, Clone)]
pub struct FoundryConfig {
    /// Public base URL prepended to relative asset paths. Always ends
    /// with a slash.
    pub base_url: String,
    /// Filesystem root under which relative asset and cache paths
    /// resolve.
    pub base_path: PathBuf,
    /// Path to the line-delimited JSON actor database.
    pub actors_db: PathBuf,
    /// Platform user id -> actor id ownership mapping.
    pub owners: HashMap<String, String>,
}

impl FoundryConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let mut base_url = env::var("FOUNDRY_BASE_URL")
            .context("FOUNDRY_BASE_URL environment variable is required")?;
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        Ok(Self {
            base_url,
            base_path: env::var("FOUNDRY_BASE_PATH")
                .context("FOUNDRY_BASE_PATH environment variable is required")?
                .into(),
            actors_db: env::var("FOUNDRY_ACTORS_DB")
                .context("FOUNDRY_ACTORS_DB environment variable is required")?
                .into(),
            owners: env::var("FOUNDRY_OWNERS")
                .map(|raw| parse_owners(&raw))
                .unwrap_or_default(),
        })
    }

    /// Actor id owned by the given platform user, if any.
    pub fn owner_actor(&self, user_id: &str) -> Option<&str> {
        self.owners.get(user_id).map(String::as_str)
    }
}

/// Parse `user=actor,user=actor` pairs. Malformed entries are skipped
/// with a warning rather than failing startup.
fn parse_owners(raw: &str) -> HashMap<String, String> {
    let mut owners = HashMap::new();
    for entry in raw.split(',').filter(|e| !e.trim().is_empty()) {
        match entry.split_once('=') {
            Some((user, actor)) if !user.trim().is_empty() && !actor.trim().is_empty() => {
                owners.insert(user.trim().to_string(), actor.trim().to_string());
            }
            _ => warn!("ignoring malformed FOUNDRY_OWNERS entry: {entry:?}"),
        }
    }
    owners
}
