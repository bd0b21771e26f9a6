use serde::Deserialize;

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use anyhow::Context;

// ------------------------------------------------------------
// Root configuration
// ------------------------------------------------------------
//
// Top-level configuration for a collection run.
//
// Every field has a default matching the historical fixed
// constants, so a missing `config.json` still produces a
// working run. A present file only needs to name the fields
// it overrides.
//
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    /// Remote collection log service settings
    pub service: ServiceConfig,

    /// Line-delimited list of member identifiers
    pub members_path: String,

    /// Plain text file receiving one block per member (append mode)
    pub output_path: String,

    /// Location of the pet list inside the collection log
    pub pets: SectionConfig,

    /// Plus items, in output order
    pub pluses: Vec<PlusConfig>,

    /// Optional end-of-run pet ranking
    pub leaderboard: LeaderboardConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service: ServiceConfig::default(),
            members_path: "members.txt".to_string(),
            output_path: "output.txt".to_string(),
            pets: SectionConfig {
                tab: "Other".to_string(),
                category: "All Pets".to_string(),
            },
            pluses: default_pluses(),
            leaderboard: LeaderboardConfig::default(),
        }
    }
}

// ------------------------------------------------------------
// Service configuration
// ------------------------------------------------------------
//
// The member identifier is appended to `base_url` as-is.
//
// Notes:
// - `timeout_secs` is unset by default, which keeps the
//   transport defaults (a hanging request blocks the run).
//
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServiceConfig {
    /// Base URL, including the trailing slash
    pub base_url: String,

    /// Per-request timeout in seconds
    pub timeout_secs: Option<u64>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.collectionlog.net/collectionlog/user/".to_string(),
            timeout_secs: None,
        }
    }
}

/// A `tab -> category` path inside the collection log.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct SectionConfig {
    pub tab: String,
    pub category: String,
}

// ------------------------------------------------------------
// Plus item configuration
// ------------------------------------------------------------
//
// A single plus item, located by name inside its category.
//
// IMPORTANT:
// - Lookup is by `name`, never by position. The service is
//   free to reorder its item lists.
//
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct PlusConfig {
    pub tab: String,
    pub category: String,
    pub name: String,
}

impl PlusConfig {
    fn new(tab: &str, category: &str, name: &str) -> Self {
        Self {
            tab: tab.to_string(),
            category: category.to_string(),
            name: name.to_string(),
        }
    }
}

fn default_pluses() -> Vec<PlusConfig> {
    vec![
        PlusConfig::new("Raids", "Chambers of Xeric", "Metamorphic dust"),
        PlusConfig::new("Raids", "Theatre of Blood", "Sanguine dust"),
        PlusConfig::new("Bosses", "The Nightmare", "Parasitic egg"),
        PlusConfig::new("Minigames", "Guardians of the Rift", "Guardian's eye"),
        PlusConfig::new("Minigames", "Hallowed Sepulchre", "Dark acorn"),
    ]
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LeaderboardConfig {
    /// Log the ranking after the run
    pub enabled: bool,

    /// Number of distinct pet counts to rank
    pub size: usize,
}

impl Default for LeaderboardConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            size: 5,
        }
    }
}

// ------------------------------------------------------------
// Configuration loader
// ------------------------------------------------------------
//
// Reads a JSON configuration file from disk and overlays it on
// the defaults. A missing file is not an error; a malformed one
// aborts the run.
//
pub fn load_config(path: impl AsRef<Path>) -> anyhow::Result<Config> {
    let path = path.as_ref();

    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::info!("{} not found, using built-in defaults", path.display());
            return Ok(Config::default());
        }
        Err(e) => {
            return Err(e).with_context(|| format!("failed to read {}", path.display()));
        }
    };

    let cfg = serde_json::from_str(&data)
        .with_context(|| format!("invalid configuration in {}", path.display()))?;
    Ok(cfg)
}
