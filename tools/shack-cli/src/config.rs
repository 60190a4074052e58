//! CLI configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use shack_server::ServerConfig;

/// File names searched for, in order, in each directory.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["shack.toml", ".shack.toml", "shack.json"];

/// Environment variable overriding `server.dist_dir`.
pub const ENV_DIST_DIR: &str = "SHACK_DIST_DIR";
/// Environment variable overriding `server.bind`.
pub const ENV_BIND: &str = "SHACK_BIND";
/// Environment variable overriding `order.state_dir`.
pub const ENV_STATE_DIR: &str = "SHACK_STATE_DIR";

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShackConfig {
    /// Static server configuration.
    #[serde(default)]
    pub server: ServerConfig,

    /// Saved order configuration.
    #[serde(default)]
    pub order: OrderConfig,
}

impl ShackConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Apply `SHACK_*` environment overrides.
    pub fn apply_env(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(dist) = lookup(ENV_DIST_DIR).filter(|v| !v.is_empty()) {
            self.server.dist_dir = PathBuf::from(dist);
        }
        if let Some(bind) = lookup(ENV_BIND).filter(|v| !v.is_empty()) {
            self.server.bind = bind;
        }
        if let Some(state) = lookup(ENV_STATE_DIR).filter(|v| !v.is_empty()) {
            self.order.state_dir = PathBuf::from(state);
        }
    }

    /// Resolve relative paths against `base` (the config file's directory).
    pub fn resolve_paths(&mut self, base: &Path) {
        if self.server.dist_dir.is_relative() {
            self.server.dist_dir = base.join(&self.server.dist_dir);
        }
        if self.order.state_dir.is_relative() {
            self.order.state_dir = base.join(&self.order.state_dir);
        }
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("json")
}

/// Where the CLI keeps the order session between invocations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderConfig {
    /// Directory backing the session store.
    #[serde(default = "default_state_dir")]
    pub state_dir: PathBuf,
}

fn default_state_dir() -> PathBuf {
    PathBuf::from(".shack")
}

impl Default for OrderConfig {
    fn default() -> Self {
        Self {
            state_dir: default_state_dir(),
        }
    }
}

/// Generate a default shack.toml config file.
pub fn generate_default_config() -> String {
    r#"# Pizza Shack configuration

[server]
# Built client bundle (must contain index.html)
dist_dir = "dist/public"
bind = "0.0.0.0:5000"

[order]
# Where `shack order` keeps the saved session
state_dir = ".shack"
"#
    .to_string()
}
