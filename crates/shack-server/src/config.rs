//! Server configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default location of the built client bundle.
pub const DEFAULT_DIST_DIR: &str = "dist/public";

/// Default listen address.
pub const DEFAULT_BIND: &str = "0.0.0.0:5000";

/// Configuration for the static server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Directory holding `index.html` and the built assets.
    #[serde(default = "default_dist_dir")]
    pub dist_dir: PathBuf,
    /// Address to listen on.
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_dist_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DIST_DIR)
}

fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            dist_dir: default_dist_dir(),
            bind: default_bind(),
        }
    }
}

impl ServerConfig {
    /// Create a configuration serving the given build directory.
    pub fn new(dist_dir: impl Into<PathBuf>) -> Self {
        Self {
            dist_dir: dist_dir.into(),
            ..Default::default()
        }
    }

    /// Set the listen address.
    pub fn with_bind(mut self, bind: impl Into<String>) -> Self {
        self.bind = bind.into();
        self
    }

    /// Path of the SPA entry document.
    pub fn index_path(&self) -> PathBuf {
        self.dist_dir.join("index.html")
    }

    /// Path of the favicon, whether or not it exists.
    pub fn favicon_path(&self) -> PathBuf {
        self.dist_dir.join("favicon.ico")
    }
}
