//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use tracing::debug;

use crate::config::{ShackConfig, CONFIG_FILE_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// Effective configuration (file, then environment).
    pub config: ShackConfig,
    /// File the configuration was read from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config_path = match config_path {
            Some(path) => Some(resolve(&cwd, Path::new(path))),
            // Try to find config in current directory or parent directories
            None => find_config(&cwd),
        };

        let mut config = match &config_path {
            Some(path) => {
                let mut config = ShackConfig::load(path)?;
                config.resolve_paths(path.parent().unwrap_or(&cwd));
                debug!(path = %path.display(), "loaded config");
                config
            }
            None => ShackConfig::default(),
        };
        config.apply_env();
        config.resolve_paths(&cwd);

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        resolve(&self.cwd, Path::new(path))
    }
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// Find the nearest config file walking up from `start`.
pub fn find_config(start: &Path) -> Option<PathBuf> {
    start.ancestors().find_map(|dir| {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    })
}
