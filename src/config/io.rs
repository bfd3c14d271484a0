//! Configuration file I/O operations

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;

use super::Config;

impl Config {
    /// Get the global config directory path (<config_dir>/voicenav/)
    pub fn global_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("voicenav")
    }

    /// Get the global config file path (<config_dir>/voicenav/config.toml)
    pub fn global_config_path() -> PathBuf {
        Self::global_config_dir().join("config.toml")
    }

    /// Load configuration from `path`, or the global path when `None`.
    ///
    /// A missing file is not an error; defaults are used instead.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::global_config_path);

        if !path.exists() {
            tracing::debug!("No config at {}; using defaults", path.display());
            return Ok(Self::default());
        }

        Self::from_file(&path)
    }

    /// Save configuration to a file with atomic write and file locking.
    ///
    /// This ensures:
    /// 1. Exclusive lock prevents concurrent writers
    /// 2. Atomic write (temp file + rename) prevents corruption on crash
    /// 3. Parent directory is created if needed
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).with_context(|| "Failed to serialize config")?;
        write_atomic(path, &content)
    }
}

/// Write `content` to `path` under an exclusive lock via temp file + rename
fn write_atomic(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }
    }

    // Lock file is separate from the config so the rename can't race it
    let lock_path = path.with_extension("toml.lock");
    let lock_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&lock_path)
        .with_context(|| format!("Failed to create lock file: {}", lock_path.display()))?;

    lock_file
        .lock_exclusive()
        .with_context(|| "Failed to acquire config lock")?;

    let temp_path = path.with_extension("toml.tmp");
    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

    temp_file
        .write_all(content.as_bytes())
        .with_context(|| "Failed to write config content")?;

    temp_file
        .sync_all()
        .with_context(|| "Failed to sync config file")?;

    std::fs::rename(&temp_path, path)
        .with_context(|| format!("Failed to rename config file: {}", path.display()))?;

    // Lock is released when lock_file is dropped
    Ok(())
}
