//! File-backed persistence for the rendered script and its source configuration.
//!
//! This is the "apply" boundary: the host hands over the script text and the
//! serialized configuration, and both land on disk. Defaults mirror what
//! earlier releases wrote: `~/.zshrc` for the script and
//! `~/.zsh_cfg/zsh_config.json` for the configuration.
//!
//! Before overwriting an existing file a copy is kept at `<file>.backup`. If
//! the write itself fails, the backup is copied back so a half-written
//! `.zshrc` never survives.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::CraftError;
use crate::model::Configuration;
use crate::normalize::normalize;

pub const SCRIPT_FILE: &str = ".zshrc";
pub const CONFIG_DIR: &str = ".zsh_cfg";
pub const CONFIG_FILE: &str = "zsh_config.json";

/// Where the script and configuration live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Store {
    pub script_path: PathBuf,
    pub config_path: PathBuf,
    /// Keep `<file>.backup` before overwriting.
    pub backup: bool,
}

/// Paths written by [`Store::apply`]. Empty payloads are skipped and report `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied {
    pub script: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

impl Store {
    pub fn new(script_path: impl Into<PathBuf>, config_path: impl Into<PathBuf>) -> Self {
        Self {
            script_path: script_path.into(),
            config_path: config_path.into(),
            backup: true,
        }
    }

    pub fn with_backup(mut self, backup: bool) -> Self {
        self.backup = backup;
        self
    }

    /// The default locations under the user's home directory.
    pub fn home() -> Result<Self, CraftError> {
        let home = home_dir()?;
        Ok(Self::new(
            home.join(SCRIPT_FILE),
            home.join(CONFIG_DIR).join(CONFIG_FILE),
        ))
    }

    /// Read the stored configuration text. `None` if nothing has been saved yet.
    pub fn load(&self) -> Result<Option<String>, CraftError> {
        match std::fs::read_to_string(&self.config_path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(CraftError::Io {
                path: self.config_path.clone(),
                source: e,
            }),
        }
    }

    /// Load and normalize the stored configuration.
    ///
    /// A missing file yields the default. So does a file that is not valid
    /// JSON: the damage is logged, and the next save replaces it.
    pub fn load_config(&self) -> Result<Configuration, CraftError> {
        let Some(content) = self.load()? else {
            debug!(path = %self.config_path.display(), "no stored configuration, using defaults");
            return Ok(Configuration::default());
        };
        match serde_json::from_str(&content) {
            Ok(raw) => Ok(normalize(raw)),
            Err(e) => {
                warn!(
                    path = %self.config_path.display(),
                    error = %e,
                    "stored configuration is not valid JSON, using defaults"
                );
                Ok(Configuration::default())
            }
        }
    }

    /// Persist the configuration alone.
    pub fn save_config(&self, config: &Configuration) -> Result<PathBuf, CraftError> {
        let content = serialize(config)?;
        write_file(&self.config_path, &content, self.backup)?;
        Ok(self.config_path.clone())
    }

    /// Write the script and the serialized configuration.
    pub fn apply(&self, script: &str, serialized_config: &str) -> Result<Applied, CraftError> {
        let mut applied = Applied {
            script: None,
            config: None,
        };
        if !script.is_empty() {
            write_file(&self.script_path, script, self.backup)?;
            applied.script = Some(self.script_path.clone());
        }
        if !serialized_config.is_empty() {
            write_file(&self.config_path, serialized_config, self.backup)?;
            applied.config = Some(self.config_path.clone());
        }
        Ok(applied)
    }
}

/// Pretty-printed JSON, the on-disk and export format.
pub fn serialize(config: &Configuration) -> Result<String, CraftError> {
    serde_json::to_string_pretty(config).map_err(CraftError::Serialize)
}

/// `<path>.backup`, in the same directory.
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".backup");
    PathBuf::from(name)
}

pub(crate) fn home_dir() -> Result<PathBuf, CraftError> {
    directories::UserDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .ok_or(CraftError::NoHomeDir)
}

/// Write `content` to `path`, creating parent directories and keeping a backup.
pub(crate) fn write_file(path: &Path, content: &str, backup: bool) -> Result<(), CraftError> {
    let io_err = |path: &Path| {
        let path = path.to_path_buf();
        move |source| CraftError::Io { path, source }
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(io_err(parent))?;
    }

    let backup_file = backup_path(path);
    let backed_up = backup && path.exists();
    if backed_up {
        std::fs::copy(path, &backup_file).map_err(io_err(&backup_file))?;
        debug!(path = %backup_file.display(), "backed up previous file");
    }

    if let Err(source) = std::fs::write(path, content) {
        if backed_up && let Err(restore) = std::fs::copy(&backup_file, path) {
            warn!(path = %path.display(), error = %restore, "failed to restore backup");
        }
        return Err(CraftError::Io {
            path: path.to_path_buf(),
            source,
        });
    }

    debug!(path = %path.display(), bytes = content.len(), "wrote file");
    Ok(())
}
