//! The tool's own settings: where files live and whether to keep backups.
//!
//! Layers, lowest first: compiled defaults, `zinitcraft.toml` (platform config
//! dir, or an explicit file), `ZINITCRAFT_*` environment variables. CLI flags
//! are applied on top by the builder.

use std::path::{Path, PathBuf};

use confique::Config;
use tracing::debug;

use crate::error::CraftError;
use crate::store::Store;

pub const APP_NAME: &str = "zinitcraft";
pub const FILE_NAME: &str = "zinitcraft.toml";

#[derive(Config, Debug, Clone, PartialEq)]
pub struct Settings {
    /// Where the rendered zsh script is written. Defaults to `~/.zshrc`.
    #[config(env = "ZINITCRAFT_SCRIPT_PATH")]
    pub script_path: Option<PathBuf>,

    /// Where the JSON configuration is stored. Defaults to
    /// `~/.zsh_cfg/zsh_config.json`.
    #[config(env = "ZINITCRAFT_CONFIG_PATH")]
    pub config_path: Option<PathBuf>,

    /// Copy an existing file to `<file>.backup` before overwriting it.
    #[config(default = true, env = "ZINITCRAFT_BACKUP")]
    pub backup: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            script_path: None,
            config_path: None,
            backup: true,
        }
    }
}

impl Settings {
    /// Resolve the settings into a [`Store`], filling unset paths from the
    /// home directory.
    pub fn store(&self) -> Result<Store, CraftError> {
        let (script_path, config_path) = match (&self.script_path, &self.config_path) {
            (Some(script), Some(config)) => (script.clone(), config.clone()),
            (script, config) => {
                let home = Store::home()?;
                (
                    script.clone().unwrap_or(home.script_path),
                    config.clone().unwrap_or(home.config_path),
                )
            }
        };
        Ok(Store::new(script_path, config_path).with_backup(self.backup))
    }
}

/// `zinitcraft.toml` in the platform config directory, if one can be determined.
pub fn default_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().join(FILE_NAME))
}

/// Load settings from `file` (or the default location) and, when `env` is
/// set, the environment. An explicit file must exist; the default one may not.
pub fn load(file: Option<&Path>, env: bool) -> Result<Settings, CraftError> {
    let mut builder = Settings::builder();
    if env {
        builder = builder.env();
    }

    match file {
        Some(path) => {
            if !path.is_file() {
                return Err(CraftError::Io {
                    path: path.to_path_buf(),
                    source: std::io::Error::new(
                        std::io::ErrorKind::NotFound,
                        "settings file not found",
                    ),
                });
            }
            debug!(path = %path.display(), "loading settings");
            builder = builder.file(path);
        }
        None => {
            if let Some(path) = default_path() {
                debug!(path = %path.display(), "looking for settings");
                builder = builder.file(path);
            }
        }
    }

    Ok(builder.load()?)
}

/// Commented TOML template for the settings file.
pub fn template() -> String {
    confique::toml::template::<Settings>(confique::toml::FormatOptions::default())
}
