use std::path::PathBuf;

use tracing::debug;

use crate::error::CraftError;
use crate::model::Configuration;
use crate::normalize::parse_import;
use crate::ops::{self, ActionResult};
use crate::render::render;
use crate::settings::{self, Settings};
use crate::store::{self, Store};
use crate::types::Action;

/// Entry point for building a zinitcraft session.
pub struct Zinitcraft;

impl Zinitcraft {
    pub fn builder() -> ZinitcraftBuilder {
        ZinitcraftBuilder::new()
    }
}

/// Builder that resolves settings and dispatches [`Action`]s.
///
/// Explicit setters are the top layer: they override the settings file and
/// the environment.
#[derive(Debug, Clone)]
pub struct ZinitcraftBuilder {
    settings_file: Option<PathBuf>,
    script_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
    backup: Option<bool>,
    env_enabled: bool,
    settings: Option<Settings>,
}

impl ZinitcraftBuilder {
    fn new() -> Self {
        Self {
            settings_file: None,
            script_path: None,
            config_path: None,
            backup: None,
            env_enabled: true,
            settings: None,
        }
    }

    /// Read settings from this file instead of the platform config dir.
    pub fn settings_file(mut self, path: Option<PathBuf>) -> Self {
        self.settings_file = path;
        self
    }

    /// Use pre-built settings and skip file and environment loading.
    pub fn settings(mut self, settings: Settings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Override the script path. `None` is ignored.
    pub fn script_path(mut self, path: Option<PathBuf>) -> Self {
        if path.is_some() {
            self.script_path = path;
        }
        self
    }

    /// Override the configuration path. `None` is ignored.
    pub fn config_path(mut self, path: Option<PathBuf>) -> Self {
        if path.is_some() {
            self.config_path = path;
        }
        self
    }

    pub fn backup(mut self, backup: bool) -> Self {
        self.backup = Some(backup);
        self
    }

    /// Disable environment variable loading entirely.
    pub fn no_env(mut self) -> Self {
        self.env_enabled = false;
        self
    }

    /// Resolve settings: defaults, file, environment, then this builder's overrides.
    pub fn load_settings(&self) -> Result<Settings, CraftError> {
        let mut settings = match &self.settings {
            Some(settings) => settings.clone(),
            None => settings::load(self.settings_file.as_deref(), self.env_enabled)?,
        };
        if let Some(path) = &self.script_path {
            settings.script_path = Some(path.clone());
        }
        if let Some(path) = &self.config_path {
            settings.config_path = Some(path.clone());
        }
        if let Some(backup) = self.backup {
            settings.backup = backup;
        }
        debug!(?settings, "resolved settings");
        Ok(settings)
    }

    pub fn store(&self) -> Result<Store, CraftError> {
        self.load_settings()?.store()
    }

    /// Handle an action and print its result to stdout.
    pub fn handle_and_print(&self, action: &Action) -> Result<(), CraftError> {
        let result = self.handle(action)?.to_string();
        if result.ends_with('\n') {
            print!("{result}");
        } else {
            println!("{result}");
        }
        Ok(())
    }

    /// Handle an [`Action`].
    pub fn handle(&self, action: &Action) -> Result<ActionResult, CraftError> {
        match action {
            Action::Settings => Ok(ActionResult::Template(settings::template())),
            Action::Gen { output } => {
                let json = store::serialize(&Configuration::default())?;
                let backup = self.load_settings()?.backup;
                ops::emit(json, output.as_deref(), backup, ActionResult::Json)
            }
            Action::Render { input, output } => {
                let store = self.store()?;
                let config = match input {
                    Some(path) => ops::read_config(path)?,
                    None => store.load_config()?,
                };
                ops::emit(
                    render(&config),
                    output.as_deref(),
                    store.backup,
                    ActionResult::Script,
                )
            }
            Action::Apply { input } => {
                let store = self.store()?;
                let config = match input {
                    Some(path) => ops::read_config(path)?,
                    None => store.load_config()?,
                };
                let script = render(&config);
                let json = store::serialize(&config)?;
                Ok(ActionResult::Applied(store.apply(&script, &json)?))
            }
            Action::Import { file } => {
                let text = std::fs::read_to_string(file).map_err(|source| CraftError::Io {
                    path: file.clone(),
                    source,
                })?;
                let config = parse_import(&text)?;
                let path = self.store()?.save_config(&config)?;
                Ok(ActionResult::Imported {
                    path,
                    plugins: config.plugins.len(),
                })
            }
            Action::Export { output } => {
                let store = self.store()?;
                let json = store::serialize(&store.load_config()?)?;
                ops::emit(json, output.as_deref(), store.backup, ActionResult::Json)
            }
            Action::Reset => {
                let path = self.store()?.save_config(&Configuration::default())?;
                Ok(ActionResult::Reset { path })
            }
            Action::Show => Ok(ops::summary(&self.store()?.load_config()?)),
        }
    }
}
