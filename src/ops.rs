//! Action results and the small operations behind `show` and file input/output.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::CraftError;
use crate::model::Configuration;
use crate::normalize::parse_import;
use crate::store::{self, Applied};

/// Result of an action. Returned to the caller for display.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionResult {
    /// A rendered zsh script.
    Script(String),
    /// A serialized configuration.
    Json(String),
    /// Confirmation that output went to a file instead of stdout.
    Written { path: PathBuf },
    /// Files written by `apply`.
    Applied(Applied),
    /// Confirmation that an imported configuration was stored.
    Imported { path: PathBuf, plugins: usize },
    /// Confirmation that the default configuration was stored.
    Reset { path: PathBuf },
    /// Labelled values, one per line.
    Listing { entries: Vec<(String, String)> },
    /// The settings file template.
    Template(String),
}

impl fmt::Display for ActionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionResult::Script(s) | ActionResult::Json(s) | ActionResult::Template(s) => {
                write!(f, "{s}")
            }
            ActionResult::Written { path } => write!(f, "Written to {}", path.display()),
            ActionResult::Applied(Applied { script, config }) => {
                if script.is_none() && config.is_none() {
                    return write!(f, "Nothing to write");
                }
                if let Some(path) = script {
                    write!(f, "Script written to {}", path.display())?;
                }
                if let Some(path) = config {
                    if script.is_some() {
                        writeln!(f)?;
                    }
                    write!(f, "Configuration written to {}", path.display())?;
                }
                Ok(())
            }
            ActionResult::Imported { path, plugins } => write!(
                f,
                "Imported configuration ({plugins} plugins) into {}",
                path.display()
            ),
            ActionResult::Reset { path } => {
                write!(f, "Reset configuration at {}", path.display())
            }
            ActionResult::Listing { entries } => {
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{key} = {value}")?;
                }
                Ok(())
            }
        }
    }
}

/// Section sizes and boot paths of a configuration.
pub fn summary(config: &Configuration) -> ActionResult {
    let count = |n: usize| n.to_string();
    let entries = vec![
        ("brew_path".into(), config.zinit_init.brew_path.clone()),
        ("zinit_home".into(), config.zinit_init.zinit_home.clone()),
        ("env_vars".into(), count(config.env_vars.len())),
        ("path_vars".into(), count(config.path_vars.len())),
        ("aliases".into(), count(config.aliases.len())),
        ("zsh_options".into(), count(config.zsh_options.len())),
        ("plugins".into(), count(config.plugins.len())),
        (
            "init_script".into(),
            format!("{} lines", config.init_script.lines().count()),
        ),
    ];
    ActionResult::Listing { entries }
}

/// Read and normalize a configuration from a JSON file.
pub fn read_config(path: &Path) -> Result<Configuration, CraftError> {
    let text = std::fs::read_to_string(path).map_err(|source| CraftError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_import(&text)
}

/// Write `content` to `output` when given, otherwise hand it back for display.
pub fn emit(
    content: String,
    output: Option<&Path>,
    backup: bool,
    display: fn(String) -> ActionResult,
) -> Result<ActionResult, CraftError> {
    match output {
        Some(path) => {
            store::write_file(path, &content, backup)?;
            Ok(ActionResult::Written {
                path: path.to_path_buf(),
            })
        }
        None => Ok(display(content)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::full_config;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn listing_joins_lines() {
        let result = ActionResult::Listing {
            entries: vec![("a".into(), "1".into()), ("b".into(), "2".into())],
        };
        assert_eq!(result.to_string(), "a = 1\nb = 2");
    }

    #[test]
    fn summary_counts_sections() {
        let ActionResult::Listing { entries } = summary(&full_config()) else {
            panic!("Expected Listing");
        };
        let get = |key: &str| {
            entries
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str())
        };
        assert_eq!(get("plugins"), Some("2"));
        assert_eq!(get("aliases"), Some("2"));
        assert_eq!(get("env_vars"), Some("2"));
        assert_eq!(get("init_script"), Some("1 lines"));
        assert_eq!(get("brew_path"), Some("/opt/homebrew/bin/brew"));
    }

    #[test]
    fn applied_lists_written_files() {
        let result = ActionResult::Applied(Applied {
            script: Some("/h/.zshrc".into()),
            config: Some("/h/cfg.json".into()),
        });
        assert_eq!(
            result.to_string(),
            "Script written to /h/.zshrc\nConfiguration written to /h/cfg.json"
        );
    }

    #[test]
    fn applied_nothing() {
        let result = ActionResult::Applied(Applied {
            script: None,
            config: None,
        });
        assert_eq!(result.to_string(), "Nothing to write");
    }

    #[test]
    fn script_displays_verbatim() {
        let result = ActionResult::Script("#!/bin/zsh\n".into());
        assert_eq!(result.to_string(), "#!/bin/zsh\n");
    }

    #[test]
    fn read_config_rejects_invalid_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "not json").unwrap();
        assert!(matches!(
            read_config(&path).unwrap_err(),
            CraftError::InvalidFormat { .. }
        ));
    }

    #[test]
    fn read_config_missing_file_is_io() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.json");
        assert!(matches!(
            read_config(&path).unwrap_err(),
            CraftError::Io { .. }
        ));
    }

    #[test]
    fn emit_to_stdout_returns_content() {
        let result = emit("x".into(), None, false, ActionResult::Json).unwrap();
        assert_eq!(result, ActionResult::Json("x".into()));
    }

    #[test]
    fn emit_to_file_writes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("out.zsh");
        let result = emit("x".into(), Some(&path), false, ActionResult::Script).unwrap();
        assert_eq!(result, ActionResult::Written { path: path.clone() });
        assert_eq!(fs::read_to_string(&path).unwrap(), "x");
    }
}
