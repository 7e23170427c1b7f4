//! The configuration value the compiler reads.
//!
//! Every record here is a plain value: the editor (or CLI) owns mutation and
//! the renderer only borrows. Field names on the wire are the camelCase names
//! the browser editor has always written, so a `zsh_config.json` produced by
//! any release round-trips through these types.
//!
//! Decoding is lenient field by field (see [`lenient`](crate::lenient)); use
//! [`normalize`](crate::normalize::normalize) rather than `serde_json::from_*`
//! directly so versioning, plugin ids, and env-group links are applied too.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::lenient;

/// Current schema version written by this crate.
pub const SCHEMA_VERSION: u32 = 2;

pub const DEFAULT_BREW_PATH: &str = "/opt/homebrew/bin/brew";
pub const DEFAULT_ZINIT_HOME: &str = "${XDG_DATA_HOME:-${HOME}/.local/share}/zinit/zinit.git";

/// Root of a shell-startup configuration.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    /// Schema version. Always [`SCHEMA_VERSION`] once decoded.
    #[serde(skip_deserializing, default = "schema_version")]
    pub version: u32,

    /// Plugin-manager bootstrap settings.
    #[serde(default, deserialize_with = "zinit_init")]
    pub zinit_init: ZinitInit,

    #[serde(default, deserialize_with = "lenient::items")]
    pub aliases: Vec<AliasItem>,

    #[serde(default, deserialize_with = "lenient::items")]
    pub path_vars: Vec<PathVarItem>,

    #[serde(default, deserialize_with = "lenient::items")]
    pub env_vars: Vec<EnvVarItem>,

    #[serde(default, deserialize_with = "lenient::items")]
    pub plugins: Vec<PluginItem>,

    #[serde(default, deserialize_with = "lenient::items")]
    pub zsh_options: Vec<ZshOptionItem>,

    /// Free-form script appended verbatim at the end.
    #[serde(default, deserialize_with = "lenient::text")]
    pub init_script: String,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            version: SCHEMA_VERSION,
            zinit_init: ZinitInit::default(),
            aliases: Vec::new(),
            path_vars: Vec::new(),
            env_vars: Vec::new(),
            plugins: Vec::new(),
            zsh_options: Vec::new(),
            init_script: String::new(),
        }
    }
}

fn schema_version() -> u32 {
    SCHEMA_VERSION
}

fn zinit_init<'de, D>(deserializer: D) -> Result<ZinitInit, D::Error>
where
    D: Deserializer<'de>,
{
    let init: Option<ZinitInit> = lenient::record(deserializer)?;
    Ok(init.unwrap_or_default().or_defaults())
}

/// Bootstrap paths embedded verbatim into the script preamble.
///
/// Both values are shell fragments: `zinit_home` usually carries parameter
/// expansions such as `${XDG_DATA_HOME:-...}` that the shell resolves later.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ZinitInit {
    #[serde(default, deserialize_with = "lenient::text")]
    pub brew_path: String,

    #[serde(default, deserialize_with = "lenient::text")]
    pub zinit_home: String,
}

impl Default for ZinitInit {
    fn default() -> Self {
        Self {
            brew_path: DEFAULT_BREW_PATH.into(),
            zinit_home: DEFAULT_ZINIT_HOME.into(),
        }
    }
}

impl ZinitInit {
    /// Replace empty fields with the built-in defaults.
    pub fn or_defaults(mut self) -> Self {
        if self.brew_path.is_empty() {
            self.brew_path = DEFAULT_BREW_PATH.into();
        }
        if self.zinit_home.is_empty() {
            self.zinit_home = DEFAULT_ZINIT_HOME.into();
        }
        self
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct AliasItem {
    /// Command token being aliased. Unique within the list.
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,

    /// Replacement command text.
    #[serde(default, deserialize_with = "lenient::text")]
    pub alias: String,

    #[serde(
        default,
        deserialize_with = "lenient::string",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct PathVarItem {
    /// Human label, emitted as a trailing comment only.
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,

    #[serde(default, deserialize_with = "lenient::text")]
    pub path: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct EnvVarItem {
    #[serde(default, deserialize_with = "lenient::text")]
    pub key: String,

    #[serde(default, deserialize_with = "lenient::text")]
    pub value: String,

    /// Display label for grouped views. When [`plugin`](Self::plugin) resolves,
    /// this mirrors the owning plugin's current name.
    #[serde(
        default,
        deserialize_with = "lenient::string",
        skip_serializing_if = "Option::is_none"
    )]
    pub group: Option<String>,

    /// Explicit owner. Never rendered.
    #[serde(
        default,
        deserialize_with = "plugin_ref",
        skip_serializing_if = "Option::is_none"
    )]
    pub plugin: Option<PluginId>,
}

fn plugin_ref<'de, D>(deserializer: D) -> Result<Option<PluginId>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient::string(deserializer)?
        .filter(|s| !s.is_empty())
        .map(PluginId::from))
}

/// Stable identifier for a plugin entry, independent of its display name.
#[derive(Serialize, Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[serde(transparent)]
pub struct PluginId(String);

impl PluginId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True until normalization assigns an id.
    pub fn is_unassigned(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for PluginId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for PluginId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for PluginId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct PluginItem {
    #[serde(
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "PluginId::is_unassigned"
    )]
    pub id: PluginId,

    /// Source identifier, e.g. `zsh-users/zsh-autosuggestions`.
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,

    #[serde(
        default,
        deserialize_with = "lenient::string",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient::record",
        skip_serializing_if = "Option::is_none"
    )]
    pub ice: Option<Ice>,
}

/// Modifier ("ice") bag controlling how zinit fetches and loads a plugin.
///
/// Free-text fields may hold arbitrary user input; the directive builder
/// single-quotes them. `wait = Some(0)` means "wait with default timing",
/// `None` means "don't wait".
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Ice {
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub r#as: Option<String>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub pick: Option<String>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub atinit: Option<String>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub atload: Option<String>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub atclone: Option<String>,
    #[serde(default, deserialize_with = "lenient::integer", skip_serializing_if = "Option::is_none")]
    pub depth: Option<u64>,
    #[serde(default, deserialize_with = "lenient::flag", skip_serializing_if = "is_false")]
    pub blockf: bool,
    #[serde(default, deserialize_with = "lenient::flag", skip_serializing_if = "is_false")]
    pub compile: bool,
    #[serde(default, deserialize_with = "lenient::integer", skip_serializing_if = "Option::is_none")]
    pub wait: Option<u64>,
    #[serde(default, deserialize_with = "lenient::flag", skip_serializing_if = "is_false")]
    pub lucid: bool,
    #[serde(default, deserialize_with = "lenient::flag", skip_serializing_if = "is_false")]
    pub light_mode: bool,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub r#if: Option<String>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub has: Option<String>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub on: Option<String>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub bindmap: Option<String>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub mv: Option<String>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub bpick: Option<String>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub atpull: Option<String>,
}

fn is_false(b: &bool) -> bool {
    !*b
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct ZshOptionItem {
    /// A toggle expression such as `setopt HIST_IGNORE_DUPS`, emitted verbatim.
    #[serde(default, deserialize_with = "lenient::text")]
    pub option: String,

    #[serde(
        default,
        deserialize_with = "lenient::string",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_has_builtin_bootstrap_paths() {
        let config = Configuration::default();
        assert_eq!(config.version, SCHEMA_VERSION);
        assert_eq!(config.zinit_init.brew_path, "/opt/homebrew/bin/brew");
        assert!(config.zinit_init.zinit_home.starts_with("${XDG_DATA_HOME"));
        assert!(config.aliases.is_empty());
        assert!(config.plugins.is_empty());
        assert_eq!(config.init_script, "");
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let value = serde_json::to_value(Configuration::default()).unwrap();
        let obj = value.as_object().unwrap();
        for key in [
            "version",
            "zinitInit",
            "aliases",
            "pathVars",
            "envVars",
            "plugins",
            "zshOptions",
            "initScript",
        ] {
            assert!(obj.contains_key(key), "missing {key}");
        }
        assert!(obj["zinitInit"].get("brewPath").is_some());
        assert!(obj["zinitInit"].get("zinitHome").is_some());
    }

    #[test]
    fn ice_keyword_fields_use_plain_names() {
        let ice = Ice {
            r#as: Some("command".into()),
            r#if: Some("[[ -n $SSH ]]".into()),
            light_mode: true,
            ..Ice::default()
        };
        let value = serde_json::to_value(&ice).unwrap();
        assert_eq!(value, json!({"as": "command", "if": "[[ -n $SSH ]]", "light_mode": true}));
    }

    #[test]
    fn absent_optionals_are_omitted() {
        let plugin = PluginItem {
            name: "zsh-users/zsh-completions".into(),
            ..PluginItem::default()
        };
        let value = serde_json::to_value(&plugin).unwrap();
        assert_eq!(value, json!({"name": "zsh-users/zsh-completions"}));
    }

    #[test]
    fn wrong_typed_ice_fields_are_absent() {
        let plugin: PluginItem = serde_json::from_value(json!({
            "name": "a/b",
            "ice": {"wait": false, "depth": "1", "lucid": 1, "atload": 42, "pick": "x.zsh"}
        }))
        .unwrap();
        let ice = plugin.ice.unwrap();
        assert_eq!(ice.wait, None);
        assert_eq!(ice.depth, None);
        assert!(!ice.lucid);
        assert_eq!(ice.atload, None);
        assert_eq!(ice.pick.as_deref(), Some("x.zsh"));
    }

    #[test]
    fn partial_zinit_init_fills_missing_fields() {
        let config: Configuration =
            serde_json::from_value(json!({"zinitInit": {"brewPath": "/usr/local/bin/brew"}}))
                .unwrap();
        assert_eq!(config.zinit_init.brew_path, "/usr/local/bin/brew");
        assert_eq!(config.zinit_init.zinit_home, DEFAULT_ZINIT_HOME);
    }

    #[test]
    fn version_is_always_current_after_decode() {
        let config: Configuration = serde_json::from_value(json!({"version": 1})).unwrap();
        assert_eq!(config.version, SCHEMA_VERSION);
    }

    #[test]
    fn empty_plugin_reference_is_none() {
        let env: EnvVarItem =
            serde_json::from_value(json!({"key": "K", "value": "v", "plugin": ""})).unwrap();
        assert_eq!(env.plugin, None);
    }
}
