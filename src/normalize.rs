//! Turn whatever JSON we were handed into a well-formed [`Configuration`].
//!
//! Steps, in order:
//!
//! 1. Anything that is not a JSON object is treated as `{}`.
//! 2. [`migrate`](crate::migrate::migrate) brings legacy shapes up to the current schema.
//! 3. The result is overlaid on the default configuration, top-level keys only.
//! 4. The merged object is decoded leniently: wrong-typed fields become absent.
//! 5. Plugins without a usable id get one, and env vars are linked to the
//!    plugin their `group` names.
//!
//! [`normalize`] never fails. Only [`parse_import`] can, and only when the
//! text is not JSON at all.

use std::collections::HashSet;

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::CraftError;
use crate::merge::overlay;
use crate::migrate::migrate;
use crate::model::{Configuration, PluginId};

/// Complete a partial or legacy configuration object. Total over all inputs.
pub fn normalize(raw: Value) -> Configuration {
    let root = match raw {
        Value::Object(map) => map,
        other => {
            debug!(kind = value_kind(&other), "configuration is not an object, using defaults");
            Map::new()
        }
    };

    let merged = overlay(default_object(), migrate(root));

    let mut config: Configuration =
        serde_json::from_value(Value::Object(merged)).unwrap_or_default();
    assign_plugin_ids(&mut config);
    link_env_groups(&mut config);
    config
}

/// Parse imported JSON text. Malformed JSON is an [`InvalidFormat`](CraftError::InvalidFormat)
/// error; anything that parses is normalized.
pub fn parse_import(text: &str) -> Result<Configuration, CraftError> {
    let raw: Value =
        serde_json::from_str(text).map_err(|source| CraftError::InvalidFormat { source })?;
    Ok(normalize(raw))
}

fn default_object() -> Map<String, Value> {
    match serde_json::to_value(Configuration::default()) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Give every plugin a unique id, keeping ids that are already unique.
///
/// New ids derive from the plugin name; repeats get a `#2`, `#3`, ... suffix.
pub(crate) fn assign_plugin_ids(config: &mut Configuration) {
    let mut taken: HashSet<PluginId> = HashSet::new();
    let mut pending = Vec::new();

    for (index, plugin) in config.plugins.iter().enumerate() {
        if plugin.id.is_unassigned() || !taken.insert(plugin.id.clone()) {
            pending.push(index);
        }
    }

    for index in pending {
        let plugin = &mut config.plugins[index];
        let base = if plugin.name.is_empty() {
            "plugin"
        } else {
            plugin.name.as_str()
        };
        let mut candidate = PluginId::from(base);
        let mut n = 2;
        while taken.contains(&candidate) {
            candidate = PluginId::from(format!("{base}#{n}"));
            n += 1;
        }
        debug!(plugin = %plugin.name, id = %candidate, "assigned plugin id");
        taken.insert(candidate.clone());
        plugin.id = candidate;
    }
}

/// Resolve env var ownership.
///
/// - A resolvable `plugin` reference refreshes `group` to the owner's name.
/// - A dangling reference is dropped; the `group` text stays.
/// - An unowned var whose `group` equals a plugin name is linked to that plugin.
pub(crate) fn link_env_groups(config: &mut Configuration) {
    let plugins = &config.plugins;
    for env in &mut config.env_vars {
        if let Some(id) = &env.plugin {
            match plugins.iter().find(|p| &p.id == id) {
                Some(owner) => env.group = Some(owner.name.clone()),
                None => {
                    debug!(key = %env.key, plugin = %id, "dropping reference to missing plugin");
                    env.plugin = None;
                }
            }
        } else if let Some(group) = env.group.as_deref()
            && let Some(owner) = plugins.iter().find(|p| p.name == group)
        {
            env.plugin = Some(owner.id.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DEFAULT_BREW_PATH, DEFAULT_ZINIT_HOME, SCHEMA_VERSION};
    use serde_json::json;

    #[test]
    fn empty_object_is_default() {
        assert_eq!(normalize(json!({})), Configuration::default());
    }

    #[test]
    fn non_objects_are_default() {
        for raw in [json!(null), json!([1, 2]), json!("x"), json!(3), json!(true)] {
            assert_eq!(normalize(raw), Configuration::default());
        }
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let config = normalize(json!({"theme": "dark", "aliases": [], "extra": {"a": 1}}));
        assert_eq!(config, Configuration::default());
    }

    #[test]
    fn null_fields_fall_back() {
        let config = normalize(json!({
            "zinitInit": null,
            "aliases": null,
            "pathVars": null,
            "envVars": null,
            "plugins": null,
            "zshOptions": null,
            "initScript": null
        }));
        assert_eq!(config, Configuration::default());
    }

    #[test]
    fn partial_zinit_init_replaces_then_fills() {
        let config = normalize(json!({"zinitInit": {"zinitHome": "$HOME/.zinit"}}));
        assert_eq!(config.zinit_init.zinit_home, "$HOME/.zinit");
        assert_eq!(config.zinit_init.brew_path, DEFAULT_BREW_PATH);
    }

    #[test]
    fn empty_zinit_paths_fall_back() {
        let config = normalize(json!({"zinitInit": {"brewPath": "", "zinitHome": ""}}));
        assert_eq!(config.zinit_init.brew_path, DEFAULT_BREW_PATH);
        assert_eq!(config.zinit_init.zinit_home, DEFAULT_ZINIT_HOME);
    }

    #[test]
    fn list_order_is_preserved() {
        let config = normalize(json!({
            "aliases": [
                {"name": "c", "alias": "3"},
                {"name": "a", "alias": "1"},
                {"name": "b", "alias": "2"}
            ]
        }));
        let names: Vec<&str> = config.aliases.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["c", "a", "b"]);
    }

    #[test]
    fn legacy_plugins_are_migrated() {
        let config = normalize(json!({
            "plugins": [{"name": "zsh-users/zsh-autosuggestions", "loadType": "wait lucid"}]
        }));
        let ice = config.plugins[0].ice.clone().unwrap();
        assert_eq!(ice.wait, Some(0));
        assert!(ice.lucid);
        assert_eq!(config.version, SCHEMA_VERSION);
    }

    #[test]
    fn plugins_get_ids_from_names() {
        let config = normalize(json!({
            "plugins": [{"name": "a/b"}, {"name": "c/d"}]
        }));
        assert_eq!(config.plugins[0].id.as_str(), "a/b");
        assert_eq!(config.plugins[1].id.as_str(), "c/d");
    }

    #[test]
    fn duplicate_ids_are_disambiguated_around_existing_ones() {
        let config = normalize(json!({
            "plugins": [{"name": "a/b"}, {"name": "a/b"}, {"name": ""}, {"id": "a/b", "name": "x/y"}]
        }));
        let ids: Vec<&str> = config.plugins.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["a/b#2", "a/b#3", "plugin", "a/b"]);
    }

    #[test]
    fn existing_ids_are_kept() {
        let config = normalize(json!({
            "plugins": [{"id": "p1", "name": "renamed/plugin"}]
        }));
        assert_eq!(config.plugins[0].id.as_str(), "p1");
    }

    #[test]
    fn group_matching_plugin_name_links_owner() {
        let config = normalize(json!({
            "plugins": [{"name": "zsh-users/zsh-autosuggestions"}],
            "envVars": [
                {"key": "ZSH_AUTOSUGGEST_STRATEGY", "value": "history", "group": "zsh-users/zsh-autosuggestions"},
                {"key": "EDITOR", "value": "nvim", "group": "editor"}
            ]
        }));
        assert_eq!(
            config.env_vars[0].plugin.as_ref().map(PluginId::as_str),
            Some("zsh-users/zsh-autosuggestions")
        );
        assert_eq!(config.env_vars[1].plugin, None);
    }

    #[test]
    fn explicit_owner_refreshes_group_label() {
        let config = normalize(json!({
            "plugins": [{"id": "p1", "name": "new/name"}],
            "envVars": [{"key": "K", "value": "v", "group": "old/name", "plugin": "p1"}]
        }));
        assert_eq!(config.env_vars[0].group.as_deref(), Some("new/name"));
    }

    #[test]
    fn dangling_owner_is_dropped() {
        let config = normalize(json!({
            "envVars": [{"key": "K", "value": "v", "group": "gone", "plugin": "missing"}]
        }));
        assert_eq!(config.env_vars[0].plugin, None);
        assert_eq!(config.env_vars[0].group.as_deref(), Some("gone"));
    }

    #[test]
    fn normalizing_twice_is_stable() {
        let once = normalize(json!({
            "plugins": [{"name": "a/b", "loadType": "wait", "waitTime": "1"}],
            "envVars": [{"key": "K", "value": "v", "group": "a/b"}]
        }));
        let twice = normalize(serde_json::to_value(&once).unwrap());
        assert_eq!(once, twice);
    }

    #[test]
    fn import_rejects_malformed_json() {
        let err = parse_import("{\"aliases\": [").unwrap_err();
        assert!(matches!(err, CraftError::InvalidFormat { .. }));
    }

    #[test]
    fn import_accepts_any_json() {
        assert_eq!(parse_import("[]").unwrap(), Configuration::default());
        let config = parse_import(r#"{"initScript": "echo hi"}"#).unwrap();
        assert_eq!(config.init_script, "echo hi");
    }
}
