//! Schema versioning for stored configurations.
//!
//! Configurations carry a top-level `version`. Files without one predate
//! versioning and are read as version 1, whose plugins were described by a
//! `loadType` (`load`, `light`, `snippet`, `wait`, `wait lucid`), a string
//! `waitTime`, and a separate `conditions` bag. Version 2 folds all of that
//! into the plugin's `ice` modifiers.
//!
//! Migration runs once, on the raw JSON object, before decoding. Nothing
//! downstream ever needs to know which shape a file started in.

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::model::SCHEMA_VERSION;

/// Read the declared schema version. Missing or malformed means version 1.
pub fn schema_version(root: &Map<String, Value>) -> u64 {
    root.get("version").and_then(Value::as_u64).unwrap_or(1)
}

/// Bring a raw configuration object up to [`SCHEMA_VERSION`].
pub fn migrate(mut root: Map<String, Value>) -> Map<String, Value> {
    let version = schema_version(&root);
    let current = u64::from(SCHEMA_VERSION);

    if version > current {
        warn!(version, current, "configuration comes from a newer release, reading it as current");
    }
    if version < 2 {
        root = v1_to_v2(root);
    }

    root.insert("version".into(), Value::from(SCHEMA_VERSION));
    root
}

fn v1_to_v2(mut root: Map<String, Value>) -> Map<String, Value> {
    if let Some(Value::Array(plugins)) = root.get_mut("plugins") {
        for plugin in plugins.iter_mut() {
            if let Value::Object(obj) = plugin {
                migrate_plugin(obj);
            }
        }
    }
    root
}

fn migrate_plugin(plugin: &mut Map<String, Value>) {
    let load_type = plugin.remove("loadType");
    let wait_time = plugin.remove("waitTime");
    let conditions = plugin.remove("conditions");

    let mut legacy = Map::new();

    match load_type.as_ref().and_then(Value::as_str) {
        Some("wait") => {
            legacy.insert("wait".into(), parse_wait(wait_time.as_ref()));
        }
        Some("wait lucid") => {
            legacy.insert("wait".into(), parse_wait(wait_time.as_ref()));
            legacy.insert("lucid".into(), Value::Bool(true));
        }
        Some("light") => {
            legacy.insert("light_mode".into(), Value::Bool(true));
        }
        _ => {}
    }

    if let Some(Value::Object(conditions)) = conditions {
        for (key, value) in conditions {
            match key.as_str() {
                "wait" if !is_blank(&value) => {
                    legacy
                        .entry("wait")
                        .or_insert_with(|| parse_wait(Some(&value)));
                }
                "lucid" if value == Value::Bool(true) => {
                    legacy.insert("lucid".into(), Value::Bool(true));
                }
                "if" | "has" | "on" if !is_blank(&value) => {
                    legacy.entry(key.as_str()).or_insert(value);
                }
                _ => {}
            }
        }
    }

    if legacy.is_empty() {
        return;
    }

    let name = plugin
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    debug!(
        plugin = %name,
        modifiers = legacy.len(),
        "migrated legacy plugin load settings"
    );

    let ice = plugin
        .entry("ice")
        .or_insert_with(|| Value::Object(Map::new()));
    if !ice.is_object() {
        *ice = Value::Object(Map::new());
    }
    if let Value::Object(ice) = ice {
        for (key, value) in legacy {
            if ice.get(&key).is_none_or(Value::is_null) {
                ice.insert(key, value);
            }
        }
    }
}

/// Legacy wait times were strings (`"1"`, `"0a"`); an empty one meant `0`.
fn parse_wait(value: Option<&Value>) -> Value {
    let seconds = match value {
        None | Some(Value::Null) => Some(0),
        Some(Value::Number(n)) => n.as_u64(),
        Some(Value::String(s)) if s.trim().is_empty() => Some(0),
        Some(Value::String(s)) => s.trim().parse::<u64>().ok(),
        Some(_) => None,
    };
    match seconds {
        Some(s) => Value::from(s),
        None => {
            warn!(?value, "legacy wait time is not a whole number of seconds, using plain wait");
            Value::from(0)
        }
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => true,
        Value::String(s) => s.is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
        _ => false,
    }
}
