//! Value-level editing operations for hosts that own a [`Configuration`].
//!
//! Each edit replaces or reorders one list and leaves the rest of the value
//! untouched. None of this is needed to render; it exists so editors (and
//! the CLI's `import`) produce values with consistent plugin ownership.

use crate::model::{
    AliasItem, Configuration, EnvVarItem, PathVarItem, PluginId, PluginItem, ZinitInit,
    ZshOptionItem,
};
use crate::normalize::{assign_plugin_ids, link_env_groups};

/// A sparse top-level update. Present fields replace the current value wholesale.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigPatch {
    pub zinit_init: Option<ZinitInit>,
    pub aliases: Option<Vec<AliasItem>>,
    pub path_vars: Option<Vec<PathVarItem>>,
    pub env_vars: Option<Vec<EnvVarItem>>,
    pub plugins: Option<Vec<PluginItem>>,
    pub zsh_options: Option<Vec<ZshOptionItem>>,
    pub init_script: Option<String>,
}

impl Configuration {
    /// Apply a patch, then re-resolve plugin ids and env ownership.
    pub fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(init) = patch.zinit_init {
            self.zinit_init = init.or_defaults();
        }
        if let Some(aliases) = patch.aliases {
            self.aliases = aliases;
        }
        if let Some(path_vars) = patch.path_vars {
            self.path_vars = path_vars;
        }
        if let Some(env_vars) = patch.env_vars {
            self.env_vars = env_vars;
        }
        if let Some(plugins) = patch.plugins {
            self.plugins = plugins;
        }
        if let Some(zsh_options) = patch.zsh_options {
            self.zsh_options = zsh_options;
        }
        if let Some(init_script) = patch.init_script {
            self.init_script = init_script;
        }
        assign_plugin_ids(self);
        link_env_groups(self);
    }

    pub fn plugin(&self, id: &PluginId) -> Option<&PluginItem> {
        self.plugins.iter().find(|p| &p.id == id)
    }

    /// Rename a plugin and carry the new name into the `group` label of every
    /// env var it owns. Returns `false` if no plugin has that id.
    pub fn rename_plugin(&mut self, id: &PluginId, new_name: &str) -> bool {
        let Some(plugin) = self.plugins.iter_mut().find(|p| &p.id == id) else {
            return false;
        };
        plugin.name = new_name.to_string();
        link_env_groups(self);
        true
    }

    /// Env vars owned by the given plugin, in list order.
    pub fn env_vars_of<'a>(&'a self, id: &'a PluginId) -> impl Iterator<Item = &'a EnvVarItem> {
        self.env_vars
            .iter()
            .filter(move |env| env.plugin.as_ref() == Some(id))
    }

    /// Label to group an env var under: the owning plugin's name when owned,
    /// otherwise its free-text group.
    pub fn group_label<'a>(&'a self, env: &'a EnvVarItem) -> Option<&'a str> {
        env.plugin
            .as_ref()
            .and_then(|id| self.plugin(id))
            .map(|p| p.name.as_str())
            .or(env.group.as_deref())
    }
}

/// Items addressable by a unique string key within their list.
pub trait Keyed {
    fn key(&self) -> &str;
}

impl Keyed for AliasItem {
    fn key(&self) -> &str {
        &self.name
    }
}

impl Keyed for PathVarItem {
    fn key(&self) -> &str {
        &self.name
    }
}

impl Keyed for EnvVarItem {
    fn key(&self) -> &str {
        &self.key
    }
}

impl Keyed for ZshOptionItem {
    fn key(&self) -> &str {
        &self.option
    }
}

/// Replace the item with the same key in place, or append it.
/// Returns the replaced item, if any.
pub fn upsert<T: Keyed>(items: &mut Vec<T>, item: T) -> Option<T> {
    match items.iter().position(|existing| existing.key() == item.key()) {
        Some(index) => Some(std::mem::replace(&mut items[index], item)),
        None => {
            items.push(item);
            None
        }
    }
}

/// Remove the item with the given key.
pub fn remove<T: Keyed>(items: &mut Vec<T>, key: &str) -> Option<T> {
    let index = items.iter().position(|existing| existing.key() == key)?;
    Some(items.remove(index))
}

/// Move the element at `from` to `to`, shifting the elements in between.
/// Returns `false` (and changes nothing) if either index is out of range.
pub fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) -> bool {
    if from >= items.len() || to >= items.len() {
        return false;
    }
    let item = items.remove(from);
    items.insert(to, item);
    true
}
