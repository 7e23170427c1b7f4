//! Plugin directive builder.
//!
//! Each [`PluginItem`] becomes exactly one `zinit` line in turbo-mode `for`
//! syntax:
//!
//! ```text
//! zinit wait lucid atload'_zsh_autosuggest_start' for zsh-users/zsh-autosuggestions  # suggestions
//! ```
//!
//! Modifier tokens are emitted in a fixed order (see [`modifiers`]) so the
//! same plugin always yields byte-identical output. Free-text modifier values
//! are single-quoted with [`single_quote`]; numbers and flags are bare.

use crate::escape::single_quote;
use crate::model::{Ice, PluginItem};

/// The plugin manager's command name.
pub const COMMAND: &str = "zinit";

/// Build the directive line for one plugin, including any trailing comment.
pub fn directive(plugin: &PluginItem) -> String {
    let tokens = plugin.ice.as_ref().map(modifiers).unwrap_or_default();

    let mut line = String::from(COMMAND);
    for token in &tokens {
        line.push(' ');
        line.push_str(token);
    }
    line.push_str(" for ");
    line.push_str(&plugin.name);

    if let Some(description) = non_empty(plugin.description.as_deref()) {
        line.push_str("  # ");
        line.push_str(description);
    }
    line
}

/// Encode an ice bag as modifier tokens.
///
/// Order: `from as pick atinit atload atclone depth blockf compile wait lucid
/// light-mode if has on bindmap mv bpick atpull`. Empty strings, `depth = 0`,
/// and `false` flags are omitted. `wait = 0` is the bare `wait` token.
pub fn modifiers(ice: &Ice) -> Vec<String> {
    let mut tokens = Vec::new();

    quoted(&mut tokens, "from", ice.from.as_deref());
    quoted(&mut tokens, "as", ice.r#as.as_deref());
    quoted(&mut tokens, "pick", ice.pick.as_deref());
    quoted(&mut tokens, "atinit", ice.atinit.as_deref());
    quoted(&mut tokens, "atload", ice.atload.as_deref());
    quoted(&mut tokens, "atclone", ice.atclone.as_deref());
    if let Some(depth) = ice.depth.filter(|d| *d > 0) {
        tokens.push(format!("depth{depth}"));
    }
    flag(&mut tokens, "blockf", ice.blockf);
    flag(&mut tokens, "compile", ice.compile);
    match ice.wait {
        None => {}
        Some(0) => tokens.push("wait".into()),
        Some(seconds) => tokens.push(format!("wait{}", single_quote(&seconds.to_string()))),
    }
    flag(&mut tokens, "lucid", ice.lucid);
    flag(&mut tokens, "light-mode", ice.light_mode);
    quoted(&mut tokens, "if", ice.r#if.as_deref());
    quoted(&mut tokens, "has", ice.has.as_deref());
    quoted(&mut tokens, "on", ice.on.as_deref());
    quoted(&mut tokens, "bindmap", ice.bindmap.as_deref());
    quoted(&mut tokens, "mv", ice.mv.as_deref());
    quoted(&mut tokens, "bpick", ice.bpick.as_deref());
    quoted(&mut tokens, "atpull", ice.atpull.as_deref());

    tokens
}

fn quoted(tokens: &mut Vec<String>, name: &str, value: Option<&str>) {
    if let Some(value) = non_empty(value) {
        tokens.push(format!("{name}{}", single_quote(value)));
    }
}

fn flag(tokens: &mut Vec<String>, name: &str, on: bool) {
    if on {
        tokens.push(name.to_string());
    }
}

pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
