//! Compile a [`Configuration`] into a zsh startup script.
//!
//! The script is a fixed sequence of [`Section`]s. Each renderer reads only
//! its own slice of the configuration and returns a block of lines ending in
//! a newline; blocks are joined with `\n`, which leaves one blank line
//! between sections. Rendering is a pure function of the input: same value,
//! same bytes.
//!
//! Only plugin modifiers are escaped (see [`directive`](crate::directive)).
//! Bootstrap paths, aliases, PATH entries, env values, and options are
//! interpolated as written, because existing scripts depend on exactly that
//! output.

use crate::directive::{directive, non_empty};
use crate::model::{AliasItem, Configuration, EnvVarItem, PathVarItem, ZinitInit, ZshOptionItem};

/// One labeled block of the generated script, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Boot,
    EnvVars,
    Path,
    Aliases,
    Options,
    Plugins,
    InitScript,
}

impl Section {
    pub const ORDER: [Section; 7] = [
        Section::Boot,
        Section::EnvVars,
        Section::Path,
        Section::Aliases,
        Section::Options,
        Section::Plugins,
        Section::InitScript,
    ];

    /// Banner title. The boot block has none.
    pub fn title(self) -> Option<&'static str> {
        match self {
            Section::Boot => None,
            Section::EnvVars => Some("ENV VARIABLES"),
            Section::Path => Some("PATH VARIABLES"),
            Section::Aliases => Some("ALIASES"),
            Section::Options => Some("ZSH OPTIONS"),
            Section::Plugins => Some("PLUGINS"),
            Section::InitScript => Some("INIT SCRIPT"),
        }
    }
}

const RULE: &str = "#####################";

/// Render the complete script.
pub fn render(config: &Configuration) -> String {
    Section::ORDER
        .iter()
        .map(|section| render_section(*section, config))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render a single section, banner included.
pub fn render_section(section: Section, config: &Configuration) -> String {
    let lines: Vec<String> = match section {
        Section::Boot => return boot_block(&config.zinit_init),
        Section::EnvVars => config.env_vars.iter().map(env_line).collect(),
        Section::Path => config.path_vars.iter().map(path_line).collect(),
        Section::Aliases => config.aliases.iter().map(alias_line).collect(),
        Section::Options => config.zsh_options.iter().map(option_line).collect(),
        Section::Plugins => config.plugins.iter().map(directive).collect(),
        Section::InitScript => vec![config.init_script.clone()],
    };
    let title = section.title().unwrap_or_default();
    block(title, lines)
}

fn block(title: &str, lines: Vec<String>) -> String {
    let mut out = vec![RULE.to_string(), format!("# {title:<18}#"), RULE.to_string()];
    out.extend(lines);
    out.push(String::new());
    out.join("\n")
}

fn boot_block(init: &ZinitInit) -> String {
    let brew = &init.brew_path;
    let home = &init.zinit_home;
    format!(
        r#"#!/bin/zsh

if [[ -f "{brew}" ]] then
  # If you're using macOS, you'll want this enabled
  eval "$(/{brew} shellenv)"
fi

ZINIT_HOME="{home}"
[ ! -d $ZINIT_HOME ] && mkdir -p "$(dirname $ZINIT_HOME)"
[ ! -d $ZINIT_HOME/.git ] && git clone https://github.com/zdharma-continuum/zinit.git "$ZINIT_HOME"
source "$ZINIT_HOME/zinit.zsh"

autoload -Uz _zinit
(( ${{+_comps}} )) && _comps[zinit]=_zinit

zinit ice from"gh-r" as"command" atload'eval "$(starship init zsh)"'
zinit load starship/starship
### End of Zinit's installer chunk
"#
    )
}

fn env_line(env: &EnvVarItem) -> String {
    format!("export {}=\"{}\"", env.key, env.value)
}

fn path_line(path: &PathVarItem) -> String {
    format!("export PATH=\"$PATH:{}\"  # {}", path.path, path.name)
}

fn alias_line(alias: &AliasItem) -> String {
    with_comment(
        format!("alias {}=\"{}\"", alias.name, alias.alias),
        alias.description.as_deref(),
    )
}

fn option_line(option: &ZshOptionItem) -> String {
    with_comment(option.option.clone(), option.description.as_deref())
}

fn with_comment(mut line: String, comment: Option<&str>) -> String {
    if let Some(comment) = non_empty(comment) {
        line.push_str("  # ");
        line.push_str(comment);
    }
    line
}
