//! Compile a structured zsh startup configuration into a script that loads
//! plugins through [zinit](https://github.com/zdharma-continuum/zinit).
//!
//! The configuration is plain data: environment variables, `PATH` entries,
//! aliases, shell options, plugins with their loading modifiers ("ice"), and
//! a free-form init script. [`render`] turns it into a complete `.zshrc`.
//!
//! ```ignore
//! let config = zinitcraft::parse_import(&json)?;
//! let script = zinitcraft::render(&config);
//! ```
//!
//! # Pipeline
//!
//! ```text
//! raw JSON ─ migrate ─ overlay on defaults ─ lenient decode ─ assign ids ─▶ Configuration
//! Configuration ─ render ─▶ script text
//! ```
//!
//! - **Normalization never fails.** [`normalize`] accepts any JSON value.
//!   Missing sections take their defaults, wrong-typed fields are treated as
//!   absent, and list entries that are not objects are dropped. Only
//!   [`parse_import`] can fail, and only when the text is not JSON at all.
//! - **Older documents are migrated.** Version 1 stored plugin loading as
//!   `loadType`/`waitTime`/`conditions`; these are folded into the ice bag
//!   before decoding. The current schema version is [`SCHEMA_VERSION`].
//! - **Rendering is pure.** The same configuration always produces the same
//!   bytes. Sections are emitted in a fixed order (see [`Section::ORDER`]),
//!   each under its banner, and a section with no entries still emits its
//!   banner.
//!
//! # Plugin ownership
//!
//! Every plugin carries a stable [`PluginId`]. An env var that belongs to a
//! plugin references it by id; its `group` label is refreshed from the
//! plugin's current name, so renaming a plugin never orphans its variables.
//! See [`Configuration::rename_plugin`].
//!
//! # Quoting
//!
//! Ice values are single-quoted with [`single_quote`], so `atload'eval
//! "$(foo)"'` survives intact. Alias bodies, env values, and the init script
//! are written as the user typed them: they are shell code, not data.
//!
//! # Persistence and settings
//!
//! [`Store`] reads and writes the JSON configuration and the rendered script,
//! keeping `.backup` copies. The tool's own [`Settings`] come from
//! `zinitcraft.toml`, `ZINITCRAFT_*` environment variables, and CLI flags,
//! in ascending priority.
//!
//! # Actions
//!
//! Every operation is an [`Action`] handled by [`ZinitcraftBuilder::handle`],
//! which returns a displayable [`ActionResult`]. The clap adapter (the `cli`
//! feature, on by default) only parses argv into an `Action`.

pub mod error;
pub mod model;
pub mod types;

mod builder;
#[cfg(feature = "cli")]
mod cli;
mod directive;
mod edit;
mod escape;
mod lenient;
mod merge;
mod migrate;
mod normalize;
mod ops;
mod render;
mod settings;
mod store;

#[cfg(test)]
mod fixtures;

pub use builder::{Zinitcraft, ZinitcraftBuilder};
#[cfg(feature = "cli")]
pub use cli::{CraftArgs, CraftCommand};
pub use directive::{directive, modifiers};
pub use edit::{ConfigPatch, Keyed, move_item, remove, upsert};
pub use error::CraftError;
pub use escape::single_quote;
pub use model::{
    AliasItem, Configuration, EnvVarItem, Ice, PathVarItem, PluginId, PluginItem,
    SCHEMA_VERSION, ZinitInit, ZshOptionItem,
};
pub use normalize::{normalize, parse_import};
pub use ops::ActionResult;
pub use render::{Section, render, render_section};
pub use settings::Settings;
pub use store::{Applied, Store};
pub use types::Action;
