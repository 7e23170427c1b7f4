use std::path::PathBuf;

/// An operation on the stored configuration, independent of any CLI framework.
/// The CLI layer converts parsed clap args into this.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Render the stored configuration (or `input`) to a zsh script.
    Render {
        input: Option<PathBuf>,
        output: Option<PathBuf>,
    },
    /// Render and write both the script and the serialized configuration.
    Apply { input: Option<PathBuf> },
    /// Validate a JSON file and replace the stored configuration with it.
    Import { file: PathBuf },
    /// The stored configuration as pretty JSON.
    Export { output: Option<PathBuf> },
    /// The default configuration as pretty JSON.
    Gen { output: Option<PathBuf> },
    /// Replace the stored configuration with the default.
    Reset,
    /// Entry counts per section and the boot paths.
    Show,
    /// Commented template for the tool's own settings file.
    Settings,
}
