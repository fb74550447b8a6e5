mod document;

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::domain::Action;
use crate::invoke::DEFAULT_PROGRAM;

use document::ConfigDocument;

/// Lifecycle event the hook reacts to unless configured otherwise.
pub const DEFAULT_EVENT: &str = "before:deploy:deploy";

/// Bounded wait applied to crop unless configured otherwise.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(600);

/// Plugin settings loaded from the `crop { … }` section of a KDL file.
///
/// ```kdl
/// crop {
///     program "/usr/local/bin/crop"
///     action "update-product"
///     event "before:deploy:deploy"
///     timeout-secs 300
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// crop executable name or path.
    pub program: String,
    /// Which crop subcommand the lifecycle hook runs.
    pub action: Action,
    /// Lifecycle event that triggers the hook.
    pub event: String,
    /// `None` waits for crop indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            program: DEFAULT_PROGRAM.to_string(),
            action: Action::UploadProject,
            event: DEFAULT_EVENT.to_string(),
            timeout: Some(DEFAULT_TIMEOUT),
        }
    }
}

/// Errors that can occur when loading or parsing a settings file.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    #[diagnostic(code(config::not_found))]
    NotFound(PathBuf),
    #[error("failed to read config: {0}")]
    #[diagnostic(code(config::read))]
    ReadError(#[from] std::io::Error),
    #[error("invalid KDL syntax: {0}")]
    #[diagnostic(code(config::syntax))]
    ParseError(String),
    #[error("invalid config: {0}")]
    #[diagnostic(code(config::invalid))]
    ValidationError(String),
}

impl Settings {
    /// Load settings from a KDL file at the given path.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Self::from_document(&ConfigDocument::load(path)?)
    }

    /// Parse a KDL string into settings.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Self::from_document(&ConfigDocument::parse(content)?)
    }

    /// Settings from an optional path; defaults when no file is given.
    pub fn load_optional(path: Option<&Path>) -> Result<Self, ConfigError> {
        path.map_or_else(|| Ok(Settings::default()), Self::load)
    }

    fn from_document(doc: &ConfigDocument) -> Result<Self, ConfigError> {
        let mut settings = Settings::default();
        let Some(section) = doc.section("crop") else {
            return Ok(settings);
        };

        for node in section.nodes() {
            match node.name() {
                "program" => settings.program = non_empty(&node, node.single_string()?)?,
                "action" => {
                    settings.action = node.single_string()?.parse().map_err(
                        |e: crate::domain::UnknownAction| {
                            ConfigError::ValidationError(format!("line {}: {e}", node.line()))
                        },
                    )?
                }
                "event" => settings.event = non_empty(&node, node.single_string()?)?,
                "timeout-secs" => {
                    settings.timeout = match node.single_u64()? {
                        0 => None,
                        secs => Some(Duration::from_secs(secs)),
                    }
                }
                other => {
                    return Err(ConfigError::ValidationError(format!(
                        "line {}: unknown setting '{other}' in crop section",
                        node.line()
                    )))
                }
            }
        }
        Ok(settings)
    }
}

fn non_empty(node: &document::ParseNode<'_>, value: &str) -> Result<String, ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::ValidationError(format!(
            "line {}: {} must not be empty",
            node.line(),
            node.name()
        )));
    }
    Ok(value.to_string())
}
