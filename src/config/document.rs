//! Config document abstraction layer.
//!
//! `ConfigDocument`, `ConfigSection`, and `ParseNode` wrap the `kdl` crate
//! types so the rest of the config module never touches KDL directly.

use super::ConfigError;

/// Parsed KDL document paired with its source text.
pub(super) struct ConfigDocument {
    doc: kdl::KdlDocument,
    source: String,
}

impl ConfigDocument {
    /// Parse a KDL source string into a document.
    pub(super) fn parse(source: &str) -> Result<Self, ConfigError> {
        let doc: kdl::KdlDocument = source
            .parse()
            .map_err(|e: kdl::KdlError| ConfigError::ParseError(e.to_string()))?;
        Ok(Self {
            doc,
            source: source.to_string(),
        })
    }

    /// Load and parse a KDL config file.
    pub(super) fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound(path.to_path_buf())
            } else {
                ConfigError::ReadError(e)
            }
        })?;
        Self::parse(&content)
    }

    /// Get a named top-level section's children.
    ///
    /// `section("crop")` returns the contents of the `crop { … }` block.
    pub(super) fn section(&self, name: &str) -> Option<ConfigSection<'_>> {
        self.doc
            .get(name)
            .and_then(|n| n.children())
            .map(|doc| ConfigSection {
                doc,
                source: &self.source,
            })
    }
}

/// Borrowed view into the children block of a top-level node.
pub(super) struct ConfigSection<'a> {
    doc: &'a kdl::KdlDocument,
    source: &'a str,
}

impl<'a> ConfigSection<'a> {
    pub(super) fn nodes(&self) -> Vec<ParseNode<'a>> {
        self.doc
            .nodes()
            .iter()
            .map(|node| ParseNode {
                node,
                source: self.source,
            })
            .collect()
    }
}

/// Single KDL node with source context for line-number reporting.
pub(super) struct ParseNode<'a> {
    node: &'a kdl::KdlNode,
    source: &'a str,
}

impl<'a> ParseNode<'a> {
    /// The node's identifier (e.g. `"program"`, `"timeout-secs"`).
    pub(super) fn name(&self) -> &'a str {
        self.node.name().value()
    }

    /// The node's only argument as a string.
    pub(super) fn single_string(&self) -> Result<&'a str, ConfigError> {
        self.single_value()?.as_string().ok_or_else(|| {
            ConfigError::ValidationError(format!(
                "line {}: {} expects a string",
                self.line(),
                self.name()
            ))
        })
    }

    /// The node's only argument as a non-negative integer.
    pub(super) fn single_u64(&self) -> Result<u64, ConfigError> {
        self.single_value()?
            .as_integer()
            .and_then(|i| u64::try_from(i).ok())
            .ok_or_else(|| {
                ConfigError::ValidationError(format!(
                    "line {}: {} expects a non-negative integer",
                    self.line(),
                    self.name()
                ))
            })
    }

    fn single_value(&self) -> Result<&'a kdl::KdlValue, ConfigError> {
        match self.node.entries() {
            [entry] if entry.name().is_none() => Ok(entry.value()),
            _ => Err(ConfigError::ValidationError(format!(
                "line {}: {} takes exactly one value",
                self.line(),
                self.name()
            ))),
        }
    }

    /// 1-based line number of this node in the original source.
    pub(super) fn line(&self) -> usize {
        let offset = self.node.span().offset();
        self.source[..offset.min(self.source.len())]
            .bytes()
            .filter(|&b| b == b'\n')
            .count()
            + 1
    }
}
