use serde::Serialize;

/// Which crop operation a hook invocation performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    /// `crop update-product`: register a new version of the product.
    UpdateProduct,
    /// `crop upload-project`: upload artifacts without touching the product.
    UploadProject,
}

impl Action {
    /// The positional subcommand passed to crop.
    pub fn subcommand(&self) -> &'static str {
        match self {
            Action::UpdateProduct => "update-product",
            Action::UploadProject => "upload-project",
        }
    }

    /// Whether crop accepts `--description` for this subcommand.
    pub fn accepts_description(&self) -> bool {
        matches!(self, Action::UpdateProduct)
    }
}

/// Returned when a settings file or input names an action crop does not have.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown action '{0}' (expected 'update-product' or 'upload-project')")]
pub struct UnknownAction(pub String);

impl std::str::FromStr for Action {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "update-product" => Ok(Action::UpdateProduct),
            "upload-project" => Ok(Action::UploadProject),
            other => Err(UnknownAction(other.to_string())),
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.subcommand())
    }
}
