use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::domain::InvocationOptions;

/// One lifecycle event from the host framework, read as JSON from stdin.
///
/// Unknown fields are silently ignored for forward compatibility.
#[derive(Debug, Deserialize)]
pub struct HookInput {
    /// Lifecycle event name, e.g. `before:deploy:deploy`.
    pub event: String,
    /// The host's resolved configuration tree.
    #[serde(default)]
    pub variables: Value,
    /// The host's parsed command-line options. `null` means none.
    #[serde(default, deserialize_with = "null_as_default")]
    pub options: InvocationOptions,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
