//! Lookup of the crop config path inside the host's configuration tree.

use serde_json::Value;

/// Dotted path of the crop config file within the host configuration tree.
pub const CROP_CONFIG_PATH: &str = "service.custom.crop.config";

/// The value at [`CROP_CONFIG_PATH`] is not something crop can take as a path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{path} must be a string, found {kind}")]
pub struct ConfigValueError {
    pub path: &'static str,
    pub kind: &'static str,
}

/// Read the crop config value from a host configuration tree.
///
/// A missing key or an explicit `null` means "not configured". Strings are
/// passed through untouched (even when empty). Numbers and booleans use
/// their JSON text. Objects and arrays are rejected.
pub fn crop_config_value(tree: &Value) -> Result<Option<String>, ConfigValueError> {
    let found = CROP_CONFIG_PATH
        .split('.')
        .try_fold(tree, |node, key| node.get(key));

    match found {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(v @ (Value::Number(_) | Value::Bool(_))) => Ok(Some(v.to_string())),
        Some(Value::Array(_)) => Err(ConfigValueError {
            path: CROP_CONFIG_PATH,
            kind: "an array",
        }),
        Some(Value::Object(_)) => Err(ConfigValueError {
            path: CROP_CONFIG_PATH,
            kind: "an object",
        }),
    }
}
