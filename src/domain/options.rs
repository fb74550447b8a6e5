use serde::{de, Deserialize, Deserializer};
use serde_json::Value;

/// Command-line options the host framework parsed for this deploy.
///
/// Unknown fields are ignored; hosts pass their whole option bag through.
/// Hosts parse their CLI loosely, so `--version 2` may arrive as a number and
/// a bare `--description` as `true`; both are accepted as text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct InvocationOptions {
    #[serde(default, deserialize_with = "option_text")]
    pub version: Option<String>,
    #[serde(default, deserialize_with = "option_text")]
    pub description: Option<String>,
}

impl InvocationOptions {
    /// The version to pass on, skipping empty strings.
    pub fn version(&self) -> Option<&str> {
        non_empty(self.version.as_deref())
    }

    /// The description to pass on, skipping empty strings.
    pub fn description(&self) -> Option<&str> {
        non_empty(self.description.as_deref())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// A scalar host option as text. `null` and `false` mean "not given";
/// numbers and `true` use their JSON text.
fn option_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null | Value::Bool(false) => Ok(None),
        Value::String(s) => Ok(Some(s)),
        v @ (Value::Number(_) | Value::Bool(true)) => Ok(Some(v.to_string())),
        Value::Array(_) => Err(de::Error::invalid_type(
            de::Unexpected::Seq,
            &"a string, number or boolean",
        )),
        Value::Object(_) => Err(de::Error::invalid_type(
            de::Unexpected::Map,
            &"a string, number or boolean",
        )),
    }
}
