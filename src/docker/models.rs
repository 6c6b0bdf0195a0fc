use std::collections::HashMap;

use serde::{Deserialize, Deserializer};

/// A container as reported by `GET /containers/json`.
///
/// Only the fields needed to build a discovery target are decoded, everything
/// else in the response is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawContainer {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "Labels", default, deserialize_with = "null_as_default")]
    pub labels: HashMap<String, String>,
    #[serde(rename = "Names", default, deserialize_with = "null_as_default")]
    pub names: Vec<String>,
    #[serde(rename = "Image", default)]
    pub image: String,
}

impl RawContainer {
    /// The first name alias, e.g. `/web-1`.
    pub fn primary_name(&self) -> Option<&str> {
        self.names.first().map(String::as_str)
    }
}

// The engine reports `null` instead of `{}`/`[]` for some containers.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
