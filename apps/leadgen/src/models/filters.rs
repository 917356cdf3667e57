use serde::{Deserialize, Deserializer, Serialize};

/// Structured lead-search parameters extracted from a free-text request.
/// Every key is optional on input; absent or `null` values become empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSet {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub role: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub industry: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub location: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub other_requirements: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
