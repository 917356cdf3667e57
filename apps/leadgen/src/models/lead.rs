use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Keys a provider may use for a profile link, in lookup order.
const PROFILE_LINK_KEYS: [&str; 3] = ["linkedin", "profile_url", "url"];

/// A profile record exactly as the lead-search provider returned it.
///
/// The schema belongs to the provider, so every accessor tolerates a missing
/// or non-string field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawLead(Map<String, Value>);

impl RawLead {
    /// Returns a string field, or `None` when absent, empty, or not a string.
    pub fn field(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    pub fn title(&self) -> Option<&str> {
        self.field("title")
    }

    pub fn company(&self) -> Option<&str> {
        self.field("company")
    }

    pub fn location(&self) -> Option<&str> {
        self.field("location")
    }

    pub fn profile_url(&self) -> Option<&str> {
        PROFILE_LINK_KEYS.iter().find_map(|k| self.field(k))
    }

    #[cfg(test)]
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Value> for RawLead {
    /// Objects become leads as-is; any other JSON value becomes an empty record.
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            _ => Self::default(),
        }
    }
}

/// The AI annotation attached to a lead. Scores are on a 1-10 scale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Enrichment {
    pub summary: String,
    pub score: u8,
    pub outreach: String,
}

/// A raw lead merged with its enrichment. Immutable once built.
#[derive(Debug, Clone, Serialize)]
pub struct EnrichedLead {
    #[serde(flatten)]
    lead: RawLead,
    #[serde(flatten)]
    enrichment: Enrichment,
}

impl EnrichedLead {
    /// Merges an enrichment into a lead. Enrichment keys override provider
    /// fields of the same name.
    pub fn new(lead: RawLead, enrichment: Enrichment) -> Self {
        let mut fields = lead.0;
        for key in ["summary", "score", "outreach"] {
            fields.remove(key);
        }
        Self {
            lead: RawLead(fields),
            enrichment,
        }
    }

    pub fn lead(&self) -> &RawLead {
        &self.lead
    }

    pub fn summary(&self) -> &str {
        &self.enrichment.summary
    }

    pub fn score(&self) -> u8 {
        self.enrichment.score
    }

    pub fn outreach(&self) -> &str {
        &self.enrichment.outreach
    }
}
