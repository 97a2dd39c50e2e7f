// src/data.rs
//
// Canonical record types for a run.
//
// - Country:      API country code, used as the grouping key.
// - LeaderRecord: one leader, built from the API payload by a validating
//                 constructor. Only enrichment mutates it (once).
// - Paragraph:    cleaned lead paragraph, or the explicit "unavailable" marker.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::RecordError;

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Country(String);

impl Country {
    pub fn new(code: impl Into<String>) -> Self { Self(code.into()) }
    pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

/// Lead paragraph of a leader's encyclopedia page.
///
/// Serialized as the text itself, or as `null` / an empty CSV cell when
/// unavailable. An empty or blank string reads back as `Unavailable`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Paragraph {
    Available(String),
    #[default]
    Unavailable,
}

impl Paragraph {
    /// Wrap cleaned text; blank text becomes `Unavailable`.
    pub fn from_cleaned(text: String) -> Self {
        if text.trim().is_empty() { Paragraph::Unavailable } else { Paragraph::Available(text) }
    }

    pub fn as_deref(&self) -> Option<&str> {
        match self {
            Paragraph::Available(s) => Some(s),
            Paragraph::Unavailable => None,
        }
    }

    pub fn is_available(&self) -> bool { matches!(self, Paragraph::Available(_)) }
}

impl Serialize for Paragraph {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Paragraph::Available(s) => serializer.serialize_some(s),
            Paragraph::Unavailable => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for Paragraph {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = Option::<String>::deserialize(deserializer)?;
        Ok(text.map(Paragraph::from_cleaned).unwrap_or_default())
    }
}

/// Leader object as the API sends it. Every field may be absent.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ApiLeader {
    pub id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub birth_date: Option<String>,
    pub death_date: Option<String>,
    pub place_of_birth: Option<String>,
    pub wikipedia_url: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderRecord {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: Option<String>,
    pub death_date: Option<String>,
    pub place_of_birth: Option<String>,
    pub wikipedia_url: String,
    #[serde(default, alias = "wiki_paragraph")]
    pub first_paragraph: Paragraph,
}

impl LeaderRecord {
    /// Validate an API payload. Blank optional fields are normalized to `None`.
    pub fn from_api(raw: ApiLeader) -> Result<Self, RecordError> {
        Ok(Self {
            id: required(raw.id, "id")?,
            first_name: required(raw.first_name, "first_name")?,
            last_name: required(raw.last_name, "last_name")?,
            birth_date: optional(raw.birth_date),
            death_date: optional(raw.death_date),
            place_of_birth: optional(raw.place_of_birth),
            wikipedia_url: required(raw.wikipedia_url, "wikipedia_url")?,
            first_paragraph: Paragraph::Unavailable,
        })
    }

    pub fn full_name(&self) -> String { join!(&self.first_name, " ", &self.last_name) }
}

fn required(v: Option<String>, field: &'static str) -> Result<String, RecordError> {
    optional(v).ok_or(RecordError::Missing(field))
}

fn optional(v: Option<String>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// Leaders grouped by country, countries in code order, leaders in API order.
pub type LeadersByCountry = BTreeMap<Country, Vec<LeaderRecord>>;

pub fn total_leaders(by_country: &LeadersByCountry) -> usize {
    by_country.values().map(Vec::len).sum()
}
