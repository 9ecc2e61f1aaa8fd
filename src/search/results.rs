use crate::core::region::Coordinates;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// OpenStreetMap element kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Node,
    Way,
    Relation,
    #[serde(other)]
    Other,
}

/// A named place returned by the geographic backend.
///
/// Only the data source constructs these, and only for elements with a
/// non-empty name and a valid coordinate pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPoi {
    pub id: i64,
    pub kind: ElementKind,
    pub lat: f64,
    pub lon: f64,
    pub tags: BTreeMap<String, String>,
}

impl RawPoi {
    pub fn name(&self) -> &str {
        self.tag("name").unwrap_or_default()
    }

    /// Tag value, treating empty strings as absent
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }

    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lon)
    }
}

/// A POI in display form, optionally carrying ratings data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedPoi {
    pub name: String,
    pub address: String,
    pub coordinates: Coordinates,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviews_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_level: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opening_hours: Option<String>,
    pub maps_url: String,
}

/// Output of one search, in backend order
pub type SearchResult = Vec<EnrichedPoi>;
