//! Backends the search pipeline talks to
//!
//! Both ports swallow their own failures: a broken geographic backend
//! yields no POIs, a broken ratings backend yields no match.

pub mod foursquare;
pub mod overpass;

use crate::search::RawPoi;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use foursquare::FoursquareClient;
pub use overpass::OverpassClient;

/// Geographic POI source
#[async_trait]
pub trait PoiSource: Send + Sync {
    /// Named, located POIs for a keyword; empty on any backend failure
    async fn search_pois(&self, keyword: &str) -> Vec<RawPoi>;
}

/// Ratings backend keyed by venue name and proximity
#[async_trait]
pub trait VenueLookup: Send + Sync {
    /// Whether a credential is configured
    fn has_credentials(&self) -> bool;

    /// Best match near `(lat, lon)`; `None` on no match or any failure
    async fn search_venue(&self, name: &str, lat: f64, lon: f64) -> Option<VenueMatch>;
}

/// One venue from the ratings backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VenueMatch {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<VenueStats>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VenueStats {
    #[serde(default)]
    pub total_tips: u32,
}

impl VenueMatch {
    /// Tip count, zero when the backend sent no stats
    pub fn reviews_count(&self) -> u32 {
        self.stats.map(|s| s.total_tips).unwrap_or(0)
    }
}
