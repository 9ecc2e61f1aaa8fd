//! Ratings enrichment
//!
//! Projects raw POIs into display form and, when the ratings backend is
//! configured, attaches rating, tip count and price tier one POI at a time.
//! Lookups are awaited strictly in sequence so at most one request is in
//! flight against the backend's rate limit.

use crate::maps;
use crate::search::{EnrichedPoi, RawPoi};
use crate::sources::{VenueLookup, VenueMatch};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Address shown when a POI carries no address tags
pub const NO_ADDRESS: &str = "住所情報なし";

/// Address tags, in display order
const ADDRESS_TAGS: [&str; 3] = ["addr:housenumber", "addr:street", "addr:city"];

/// Join whichever address parts are present, or return [`NO_ADDRESS`]
pub fn build_address(tags: &BTreeMap<String, String>) -> String {
    let parts: Vec<&str> = ADDRESS_TAGS
        .iter()
        .filter_map(|key| tags.get(*key))
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .collect();

    if parts.is_empty() {
        return NO_ADDRESS.to_string();
    }
    parts.join(" ")
}

/// Base display record with no ratings data
pub fn project(poi: &RawPoi) -> EnrichedPoi {
    let name = poi.name().to_string();
    EnrichedPoi {
        address: build_address(&poi.tags),
        coordinates: poi.coordinates(),
        rating: None,
        reviews_count: None,
        price_level: None,
        phone: poi.tag("phone").map(String::from),
        website: poi.tag("website").map(String::from),
        opening_hours: poi.tag("opening_hours").map(String::from),
        maps_url: maps::poi_url(poi.lat, poi.lon, &name),
        name,
    }
}

fn apply_match(poi: &mut EnrichedPoi, venue: VenueMatch) {
    poi.rating = venue.rating;
    poi.reviews_count = Some(venue.reviews_count());
    poi.price_level = venue.price;
}

/// Best-effort enricher over a [`VenueLookup`]
pub struct RatingsEnricher<L> {
    lookup: L,
}

impl<L: VenueLookup> RatingsEnricher<L> {
    pub fn new(lookup: L) -> Self {
        Self { lookup }
    }

    pub fn has_credentials(&self) -> bool {
        self.lookup.has_credentials()
    }

    /// Look up one POI; `None` when unconfigured, unmatched or failed
    pub async fn enrich_one(&self, name: &str, lat: f64, lon: f64) -> Option<VenueMatch> {
        if !self.has_credentials() {
            return None;
        }
        self.lookup.search_venue(name, lat, lon).await
    }

    /// Enrich a batch sequentially, preserving input order
    pub async fn enrich(&self, pois: Vec<RawPoi>) -> Vec<EnrichedPoi> {
        let with_ratings = self.has_credentials();
        if !with_ratings {
            info!("Ratings API key not found, skipping reviews");
        }

        let mut enriched = Vec::with_capacity(pois.len());
        let mut matched = 0usize;

        for poi in &pois {
            let mut item = project(poi);

            if with_ratings {
                if let Some(venue) = self.enrich_one(&item.name, poi.lat, poi.lon).await {
                    apply_match(&mut item, venue);
                    matched += 1;
                }
            }

            enriched.push(item);
        }

        debug!(total = enriched.len(), matched, "Enrichment completed");
        enriched
    }
}
