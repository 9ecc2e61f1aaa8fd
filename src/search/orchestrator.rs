//! Search entry point: POI lookup followed by ratings enrichment

use crate::core::config::Config;
use crate::core::error::Result;
use crate::enrich::RatingsEnricher;
use crate::output::human;
use crate::search::keywords::KeywordResolver;
use crate::search::query::RegionQueryBuilder;
use crate::search::results::{EnrichedPoi, SearchResult};
use crate::sources::{FoursquareClient, OverpassClient, PoiSource, VenueLookup};
use std::time::Instant;
use tracing::debug;

/// Composes a [`PoiSource`] with a [`RatingsEnricher`]. Holds no per-search state.
pub struct SearchOrchestrator<P, L> {
    source: P,
    enricher: RatingsEnricher<L>,
}

/// The production pipeline: Overpass for places, Foursquare for ratings
pub type DefaultOrchestrator = SearchOrchestrator<OverpassClient, FoursquareClient>;

impl DefaultOrchestrator {
    /// Wire the production pipeline from configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let region = config.region()?;
        let resolver = KeywordResolver::new(config.keyword_map());
        let builder = RegionQueryBuilder::new(resolver, region.bounds);

        Ok(Self::new(
            OverpassClient::from_config(config, builder),
            RatingsEnricher::new(FoursquareClient::from_config(&config.ratings)),
        ))
    }
}

impl<P: PoiSource, L: VenueLookup> SearchOrchestrator<P, L> {
    pub fn new(source: P, enricher: RatingsEnricher<L>) -> Self {
        Self { source, enricher }
    }

    /// Whether results carry ratings data
    pub fn ratings_enabled(&self) -> bool {
        self.enricher.has_credentials()
    }

    /// Search places for a keyword. Empty when nothing is found or the
    /// geographic backend is unreachable; enrichment is skipped for empty sets.
    pub async fn search_places(&self, keyword: &str) -> SearchResult {
        let start = Instant::now();

        let pois = self.source.search_pois(keyword).await;
        if pois.is_empty() {
            debug!(keyword, "No places found");
            return Vec::new();
        }

        let found = pois.len();
        let results = self.enricher.enrich(pois).await;

        debug!(
            keyword,
            found,
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Search completed"
        );
        results
    }

    /// Render results for the terminal. Callers check for an empty set first.
    pub fn format_results(&self, results: &[EnrichedPoi]) -> String {
        human::format(results, self.ratings_enabled())
    }
}
