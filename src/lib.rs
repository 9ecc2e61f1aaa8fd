//! msearch - hybrid POI search for the Miyako Islands
//!
//! Resolves a free-text keyword to OpenStreetMap tags, queries the Overpass
//! API inside a fixed bounding box, and enriches each place with Foursquare
//! ratings when a credential is available.

pub mod cli;
pub mod core;
pub mod enrich;
pub mod maps;
pub mod output;
pub mod search;
pub mod sources;

#[cfg(test)]
pub(crate) mod test_support;

pub use crate::core::config::Config;
pub use crate::core::error::{Error, Result};
pub use crate::core::region::{Coordinates, GeoBounds, Region};
pub use search::{EnrichedPoi, RawPoi, SearchOrchestrator};
