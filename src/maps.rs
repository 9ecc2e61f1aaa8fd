//! Google Maps deep links

use crate::core::region::Coordinates;

const MAPS_BASE: &str = "https://www.google.com/maps";

/// Map view centred on the region
pub fn default_url(center: Coordinates) -> String {
    format!("{}/@{},{},12z", MAPS_BASE, center.lat, center.lng)
}

/// Keyword search around the region centre
pub fn search_url(keyword: &str, center: Coordinates) -> String {
    format!(
        "{}/search/{}/@{},{},12z/data=!3m1!4b1",
        MAPS_BASE,
        urlencoding::encode(keyword),
        center.lat,
        center.lng
    )
}

/// Link to a single POI
pub fn poi_url(lat: f64, lng: f64, name: &str) -> String {
    format!(
        "{}/search/{}/@{},{},15z",
        MAPS_BASE,
        urlencoding::encode(name),
        lat,
        lng
    )
}
