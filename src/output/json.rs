//! JSON output formatting

use crate::search::EnrichedPoi;

/// Format results as JSON
pub fn format(results: &[EnrichedPoi]) -> String {
    serde_json::to_string_pretty(results)
        .unwrap_or_else(|e| format!(r#"{{"error": "Failed to serialize results: {}"}}"#, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::region::Coordinates;

    #[test]
    fn test_absent_optionals_are_omitted() {
        let poi = EnrichedPoi {
            name: "Beach Bar".to_string(),
            address: "宮古島市".to_string(),
            coordinates: Coordinates::new(24.8, 125.28),
            rating: Some(3.8),
            reviews_count: None,
            price_level: None,
            phone: None,
            website: None,
            opening_hours: None,
            maps_url: "https://www.google.com/maps/search/Beach%20Bar/@24.8,125.28,15z".to_string(),
        };

        let value: serde_json::Value = serde_json::from_str(&format(&[poi])).unwrap();
        let item = &value[0];
        assert_eq!(item["name"], "Beach Bar");
        assert_eq!(item["rating"], 3.8);
        assert_eq!(item["coordinates"]["lng"], 125.28);
        assert!(item.get("phone").is_none());
        assert!(item.get("price_level").is_none());
    }
}
