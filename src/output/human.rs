//! Human-readable output formatting

use crate::search::EnrichedPoi;

const MAX_STARS: usize = 5;

/// Format results as numbered blocks separated by a blank line.
///
/// The rating line only appears when `show_ratings` is set, i.e. when the
/// ratings backend was configured for this search.
pub fn format(results: &[EnrichedPoi], show_ratings: bool) -> String {
    results
        .iter()
        .enumerate()
        .map(|(i, poi)| format!("【{}】{}", i + 1, format_poi(poi, show_ratings)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// One POI block; absent optional fields produce no line
pub fn format_poi(poi: &EnrichedPoi, show_ratings: bool) -> String {
    let mut output = String::new();

    output.push_str(&format!("🏪 {}\n", poi.name));
    output.push_str(&format!("📍 {}\n", poi.address));

    if show_ratings {
        match poi.rating.filter(|r| *r > 0.0) {
            Some(rating) => {
                let stars = "⭐".repeat((rating.round() as usize).min(MAX_STARS));
                output.push_str(&format!("⭐ {}/5 {}", rating, stars));
                if let Some(count) = poi.reviews_count.filter(|c| *c > 0) {
                    output.push_str(&format!(" ({} reviews)", count));
                }
                output.push('\n');
            }
            None => output.push_str("⭐ レーティング情報なし\n"),
        }
    }

    if let Some(price) = poi.price_level.filter(|p| *p > 0) {
        output.push_str(&format!("💰 価格帯: {}\n", "💰".repeat(price as usize)));
    }

    if let Some(phone) = &poi.phone {
        output.push_str(&format!("📞 {}\n", phone));
    }

    if let Some(website) = &poi.website {
        output.push_str(&format!("🌐 {}\n", website));
    }

    if let Some(hours) = &poi.opening_hours {
        output.push_str(&format!("🕒 {}\n", hours));
    }

    output.push_str(&format!("🗺️ {}\n", poi.maps_url));

    output
}
