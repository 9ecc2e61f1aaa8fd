//! Output formatting

pub mod human;
pub mod json;

use crate::cli::OutputFormat;
use crate::search::EnrichedPoi;

/// Format search results for output
pub fn format_results(results: &[EnrichedPoi], format: OutputFormat, show_ratings: bool) -> String {
    match format {
        OutputFormat::Human => human::format(results, show_ratings),
        OutputFormat::Json => json::format(results),
    }
}
