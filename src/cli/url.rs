//! Print Google Maps URLs

use crate::cli::UrlArgs;
use crate::core::config::Config;
use crate::core::error::Result;
use crate::core::region::Region;
use crate::maps;

/// URL for a keyword search, or the area overview without one
pub fn url_for(keyword: Option<&str>, region: &Region) -> String {
    match keyword {
        Some(keyword) => maps::search_url(keyword, region.center),
        None => maps::default_url(region.center),
    }
}

/// Run the url command
pub fn run(args: UrlArgs, config: &Config) -> Result<()> {
    let region = config.region()?;
    println!("{}", url_for(args.keyword().as_deref(), &region));
    Ok(())
}
