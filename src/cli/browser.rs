//! Open a Google Maps search in the default browser

use crate::cli::KeywordArgs;
use crate::core::config::Config;
use crate::core::error::{Error, Result};
use crate::maps;
use tracing::debug;

/// Run the open command
pub fn run(args: KeywordArgs, config: &Config) -> Result<()> {
    let keyword = args.keyword();
    if keyword.is_empty() {
        return Err(Error::EmptyKeyword);
    }

    let region = config.region()?;
    let url = maps::search_url(&keyword, region.center);

    println!("🔍 \"{}\" の検索結果をブラウザで開きます...", keyword);
    debug!(url = %url, "Opening browser");

    open::that(&url).map_err(|e| Error::BrowserError {
        message: format!("{} ({})", e, url),
    })
}
