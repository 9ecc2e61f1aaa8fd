//! Search command implementation

use crate::cli::{OutputFormat, SearchArgs};
use crate::core::config::Config;
use crate::core::error::{Error, Result};
use crate::output::format_results;
use crate::search::orchestrator::DefaultOrchestrator;
use tracing::info;

/// Run the search command
pub async fn run(args: SearchArgs, config: &Config) -> Result<()> {
    let keyword = args.keyword();
    if keyword.is_empty() {
        return Err(Error::EmptyKeyword);
    }

    let orchestrator = DefaultOrchestrator::from_config(config)?;
    info!(keyword = %keyword, ratings = orchestrator.ratings_enabled(), "Searching");

    let format = args.format();
    if format == OutputFormat::Human {
        println!("🔍 \"{}\" を{}エリアで検索中...", keyword, config.region.name);
    }

    let results = orchestrator.search_places(&keyword).await;

    match format {
        OutputFormat::Json => println!("{}", format_results(&results, format, orchestrator.ratings_enabled())),
        OutputFormat::Human if results.is_empty() => {
            println!("❌ 該当する場所が見つかりませんでした。");
        }
        OutputFormat::Human => {
            println!("\n✅ {}件の結果が見つかりました:\n", results.len());
            print!("{}", orchestrator.format_results(&results));
        }
    }

    Ok(())
}
