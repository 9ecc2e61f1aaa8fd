//! CLI command definitions and handlers

pub mod browser;
pub mod interactive;
pub mod keywords;
pub mod search;
pub mod status;
pub mod url;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

const LONG_ABOUT: &str = r#"
Search places on the Miyako Islands (宮古諸島) from the terminal.

Places come from OpenStreetMap (Overpass API). When FOURSQUARE_API_KEY is
set, each place is enriched with its Foursquare rating, tip count and price
tier; without it results show OpenStreetMap data only.

KEYWORDS:
    Japanese or English categories such as レストラン, カフェ, コンビニ,
    ホテル, ビーチ, restaurant, cafe, hotel. Run 'msearch keywords' for the
    full list. Unknown keywords are matched against related categories,
    then searched by place name (and brand/operator for kana keywords).

AREA:
    宮古島, 池間島, 来間島, 伊良部島, 下地島, 多良間島, 水納島

EXAMPLES:
    msearch search レストラン         List restaurants in the terminal
    msearch search カフェ --json      JSON output for scripting
    msearch open ビーチ               Open a Google Maps search in the browser
    msearch url                       Print the Google Maps URL for the area
    msearch interactive               Pick a category from a menu

ENVIRONMENT:
    FOURSQUARE_API_KEY    Ratings credential (optional)
    MSEARCH_HOME          Directory holding config.toml
    MSEARCH_LOG           Log filter, e.g. 'msearch=debug'
"#;

/// Hybrid POI search for the Miyako Islands
#[derive(Parser, Debug)]
#[command(name = "msearch")]
#[command(author, version)]
#[command(about = "Hybrid POI search for the Miyako Islands")]
#[command(long_about = LONG_ABOUT)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Config file (default: $MSEARCH_HOME/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search places and list them in the terminal
    #[command(visible_aliases = ["s", "list"])]
    Search(SearchArgs),

    /// Open a Google Maps search for the keyword in the browser
    #[command(visible_alias = "o")]
    Open(KeywordArgs),

    /// Print the Google Maps URL for a keyword, or for the area
    Url(UrlArgs),

    /// Choose categories from a menu and search repeatedly
    #[command(visible_alias = "i")]
    Interactive,

    /// Show the search area, endpoints and ratings setup
    Status,

    /// List known keywords and the map tags they search
    Keywords,
}

/// Arguments for the search command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:
    msearch search レストラン          Restaurants
    msearch search 観光スポット        Attractions, museums and viewpoints
    msearch search ファミマ            Name/brand search for unmapped keywords
    msearch search cafe --json         JSON output")]
pub struct SearchArgs {
    /// Search keyword (multiple words are joined with spaces)
    #[arg(required = true, num_args = 1..)]
    pub keyword: Vec<String>,

    /// JSON output
    #[arg(long)]
    pub json: bool,
}

/// A required keyword
#[derive(Parser, Debug)]
pub struct KeywordArgs {
    /// Search keyword (multiple words are joined with spaces)
    #[arg(required = true, num_args = 1..)]
    pub keyword: Vec<String>,
}

/// An optional keyword
#[derive(Parser, Debug)]
pub struct UrlArgs {
    /// Search keyword; omit for the area overview
    pub keyword: Vec<String>,
}

impl SearchArgs {
    pub fn keyword(&self) -> String {
        join_keyword(&self.keyword)
    }

    pub fn format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

impl KeywordArgs {
    pub fn keyword(&self) -> String {
        join_keyword(&self.keyword)
    }
}

impl UrlArgs {
    pub fn keyword(&self) -> Option<String> {
        Some(join_keyword(&self.keyword)).filter(|k| !k.is_empty())
    }
}

/// Join positional words into one keyword
pub fn join_keyword(words: &[String]) -> String {
    words.join(" ").trim().to_string()
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Human,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_search_joins_words() {
        let cli = Cli::parse_from(["msearch", "search", "沖縄", "そば", "--json"]);
        match cli.command {
            Commands::Search(args) => {
                assert_eq!(args.keyword(), "沖縄 そば");
                assert_eq!(args.format(), OutputFormat::Json);
            }
            other => panic!("Unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_list_alias_and_global_config() {
        let cli = Cli::parse_from(["msearch", "list", "カフェ", "--config", "/tmp/m.toml"]);
        assert!(matches!(cli.command, Commands::Search(_)));
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/m.toml")));
    }

    #[test]
    fn test_url_keyword_optional() {
        let cli = Cli::parse_from(["msearch", "url"]);
        match cli.command {
            Commands::Url(args) => assert_eq!(args.keyword(), None),
            other => panic!("Unexpected command: {:?}", other),
        }
        assert!(Cli::try_parse_from(["msearch", "search"]).is_err());
    }
}
