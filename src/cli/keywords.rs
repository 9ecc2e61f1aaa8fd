//! List the keyword map

use crate::core::config::Config;
use crate::core::error::Result;
use crate::search::keywords::{KeywordTagMap, POPULAR_KEYWORDS};

/// Render popular keywords followed by every mapping
pub fn render(map: &KeywordTagMap) -> String {
    let mut output = String::from("✨ 人気の検索カテゴリ:\n");
    for item in POPULAR_KEYWORDS {
        output.push_str(&format!("  {} {} - {}\n", item.emoji, item.name, item.description));
    }

    output.push_str(&format!("\n📚 キーワード一覧 ({}):\n", map.len()));
    let width = map.iter().map(|(k, _)| k.chars().count()).max().unwrap_or(0);
    for (keyword, tags) in map.iter() {
        let pad = width - keyword.chars().count();
        output.push_str(&format!("  {}{}  {}\n", keyword, " ".repeat(pad), tags.join(", ")));
    }
    output
}

/// Run the keywords command
pub fn run(config: &Config) -> Result<()> {
    print!("{}", render(&config.keyword_map()));
    Ok(())
}
