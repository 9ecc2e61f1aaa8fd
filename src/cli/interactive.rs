//! Interactive search loop

use crate::core::config::Config;
use crate::core::error::{Error, Result};
use crate::search::keywords::{PopularKeyword, POPULAR_KEYWORDS};
use crate::search::orchestrator::DefaultOrchestrator;
use dialoguer::{theme::ColorfulTheme, Input};
use std::io;

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

/// What the user asked for at the prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Quit,
    Popular(PopularKeyword),
    Keyword(String),
}

/// Interpret one line of input: a menu number, a keyword, or a quit word
pub fn parse_selection(input: &str) -> Selection {
    let trimmed = input.trim();
    let lower = trimmed.to_lowercase();
    if trimmed.is_empty() || lower == "exit" || lower == "quit" {
        return Selection::Quit;
    }

    if let Ok(n) = trimmed.parse::<usize>() {
        if let Some(popular) = n.checked_sub(1).and_then(|i| POPULAR_KEYWORDS.get(i)) {
            return Selection::Popular(*popular);
        }
    }

    Selection::Keyword(trimmed.to_string())
}

fn menu() -> String {
    let mut output = String::from("\n✨ 人気の検索カテゴリ:\n");
    for (i, item) in POPULAR_KEYWORDS.iter().enumerate() {
        output.push_str(&format!(
            "{:>2}. {} {} - {}\n",
            i + 1,
            item.emoji,
            item.name,
            item.description
        ));
    }
    output.push_str("\n💡 使い方:\n");
    output.push_str("- 番号を入力してカテゴリを選択\n");
    output.push_str("- または直接キーワードを入力\n");
    output.push_str("- \"exit\", \"quit\", または空文字で終了\n");
    output.push_str(RULE);
    output
}

/// Printed when the user interrupts with Ctrl-C
const INTERRUPTED: &str = "\n👋 プログラムを終了します。";

/// Map a prompt outcome; `None` when the read was interrupted by Ctrl-C
fn read_outcome(result: std::result::Result<String, dialoguer::Error>) -> Result<Option<String>> {
    match result {
        Ok(line) => Ok(Some(line)),
        Err(dialoguer::Error::IO(e)) if e.kind() == io::ErrorKind::Interrupted => Ok(None),
        Err(e) => Err(Error::PromptError {
            message: e.to_string(),
        }),
    }
}

/// Read one line from the terminal (blocking)
fn prompt() -> Result<Option<String>> {
    read_outcome(
        Input::with_theme(&ColorfulTheme::default())
            .with_prompt("検索したいカテゴリの番号またはキーワードを入力してください")
            .allow_empty(true)
            .interact_text(),
    )
}

/// Run the interactive mode
pub async fn run(config: &Config) -> Result<()> {
    let orchestrator = DefaultOrchestrator::from_config(config)?;

    println!("\n🏝️ {}エリア検索 - インタラクティブモード", config.region.name);
    println!("{}", RULE);
    println!("{}", menu());

    loop {
        let input = tokio::task::spawn_blocking(prompt)
            .await
            .map_err(|e| Error::PromptError {
                message: e.to_string(),
            })??;
        // The prompt owns the terminal in raw mode, so Ctrl-C arrives as input
        let Some(input) = input else {
            println!("{}", INTERRUPTED);
            return Ok(());
        };

        let keyword = match parse_selection(&input) {
            Selection::Quit => {
                println!("\n👋 ありがとうございました！");
                return Ok(());
            }
            Selection::Popular(item) => {
                println!("\n{} \"{}\" を検索します...", item.emoji, item.name);
                item.name.to_string()
            }
            Selection::Keyword(keyword) => {
                println!("\n🔍 \"{}\" を検索します...", keyword);
                keyword
            }
        };

        let results = tokio::select! {
            results = orchestrator.search_places(&keyword) => results,
            _ = tokio::signal::ctrl_c() => {
                println!("{}", INTERRUPTED);
                return Ok(());
            }
        };
        if results.is_empty() {
            println!("❌ 該当する場所が見つかりませんでした。別のキーワードをお試しください。");
        } else {
            println!("\n✅ {}件の結果が見つかりました:\n", results.len());
            println!("{}", orchestrator.format_results(&results));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quit_words() {
        assert_eq!(parse_selection(""), Selection::Quit);
        assert_eq!(parse_selection("   "), Selection::Quit);
        assert_eq!(parse_selection("exit"), Selection::Quit);
        assert_eq!(parse_selection("QUIT"), Selection::Quit);
    }

    #[test]
    fn test_menu_numbers() {
        assert_eq!(parse_selection("1"), Selection::Popular(POPULAR_KEYWORDS[0]));
        assert_eq!(
            parse_selection(" 13 "),
            Selection::Popular(POPULAR_KEYWORDS[12])
        );
        // Out of range numbers are searched as keywords
        assert_eq!(parse_selection("0"), Selection::Keyword("0".to_string()));
        assert_eq!(parse_selection("14"), Selection::Keyword("14".to_string()));
    }

    #[test]
    fn test_free_keyword() {
        assert_eq!(
            parse_selection("  ファミマ "),
            Selection::Keyword("ファミマ".to_string())
        );
    }

    #[test]
    fn test_menu_lists_all_entries() {
        let text = menu();
        assert!(text.contains(" 1. 🍽️ レストラン - 食事・グルメ"));
        assert!(text.contains("13. 🍻 居酒屋 - 居酒屋・バー"));
    }

    #[test]
    fn test_interrupted_prompt_ends_session() {
        let interrupted = io::Error::new(io::ErrorKind::Interrupted, "read interrupted");
        assert_eq!(read_outcome(Err(dialoguer::Error::IO(interrupted))).unwrap(), None);
        assert_eq!(
            read_outcome(Ok("カフェ".to_string())).unwrap(),
            Some("カフェ".to_string())
        );

        let broken = io::Error::new(io::ErrorKind::BrokenPipe, "terminal gone");
        assert!(matches!(
            read_outcome(Err(dialoguer::Error::IO(broken))),
            Err(Error::PromptError { .. })
        ));
    }
}
