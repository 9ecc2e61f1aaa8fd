//! Show the active configuration

use crate::core::config::Config;
use crate::core::error::Result;

/// Show the first four characters of a credential
fn mask(key: &str) -> String {
    let prefix: String = key.chars().take(4).collect();
    format!("{}…", prefix)
}

/// Render the status report
pub fn render(config: &Config) -> Result<String> {
    let region = config.region()?;
    let b = region.bounds;

    let mut output = String::new();
    output.push_str(&format!("🏝️ エリア: {}\n", region.name));
    output.push_str(&format!(
        "   範囲: N {} / S {} / E {} / W {}\n",
        b.north, b.south, b.east, b.west
    ));
    output.push_str(&format!(
        "   中心: {}, {}\n",
        region.center.lat, region.center.lng
    ));
    output.push_str(&format!(
        "🌐 Overpass: {} (timeout {}s)\n",
        config.overpass.endpoint, config.overpass.timeout_secs
    ));

    match config.ratings.api_key() {
        Some(key) => output.push_str(&format!(
            "⭐ Foursquare: {} ({} = {})\n",
            config.ratings.endpoint,
            config.ratings.api_key_env,
            mask(&key)
        )),
        None => output.push_str(&format!(
            "⚠️ Foursquare: {} が未設定のため、レビュー・評価は表示されません\n",
            config.ratings.api_key_env
        )),
    }

    Ok(output)
}

/// Run the status command
pub fn run(config: &Config) -> Result<()> {
    if let Ok(path) = Config::config_path() {
        let state = if path.exists() { "" } else { " (未作成)" };
        println!("⚙️ 設定ファイル: {}{}", path.display(), state);
    }
    print!("{}", render(config)?);
    Ok(())
}
