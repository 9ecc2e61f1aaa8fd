//! Keyword to Overpass tag resolution
//!
//! A keyword is resolved in three steps:
//! 1. exact lookup in the [`KeywordTagMap`]
//! 2. case-insensitive substring match against every key (either direction)
//! 3. free-text name patterns built from the escaped keyword
//!
//! Resolution never fails; an unmapped keyword degrades to a name search.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Hiragana (U+3040-U+309F) and katakana (U+30A0-U+30FF)
static KANA: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\x{3040}-\x{309F}\x{30A0}-\x{30FF}]").expect("valid kana regex"));

/// Characters escaped before a keyword is embedded in an Overpass regex
const REGEX_METACHARACTERS: &[char] = &[
    '.', '*', '+', '?', '^', '$', '{', '}', '(', ')', '|', '[', ']', '\\',
];

const BUILTIN_KEYWORDS: &[(&str, &[&str])] = &[
    // Food
    ("レストラン", &["amenity=restaurant"]),
    ("食事", &["amenity=restaurant"]),
    ("グルメ", &["amenity=restaurant"]),
    ("カフェ", &["amenity=cafe"]),
    ("喫茶店", &["amenity=cafe"]),
    ("コーヒー", &["amenity=cafe"]),
    // Shops
    ("コンビニ", &["shop=convenience"]),
    ("コンビニエンスストア", &["shop=convenience"]),
    ("薬局", &["amenity=pharmacy"]),
    ("ドラッグストア", &["amenity=pharmacy"]),
    ("スーパー", &["shop=supermarket"]),
    ("スーパーマーケット", &["shop=supermarket"]),
    ("買い物", &["shop=supermarket", "shop=mall"]),
    // Fuel
    ("ガソリンスタンド", &["amenity=fuel"]),
    ("ガソリン", &["amenity=fuel"]),
    ("給油所", &["amenity=fuel"]),
    // Money
    ("ATM", &["amenity=atm"]),
    ("銀行", &["amenity=bank"]),
    // Medical
    ("病院", &["amenity=hospital"]),
    ("医療", &["amenity=hospital", "amenity=clinic"]),
    ("クリニック", &["amenity=clinic"]),
    // Lodging
    ("ホテル", &["tourism=hotel"]),
    ("宿泊", &["tourism=hotel", "tourism=guest_house"]),
    ("宿", &["tourism=hotel", "tourism=guest_house"]),
    // Sightseeing
    ("観光スポット", &["tourism=attraction", "tourism=museum", "tourism=viewpoint"]),
    ("観光地", &["tourism=attraction", "tourism=museum", "tourism=viewpoint"]),
    ("観光", &["tourism=attraction", "tourism=museum", "tourism=viewpoint"]),
    ("名所", &["tourism=attraction", "tourism=viewpoint"]),
    ("博物館", &["tourism=museum"]),
    ("美術館", &["tourism=museum"]),
    ("ビーチ", &["natural=beach"]),
    ("海岸", &["natural=beach"]),
    ("海", &["natural=beach"]),
    // Nightlife
    ("居酒屋", &["amenity=bar", "amenity=pub"]),
    ("バー", &["amenity=bar"]),
    // Transport
    ("レンタカー", &["amenity=car_rental", "shop=car_rental"]),
    ("レンタル", &["amenity=car_rental", "shop=car_rental"]),
    ("レンタ-カー", &["amenity=car_rental", "shop=car_rental"]),
    ("車", &["amenity=car_rental", "shop=car_rental"]),
    ("空港", &["aeroway=aerodrome"]),
    ("交通", &["amenity=bus_station", "railway=station"]),
    ("タクシー", &["amenity=taxi"]),
    ("バス", &["amenity=bus_station"]),
    // English
    ("restaurant", &["amenity=restaurant"]),
    ("cafe", &["amenity=cafe"]),
    ("convenience", &["shop=convenience"]),
    ("pharmacy", &["amenity=pharmacy"]),
    ("fuel", &["amenity=fuel"]),
    ("atm", &["amenity=atm"]),
    ("hospital", &["amenity=hospital"]),
    ("hotel", &["tourism=hotel"]),
    ("attraction", &["tourism=attraction"]),
    ("beach", &["natural=beach"]),
    ("supermarket", &["shop=supermarket"]),
    ("bar", &["amenity=bar"]),
    ("car_rental", &["amenity=car_rental", "shop=car_rental"]),
    ("rental", &["amenity=car_rental", "shop=car_rental"]),
];

/// A menu entry for interactive mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopularKeyword {
    pub name: &'static str,
    pub emoji: &'static str,
    pub description: &'static str,
}

pub const POPULAR_KEYWORDS: &[PopularKeyword] = &[
    PopularKeyword { name: "レストラン", emoji: "🍽️", description: "食事・グルメ" },
    PopularKeyword { name: "カフェ", emoji: "☕", description: "コーヒー・喫茶店" },
    PopularKeyword { name: "コンビニ", emoji: "🏪", description: "コンビニエンスストア" },
    PopularKeyword { name: "薬局", emoji: "💊", description: "ドラッグストア・薬局" },
    PopularKeyword { name: "ガソリンスタンド", emoji: "⛽", description: "ガソリンスタンド" },
    PopularKeyword { name: "ATM", emoji: "🏧", description: "銀行・ATM" },
    PopularKeyword { name: "病院", emoji: "🏥", description: "病院・医療施設" },
    PopularKeyword { name: "ホテル", emoji: "🏨", description: "ホテル・宿泊施設" },
    PopularKeyword { name: "レンタカー", emoji: "🚗", description: "レンタカー・車両レンタル" },
    PopularKeyword { name: "観光スポット", emoji: "🗾", description: "観光地・名所" },
    PopularKeyword { name: "ビーチ", emoji: "🏖️", description: "ビーチ・海岸" },
    PopularKeyword { name: "スーパー", emoji: "🛒", description: "スーパーマーケット" },
    PopularKeyword { name: "居酒屋", emoji: "🍻", description: "居酒屋・バー" },
];

/// Keyword -> ordered tag-expressions. Keys are case-sensitive for exact lookup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeywordTagMap {
    entries: BTreeMap<String, Vec<String>>,
}

impl KeywordTagMap {
    /// The built-in Japanese and English keyword table
    pub fn builtin() -> Self {
        let entries = BUILTIN_KEYWORDS
            .iter()
            .map(|(keyword, tags)| {
                (
                    keyword.to_string(),
                    tags.iter().map(|t| t.to_string()).collect(),
                )
            })
            .collect();
        Self { entries }
    }

    pub fn from_entries(entries: BTreeMap<String, Vec<String>>) -> Self {
        Self { entries }
    }

    /// Merge entries over this map; existing keys are replaced
    pub fn with_entries(mut self, entries: BTreeMap<String, Vec<String>>) -> Self {
        self.entries.extend(entries);
        self
    }

    pub fn get(&self, keyword: &str) -> Option<&[String]> {
        self.entries.get(keyword).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Turns user keywords into Overpass tag filters
#[derive(Debug, Clone)]
pub struct KeywordResolver {
    map: KeywordTagMap,
}

impl KeywordResolver {
    pub fn new(map: KeywordTagMap) -> Self {
        Self { map }
    }

    pub fn map(&self) -> &KeywordTagMap {
        &self.map
    }

    /// Resolve a keyword to tag-expressions or name patterns. Never empty.
    pub fn resolve(&self, keyword: &str) -> Vec<String> {
        let mappings = self.mappings(keyword);
        if !mappings.is_empty() {
            return mappings;
        }
        self.fallback_patterns(keyword)
    }

    /// Exact then fuzzy mapping lookup; empty when no key relates to the keyword
    pub fn mappings(&self, keyword: &str) -> Vec<String> {
        if let Some(tags) = self.map.get(keyword) {
            debug!(keyword, "Exact keyword match");
            return tags.to_vec();
        }

        let normalized = keyword.trim().to_lowercase();
        if normalized.is_empty() {
            return Vec::new();
        }

        // Duplicates are kept; the query builder tolerates repeated filters
        let mut matched_keys = Vec::new();
        let mut tags = Vec::new();
        for (key, key_tags) in self.map.iter() {
            let key_lower = key.to_lowercase();
            if key_lower.contains(&normalized) || normalized.contains(&key_lower) {
                matched_keys.push(key);
                tags.extend(key_tags.iter().cloned());
            }
        }

        if !tags.is_empty() {
            info!(keyword, related = ?matched_keys, "No exact keyword match, searching related keywords");
        }
        tags
    }

    /// Name-based patterns for keywords that map to no tags
    pub fn fallback_patterns(&self, keyword: &str) -> Vec<String> {
        info!(keyword, "Searching by name");
        let safe = escape_pattern(keyword);
        let mut patterns = vec![
            format!("name~\"{}\"", safe),
            format!("name~\".*{}.*\"", safe),
        ];

        // Local places are usually searched by brand rather than category
        if contains_kana(keyword) {
            patterns.push(format!("brand~\"{}\"", safe));
            patterns.push(format!("operator~\"{}\"", safe));
        }

        patterns
    }
}

impl Default for KeywordResolver {
    fn default() -> Self {
        Self::new(KeywordTagMap::builtin())
    }
}

/// Backslash-escape regex metacharacters and double quotes
pub fn escape_pattern(keyword: &str) -> String {
    let mut escaped = String::with_capacity(keyword.len());
    for c in keyword.chars() {
        if REGEX_METACHARACTERS.contains(&c) || c == '"' {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

pub fn contains_kana(text: &str) -> bool {
    KANA.is_match(text)
}
