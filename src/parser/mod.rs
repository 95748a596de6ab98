mod episode;
mod series_name;
mod types;

pub use episode::{extract_episode, EpisodeExtractor};
pub use series_name::{normalize_series_name, NameNormalizer};
pub use types::*;

use once_cell::sync::Lazy;
use regex::Regex;

/// Resolution, source and codec tokens that mark the start of release info.
/// Regex fragments, matched case-insensitively as whole words.
pub const RELEASE_TOKENS: &[&str] = &[
    r"\d{3,4}p",
    "WEBRip",
    r"WEB[.-]DL",
    "BluRay",
    "BDRip",
    "DVDRip",
    "HDTV",
    "DVD",
    "x264",
    "x265",
    r"h\.?264",
    r"h\.?265",
    "HEVC",
    "AVC",
    "AAC",
    "FLAC",
    "DTS",
    "10bit",
];

/// `S01`, also when directly followed by an episode (`S01E01`).
pub const SEASON_MARKER: &str = r"S\d{2}(?:E\d+)?";

static BRACKETS_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[.*?\]").unwrap());
static PARENS_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(.*?\)").unwrap());

// Season folder: "Season 1", "season 02", "Season 01 - Extras"
static SEASON_FOLDER_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^Season\s*(\d+)").unwrap());

/// Remove `[...]` spans, then `(...)` spans. Surrounding whitespace is kept.
pub fn strip_tags(name: &str) -> String {
    let without_brackets = BRACKETS_REGEX.replace_all(name, "");
    PARENS_REGEX.replace_all(&without_brackets, "").into_owned()
}

/// The season number of a `Season NN` folder name.
pub fn parse_season_folder(name: &str) -> Option<u32> {
    let captures = SEASON_FOLDER_REGEX.captures(name)?;
    captures.get(1)?.as_str().parse().ok()
}
