use super::{strip_tags, RELEASE_TOKENS, SEASON_MARKER};
use once_cell::sync::Lazy;
use regex::Regex;

static DEFAULT_NORMALIZER: Lazy<NameNormalizer> =
    Lazy::new(|| NameNormalizer::with_tokens(RELEASE_TOKENS).unwrap());

// " - 01-12" batch ranges trailing the title
static BATCH_RANGE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+-\s+\d.*$").unwrap());
static TRAILING_SEPARATORS_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s-]+$").unwrap());
static WHITESPACE_RUN_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s{2,}").unwrap());

/// Derives a series display name from a release-style folder name.
#[derive(Debug, Clone)]
pub struct NameNormalizer {
    technical_tail: Regex,
}

impl Default for NameNormalizer {
    fn default() -> Self {
        DEFAULT_NORMALIZER.clone()
    }
}

impl NameNormalizer {
    /// Build a normalizer that truncates at the season marker or any of `tokens`
    /// (regex fragments, matched case-insensitively as whole words).
    pub fn with_tokens(tokens: &[&str]) -> Result<Self, regex::Error> {
        let alternation = std::iter::once(SEASON_MARKER)
            .chain(tokens.iter().copied())
            .collect::<Vec<_>>()
            .join("|");

        Ok(Self {
            technical_tail: Regex::new(&format!(r"(?i)\s+(?:{})\b.*$", alternation))?,
        })
    }

    /// Clean `raw_folder_name`. May return an empty string when the whole
    /// name is tags or release info.
    pub fn normalize(&self, raw_folder_name: &str) -> String {
        let name = strip_tags(raw_folder_name);
        let name = self.technical_tail.replace(&name, "");
        let name = BATCH_RANGE_REGEX.replace(&name, "");
        let name = TRAILING_SEPARATORS_REGEX.replace(&name, "");
        let name = WHITESPACE_RUN_REGEX.replace_all(&name, " ");

        name.trim().to_string()
    }

    /// Like [`normalize`](Self::normalize), falling back to the raw name when
    /// nothing usable is left.
    pub fn display_name(&self, raw_folder_name: &str) -> String {
        let name = self.normalize(raw_folder_name);
        if name.is_empty() {
            raw_folder_name.to_string()
        } else {
            name
        }
    }
}

/// Normalize with the default token table.
pub fn normalize_series_name(raw_folder_name: &str) -> String {
    DEFAULT_NORMALIZER.normalize(raw_folder_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_year_and_tags() {
        assert_eq!(normalize_series_name("Show Name (2021) [1080p]"), "Show Name");
    }

    #[test]
    fn test_strips_group_prefix() {
        assert_eq!(
            normalize_series_name("[SubsPlease] Frieren (2023) [1080p] [HEVC]"),
            "Frieren"
        );
    }

    #[test]
    fn test_truncates_at_release_info() {
        assert_eq!(
            normalize_series_name("Cowboy Bebop 1080p BluRay x265 10bit"),
            "Cowboy Bebop"
        );
        assert_eq!(
            normalize_series_name("Mushishi S01 BDRip AAC"),
            "Mushishi"
        );
        assert_eq!(
            normalize_series_name("Planetes WEB-DL h.264"),
            "Planetes"
        );
    }

    #[test]
    fn test_markers_are_whole_words() {
        assert_eq!(normalize_series_name("Avatar Legends"), "Avatar Legends");
        assert_eq!(normalize_series_name("Dvdland Stories"), "Dvdland Stories");
    }

    #[test]
    fn test_marker_must_follow_whitespace() {
        // Season markers glued to the title are not release info
        assert_eq!(normalize_series_name("Fate-S01"), "Fate-S01");
    }

    #[test]
    fn test_strips_batch_range() {
        assert_eq!(normalize_series_name("Texhnolyze - 01-22"), "Texhnolyze");
        assert_eq!(normalize_series_name("Texhnolyze - 01-22 (BD)"), "Texhnolyze");
    }

    #[test]
    fn test_cleans_separators_and_spacing() {
        assert_eq!(normalize_series_name("Great   Pretender  -  "), "Great Pretender");
        assert_eq!(normalize_series_name("[Grp]  Haibane   Renmei"), "Haibane Renmei");
    }

    #[test]
    fn test_case_insensitive_markers() {
        assert_eq!(normalize_series_name("Show webrip"), "Show");
        assert_eq!(normalize_series_name("Show X264"), "Show");
    }

    #[test]
    fn test_degenerate_name_falls_back() {
        let normalizer = NameNormalizer::default();
        assert_eq!(normalizer.normalize("[1080p] (2020)"), "");
        assert_eq!(normalizer.display_name("[1080p] (2020)"), "[1080p] (2020)");
    }

    #[test]
    fn test_custom_tokens() {
        let normalizer = NameNormalizer::with_tokens(&["REMUX"]).unwrap();
        assert_eq!(normalizer.normalize("Show REMUX 1080p"), "Show");
        assert_eq!(normalizer.normalize("Show 1080p"), "Show 1080p");
    }
}
