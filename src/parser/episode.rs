use super::{strip_tags, EpisodeInfo, EpisodeMatch, Recognizer, RELEASE_TOKENS};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

static DEFAULT_EXTRACTOR: Lazy<EpisodeExtractor> =
    Lazy::new(|| EpisodeExtractor::with_tokens(RELEASE_TOKENS).unwrap());

// S01E05, s1e05, S01E05-E06, S01E05 - E06
static SEASON_EPISODE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)S\d+E(\d+)(?:\s*-\s*E(\d+))?").unwrap());

// Episode 5, Episode 05-06
static EPISODE_WORD_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Episode\s+(\d+)(?:\s*-\s*(\d+)\b)?").unwrap());

// ep05, Ep.05, EP 5-6; the marker starts the stem or follows a space, dot or dash.
// The number must not run into letters, so `Ep.1080p` is not episode 1080.
static EPISODE_ABBREV_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(?:^|[\s.\-])EP\.?\s*(\d+)(?:\s*-\s*(?:EP\.?\s*)?(\d+))?(?:$|[^0-9a-z]|V\d)",
    )
    .unwrap()
});

// _05, " - 05", " 05", optionally followed by v2 or END
static TRAILING_NUMBER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:_|\s+-\s+|\s)(\d+)(?:\s*(?:V\d+|END))?\s*$").unwrap());

/// Recovers episode numbers from file stems.
///
/// Recognizers run in [`Recognizer::PRIORITY`] order and the first one whose
/// pattern matches decides the outcome. A match whose numbers do not form a
/// valid [`EpisodeInfo`] (episode 0, reversed span) makes the file
/// unclassifiable rather than falling through to a looser pattern.
///
/// Release tokens (`1080p`, `x265`, ...) are removed from the stem before the
/// trailing-number recognizer runs, so `Show - 05 1080p` still yields 5.
#[derive(Debug, Clone)]
pub struct EpisodeExtractor {
    release_tokens: Regex,
}

impl Default for EpisodeExtractor {
    fn default() -> Self {
        DEFAULT_EXTRACTOR.clone()
    }
}

impl Recognizer {
    pub const PRIORITY: [Recognizer; 4] = [
        Recognizer::SeasonEpisode,
        Recognizer::EpisodeWord,
        Recognizer::EpisodeAbbrev,
        Recognizer::TrailingNumber,
    ];
}

impl EpisodeExtractor {
    pub fn with_tokens(tokens: &[&str]) -> Result<Self, regex::Error> {
        Ok(Self {
            release_tokens: Regex::new(&format!(r"(?i)\b(?:{})\b", tokens.join("|")))?,
        })
    }

    pub fn extract(&self, stem: &str) -> Option<EpisodeInfo> {
        self.identify(stem).map(|m| m.info)
    }

    pub fn identify(&self, stem: &str) -> Option<EpisodeMatch> {
        let cleaned = strip_tags(stem);
        let cleaned = cleaned.trim();

        for recognizer in Recognizer::PRIORITY {
            let Some(outcome) = self.recognize(recognizer, cleaned) else {
                continue;
            };

            trace!(stem = %stem, recognizer = ?recognizer, info = ?outcome, "Recognizer matched");

            return outcome.map(|info| EpisodeMatch { info, recognizer });
        }

        trace!(stem = %stem, "No recognizer matched");
        None
    }

    /// `None` when the pattern does not match; `Some(None)` when it matches
    /// but the numbers are unusable.
    fn recognize(&self, recognizer: Recognizer, stem: &str) -> Option<Option<EpisodeInfo>> {
        match recognizer {
            Recognizer::SeasonEpisode => capture_span(&SEASON_EPISODE_REGEX, stem),
            Recognizer::EpisodeWord => capture_span(&EPISODE_WORD_REGEX, stem),
            Recognizer::EpisodeAbbrev => capture_span(&EPISODE_ABBREV_REGEX, stem),
            Recognizer::TrailingNumber => {
                // Underscores act as plain separators here; as word characters
                // they would hide tokens from `\b`
                let spaced = stem.replace('_', " ");
                let stripped = self.release_tokens.replace_all(&spaced, "");
                let stripped = stripped
                    .trim_end_matches(|c: char| c.is_whitespace() || matches!(c, '.' | '-' | '_'));
                capture_span(&TRAILING_NUMBER_REGEX, stripped)
            }
        }
    }
}

fn capture_span(regex: &Regex, text: &str) -> Option<Option<EpisodeInfo>> {
    let captures = regex.captures(text)?;

    let start = captures.get(1).and_then(|m| m.as_str().parse::<u32>().ok());
    let end = match captures.get(2) {
        Some(m) => match m.as_str().parse::<u32>() {
            Ok(n) => Some(n),
            Err(_) => return Some(None),
        },
        None => None,
    };

    Some(start.and_then(|start| EpisodeInfo::new(start, end)))
}

/// Extract with the default token table.
pub fn extract_episode(stem: &str) -> Option<EpisodeInfo> {
    DEFAULT_EXTRACTOR.extract(stem)
}
