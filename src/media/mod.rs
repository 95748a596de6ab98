mod types;

pub use types::*;

use crate::config::RenamerConfig;
use crate::scanner::is_hidden;
use once_cell::sync::Lazy;
use regex::Regex;

// Language tag in front of a subtitle extension: ".en", ".jpn"
static LANGUAGE_TAG_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^\.[a-z]{2,3}$").unwrap());

/// Split a file name into `(stem, extension)` on the last dot.
///
/// A leading dot does not start an extension, so `.hidden` has none.
fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) if idx > 0 => name.split_at(idx),
        _ => (name, ""),
    }
}

/// Split a file name into stem and suffix, keeping `.en.vtt` style
/// language-tagged subtitle suffixes together.
pub fn split_suffix<'a>(filename: &'a str, config: &RenamerConfig) -> (&'a str, &'a str) {
    let (stem, ext) = split_extension(filename);

    if config.kind_of(ext) == Some(MediaKind::Subtitle) {
        let (inner_stem, lang) = split_extension(stem);
        if !lang.is_empty() && LANGUAGE_TAG_REGEX.is_match(lang) {
            return (inner_stem, &filename[inner_stem.len()..]);
        }
    }

    (stem, ext)
}

impl MediaFile {
    /// Classify a file name. Hidden files and unknown extensions yield `None`.
    pub fn from_filename(filename: &str, config: &RenamerConfig) -> Option<Self> {
        if is_hidden(filename) {
            return None;
        }

        let (stem, suffix) = split_suffix(filename, config);
        let (_, base_ext) = split_extension(suffix);
        let base_ext = if base_ext.is_empty() { suffix } else { base_ext };
        let kind = config.kind_of(base_ext)?;

        Some(Self {
            filename: filename.to_string(),
            stem: stem.to_string(),
            suffix: suffix.to_string(),
            kind,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> RenamerConfig {
        RenamerConfig::default()
    }

    #[test]
    fn test_split_simple_extension() {
        assert_eq!(split_suffix("Show - 01.mkv", &config()), ("Show - 01", ".mkv"));
    }

    #[test]
    fn test_split_compound_subtitle_suffix() {
        assert_eq!(split_suffix("Show - 01.en.vtt", &config()), ("Show - 01", ".en.vtt"));
        assert_eq!(split_suffix("Show - 01.JPN.ass", &config()), ("Show - 01", ".JPN.ass"));
    }

    #[test]
    fn test_media_never_takes_compound_suffix() {
        assert_eq!(split_suffix("Show - 01.en.mkv", &config()), ("Show - 01.en", ".mkv"));
    }

    #[test]
    fn test_long_tag_is_not_language() {
        assert_eq!(
            split_suffix("Show.S01E01.srt", &config()),
            ("Show.S01E01", ".srt")
        );
    }

    #[test]
    fn test_from_filename_video() {
        let file = MediaFile::from_filename("[Grp] Show - 03 [ABCD].MKV", &config()).unwrap();
        assert_eq!(file.stem, "[Grp] Show - 03 [ABCD]");
        assert_eq!(file.suffix, ".MKV");
        assert_eq!(file.kind, MediaKind::Video);
    }

    #[test]
    fn test_from_filename_subtitle() {
        let file = MediaFile::from_filename("Show_03.en.srt", &config()).unwrap();
        assert_eq!(file.stem, "Show_03");
        assert_eq!(file.suffix, ".en.srt");
        assert_eq!(file.kind, MediaKind::Subtitle);
    }

    #[test]
    fn test_from_filename_rejects_other_files() {
        assert!(MediaFile::from_filename("cover.jpg", &config()).is_none());
        assert!(MediaFile::from_filename("notes", &config()).is_none());
        assert!(MediaFile::from_filename(".hidden.mkv", &config()).is_none());
    }
}
