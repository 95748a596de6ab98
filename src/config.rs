//! Extension tables used to decide which files take part in a rename.
//!
//! The defaults cover common video containers and sidecar subtitle formats.
//! Extra extensions can be supplied through environment variables (or a
//! `.env` file in the working directory):
//!
//! - `EP2JELLYFIN_EXTRA_MEDIA_EXTS`: comma-separated video extensions
//! - `EP2JELLYFIN_EXTRA_SUBTITLE_EXTS`: comma-separated subtitle extensions

use crate::media::MediaKind;
use std::collections::BTreeSet;
use std::env;
use thiserror::Error;

pub const ENV_EXTRA_MEDIA_EXTS: &str = "EP2JELLYFIN_EXTRA_MEDIA_EXTS";
pub const ENV_EXTRA_SUBTITLE_EXTS: &str = "EP2JELLYFIN_EXTRA_SUBTITLE_EXTS";

pub const DEFAULT_MEDIA_EXTS: &[&str] = &[".mkv", ".mp4", ".avi", ".ts", ".m4v", ".wmv", ".flv", ".webm"];
pub const DEFAULT_SUBTITLE_EXTS: &[&str] = &[".srt", ".vtt", ".ass", ".sub", ".idx", ".ssa"];

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Extension '{0}' is configured as both media and subtitle")]
    OverlappingExtension(String),

    #[error("Invalid extension '{0}'")]
    InvalidExtension(String),
}

/// Immutable extension tables. Both sets hold lowercase extensions with a leading dot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenamerConfig {
    media_exts: BTreeSet<String>,
    subtitle_exts: BTreeSet<String>,
}

impl Default for RenamerConfig {
    fn default() -> Self {
        Self {
            media_exts: DEFAULT_MEDIA_EXTS.iter().map(|e| e.to_string()).collect(),
            subtitle_exts: DEFAULT_SUBTITLE_EXTS.iter().map(|e| e.to_string()).collect(),
        }
    }
}

impl RenamerConfig {
    /// Defaults plus the given comma-separated extra lists.
    pub fn with_extra(extra_media: &str, extra_subtitle: &str) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        for ext in parse_extension_list(extra_media)? {
            config.media_exts.insert(ext);
        }
        for ext in parse_extension_list(extra_subtitle)? {
            config.subtitle_exts.insert(ext);
        }

        if let Some(shared) = config.media_exts.intersection(&config.subtitle_exts).next() {
            return Err(ConfigError::OverlappingExtension(shared.clone()));
        }

        Ok(config)
    }

    /// The extension kind, if `ext` (e.g. `.MKV`) belongs to either table.
    pub fn kind_of(&self, ext: &str) -> Option<MediaKind> {
        let ext = ext.to_ascii_lowercase();
        if self.media_exts.contains(&ext) {
            Some(MediaKind::Video)
        } else if self.subtitle_exts.contains(&ext) {
            Some(MediaKind::Subtitle)
        } else {
            None
        }
    }

    pub fn media_exts(&self) -> &BTreeSet<String> {
        &self.media_exts
    }

    pub fn subtitle_exts(&self) -> &BTreeSet<String> {
        &self.subtitle_exts
    }
}

/// Load configuration from environment variables.
pub fn config_from_env() -> Result<RenamerConfig, ConfigError> {
    let extra_media = env::var(ENV_EXTRA_MEDIA_EXTS).unwrap_or_default();
    let extra_subtitle = env::var(ENV_EXTRA_SUBTITLE_EXTS).unwrap_or_default();

    RenamerConfig::with_extra(&extra_media, &extra_subtitle)
}

fn parse_extension_list(raw: &str) -> Result<Vec<String>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            let bare = s.strip_prefix('.').unwrap_or(s);
            if bare.is_empty() || !bare.chars().all(|c| c.is_ascii_alphanumeric()) {
                return Err(ConfigError::InvalidExtension(s.to_string()));
            }
            Ok(format!(".{}", bare.to_ascii_lowercase()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Env var tests share process-wide state
    static ENV_TEST_MUTEX: Mutex<()> = Mutex::new(());

    #[test]
    fn test_defaults_are_disjoint() {
        let config = RenamerConfig::default();
        assert!(config.media_exts().is_disjoint(config.subtitle_exts()));
    }

    #[test]
    fn test_kind_of_is_case_insensitive() {
        let config = RenamerConfig::default();
        assert_eq!(config.kind_of(".MKV"), Some(MediaKind::Video));
        assert_eq!(config.kind_of(".Srt"), Some(MediaKind::Subtitle));
        assert_eq!(config.kind_of(".nfo"), None);
        assert_eq!(config.kind_of(""), None);
    }

    #[test]
    fn test_with_extra_extensions() {
        let config = RenamerConfig::with_extra("ogm, .MOV", "sup").unwrap();
        assert_eq!(config.kind_of(".ogm"), Some(MediaKind::Video));
        assert_eq!(config.kind_of(".mov"), Some(MediaKind::Video));
        assert_eq!(config.kind_of(".sup"), Some(MediaKind::Subtitle));
    }

    #[test]
    fn test_overlapping_extension_rejected() {
        let result = RenamerConfig::with_extra("srt", "");
        assert_eq!(
            result,
            Err(ConfigError::OverlappingExtension(".srt".to_string()))
        );
    }

    #[test]
    fn test_invalid_extension_rejected() {
        let result = RenamerConfig::with_extra("", "en.srt");
        assert!(matches!(result, Err(ConfigError::InvalidExtension(_))));
    }

    #[test]
    fn test_config_from_env() {
        let _lock = ENV_TEST_MUTEX.lock().unwrap();

        env::set_var(ENV_EXTRA_MEDIA_EXTS, "rmvb");
        env::remove_var(ENV_EXTRA_SUBTITLE_EXTS);

        let config = config_from_env().unwrap();
        assert_eq!(config.kind_of(".rmvb"), Some(MediaKind::Video));

        env::remove_var(ENV_EXTRA_MEDIA_EXTS);

        let config = config_from_env().unwrap();
        assert_eq!(config, RenamerConfig::default());
    }
}
