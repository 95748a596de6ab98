use crate::parser::EpisodeInfo;

/// Build the Jellyfin file name `"<series> S01E05[-E06]<suffix>"`.
///
/// Numbers are padded to two digits and never truncated (`S100E120`).
pub fn format_target_name(
    series_name: &str,
    season_number: u32,
    episode: &EpisodeInfo,
    suffix: &str,
) -> String {
    format!(
        "{} S{:02}{}{}",
        series_name, season_number, episode, suffix
    )
}

/// Folder name for a season, as created for loose files.
pub fn season_folder_name(season_number: u32) -> String {
    format!("Season {:02}", season_number)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_single_episode() {
        let info = EpisodeInfo::single(12).unwrap();
        assert_eq!(
            format_target_name("Show Name", 1, &info, ".mkv"),
            "Show Name S01E12.mkv"
        );
    }

    #[test]
    fn test_format_episode_span() {
        let info = EpisodeInfo::new(3, Some(4)).unwrap();
        assert_eq!(
            format_target_name("Show", 1, &info, ".mp4"),
            "Show S01E03-E04.mp4"
        );
    }

    #[test]
    fn test_format_keeps_compound_suffix() {
        let info = EpisodeInfo::single(2).unwrap();
        assert_eq!(
            format_target_name("Show", 2, &info, ".en.vtt"),
            "Show S02E02.en.vtt"
        );
    }

    #[test]
    fn test_format_large_numbers_not_truncated() {
        let info = EpisodeInfo::new(100, Some(101)).unwrap();
        assert_eq!(
            format_target_name("One Piece", 123, &info, ".mkv"),
            "One Piece S123E100-E101.mkv"
        );
    }

    #[test]
    fn test_season_folder_name() {
        assert_eq!(season_folder_name(1), "Season 01");
        assert_eq!(season_folder_name(12), "Season 12");
    }
}
