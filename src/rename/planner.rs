use std::path::{Path, PathBuf};
use tracing::{debug, info, trace};

use crate::config::RenamerConfig;
use crate::media::MediaFile;
use crate::parser::{parse_season_folder, EpisodeExtractor, NameNormalizer};
use crate::scanner::{list_directory, DirectoryEntry, ScannerError};
use crate::validator::check_collisions;

use super::name_builder::{format_target_name, season_folder_name};
use super::types::{
    ImplicitSeason, RenamePlanEntry, SeasonPlan, SeasonSlot, SeasonUnit, SeriesLayout, SeriesUnit,
};

/// Season number given to loose files in a series folder
pub const IMPLICIT_SEASON: u32 = 1;

/// What the command-line target folder turned out to be
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// A single series folder
    Series(PathBuf),
    /// A folder of series folders
    Library(Vec<PathBuf>),
}

/// Builds rename plans for series folders.
#[derive(Debug, Clone)]
pub struct SeasonPlanner {
    config: RenamerConfig,
    normalizer: NameNormalizer,
    extractor: EpisodeExtractor,
}

impl SeasonPlanner {
    pub fn new(config: RenamerConfig) -> Self {
        Self::with_parts(
            config,
            NameNormalizer::default(),
            EpisodeExtractor::default(),
        )
    }

    /// Planner with custom release-token tables
    pub fn with_parts(
        config: RenamerConfig,
        normalizer: NameNormalizer,
        extractor: EpisodeExtractor,
    ) -> Self {
        Self {
            config,
            normalizer,
            extractor,
        }
    }

    /// Decide whether `target` is one series or a library of series.
    ///
    /// A folder is a series when it holds season folders or loose media files.
    pub fn resolve_target(&self, target: &Path) -> Result<Target, ScannerError> {
        let entries = list_directory(target)?;

        let has_seasons = entries
            .iter()
            .any(|e| e.is_dir() && parse_season_folder(&e.name).is_some());
        let has_media = !self.media_files(&entries).is_empty();

        if has_seasons || has_media {
            debug!(path = ?target, has_seasons, has_media, "Target is a series folder");
            return Ok(Target::Series(target.to_path_buf()));
        }

        let series: Vec<PathBuf> = entries
            .into_iter()
            .filter(DirectoryEntry::is_dir)
            .map(|e| e.path)
            .collect();

        debug!(path = ?target, count = series.len(), "Target is a library folder");

        Ok(Target::Library(series))
    }

    /// Plan every season of the series at `series_path`.
    ///
    /// `name_override` replaces the name derived from the folder.
    pub fn plan_series(
        &self,
        series_path: &Path,
        name_override: Option<&str>,
    ) -> Result<SeriesUnit, ScannerError> {
        let raw_folder_name = series_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| series_path.display().to_string());

        let display_name = match name_override {
            Some(name) => name.to_string(),
            None => self.normalizer.display_name(&raw_folder_name),
        };

        info!(folder = %raw_folder_name, name = %display_name, "Planning series");

        let entries = list_directory(series_path)?;

        let mut season_dirs: Vec<(u32, &DirectoryEntry)> = entries
            .iter()
            .filter(|e| e.is_dir())
            .filter_map(|e| parse_season_folder(&e.name).map(|n| (n, e)))
            .collect();
        season_dirs.sort_by(|(a, ea), (b, eb)| a.cmp(b).then_with(|| ea.name.cmp(&eb.name)));

        let layout = if !season_dirs.is_empty() {
            let slots = season_dirs
                .into_iter()
                .map(|(number, entry)| self.plan_season_slot(&display_name, number, entry))
                .collect();
            SeriesLayout::Seasons(slots)
        } else {
            let loose = self.media_files(&entries);
            if loose.is_empty() {
                debug!(folder = %raw_folder_name, "No seasons and no loose files");
                SeriesLayout::Empty
            } else {
                let target_dir = series_path.join(season_folder_name(IMPLICIT_SEASON));
                let season = SeasonUnit {
                    number: IMPLICIT_SEASON,
                    folder_name: season_folder_name(IMPLICIT_SEASON),
                    path: target_dir.clone(),
                    files: loose.clone(),
                };
                SeriesLayout::Implicit(ImplicitSeason {
                    target_dir,
                    files: loose,
                    plan: self.plan_season(&display_name, season),
                })
            }
        };

        Ok(SeriesUnit {
            raw_folder_name,
            display_name,
            path: series_path.to_path_buf(),
            layout,
        })
    }

    fn plan_season_slot(&self, series_name: &str, number: u32, entry: &DirectoryEntry) -> SeasonSlot {
        if number == 0 {
            debug!(folder = %entry.name, "Leaving specials untouched");
            return SeasonSlot::Specials {
                folder_name: entry.name.clone(),
            };
        }

        match self.plan_season_dir(series_name, number, &entry.name, &entry.path) {
            Ok(plan) => SeasonSlot::Planned(plan),
            Err(e) => SeasonSlot::Unreadable {
                folder_name: entry.name.clone(),
                error: e.to_string(),
            },
        }
    }

    /// List a season folder and plan its files.
    pub fn plan_season_dir(
        &self,
        series_name: &str,
        number: u32,
        folder_name: &str,
        path: &Path,
    ) -> Result<SeasonPlan, ScannerError> {
        let entries = list_directory(path)?;
        let season = SeasonUnit {
            number,
            folder_name: folder_name.to_string(),
            path: path.to_path_buf(),
            files: self.media_files(&entries),
        };

        Ok(self.plan_season(series_name, season))
    }

    /// Classify each file of `season` and run the collision check.
    pub fn plan_season(&self, series_name: &str, season: SeasonUnit) -> SeasonPlan {
        let mut entries = Vec::new();
        let mut skipped = Vec::new();

        for file in &season.files {
            match self.extractor.extract(&file.stem) {
                Some(episode) => {
                    let target_name =
                        format_target_name(series_name, season.number, &episode, &file.suffix);
                    trace!(from = %file.filename, to = %target_name, "Planned rename");
                    entries.push(RenamePlanEntry {
                        source: file.clone(),
                        episode,
                        target_name,
                    });
                }
                None => {
                    debug!(file = %file.filename, "Unclassifiable file");
                    skipped.push(file.clone());
                }
            }
        }

        let mut plan = SeasonPlan::new(season);
        plan.entries = entries;
        plan.skipped = skipped;

        check_collisions(plan)
    }

    fn media_files(&self, entries: &[DirectoryEntry]) -> Vec<MediaFile> {
        entries
            .iter()
            .filter(|e| e.is_file())
            .filter_map(|e| MediaFile::from_filename(&e.name, &self.config))
            .collect()
    }
}

impl Default for SeasonPlanner {
    fn default() -> Self {
        Self::new(RenamerConfig::default())
    }
}
