use crate::media::{MediaFile, MediaKind};
use crate::parser::EpisodeInfo;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Whether a run only prints the plan or performs it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    Preview,
    Apply,
}

impl RunMode {
    pub fn from_apply_flag(apply: bool) -> Self {
        if apply {
            RunMode::Apply
        } else {
            RunMode::Preview
        }
    }

    pub fn is_apply(&self) -> bool {
        *self == RunMode::Apply
    }
}

/// A season folder and the media files directly inside it
#[derive(Debug, Clone)]
pub struct SeasonUnit {
    pub number: u32,
    pub folder_name: String,
    pub path: PathBuf,
    pub files: Vec<MediaFile>,
}

/// One planned rename inside a season folder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenamePlanEntry {
    pub source: MediaFile,
    pub episode: EpisodeInfo,
    pub target_name: String,
}

impl RenamePlanEntry {
    /// The file already carries its target name
    pub fn is_unchanged(&self) -> bool {
        self.source.filename == self.target_name
    }
}

/// Rename plan for one season.
///
/// `entries` holds every classified file, including ones that are already
/// named correctly, so that the collision check sees all claims on a name.
#[derive(Debug, Clone)]
pub struct SeasonPlan {
    pub season: SeasonUnit,
    pub entries: Vec<RenamePlanEntry>,
    pub skipped: Vec<MediaFile>,
    /// Target name -> every source file that would receive it
    pub collisions: BTreeMap<String, Vec<String>>,
}

impl SeasonPlan {
    pub fn new(season: SeasonUnit) -> Self {
        Self {
            season,
            entries: Vec::new(),
            skipped: Vec::new(),
            collisions: BTreeMap::new(),
        }
    }

    /// Safe to apply: no two sources share a target
    pub fn is_safe(&self) -> bool {
        self.collisions.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.skipped.is_empty()
    }
}

/// A season folder as seen by the planner
#[derive(Debug, Clone)]
pub enum SeasonSlot {
    /// Season 0: left alone
    Specials { folder_name: String },
    Planned(SeasonPlan),
    /// The folder could not be listed
    Unreadable { folder_name: String, error: String },
}

/// Loose files in a series folder without season folders. They move into
/// `Season 01`; `plan` is computed as if they were already there.
#[derive(Debug, Clone)]
pub struct ImplicitSeason {
    pub target_dir: PathBuf,
    pub files: Vec<MediaFile>,
    pub plan: SeasonPlan,
}

#[derive(Debug, Clone)]
pub enum SeriesLayout {
    Seasons(Vec<SeasonSlot>),
    Implicit(ImplicitSeason),
    /// Nothing to do
    Empty,
}

/// A series folder with its display name and planned seasons
#[derive(Debug, Clone)]
pub struct SeriesUnit {
    pub raw_folder_name: String,
    pub display_name: String,
    pub path: PathBuf,
    pub layout: SeriesLayout,
}

// ============ Reports ============

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OutcomeStatus {
    /// Preview only
    Planned,
    Done,
    /// Already carries the target name
    Unchanged,
    Failed { error: String },
}

/// What happened to one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileOutcome {
    pub from: String,
    pub to: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<MediaKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub episode: Option<EpisodeInfo>,
    #[serde(flatten)]
    pub status: OutcomeStatus,
}

impl FileOutcome {
    pub fn new(from: impl Into<String>, to: impl Into<String>, status: OutcomeStatus) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            kind: None,
            episode: None,
            status,
        }
    }

    /// Outcome of a planned rename, carrying the file kind and episode
    pub fn for_entry(entry: &RenamePlanEntry, status: OutcomeStatus) -> Self {
        Self {
            kind: Some(entry.source.kind),
            episode: Some(entry.episode),
            ..Self::new(&entry.source.filename, &entry.target_name, status)
        }
    }

    /// Outcome of moving `file` to `to`
    pub fn for_move(file: &MediaFile, to: impl Into<String>, status: OutcomeStatus) -> Self {
        Self {
            kind: Some(file.kind),
            ..Self::new(&file.filename, to, status)
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.status, OutcomeStatus::Failed { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SeasonStatus {
    Specials,
    Empty,
    Previewed,
    Applied,
    /// Collisions found; nothing in the season was renamed
    Aborted,
    Unreadable { error: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct SeasonReport {
    pub folder_name: String,
    pub number: Option<u32>,
    #[serde(flatten)]
    pub status: SeasonStatus,
    pub skipped: Vec<String>,
    pub collisions: BTreeMap<String, Vec<String>>,
    pub renames: Vec<FileOutcome>,
}

impl SeasonReport {
    pub fn new(folder_name: impl Into<String>, number: Option<u32>, status: SeasonStatus) -> Self {
        Self {
            folder_name: folder_name.into(),
            number,
            status,
            skipped: Vec::new(),
            collisions: BTreeMap::new(),
            renames: Vec::new(),
        }
    }
}

/// Moves of loose files into a synthesized season folder
#[derive(Debug, Clone, Serialize)]
pub struct RelocationReport {
    pub target_folder: String,
    pub moves: Vec<FileOutcome>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SeriesReport {
    pub folder_name: String,
    pub display_name: String,
    pub relocation: Option<RelocationReport>,
    pub seasons: Vec<SeasonReport>,
    pub error: Option<String>,
}

impl SeriesReport {
    pub fn new(folder_name: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            folder_name: folder_name.into(),
            display_name: display_name.into(),
            relocation: None,
            seasons: Vec::new(),
            error: None,
        }
    }

    pub fn failed(folder_name: impl Into<String>, error: impl Into<String>) -> Self {
        let folder_name = folder_name.into();
        Self {
            display_name: folder_name.clone(),
            folder_name,
            relocation: None,
            seasons: Vec::new(),
            error: Some(error.into()),
        }
    }
}

/// Counters over a whole run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub planned: usize,
    pub renamed: usize,
    pub unchanged: usize,
    pub skipped: usize,
    pub aborted_seasons: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub mode: RunMode,
    pub series: Vec<SeriesReport>,
}

impl RunReport {
    pub fn new(mode: RunMode) -> Self {
        Self {
            mode,
            series: Vec::new(),
        }
    }

    pub fn add_series(&mut self, report: SeriesReport) {
        self.series.push(report);
    }

    pub fn summary(&self) -> RunSummary {
        let mut summary = RunSummary::default();

        for series in &self.series {
            if series.error.is_some() {
                summary.failed += 1;
            }

            if let Some(relocation) = &series.relocation {
                summary.failed += relocation.moves.iter().filter(|m| m.is_failed()).count();
                if relocation.error.is_some() {
                    summary.failed += 1;
                }
            }

            for season in &series.seasons {
                summary.skipped += season.skipped.len();

                match season.status {
                    SeasonStatus::Aborted => summary.aborted_seasons += 1,
                    SeasonStatus::Unreadable { .. } => summary.failed += 1,
                    _ => {}
                }

                for rename in &season.renames {
                    match rename.status {
                        OutcomeStatus::Planned => summary.planned += 1,
                        OutcomeStatus::Done => summary.renamed += 1,
                        OutcomeStatus::Unchanged => summary.unchanged += 1,
                        OutcomeStatus::Failed { .. } => summary.failed += 1,
                    }
                }
            }
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::MediaKind;

    fn media(filename: &str) -> MediaFile {
        let (stem, suffix) = filename.rsplit_once('.').unwrap();
        MediaFile {
            filename: filename.to_string(),
            stem: stem.to_string(),
            suffix: format!(".{}", suffix),
            kind: MediaKind::Video,
        }
    }

    #[test]
    fn test_run_mode_from_flag() {
        assert_eq!(RunMode::from_apply_flag(true), RunMode::Apply);
        assert_eq!(RunMode::from_apply_flag(false), RunMode::Preview);
        assert!(!RunMode::Preview.is_apply());
    }

    #[test]
    fn test_unchanged_entry() {
        let entry = RenamePlanEntry {
            source: media("Show S01E01.mkv"),
            episode: EpisodeInfo::single(1).unwrap(),
            target_name: "Show S01E01.mkv".to_string(),
        };
        assert!(entry.is_unchanged());
    }

    #[test]
    fn test_summary_counts() {
        let mut season = SeasonReport::new("Season 01", Some(1), SeasonStatus::Applied);
        season.skipped.push("extras.mkv".to_string());
        season.renames.push(FileOutcome::new("a.mkv", "A S01E01.mkv", OutcomeStatus::Done));
        season.renames.push(FileOutcome::new(
            "b.mkv",
            "A S01E02.mkv",
            OutcomeStatus::Failed {
                error: "denied".to_string(),
            },
        ));
        season.renames.push(FileOutcome::new("A S01E03.mkv", "A S01E03.mkv", OutcomeStatus::Unchanged));

        let aborted = SeasonReport::new("Season 02", Some(2), SeasonStatus::Aborted);

        let mut series = SeriesReport::new("A", "A");
        series.seasons.push(season);
        series.seasons.push(aborted);

        let mut report = RunReport::new(RunMode::Apply);
        report.add_series(series);
        report.add_series(SeriesReport::failed("B", "Permission denied"));

        let summary = report.summary();
        assert_eq!(summary.renamed, 1);
        assert_eq!(summary.unchanged, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.aborted_seasons, 1);
        assert_eq!(summary.failed, 2);
        assert_eq!(summary.planned, 0);
    }

    #[test]
    fn test_outcome_serializes_flat() {
        let outcome = FileOutcome::new(
            "a.mkv",
            "A S01E01.mkv",
            OutcomeStatus::Failed {
                error: "exists".to_string(),
            },
        );
        let json = serde_json::to_value(&outcome).unwrap();

        assert_eq!(json["from"], "a.mkv");
        assert_eq!(json["status"], "failed");
        assert_eq!(json["error"], "exists");
        assert!(json.get("kind").is_none());
    }

    #[test]
    fn test_entry_outcome_carries_kind_and_episode() {
        let entry = RenamePlanEntry {
            source: media("Show - 03.mkv"),
            episode: EpisodeInfo::new(3, Some(4)).unwrap(),
            target_name: "Show S01E03-E04.mkv".to_string(),
        };

        let outcome = FileOutcome::for_entry(&entry, OutcomeStatus::Planned);
        let json = serde_json::to_value(&outcome).unwrap();

        assert_eq!(json["to"], "Show S01E03-E04.mkv");
        assert_eq!(json["kind"], "video");
        assert_eq!(json["episode"]["start"], 3);
        assert_eq!(json["episode"]["end"], 4);
    }
}
