use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::media::MediaFile;
use crate::ui::Ui;
use crate::validator::format_collision_message;

use super::planner::SeasonPlanner;
use super::types::{
    FileOutcome, ImplicitSeason, OutcomeStatus, RelocationReport, RenamePlanEntry, RunMode,
    RunReport, SeasonPlan, SeasonReport, SeasonSlot, SeasonStatus, SeriesLayout, SeriesReport, SeriesUnit,
};

/// Errors from the filesystem primitives used while applying a plan
#[derive(Error, Debug)]
pub enum ExecuteError {
    #[error("Destination already exists: {0}")]
    DestinationExists(String),

    #[error("Failed to rename '{from}' to '{to}': {source}")]
    RenameFailed {
        from: String,
        to: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to create folder '{path}': {source}")]
    CreateDirFailed {
        path: String,
        #[source]
        source: io::Error,
    },
}

impl ExecuteError {
    /// Short cause for per-file report lines
    pub fn reason(&self) -> String {
        match self {
            ExecuteError::DestinationExists(_) => "destination already exists".to_string(),
            ExecuteError::RenameFailed { source, .. } => source.to_string(),
            ExecuteError::CreateDirFailed { source, .. } => source.to_string(),
        }
    }
}

/// Move `from` to `to`, refusing to replace an existing file.
///
/// A destination that differs from the source only in letter case is
/// allowed, since on case-insensitive filesystems it reports as existing.
pub fn rename_no_clobber(from: &Path, to: &Path) -> Result<(), ExecuteError> {
    let case_only = match (from.file_name(), to.file_name()) {
        (Some(a), Some(b)) => {
            from.parent() == to.parent()
                && a != b
                && a.to_string_lossy().eq_ignore_ascii_case(&b.to_string_lossy())
        }
        _ => false,
    };

    if to.exists() && !case_only {
        return Err(ExecuteError::DestinationExists(to.display().to_string()));
    }

    fs::rename(from, to).map_err(|e| ExecuteError::RenameFailed {
        from: from.display().to_string(),
        to: to.display().to_string(),
        source: e,
    })
}

/// Create `path` unless it already exists as a folder.
pub fn create_dir_idempotent(path: &Path) -> Result<(), ExecuteError> {
    fs::create_dir_all(path).map_err(|e| ExecuteError::CreateDirFailed {
        path: path.display().to_string(),
        source: e,
    })
}

/// Prints or applies planned series, one season at a time.
///
/// Within a season, skipped files are reported first, then collisions, then
/// the renames. A season with collisions is never applied.
pub struct PlanExecutor<'a> {
    planner: &'a SeasonPlanner,
    ui: &'a mut Ui,
    mode: RunMode,
}

impl<'a> PlanExecutor<'a> {
    pub fn new(planner: &'a SeasonPlanner, ui: &'a mut Ui, mode: RunMode) -> Self {
        Self { planner, ui, mode }
    }

    /// Plan and run every series folder in order. A series that cannot be
    /// listed is reported as failed and the rest still run.
    pub fn run_all(
        &mut self,
        series_paths: &[PathBuf],
        name_override: Option<&str>,
    ) -> RunReport {
        let mut report = RunReport::new(self.mode);

        for path in series_paths {
            match self.planner.plan_series(path, name_override) {
                Ok(series) => report.add_series(self.execute(&series)),
                Err(e) => {
                    let folder_name = path
                        .file_name()
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_else(|| path.display().to_string());

                    warn!(folder = %folder_name, error = %e, "Cannot plan series");
                    self.ui.series_header(&folder_name, &folder_name);
                    self.ui.error(&e.to_string());
                    report.add_series(SeriesReport::failed(folder_name, e.to_string()));
                }
            }
        }

        report
    }

    pub fn execute(&mut self, series: &SeriesUnit) -> SeriesReport {
        let mut report = SeriesReport::new(&series.raw_folder_name, &series.display_name);

        match &series.layout {
            SeriesLayout::Empty => {
                debug!(folder = %series.raw_folder_name, "Nothing to do");
            }
            SeriesLayout::Seasons(slots) => {
                self.ui
                    .series_header(&series.raw_folder_name, &series.display_name);
                for slot in slots {
                    report.seasons.push(self.run_slot(slot));
                }
            }
            SeriesLayout::Implicit(implicit) => {
                self.ui
                    .series_header(&series.raw_folder_name, &series.display_name);
                self.run_implicit(series, implicit, &mut report);
            }
        }

        report
    }

    fn run_slot(&mut self, slot: &SeasonSlot) -> SeasonReport {
        match slot {
            SeasonSlot::Specials { folder_name } => {
                self.ui.section(&format!("{} (specials, left as is)", folder_name));
                SeasonReport::new(folder_name, Some(0), SeasonStatus::Specials)
            }
            SeasonSlot::Unreadable { folder_name, error } => {
                self.ui.section(folder_name);
                self.ui.error(&format!("Cannot read folder: {}", error));
                warn!(folder = %folder_name, error = %error, "Season folder unreadable");
                SeasonReport::new(
                    folder_name,
                    None,
                    SeasonStatus::Unreadable {
                        error: error.clone(),
                    },
                )
            }
            SeasonSlot::Planned(plan) => {
                self.ui.section(&plan.season.folder_name);
                self.run_season(plan, self.mode)
            }
        }
    }

    fn run_implicit(
        &mut self,
        series: &SeriesUnit,
        implicit: &ImplicitSeason,
        report: &mut SeriesReport,
    ) {
        let folder_name = implicit.plan.season.folder_name.clone();

        self.ui.dim(&format!(
            "  Creating {} and moving {} files:",
            folder_name,
            implicit.files.len()
        ));

        let mut relocation = RelocationReport {
            target_folder: folder_name.clone(),
            moves: Vec::new(),
            error: None,
        };

        if !self.mode.is_apply() {
            for file in &implicit.files {
                self.ui
                    .dim(&format!("    -> {}/{}", folder_name, file.filename));
                relocation.moves.push(FileOutcome::for_move(
                    file,
                    format!("{}/{}", folder_name, file.filename),
                    OutcomeStatus::Planned,
                ));
            }
            report.relocation = Some(relocation);

            self.ui.section(&format!("{} (rename preview)", folder_name));
            report.seasons.push(self.run_season(&implicit.plan, RunMode::Preview));
            return;
        }

        if let Err(e) = create_dir_idempotent(&implicit.target_dir) {
            error!(path = ?implicit.target_dir, "{}", e);
            self.ui.error(&e.to_string());
            relocation.error = Some(e.to_string());
            report.relocation = Some(relocation);
            return;
        }

        for file in &implicit.files {
            relocation.moves.push(self.relocate(series, implicit, file));
        }
        report.relocation = Some(relocation);

        // Plan against what actually landed in the new folder
        self.ui.section(&folder_name);
        let season = match self.planner.plan_season_dir(
            &series.display_name,
            implicit.plan.season.number,
            &folder_name,
            &implicit.target_dir,
        ) {
            Ok(plan) => self.run_season(&plan, RunMode::Apply),
            Err(e) => {
                self.ui.error(&format!("Cannot read folder: {}", e));
                SeasonReport::new(
                    &folder_name,
                    Some(implicit.plan.season.number),
                    SeasonStatus::Unreadable {
                        error: e.to_string(),
                    },
                )
            }
        };
        report.seasons.push(season);
    }

    fn relocate(
        &mut self,
        series: &SeriesUnit,
        implicit: &ImplicitSeason,
        file: &MediaFile,
    ) -> FileOutcome {
        let from = series.path.join(&file.filename);
        let to = implicit.target_dir.join(&file.filename);
        let display_to = format!("{}/{}", implicit.plan.season.folder_name, file.filename);

        match rename_no_clobber(&from, &to) {
            Ok(()) => {
                debug!(from = ?from, to = ?to, "Moved");
                self.ui.dim(&format!("    -> {}", display_to));
                FileOutcome::for_move(file, display_to, OutcomeStatus::Done)
            }
            Err(e) => {
                warn!("{}", e);
                self.ui.list_failed(&file.filename, &display_to, &e.reason());
                FileOutcome::for_move(
                    file,
                    display_to,
                    OutcomeStatus::Failed { error: e.to_string() },
                )
            }
        }
    }

    fn run_season(&mut self, plan: &SeasonPlan, mode: RunMode) -> SeasonReport {
        let mut report = SeasonReport::new(
            &plan.season.folder_name,
            Some(plan.season.number),
            SeasonStatus::Previewed,
        );

        if plan.is_empty() {
            self.ui.dim("    (no media files)");
            report.status = SeasonStatus::Empty;
            return report;
        }

        for file in &plan.skipped {
            self.ui.skipped(&file.filename);
            report.skipped.push(file.filename.clone());
        }

        for (target, sources) in &plan.collisions {
            self.ui.collision(target, sources);
        }
        report.collisions = plan.collisions.clone();

        match mode {
            RunMode::Preview => {
                if !plan.is_safe() {
                    self.ui
                        .alert("Collisions found; --apply will leave this season untouched");
                }
                for entry in &plan.entries {
                    let status = if entry.is_unchanged() {
                        self.ui.list_unchanged(&entry.source.filename);
                        OutcomeStatus::Unchanged
                    } else {
                        self.ui.list_item(&entry.source.filename, &entry.target_name);
                        OutcomeStatus::Planned
                    };
                    report.renames.push(FileOutcome::for_entry(entry, status));
                }
            }
            RunMode::Apply if !plan.is_safe() => {
                warn!("{}", format_collision_message(plan));
                self.ui.alert("Aborting season due to collisions!");
                report.status = SeasonStatus::Aborted;
            }
            RunMode::Apply => {
                for entry in &plan.entries {
                    let outcome = if entry.is_unchanged() {
                        self.ui.list_unchanged(&entry.source.filename);
                        FileOutcome::for_entry(entry, OutcomeStatus::Unchanged)
                    } else {
                        self.apply_rename(plan, entry)
                    };
                    report.renames.push(outcome);
                }
                report.status = SeasonStatus::Applied;
            }
        }

        report
    }

    fn apply_rename(&mut self, plan: &SeasonPlan, entry: &RenamePlanEntry) -> FileOutcome {
        let from_name = entry.source.filename.as_str();
        let to_name = entry.target_name.as_str();
        let from = plan.season.path.join(from_name);
        let to = plan.season.path.join(to_name);

        match rename_no_clobber(&from, &to) {
            Ok(()) => {
                info!("Renamed: {} -> {}", from_name, to_name);
                self.ui.list_done(from_name, to_name);
                FileOutcome::for_entry(entry, OutcomeStatus::Done)
            }
            Err(e) => {
                warn!("{}", e);
                self.ui.list_failed(from_name, to_name, &e.reason());
                FileOutcome::for_entry(entry, OutcomeStatus::Failed { error: e.to_string() })
            }
        }
    }
}
