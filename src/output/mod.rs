use crate::rename::{RunMode, RunReport};
use crate::ui::Ui;
use std::io::{self, Write};

/// Print the closing summary of a run
pub fn display_summary(report: &RunReport, ui: &mut Ui) {
    let summary = report.summary();

    ui.blank();
    ui.separator();
    ui.info("Summary:");

    match report.mode {
        RunMode::Preview => {
            ui.kv("Would rename", &summary.planned.to_string());
        }
        RunMode::Apply => {
            ui.kv("Renamed", &summary.renamed.to_string());
        }
    }

    if summary.unchanged > 0 {
        ui.kv("Already named", &summary.unchanged.to_string());
    }
    if summary.skipped > 0 {
        ui.kv("Skipped", &summary.skipped.to_string());
    }
    if summary.aborted_seasons > 0 {
        ui.kv("Seasons aborted", &summary.aborted_seasons.to_string());
    }
    if summary.failed > 0 {
        ui.kv("Failures", &summary.failed.to_string());
    }

    ui.blank();
    match report.mode {
        RunMode::Preview => ui.dim("Run with --apply to rename these files."),
        RunMode::Apply if summary.failed == 0 && summary.aborted_seasons == 0 => {
            ui.success("All planned renames completed.")
        }
        RunMode::Apply => ui.warning("Some files were not renamed; see the messages above."),
    }
}

/// Write the full run report as pretty-printed JSON
pub fn write_json_report(report: &RunReport, writer: &mut impl Write) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, report)?;
    writeln!(writer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rename::{FileOutcome, OutcomeStatus, SeasonReport, SeasonStatus, SeriesReport};
    use crate::ui::tests::{create_test_ui, output_of};

    fn create_test_report(mode: RunMode) -> RunReport {
        let status = match mode {
            RunMode::Preview => OutcomeStatus::Planned,
            RunMode::Apply => OutcomeStatus::Done,
        };

        let mut season = SeasonReport::new("Season 01", Some(1), SeasonStatus::Previewed);
        season.skipped.push("Trailer.mkv".to_string());
        season.renames.push(FileOutcome::new("Show - 01.mkv", "Show S01E01.mkv", status.clone()));
        season.renames.push(FileOutcome::new("Show - 02.mkv", "Show S01E02.mkv", status));

        let mut series = SeriesReport::new("Show (2020)", "Show");
        series.seasons.push(season);

        let mut report = RunReport::new(mode);
        report.add_series(series);
        report
    }

    #[test]
    fn test_display_preview_summary() {
        let (mut ui, buffer) = create_test_ui(false);
        display_summary(&create_test_report(RunMode::Preview), &mut ui);

        let output = output_of(&buffer);
        assert!(output.contains("Would rename: 2"));
        assert!(output.contains("Skipped: 1"));
        assert!(output.contains("--apply"));
    }

    #[test]
    fn test_display_apply_summary() {
        let (mut ui, buffer) = create_test_ui(false);
        display_summary(&create_test_report(RunMode::Apply), &mut ui);

        let output = output_of(&buffer);
        assert!(output.contains("Renamed: 2"));
        assert!(output.contains("All planned renames completed"));
    }

    #[test]
    fn test_write_json_report() {
        let mut output = Vec::new();
        write_json_report(&create_test_report(RunMode::Preview), &mut output).unwrap();

        let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(json["mode"], "preview");
        assert_eq!(json["series"][0]["display_name"], "Show");
        assert_eq!(json["series"][0]["seasons"][0]["state"], "previewed");
        assert_eq!(json["series"][0]["seasons"][0]["skipped"][0], "Trailer.mkv");
        assert_eq!(
            json["series"][0]["seasons"][0]["renames"][1]["to"],
            "Show S01E02.mkv"
        );
        assert_eq!(
            json["series"][0]["seasons"][0]["renames"][1]["status"],
            "planned"
        );
    }
}
