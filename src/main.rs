use clap::Parser;
use ep2jellyfin::cli::Args;
use ep2jellyfin::config::config_from_env;
use ep2jellyfin::error::{AppError, ExitCode};
use ep2jellyfin::logging;
use ep2jellyfin::output::{display_summary, write_json_report};
use ep2jellyfin::rename::{PlanExecutor, RunMode, SeasonPlanner, Target};
use ep2jellyfin::scanner::ensure_directory;
use ep2jellyfin::ui::{Ui, UiConfig};
use std::io;
use tracing::{debug, error, info, warn};

fn main() {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            // --help and --version land here too
            let code = if e.use_stderr() {
                ExitCode::InvalidArguments
            } else {
                ExitCode::Success
            };
            std::process::exit(code.into());
        }
    };

    logging::init(args.verbose);

    if let Err(e) = run(args) {
        error!("{}", e);
        eprintln!("\nError: {}", e.detailed_message());
        std::process::exit(e.exit_code().into());
    }
}

fn run(args: Args) -> Result<(), AppError> {
    let config = config_from_env()?;
    debug!(
        media = ?config.media_exts(),
        subtitles = ?config.subtitle_exts(),
        "Extension tables loaded"
    );

    ensure_directory(&args.target_dir)?;
    let target_dir = args
        .target_dir
        .canonicalize()
        .map_err(|e| AppError::Other(format!("Cannot resolve {}: {}", args.target_dir.display(), e)))?;

    let mode = RunMode::from_apply_flag(args.apply);
    let mut ui = Ui::new(UiConfig::new(args.json));

    if mode == RunMode::Preview {
        ui.boxed_title("PREVIEW");
        ui.dim("No files will be renamed.");
    }

    let planner = SeasonPlanner::new(config);

    let (series_paths, name_override) = match planner.resolve_target(&target_dir)? {
        Target::Series(path) => (vec![path], args.name.as_deref()),
        Target::Library(paths) => {
            if args.name.is_some() {
                warn!("--name ignored when processing multiple series");
                ui.warning("--name ignored when processing multiple series");
            }
            (paths, None)
        }
    };

    info!(count = series_paths.len(), ?mode, "Processing series");

    let report = PlanExecutor::new(&planner, &mut ui, mode).run_all(&series_paths, name_override);

    if args.json {
        write_json_report(&report, &mut io::stdout().lock())
            .map_err(|e| AppError::Other(format!("Failed to write report: {}", e)))?;
    } else {
        display_summary(&report, &mut ui);
    }

    Ok(())
}
