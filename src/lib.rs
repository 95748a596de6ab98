pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod media;
pub mod output;
pub mod parser;
pub mod rename;
pub mod scanner;
pub mod ui;
pub mod validator;

pub use config::{config_from_env, ConfigError, RenamerConfig};
pub use error::{AppError, ExitCode};
pub use media::{MediaFile, MediaKind};
pub use parser::{
    extract_episode, normalize_series_name, parse_season_folder, EpisodeExtractor, EpisodeInfo,
    NameNormalizer, Recognizer,
};
pub use rename::{
    format_target_name, PlanExecutor, RunMode, RunReport, SeasonPlan, SeasonPlanner, SeriesUnit,
    Target,
};
pub use scanner::{list_directory, DirectoryEntry, EntryKind, ScannerError};
pub use validator::check_collisions;
