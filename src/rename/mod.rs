mod executor;
mod name_builder;
mod planner;
mod types;

pub use executor::{create_dir_idempotent, rename_no_clobber, ExecuteError, PlanExecutor};
pub use name_builder::{format_target_name, season_folder_name};
pub use planner::{SeasonPlanner, Target, IMPLICIT_SEASON};
pub use types::*;
