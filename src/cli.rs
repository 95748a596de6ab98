use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ep2jellyfin")]
#[command(author, version, about, long_about = None)]
#[command(about = "Rename episode files to Jellyfin naming: Series Name S01E01.ext")]
pub struct Args {
    /// Series folder, or a root folder containing several series folders
    pub target_dir: PathBuf,

    /// Override the series name (single series target only)
    #[arg(short, long, value_name = "NAME")]
    pub name: Option<String>,

    /// Rename files instead of previewing the plan
    #[arg(short, long)]
    pub apply: bool,

    /// Print the run report as JSON instead of plain lines
    #[arg(long)]
    pub json: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
