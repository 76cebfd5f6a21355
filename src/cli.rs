use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "orbitrisk",
    about = "Orbitrisk - Threat-asset risk scoring engine for space missions",
    version
)]

pub struct Args {
    /// Directory containing the catalog files (Threat.csv, Asset.csv, Control.csv)
    #[arg(short, long, default_value = ".")]
    pub catalog_dir: PathBuf,

    /// Assessment JSON with saved criterion scores
    #[arg(short, long)]
    pub assessment: Option<PathBuf>,

    /// Control ids to apply before computing the report
    #[arg(long, value_delimiter = ',')]
    pub apply: Vec<String>,

    /// Write the report as pretty JSON to this path
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write the report as semicolon-delimited CSV to this path
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Enable verbose logging of all operations
    #[arg(short, long)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,
}
