use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser, Clone)]
#[clap(
    version = "0.1.0",
    author = "Alexander Heilmeier <alexander.heilmeier@tum.de>",
    name = "RS-RW",
    about = "A lap-based race weekend simulator with car development written in Rust"
)]
pub struct SimOpts {
    // FLAGS ---------------------------------------------------------------------------------------
    /// Activate debug logging
    #[clap(short, long)]
    pub debug: bool,

    /// Stream the race lap by lap in (scaled) real-time, requires a single simulation run
    #[clap(short, long)]
    pub live: bool,

    // OPTIONS -------------------------------------------------------------------------------------
    /// Set number of independent simulation runs (must be one in case of live mode)
    #[clap(short, long, default_value = "1")]
    pub no_sim_runs: u32,

    /// Set path to the season parameter file (calendar and teams)
    #[clap(parse(from_os_str), short, long)]
    pub parfile_path: PathBuf,

    /// Set path to the research tree definition file
    #[clap(parse(from_os_str), short, long)]
    pub treefile_path: PathBuf,

    /// Set the team of the player (defaults to the first team of the parameter file)
    #[clap(long)]
    pub team: Option<String>,

    /// Set the calendar index of the race (defaults to the next race of the season)
    #[clap(short, long)]
    pub race_idx: Option<usize>,

    /// Set the strategy preset of the player team (aggressive, balanced or conserve)
    #[clap(long, default_value = "balanced")]
    pub strategy: String,

    /// Start a research project before the race weekend
    #[clap(long)]
    pub start_project: Option<String>,

    /// Set base seed of the random number generator (random if not set)
    #[clap(short, long)]
    pub seed: Option<u64>,

    /// Set real-time factor of the live mode, should be in the range [1.0, 1000.0]
    #[clap(long, default_value = "100.0")]
    pub realtime_factor: f64,

    /// Set path to the save file (loaded if it exists, written after the race weekend)
    #[clap(parse(from_os_str), long)]
    pub save_path: Option<PathBuf>,

    /// Set path of a JSON file the race result is written to
    #[clap(parse(from_os_str), long)]
    pub result_path: Option<PathBuf>,
}
