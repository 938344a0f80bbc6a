use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
pub struct Args {
    /// Path to the SQLite database holding the persisted best score.
    #[arg(long, default_value = "best-score.db")]
    pub db: PathBuf,
    /// Board size for the initial session; restarting can change it (3-6).
    #[arg(long, default_value_t = 4)]
    pub board_size: usize,
    /// Optional RNG seed for reproducible tile spawns.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Host interface to bind (default 0.0.0.0).
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,
    /// Port to bind (default 8080).
    #[arg(long, default_value_t = 8080)]
    pub port: u16,
    /// Optional tracing filter, e.g. "info", "debug".
    #[arg(long, default_value = "info")]
    pub log: String,
}
