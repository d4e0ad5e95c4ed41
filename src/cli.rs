use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Commands;

/// Project and task dashboard.
/// Preferences and logs live in ~/.prohub or the directory passed via --dir.
#[derive(Parser)]
#[command(name = "prohub", version, about = "Project and task management dashboard")]
pub struct Cli {
    /// Directory holding preferences.json and the dashboard log.
    #[arg(long, global = true, env = "PROHUB_DIR")]
    pub dir: Option<PathBuf>,

    /// Log filter used when RUST_LOG is not set.
    #[arg(long, global = true, env = "PROHUB_LOG", default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}
