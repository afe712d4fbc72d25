//! 命令行参数

use std::path::PathBuf;

use clap::Parser;

/// Ready, Set, Go! - 终端计分板
#[derive(Parser, Debug)]
#[command(name = "readysetgo")]
#[command(about = "Keep score for a group of players", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the config file (defaults to ~/.config/readysetgo/config.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Player count preselected on the setup screen (1-8)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=8))]
    pub players: Option<u8>,

    /// Where to write the log file
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}
