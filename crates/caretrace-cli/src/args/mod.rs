// NOTE: Command Organization Rationale
//
// Why one top-level command per view?
// - Each command mirrors one screen of the clinician dashboard: progress, monitor, patients
// - Write operations live under a namespace (`comment add`, `config set`) next to their read side
// - Session selection is always explicit (`--user`, `--session`) or a saved dump (`--input`)

mod commands;
mod common;
mod enums;

pub use commands::*;
pub use common::*;
pub use enums::*;

use clap::Parser;

#[derive(Parser)]
#[command(name = "caretrace")]
#[command(
    about = "Follow multi-agent assessment sessions, monitor risk and review patients",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    /// Data directory holding config.toml (default: $CARETRACE_PATH, then the XDG data dir)
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    #[arg(long, default_value = "plain", global = true)]
    pub format: OutputFormat,

    /// Log verbosity on stderr; RUST_LOG takes precedence
    #[arg(long, default_value = "warn", global = true)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Commands,
}
