use super::{AgentArg, RiskArg, ViewModeArgs};
use clap::{Args, Subcommand};
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Show per-agent workflow progress of one session")]
    Progress(ProgressArgs),

    #[command(about = "Filter session events by agent, risk, text and date")]
    Monitor(MonitorArgs),

    #[command(about = "List patients with their latest depression level")]
    Patients {
        #[command(flatten)]
        view: ViewModeArgs,
    },

    #[command(about = "Read or add doctor comments")]
    Comment {
        #[command(subcommand)]
        command: CommentCommand,
    },

    #[command(about = "Show or update the configuration")]
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Debug, Clone, Args)]
pub struct ProgressArgs {
    #[arg(long, help = "Patient user id")]
    pub user: Option<i64>,

    #[arg(long, help = "Session id")]
    pub session: Option<i64>,

    #[arg(long, help = "Patient nickname shown in the header")]
    pub nickname: Option<String>,

    #[arg(long, value_enum, ignore_case = true, help = "Show a single agent")]
    pub agent: Option<AgentArg>,

    #[arg(
        long,
        help = "Project a saved events dump instead of calling the events API"
    )]
    pub input: Option<PathBuf>,

    #[command(flatten)]
    pub view: ViewModeArgs,
}

#[derive(Debug, Clone, Args)]
pub struct MonitorArgs {
    #[arg(
        long,
        required_unless_present = "input",
        help = "Patient user id"
    )]
    pub user: Option<i64>,

    #[arg(long, help = "Restrict to one session")]
    pub session: Option<i64>,

    #[arg(long, help = "Agent name or key (e.g. chat, assessment)")]
    pub agent: Option<String>,

    #[arg(long, value_enum, ignore_case = true)]
    pub risk: Option<RiskArg>,

    #[arg(long, help = "Case-insensitive text search over event payloads")]
    pub search: Option<String>,

    #[arg(long, help = "Earliest timestamp (RFC 3339 or YYYY-MM-DD)")]
    pub since: Option<String>,

    #[arg(long, help = "Latest timestamp (RFC 3339 or YYYY-MM-DD, inclusive)")]
    pub until: Option<String>,

    #[arg(long, help = "Read events from a saved dump instead of the events API")]
    pub input: Option<PathBuf>,

    #[command(flatten)]
    pub view: ViewModeArgs,
}

#[derive(Subcommand)]
pub enum CommentCommand {
    #[command(about = "List doctor comments")]
    List,

    #[command(about = "Annotate a patient with a doctor level and comment")]
    Add {
        #[arg(long)]
        user: i64,

        #[arg(long, help = "Minimal, Moderate or Severe")]
        level: String,

        #[arg(long)]
        comment: String,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    #[command(about = "Print the effective configuration")]
    Show,

    #[command(about = "Update config.toml")]
    Set(ConfigSetArgs),
}

#[derive(Debug, Clone, Default, Args)]
pub struct ConfigSetArgs {
    #[arg(long)]
    pub api_base: Option<String>,

    #[arg(long)]
    pub events_base: Option<String>,

    #[arg(long)]
    pub token: Option<String>,

    #[arg(long, help = "IANA timezone used for display (e.g. Asia/Colombo)")]
    pub timezone: Option<String>,

    #[arg(long)]
    pub timeout_secs: Option<u64>,
}

impl ConfigSetArgs {
    pub fn is_empty(&self) -> bool {
        self.api_base.is_none()
            && self.events_base.is_none()
            && self.token.is_none()
            && self.timezone.is_none()
            && self.timeout_secs.is_none()
    }
}
