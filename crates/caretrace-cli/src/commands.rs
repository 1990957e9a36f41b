use super::args::{Cli, Commands, CommentCommand, ConfigCommand, LogLevel};
use super::handlers;
use crate::presentation::OutputFormat;
use anyhow::Result;
use caretrace_runtime::{CareTrace, resolve_data_dir};
use std::future::Future;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

pub fn run(cli: Cli) -> Result<()> {
    init_logging(cli.log_level);

    let data_dir = resolve_data_dir(cli.data_dir.as_deref())?;
    let format = OutputFormat::from(cli.format);

    match cli.command {
        Commands::Progress(args) => with_workspace(data_dir, |workspace| async move {
            handlers::progress::handle(&workspace, args, format).await
        }),

        Commands::Monitor(args) => with_workspace(data_dir, |workspace| async move {
            handlers::monitor::handle(&workspace, args, format).await
        }),

        Commands::Patients { view } => with_workspace(data_dir, |workspace| async move {
            handlers::patients::handle(&workspace, format, view.resolve()).await
        }),

        Commands::Comment { command } => match command {
            CommentCommand::List => with_workspace(data_dir, |workspace| async move {
                handlers::comment::list(&workspace, format).await
            }),
            CommentCommand::Add {
                user,
                level,
                comment,
            } => with_workspace(data_dir, |workspace| async move {
                handlers::comment::add(&workspace, user, &level, &comment, format).await
            }),
        },

        Commands::Config { command } => match command {
            ConfigCommand::Show => handlers::config::show(&data_dir, format),
            ConfigCommand::Set(args) => handlers::config::set(&data_dir, args, format),
        },
    }
}

/// Stderr logging; `RUST_LOG` overrides `--log-level`.
fn init_logging(level: LogLevel) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "caretrace={level},caretrace_cli={level},caretrace_runtime={level}"
        ))
    });

    // Ignore the error if a subscriber is already installed.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Open the workspace and drive one async handler to completion.
fn with_workspace<F, Fut>(data_dir: PathBuf, handler: F) -> Result<()>
where
    F: FnOnce(CareTrace) -> Fut,
    Fut: Future<Output = Result<()>>,
{
    let workspace = CareTrace::open(&data_dir)?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(handler(workspace))
}
