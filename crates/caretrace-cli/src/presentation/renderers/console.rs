use anyhow::Result;
use is_terminal::IsTerminal;
use owo_colors::{OwoColorize, Stream::Stdout};
use serde::Serialize;

use super::traits::Renderer;
use crate::presentation::view_models::{
    CommandResultViewModel, CreateView, OutputFormat, ViewMode,
};

pub struct ConsoleRenderer {
    format: OutputFormat,
    mode: ViewMode,
}

impl ConsoleRenderer {
    /// Colour is enabled only when stdout is a terminal.
    pub fn new(format: OutputFormat, mode: ViewMode) -> Self {
        owo_colors::set_override(std::io::stdout().is_terminal());
        Self { format, mode }
    }
}

impl Renderer for ConsoleRenderer {
    fn render<T>(&self, result: CommandResultViewModel<T>) -> Result<()>
    where
        T: Serialize + CreateView + Send + Sync,
    {
        if self.format == OutputFormat::Json {
            println!("{}", serde_json::to_string_pretty(&result)?);
            return Ok(());
        }

        if let Some(badge) = &result.badge
            && self.mode != ViewMode::Minimal
        {
            println!(
                "{} {}",
                badge.icon(),
                badge.label.if_supports_color(Stdout, |t| t.bold())
            );
            println!();
        }

        print!("{}", result.content.create_view(self.mode));

        if !result.suggestions.is_empty() && self.mode != ViewMode::Minimal {
            println!("\n{}", "💡 Tips:".if_supports_color(Stdout, |t| t.yellow()));
            for tip in &result.suggestions {
                print!("  • {}", tip.description);
                if let Some(cmd) = &tip.command {
                    print!(": {}", cmd.if_supports_color(Stdout, |t| t.cyan()));
                }
                println!();
            }
        }

        Ok(())
    }
}
