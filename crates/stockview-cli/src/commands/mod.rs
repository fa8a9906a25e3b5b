pub mod intervals;
mod view;

use crate::cli::{Cli, Command};
use crate::error::CliError;
use crate::report::{IntervalRow, ViewReport};

/// What a command produced, handed to the output layer.
pub enum CommandOutput {
    View(ViewReport),
    Intervals(Vec<IntervalRow>),
}

impl CommandOutput {
    /// True when at least one panel ended in an error notice.
    pub fn has_panel_errors(&self) -> bool {
        match self {
            Self::View(report) => report.has_errors(),
            Self::Intervals(_) => false,
        }
    }
}

pub async fn run(cli: &Cli) -> Result<CommandOutput, CliError> {
    match &cli.command {
        Command::View(args) => Ok(CommandOutput::View(view::run(args, cli.timeout_ms).await?)),
        Command::Intervals => Ok(CommandOutput::Intervals(intervals::run())),
    }
}
