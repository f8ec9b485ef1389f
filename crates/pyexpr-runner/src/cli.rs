use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "pyexpr")]
#[command(about = "Evaluate and normalise restricted Python expressions")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn verbose(&self) -> bool {
        match &self.command {
            Commands::Eval(command) => command.verbose,
            Commands::Format(_) | Commands::Tokens(_) => false,
        }
    }
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Evaluate an expression and print the result.
    Eval(EvalCommand),
    /// Print an expression in canonical form.
    Format(FormatCommand),
    /// Print the token stream of an expression.
    Tokens(TokensCommand),
}

#[derive(Debug, Clone, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, clap::Args)]
pub struct EvalCommand {
    #[arg(long)]
    pub expr: String,
    /// JSON or YAML object whose keys become names in the expression.
    #[arg(long)]
    pub context: Option<PathBuf>,
    /// Engine limits file (JSON or YAML).
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Clock used by `today`, `now` and friends, as `YYYY-MM-DD HH:MM:SS`.
    #[arg(long)]
    pub now: Option<String>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    #[arg(long, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Debug, Clone, clap::Args)]
pub struct FormatCommand {
    #[arg(long)]
    pub expr: String,
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, clap::Args)]
pub struct TokensCommand {
    #[arg(long)]
    pub expr: String,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
