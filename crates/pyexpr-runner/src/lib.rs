mod cli;
mod config;
mod run;

pub use cli::{Cli, Commands, EvalCommand, FormatCommand, OutputFormat, TokensCommand};
pub use config::{load_limits_config, validate_limits, LimitsConfigError};
pub use run::{execute_eval, execute_format, execute_tokens, RunnerError};
