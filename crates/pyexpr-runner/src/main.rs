use clap::Parser;
use pyexpr_runner::{execute_eval, execute_format, execute_tokens, Cli, Commands};

fn main() {
    let cli = Cli::parse();
    let default_filter = if cli.verbose() { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let result = match &cli.command {
        Commands::Eval(command) => execute_eval(command),
        Commands::Format(command) => execute_format(command),
        Commands::Tokens(command) => execute_tokens(command),
    };

    match result {
        Ok(output) => {
            println!("{output}");
        }
        Err(error) => {
            eprintln!("{}: {error}", error.kind());
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
