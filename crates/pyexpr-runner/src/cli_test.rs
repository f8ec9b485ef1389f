use super::{Cli, Commands, OutputFormat};
use clap::{CommandFactory, Parser};

#[test]
fn cli_help_lists_subcommands() {
    let mut command = Cli::command();
    let help = command.render_long_help().to_string();
    assert!(help.contains("eval"));
    assert!(help.contains("format"));
    assert!(help.contains("tokens"));
}

#[test]
fn cli_parses_eval_with_all_options() {
    let cli = Cli::try_parse_from([
        "pyexpr",
        "eval",
        "--expr",
        "a + 1",
        "--context",
        "ctx.json",
        "--config",
        "limits.yaml",
        "--now",
        "2024-01-01 08:00:00",
        "--format",
        "json",
        "--verbose",
    ])
    .expect("eval must parse");
    assert!(cli.verbose());
    match cli.command {
        Commands::Eval(command) => {
            assert_eq!(command.expr, "a + 1");
            assert_eq!(
                command.context.as_deref(),
                Some(std::path::Path::new("ctx.json"))
            );
            assert_eq!(command.now.as_deref(), Some("2024-01-01 08:00:00"));
            assert_eq!(command.format, OutputFormat::Json);
        }
        _ => panic!("expected eval"),
    }
}

#[test]
fn cli_eval_defaults_to_text_output() {
    let cli = Cli::try_parse_from(["pyexpr", "eval", "--expr", "1"]).expect("eval must parse");
    assert!(!cli.verbose());
    match cli.command {
        Commands::Eval(command) => {
            assert_eq!(command.format, OutputFormat::Text);
            assert!(command.context.is_none());
        }
        _ => panic!("expected eval"),
    }
}

#[test]
fn cli_requires_an_expression() {
    assert!(Cli::try_parse_from(["pyexpr", "format"]).is_err());
    assert!(Cli::try_parse_from(["pyexpr", "tokens", "--expr", "x"]).is_ok());
}
