//! Command line for typepick: acquire Swagger / OpenAPI documents from files or
//! an authenticated URL, then generate, search, or list TypeScript interfaces.
//!
//! The binary calls [`init_tracing`] once and hands its arguments to [`run_cli`].

use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

mod common;
pub mod config;
pub mod fetch;
mod generate;
mod list;
mod search;
pub mod source;

/// Crates whose events `TYPEPICK_LOG=<level>` turns up.
const WORKSPACE_CRATES: [&str; 3] = ["typepick", "typepick_cli", "typepick_core"];

#[derive(Parser, Debug)]
#[command(
    name = "typepick",
    version,
    about = "Generate TypeScript interfaces from Swagger 2.0 / OpenAPI 3.x schema definitions"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate one interface per schema definition
    Generate(generate::GenerateArgs),
    /// Print the interfaces whose name contains QUERY
    Search(search::SearchArgs),
    /// Print every interface name in output order
    List(list::ListArgs),
}

/// Parse `args` (program name first) and run the command. Returns the exit code.
pub fn run_cli(args: Vec<String>) -> i32 {
    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            eprintln!("Failed to create tokio runtime: {err}");
            return 1;
        }
    };

    runtime.block_on(run_cli_async(args))
}

async fn run_cli_async(args: Vec<String>) -> i32 {
    match Cli::try_parse_from(args) {
        Ok(cli) => match cli.command {
            Some(Commands::Generate(args)) => generate::run(args).await,
            Some(Commands::Search(args)) => search::run(args).await,
            Some(Commands::List(args)) => list::run(args).await,
            None => {
                let mut cmd = Cli::command();
                let _ = cmd.print_help();
                println!();
                0
            }
        },
        Err(e) => {
            let code = e.exit_code();
            let _ = e.print();
            code
        }
    }
}

/// Install the stderr fmt subscriber.
///
/// `TYPEPICK_LOG` is either a plain level ("trace", "debug", "info", "warn",
/// "error") applied to the workspace crates, or a full filter spec like
/// `typepick_cli=debug,reqwest=info`. The default is `info` for the workspace
/// and `warn` for everything else.
pub fn init_tracing() {
    let filter = log_filter(std::env::var("TYPEPICK_LOG").ok().as_deref());

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(EnvFilter::new(filter));

    if tracing_subscriber::registry()
        .with(fmt_layer)
        .try_init()
        .is_err()
    {
        eprintln!("Warning: tracing subscriber already initialized");
    }
}

fn log_filter(setting: Option<&str>) -> String {
    match setting {
        Some(level) if is_plain_level(level) => workspace_filter(level),
        Some(spec) => spec.to_string(),
        None => workspace_filter("info"),
    }
}

fn workspace_filter(level: &str) -> String {
    let scoped: Vec<String> = WORKSPACE_CRATES
        .iter()
        .map(|krate| format!("{krate}={level}"))
        .collect();
    format!("warn,{}", scoped.join(","))
}

fn is_plain_level(s: &str) -> bool {
    matches!(
        s.to_ascii_lowercase().as_str(),
        "trace" | "debug" | "info" | "warn" | "error"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_filter() {
        assert_eq!(
            log_filter(None),
            "warn,typepick=info,typepick_cli=info,typepick_core=info"
        );
        assert_eq!(
            log_filter(Some("DEBUG")),
            "warn,typepick=DEBUG,typepick_cli=DEBUG,typepick_core=DEBUG"
        );
        assert_eq!(log_filter(Some("reqwest=trace")), "reqwest=trace");
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_generate_flags() {
        let cli = Cli::try_parse_from([
            "typepick",
            "generate",
            "-i",
            "a.json",
            "--input",
            "b.yaml",
            "--format",
            "json",
            "--unknown",
            "unknown",
            "--sort",
        ])
        .map_err(|err| err.to_string());
        let args = match cli {
            Ok(Cli {
                command: Some(Commands::Generate(args)),
            }) => args,
            other => unreachable!("generate did not parse: {other:?}"),
        };
        assert_eq!(args.source.inputs.len(), 2);
        assert_eq!(args.format, generate::OutputFormat::Json);
        assert_eq!(args.unknown, Some(typepick_core::UnknownType::Unknown));
        assert!(args.sort);
    }

    #[test]
    fn test_usage_error_exit_code() {
        assert_eq!(run_cli(vec!["typepick".to_string(), "bogus".to_string()]), 2);
    }
}
