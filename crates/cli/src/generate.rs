use clap::{Args, ValueEnum};
use std::path::PathBuf;
use typepick_core::UnknownType;

use crate::common::{
    CliError, GeneratorOverrides, build_generation, render_json, render_typescript, run_command,
    write_output,
};
use crate::source::SourceArgs;

/// Output encoding for `generate`.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// All declarations as one TypeScript file
    #[default]
    Ts,
    /// JSON array of `{ "name", "code" }`
    Json,
}

/// Arguments for `typepick generate`.
#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub source: SourceArgs,
    /// Write here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub out: Option<PathBuf>,
    /// Output encoding
    #[arg(long, value_enum, default_value_t = OutputFormat::Ts)]
    pub format: OutputFormat,
    /// Type emitted for unmapped schemas (any or unknown)
    #[arg(long, value_name = "TYPE")]
    pub unknown: Option<UnknownType>,
    /// Order declarations by name instead of document order
    #[arg(long)]
    pub sort: bool,
}

/// Run `typepick generate`. Returns the exit code.
pub async fn run(args: GenerateArgs) -> i32 {
    run_command(|| run_inner(args)).await
}

async fn run_inner(args: GenerateArgs) -> Result<(), CliError> {
    let overrides = GeneratorOverrides {
        unknown_type: args.unknown,
        sort_definitions: args.sort,
    };
    let generation = build_generation(&args.source, overrides).await?;

    let text = match args.format {
        OutputFormat::Ts => render_typescript(&generation.blocks),
        OutputFormat::Json => render_json(&generation.blocks)?,
    };
    write_output(args.out.as_deref(), &text)
}
