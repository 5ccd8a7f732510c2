use clap::Args;

use crate::common::{CliError, GeneratorOverrides, build_generation, run_command, write_output};
use crate::source::SourceArgs;

/// Arguments for `typepick list`.
#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

/// Run `typepick list`. Returns the exit code.
pub async fn run(args: ListArgs) -> i32 {
    run_command(|| run_inner(args)).await
}

async fn run_inner(args: ListArgs) -> Result<(), CliError> {
    let generation = build_generation(&args.source, GeneratorOverrides::default()).await?;
    let text = generation
        .blocks
        .iter()
        .map(|block| format!("{}\n", block.name))
        .collect::<Vec<_>>()
        .concat();
    write_output(None, &text)
}
