use clap::Args;
use typepick_core::TypeBlock;

use crate::common::{CliError, GeneratorOverrides, build_generation, run_command, write_output};
use crate::source::SourceArgs;

/// Arguments for `typepick search`.
#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    /// Case-insensitive part of a type name
    #[arg(value_name = "QUERY")]
    pub query: String,
    #[command(flatten)]
    pub source: SourceArgs,
}

/// Run `typepick search`. Returns the exit code.
pub async fn run(args: SearchArgs) -> i32 {
    run_command(|| run_inner(args)).await
}

async fn run_inner(args: SearchArgs) -> Result<(), CliError> {
    let generation = build_generation(&args.source, GeneratorOverrides::default()).await?;
    let matches = filter_blocks(&generation.blocks, &args.query);

    let text = matches
        .iter()
        .map(|block| format!("// {}\n{}\n\n", block.name, block.code))
        .collect::<Vec<_>>()
        .concat();
    write_output(None, &text)?;
    eprintln!("{}", summary(matches.len(), generation.blocks.len()));
    Ok(())
}

/// Blocks whose name contains `query`, ignoring case, in their original order.
///
/// A query that is blank after trimming matches nothing. Otherwise the query is
/// matched as typed, surrounding spaces included.
pub fn filter_blocks<'a>(blocks: &'a [TypeBlock], query: &str) -> Vec<&'a TypeBlock> {
    if query.trim().is_empty() {
        return Vec::new();
    }
    let needle = query.to_lowercase();
    blocks
        .iter()
        .filter(|block| block.name.to_lowercase().contains(&needle))
        .collect()
}

fn summary(found: usize, total: usize) -> String {
    if found == 0 {
        format!("no results ({total} types)")
    } else {
        format!("{found} found ({total} types)")
    }
}
