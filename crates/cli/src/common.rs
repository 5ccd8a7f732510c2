//! Pieces shared by the commands: error type, generation pipeline, output.

use std::future::Future;
use std::io::Write;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, warn};
use typepick_core::{
    Diagnostic, Generation, GeneratorConfig, Severity, TypeBlock, UnknownType, generate_documents,
};

use crate::config::{Config, ConfigError};
use crate::source::{SourceArgs, SourceError, load_documents};

/// Everything a command can fail with.
#[derive(Debug, Error)]
pub enum CliError {
    /// Config file could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// A document could not be acquired.
    #[error(transparent)]
    Source(#[from] SourceError),
    /// Output could not be written.
    #[error("failed to write {target}: {source}")]
    Output {
        /// Output file, or `stdout`.
        target: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// Blocks could not be serialized.
    #[error("failed to serialize blocks: {0}")]
    Json(#[from] serde_json::Error),
}

/// Run a command body, printing its error to stderr. Returns the exit code.
pub async fn run_command<F, Fut>(f: F) -> i32
where
    F: FnOnce() -> Fut + Send,
    Fut: Future<Output = Result<(), CliError>> + Send,
{
    match f().await {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("error: {err}");
            1
        }
    }
}

/// Command-line flags that override `[generator]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeneratorOverrides {
    /// `--unknown`
    pub unknown_type: Option<UnknownType>,
    /// `--sort`; only ever turns sorting on.
    pub sort_definitions: bool,
}

impl GeneratorOverrides {
    /// Layer the flags over the configured settings.
    pub fn apply(self, mut config: GeneratorConfig) -> GeneratorConfig {
        if let Some(unknown_type) = self.unknown_type {
            config.unknown_type = unknown_type;
        }
        config.sort_definitions |= self.sort_definitions;
        config
    }
}

/// Load config, acquire documents, generate, and report diagnostics.
pub async fn build_generation(
    source: &SourceArgs,
    overrides: GeneratorOverrides,
) -> Result<Generation, CliError> {
    let config = Config::load(source.config.as_deref())?;
    let documents = load_documents(source, &config.source).await?;
    let generator = overrides.apply(config.generator);
    debug!(documents = documents.len(), ?generator, "Generating TypeScript blocks.");

    let generation = generate_documents(&documents, &generator);
    report_diagnostics(&generation.diagnostics);
    info!(
        blocks = generation.blocks.len(),
        diagnostics = generation.diagnostics.len(),
        "Generation finished."
    );
    Ok(generation)
}

/// Log warnings at `warn` and notes at `debug`.
pub fn report_diagnostics(diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        match diagnostic.severity() {
            Severity::Warning => warn!("{diagnostic}"),
            Severity::Note => debug!("{diagnostic}"),
        }
    }
}

/// All blocks as one TypeScript file: blank line between blocks, trailing newline.
pub fn render_typescript(blocks: &[TypeBlock]) -> String {
    if blocks.is_empty() {
        return String::new();
    }
    let mut text = blocks
        .iter()
        .map(|block| block.code.as_str())
        .collect::<Vec<_>>()
        .join("\n\n");
    text.push('\n');
    text
}

/// All blocks as a pretty JSON array of `{ "name", "code" }`.
pub fn render_json(blocks: &[TypeBlock]) -> Result<String, CliError> {
    let mut text = serde_json::to_string_pretty(blocks)?;
    text.push('\n');
    Ok(text)
}

/// Write to the file when given, stdout otherwise.
pub fn write_output(out: Option<&Path>, text: &str) -> Result<(), CliError> {
    match out {
        Some(path) => {
            ensure_parent(path)?;
            std::fs::write(path, text).map_err(|source| CliError::Output {
                target: path.display().to_string(),
                source,
            })?;
            info!(path = %path.display(), bytes = text.len(), "Wrote output file.");
            Ok(())
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(text.as_bytes())
                .and_then(|()| stdout.flush())
                .map_err(|source| CliError::Output {
                    target: "stdout".to_string(),
                    source,
                })
        }
    }
}

fn ensure_parent(path: &Path) -> Result<(), CliError> {
    let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) else {
        return Ok(());
    };
    std::fs::create_dir_all(parent).map_err(|source| CliError::Output {
        target: parent.display().to_string(),
        source,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn blocks() -> Vec<TypeBlock> {
        vec![
            TypeBlock {
                name: "A".to_string(),
                code: "export interface A {}".to_string(),
            },
            TypeBlock {
                name: "B".to_string(),
                code: "export interface B {\n  x?: string;\n}".to_string(),
            },
        ]
    }

    #[test]
    fn test_overrides() {
        let config = GeneratorConfig {
            sort_definitions: true,
            ..GeneratorConfig::default()
        };
        let applied = GeneratorOverrides::default().apply(config);
        assert_eq!(applied, config);

        let applied = GeneratorOverrides {
            unknown_type: Some(UnknownType::Unknown),
            sort_definitions: false,
        }
        .apply(config);
        assert_eq!(applied.unknown_type, UnknownType::Unknown);
        assert!(applied.sort_definitions);
    }

    #[test]
    fn test_render_typescript() {
        assert_eq!(render_typescript(&[]), "");
        assert_eq!(
            render_typescript(&blocks()),
            "export interface A {}\n\nexport interface B {\n  x?: string;\n}\n"
        );
    }

    #[test]
    fn test_render_json() {
        let text = render_json(&blocks()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value[0]["name"], "A");
        assert_eq!(value[1]["code"], "export interface B {\n  x?: string;\n}");
    }

    #[test]
    fn test_write_output_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("types").join("api.ts");
        write_output(Some(&path), "export interface A {}\n").unwrap();
        assert_eq!(
            std::fs::read_to_string(path).unwrap(),
            "export interface A {}\n"
        );
    }
}
