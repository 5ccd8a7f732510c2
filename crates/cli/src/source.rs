//! Document acquisition from files and URLs.

use clap::Args;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};
use typepick_core::{DocumentError, DocumentFormat, SchemaDocument};

use crate::config::SourceConfig;
use crate::fetch::{FetchOptions, fetch_document};

/// Errors acquiring a schema document.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Neither a file nor a URL was given.
    #[error(
        "no schema source; pass --input PATH or --url URL, or set [source] url in the config file"
    )]
    NoSource,
    /// An input file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// File that failed.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    /// The request failed before a response arrived, or the body could not be read.
    #[error("request to {url} failed: {source}")]
    Http {
        /// Requested URL.
        url: String,
        /// Underlying transport error.
        #[source]
        source: reqwest::Error,
    },
    /// The server answered with a non-success status.
    #[error("{url} responded with {status}")]
    Status {
        /// Requested URL.
        url: String,
        /// Response status.
        status: reqwest::StatusCode,
    },
    /// The body is not a JSON or YAML object.
    #[error("{origin}: {source}")]
    Document {
        /// File path or URL the document came from.
        origin: String,
        /// Parse failure.
        #[source]
        source: DocumentError,
    },
}

/// Flags shared by every command that needs documents.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Schema document file (JSON or YAML); repeat to merge several
    #[arg(short = 'i', long = "input", value_name = "PATH")]
    pub inputs: Vec<PathBuf>,
    /// Fetch the schema document from this URL
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,
    /// Bearer token sent with URL requests
    #[arg(long, env = "TYPEPICK_TOKEN", hide_env_values = true)]
    pub token: Option<String>,
    /// Accept-Language sent with URL requests [default: ko]
    #[arg(long, value_name = "LANG")]
    pub lang: Option<String>,
    /// Config file to use instead of the default lookup
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Read every input file, then fetch the URL (flag first, then config), in that order.
pub async fn load_documents(
    args: &SourceArgs,
    config: &SourceConfig,
) -> Result<Vec<SchemaDocument>, SourceError> {
    let url = args.url.as_deref().or(config.url.as_deref());
    if args.inputs.is_empty() && url.is_none() {
        return Err(SourceError::NoSource);
    }

    let mut documents = args
        .inputs
        .iter()
        .map(|path| read_document(path.as_path()))
        .collect::<Result<Vec<_>, _>>()?;

    if let Some(url) = url {
        let options = FetchOptions {
            token: args.token.clone(),
            accept_language: args
                .lang
                .clone()
                .unwrap_or_else(|| config.accept_language.clone()),
            timeout: Duration::from_secs(config.timeout_secs),
            retries: config.retries,
        };
        documents.push(fetch_document(url, &options).await?);
        info!(%url, "Fetched schema document.");
    }

    Ok(documents)
}

/// Read one document, picking YAML or JSON by extension.
pub fn read_document(path: &Path) -> Result<SchemaDocument, SourceError> {
    let text = fs::read_to_string(path).map_err(|source| SourceError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let format = DocumentFormat::from_path(path);
    debug!(path = %path.display(), ?format, "Parsing schema document file.");
    SchemaDocument::parse(&text, format).map_err(|source| SourceError::Document {
        origin: path.display().to_string(),
        source,
    })
}
