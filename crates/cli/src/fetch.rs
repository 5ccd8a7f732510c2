//! HTTP client for fetching schema documents.

use reqwest::header::{ACCEPT_LANGUAGE, CONTENT_TYPE};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, warn};
use typepick_core::{DocumentFormat, SchemaDocument};

use crate::source::SourceError;

/// Base delay between attempts; grows linearly with the attempt number.
const RETRY_DELAY_MS: u64 = 200;

/// Request settings for [`fetch_document`].
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Sent as `Authorization: Bearer <token>` when present.
    pub token: Option<String>,
    /// Sent as `Accept-Language`.
    pub accept_language: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Extra attempts after a transport error or 5xx response.
    pub retries: u32,
}

fn build_client(options: &FetchOptions) -> Result<reqwest::Client, SourceError> {
    reqwest::Client::builder()
        .timeout(options.timeout)
        .build()
        .map_err(|err| {
            warn!(error = %err, "Failed to build document HTTP client.");
            SourceError::Client(err)
        })
}

async fn send(
    client: &reqwest::Client,
    url: &str,
    options: &FetchOptions,
) -> Result<reqwest::Response, reqwest::Error> {
    let mut request = client
        .get(url)
        .header(CONTENT_TYPE, "application/json")
        .header(ACCEPT_LANGUAGE, options.accept_language.as_str());
    if let Some(token) = &options.token {
        request = request.bearer_auth(token);
    }
    request.send().await
}

/// Fetch and parse one document.
///
/// Transport errors and 5xx responses are retried up to `options.retries` times.
/// Any other non-success status fails immediately with [`SourceError::Status`].
pub async fn fetch_document(
    url: &str,
    options: &FetchOptions,
) -> Result<SchemaDocument, SourceError> {
    let client = build_client(options)?;
    let mut attempt: u32 = 0;

    loop {
        debug!(%url, attempt, "Sending schema document request.");
        match send(&client, url, options).await {
            Ok(response) if response.status().is_server_error() && attempt < options.retries => {
                warn!(%url, status = %response.status(), attempt, "Server error; retrying.");
            }
            Ok(response) => return read_response(url, response).await,
            Err(err) if attempt < options.retries => {
                warn!(%url, error = %err, attempt, "Document request failed; retrying.");
            }
            Err(source) => {
                return Err(SourceError::Http {
                    url: url.to_string(),
                    source,
                });
            }
        }
        attempt += 1;
        tokio::time::sleep(Duration::from_millis(RETRY_DELAY_MS) * attempt).await;
    }
}

async fn read_response(
    url: &str,
    response: reqwest::Response,
) -> Result<SchemaDocument, SourceError> {
    let status = response.status();
    debug!(%url, %status, "Received schema document response.");
    if !status.is_success() {
        return Err(SourceError::Status {
            url: url.to_string(),
            status,
        });
    }

    let format = response_format(&response);
    let body = response.text().await.map_err(|source| SourceError::Http {
        url: url.to_string(),
        source,
    })?;

    SchemaDocument::parse(&body, format).map_err(|source| SourceError::Document {
        origin: url.to_string(),
        source,
    })
}

/// YAML when the content type or the URL path says so, JSON otherwise.
fn response_format(response: &reqwest::Response) -> DocumentFormat {
    let by_header = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(DocumentFormat::from_content_type);
    match by_header {
        Some(DocumentFormat::Yaml) => DocumentFormat::Yaml,
        _ => DocumentFormat::from_path(Path::new(response.url().path())),
    }
}
