//! Upload of encoded images to the storage origin.
//!
//! The origin is any HTTP server that accepts `PUT <base>/<filename>` with a
//! binary body and answers 2xx on success. [`HttpUploader`] makes exactly one
//! attempt per call. Retries, if wanted, belong to the caller.
//!
//! ## Request shape
//!
//! ```text
//! PUT {uploader_url}/{filename}
//! User-Agent: cdn-uploader
//! Content-Type: image/jpeg | image/png | image/webp
//!
//! <encoded bytes>
//! ```

use crate::imaging::EncodedPayload;
use reqwest::StatusCode;
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use std::io::{self, Read};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// User agent sent with every upload.
pub const USER_AGENT: &str = "cdn-uploader";

/// Bytes of an error response body kept in [`UploadError::Status`].
const ERROR_BODY_LIMIT: usize = 512;

#[derive(Error, Debug)]
pub enum UploadError {
    #[error("Upload to {url} failed with status {status}")]
    Status {
        url: String,
        status: StatusCode,
        body: String,
    },
    #[error("Upload to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Invalid upload URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl UploadError {
    /// HTTP status of a rejected upload, if the server answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Sends encoded bytes to remote storage under a given filename.
pub trait Uploader: Send + Sync {
    fn upload(&self, payload: &EncodedPayload, filename: &str) -> Result<(), UploadError>;
}

/// Join a base URL and a filename with exactly one `/` between them.
///
/// The filename is percent-encoded as a single path segment, so `#`, `?`
/// and spaces stay part of the object name.
///
/// - `("http://h/media/", "a.jpg")` → `"http://h/media/a.jpg"`
/// - `("http://h/media", "/a.jpg")` → `"http://h/media/a.jpg"`
/// - `("http://h/media", "cat#1.png")` → `"http://h/media/cat%231.png"`
pub fn join_url(base: &str, filename: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        urlencoding::encode(filename.trim_start_matches('/'))
    )
}

/// [`Uploader`] backed by a blocking `reqwest` client.
///
/// The client is built once and reused, so uploads from many threads share
/// one connection pool.
#[derive(Debug, Clone)]
pub struct HttpUploader {
    base_url: String,
    client: Client,
}

impl HttpUploader {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, UploadError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(UploadError::Client)?;
        Ok(Self::with_client(base_url, client))
    }

    /// Use a preconfigured client. Its user agent and timeout are kept as-is.
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        Self {
            base_url: base_url.into(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Uploader for HttpUploader {
    fn upload(&self, payload: &EncodedPayload, filename: &str) -> Result<(), UploadError> {
        let url = join_url(&self.base_url, filename);
        let parsed = reqwest::Url::parse(&url).map_err(|e| UploadError::InvalidUrl {
            url: url.clone(),
            reason: e.to_string(),
        })?;

        debug!(
            %url,
            content_type = payload.content_type(),
            bytes = payload.len(),
            "uploading"
        );

        let mut response = self
            .client
            .put(parsed)
            .header(CONTENT_TYPE, payload.content_type())
            .body(payload.bytes.clone())
            .send()
            .map_err(|source| {
                warn!(%url, error = %source, "upload transport failure");
                UploadError::Transport {
                    url: url.clone(),
                    source,
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = read_error_body(&mut response);
            warn!(%url, %status, "upload rejected");
            return Err(UploadError::Status { url, status, body });
        }

        // Drain so the pooled connection can be reused.
        let _ = response.copy_to(&mut io::sink());
        Ok(())
    }
}

/// Read a bounded prefix of the response body, then discard the rest.
fn read_error_body(response: &mut reqwest::blocking::Response) -> String {
    let mut buf = Vec::with_capacity(ERROR_BODY_LIMIT);
    let _ = response
        .by_ref()
        .take(ERROR_BODY_LIMIT as u64)
        .read_to_end(&mut buf);
    let _ = response.copy_to(&mut io::sink());
    String::from_utf8_lossy(&buf).into_owned()
}
