//! Content retrieval.

use std::future::Future;

use bytes::Bytes;
use reqwest::StatusCode;
use thiserror::Error;
use tokio::sync::Semaphore;

pub use reqwest::Client;

static MAX_HTTP_REQUESTS: Semaphore = Semaphore::const_new(50);

#[derive(Debug, Error)]
pub enum FetchError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("invalid url `{url}`")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("{0}")]
    Other(String),
}

/// Content fetcher interface.
pub trait ContentFetcher: Send + Sync {
    /// Fetch content located at `url`.
    ///
    /// Return `None` when there is nothing to persist.
    fn fetch(&self, url: &str) -> impl Future<Output = Result<Option<Bytes>, FetchError>> + Send;
}

/// HTTP content fetcher.
#[derive(Debug, Default)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_client(self, client: Client) -> Self {
        Self { client }
    }
}

impl ContentFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Option<Bytes>, FetchError> {
        let url = url.trim();

        if url.is_empty() {
            return Ok(None);
        }

        let parsed = parse_url(url)?;

        // the semaphore is never closed
        let _permit = MAX_HTTP_REQUESTS
            .acquire()
            .await
            .map_err(|err| FetchError::Other(err.to_string()))?;

        tracing::trace!("Fetching content: `{parsed}`");

        let resp = self.client.get(parsed).send().await?;

        if matches!(resp.status(), StatusCode::NOT_FOUND | StatusCode::NO_CONTENT) {
            tracing::trace!("No content found ({}): `{url}`", resp.status());
            return Ok(None);
        }

        let body = resp.error_for_status()?.bytes().await?;

        Ok((!body.is_empty()).then_some(body))
    }
}

/// Parse `url`, assuming `https` when no scheme is given.
fn parse_url(url: &str) -> Result<url::Url, FetchError> {
    let parsed = match url::Url::parse(url) {
        Err(url::ParseError::RelativeUrlWithoutBase) => url::Url::parse(&format!("https://{url}")),
        parsed => parsed,
    };

    parsed.map_err(|source| FetchError::InvalidUrl {
        url: url.to_owned(),
        source,
    })
}
