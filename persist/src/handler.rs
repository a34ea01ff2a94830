use std::path::PathBuf;

use futures::stream::{self, StreamExt};

use crate::config::Config;
use crate::diagnostics::DiagnosticsSink;
use crate::error::{Error, StorageError};
use crate::fetch::ContentFetcher;
use crate::ident::{PathAllocator, UuidAllocator};
use crate::store::ContentStore;

/// Outcome of a successfully handled request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing was fetched, hence nothing was persisted.
    Absent,
    /// Fetched content has been persisted at `path`.
    Persisted { path: PathBuf },
}

/// Website persisting request handler.
///
/// Fetches content for a url and persists it under `{output_root}/{uuid}`, a fresh path per attempt.
/// Store failures are reported once to the [`DiagnosticsSink`] and returned as a [`StorageError`].
///
/// # Example
/// ```
/// # tokio_test::block_on(async {
/// # use persist::{FsStore, HttpFetcher, Outcome, PersistHandler, TracingSink};
/// let dir = tempfile::tempdir().unwrap();
/// let handler = PersistHandler::new(HttpFetcher::new(), FsStore::new(dir.path()), TracingSink);
///
/// // an empty url never yields anything to persist
/// assert_eq!(handler.handle("").await.unwrap(), Outcome::Absent);
/// # })
/// ```
#[derive(Debug)]
pub struct PersistHandler<F, S, D, A = UuidAllocator> {
    fetcher: F,
    store: S,
    sink: D,
    allocator: A,
    config: Config,
}

impl<F, S, D> PersistHandler<F, S, D> {
    pub fn new(fetcher: F, store: S, sink: D) -> Self {
        Self {
            fetcher,
            store,
            sink,
            allocator: UuidAllocator,
            config: Config::default(),
        }
    }
}

impl<F, S, D, A> PersistHandler<F, S, D, A> {
    #[inline]
    pub fn with_allocator<B>(self, allocator: B) -> PersistHandler<F, S, D, B> {
        let Self {
            fetcher,
            store,
            sink,
            config,
            ..
        } = self;

        PersistHandler {
            fetcher,
            store,
            sink,
            allocator,
            config,
        }
    }

    #[inline]
    pub fn with_config(self, config: Config) -> Self {
        Self { config, ..self }
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[inline]
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    #[inline]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[inline]
    pub fn sink(&self) -> &D {
        &self.sink
    }

    #[inline]
    pub fn allocator(&self) -> &A {
        &self.allocator
    }
}

impl<F, S, D, A> PersistHandler<F, S, D, A>
where
    F: ContentFetcher,
    S: ContentStore,
    D: DiagnosticsSink,
    A: PathAllocator,
{
    /// Fetch content located at `url` and persist it.
    ///
    /// Fetch errors are returned as is. No store attempt is made when nothing is fetched.
    pub async fn handle(&self, url: &str) -> Result<Outcome, Error> {
        tracing::debug!("Handling request: `{url}`");

        let Some(content) = self.fetcher.fetch(url).await? else {
            tracing::debug!("Nothing to persist: `{url}`");
            return Ok(Outcome::Absent);
        };

        let path = self.config.output_root().join(self.allocator.new_identifier().to_string());

        if let Err(err) = self.store.store(content, &path).await {
            let err = StorageError::new(err);

            self.sink.emit(err.message());

            return Err(err.into());
        }

        tracing::debug!("Persisted content to local storage: `{}`", path.display());

        Ok(Outcome::Persisted { path })
    }

    /// Handle a batch of requests with a bounded number of them in flight.
    ///
    /// Each request is handled independently, a failing one never cancels the others.
    /// Results are returned in completion order, along with their url.
    pub async fn handle_all<I>(&self, urls: I) -> Vec<(String, Result<Outcome, Error>)>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        stream::iter(urls)
            .map(|url| async move {
                let url = url.into();
                let result = self.handle(&url).await;
                (url, result)
            })
            .buffer_unordered(self.config.concurrency().get().into())
            .collect()
            .await
    }
}
