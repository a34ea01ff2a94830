//! Hand-written collaborator fakes recording every call they receive.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use bytes::Bytes;

use crate::diagnostics::DiagnosticsSink;
use crate::fetch::{ContentFetcher, FetchError};
use crate::ident::{PathAllocator, Uuid, UuidAllocator};
use crate::store::{ContentStore, StoreError};

/// A fetcher serving content from a fixed map, `None` for any other url.
#[derive(Debug, Default)]
pub struct FakeFetcher {
    contents: HashMap<String, Result<Bytes, String>>,
    calls: Mutex<Vec<String>>,
}

impl FakeFetcher {
    pub fn with_content(mut self, url: &str, content: &'static str) -> Self {
        self.contents.insert(url.to_owned(), Ok(Bytes::from_static(content.as_bytes())));
        self
    }

    pub fn with_failure(mut self, url: &str, reason: &str) -> Self {
        self.contents.insert(url.to_owned(), Err(reason.to_owned()));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl ContentFetcher for FakeFetcher {
    async fn fetch(&self, url: &str) -> Result<Option<Bytes>, FetchError> {
        self.calls.lock().unwrap().push(url.to_owned());

        match self.contents.get(url) {
            Some(Ok(content)) => Ok(Some(content.clone())),
            Some(Err(reason)) => Err(FetchError::Other(reason.clone())),
            None => Ok(None),
        }
    }
}

/// A store recording stored contents, failing with a configured error factory.
#[derive(Default)]
pub struct FakeStore {
    failure: Option<Box<dyn Fn(&Path) -> StoreError + Send + Sync>>,
    calls: Mutex<Vec<(Bytes, PathBuf)>>,
}

impl FakeStore {
    pub fn failing(failure: impl Fn(&Path) -> StoreError + Send + Sync + 'static) -> Self {
        Self {
            failure: Some(Box::new(failure)),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<(Bytes, PathBuf)> {
        self.calls.lock().unwrap().clone()
    }
}

impl ContentStore for FakeStore {
    async fn store(&self, content: Bytes, path: &Path) -> Result<(), StoreError> {
        self.calls.lock().unwrap().push((content, path.to_owned()));

        match self.failure {
            Some(ref failure) => Err(failure(path)),
            None => Ok(()),
        }
    }
}

/// A sink recording every emitted message.
#[derive(Debug, Default)]
pub struct FakeSink {
    messages: Mutex<Vec<String>>,
}

impl FakeSink {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl DiagnosticsSink for FakeSink {
    fn emit(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_owned());
    }
}

/// A UUID allocator counting generated identifiers.
#[derive(Debug, Default)]
pub struct CountingAllocator {
    count: AtomicUsize,
}

impl CountingAllocator {
    pub fn count(&self) -> usize {
        self.count.load(Ordering::Relaxed)
    }
}

impl PathAllocator for CountingAllocator {
    fn new_identifier(&self) -> Uuid {
        self.count.fetch_add(1, Ordering::Relaxed);
        UuidAllocator.new_identifier()
    }
}

/// A fetcher taking some time to serve content, tracking the peak of concurrent fetches.
#[derive(Debug, Default)]
pub struct SlowFetcher {
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

impl SlowFetcher {
    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

impl ContentFetcher for SlowFetcher {
    async fn fetch(&self, url: &str) -> Result<Option<Bytes>, FetchError> {
        let in_flight = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(in_flight, Ordering::SeqCst);

        tokio::time::sleep(tokio::time::Duration::from_millis(20)).await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        Ok(Some(Bytes::copy_from_slice(url.as_bytes())))
    }
}
