//! A simple crate persisting website contents.
//!
//! A small, generic crate providing features dedicated to:
//! - fetching contents from a url,
//! - storing fetched contents under fresh, collision-free storage paths,
//! - translating storage failures into a domain error while reporting a diagnostic message.
//!
//! The [`PersistHandler`] orchestrates four capabilities, each one described by its own trait so that any implementation can be plugged in:
//! a [`ContentFetcher`], a [`ContentStore`], a [`DiagnosticsSink`] and a [`PathAllocator`]. Default implementations are provided on top of
//! `reqwest` ([`HttpFetcher`]), the local file system ([`FsStore`]), `tracing` ([`TracingSink`]) and random UUIDs ([`UuidAllocator`]).
//!
//! Every handled request yields one of the following:
//! - [`Outcome::Absent`] when nothing has been fetched, in which case nothing else happens;
//! - [`Outcome::Persisted`] once the fetched content has been stored;
//! - a [`StorageError`] when the store failed, carrying one of two stable messages depending on its [`StorageErrorKind`].
//!
//! Here is the representation of the local storage once a few requests have been handled by a [`PersistHandler`] on top of a [`FsStore`]:
//!
//! ```text
//!     - root local storage
//!       L {output_root}
//!         L {uuid}
//!         L {uuid}
//!         L ...
//! ```
//!
//! Note that the [`FsStore`] never creates directories: a missing `{output_root}` is reported as
//! [`StorageErrorKind::PathMissing`].

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod fetch;
pub mod ident;
pub mod store;

mod handler;
pub use handler::*;

#[cfg(test)]
mod testing;

pub use config::Config;
pub use diagnostics::{DiagnosticsSink, TracingSink};
pub use error::{Error, StorageError, StorageErrorKind};
pub use fetch::{ContentFetcher, FetchError, HttpFetcher};
pub use ident::{PathAllocator, UuidAllocator};
pub use store::{ContentStore, FsStore, StoreError};
