//! Handler configuration.

use std::num::NonZeroU8;
use std::path::{Path, PathBuf};

/// Fixed output root segment every storage path starts with.
pub const DEFAULT_OUTPUT_ROOT: &str = "out";

/// Maximum number of requests handled at once by [`PersistHandler::handle_all()`](crate::PersistHandler::handle_all).
pub const DEFAULT_CONCURRENCY: NonZeroU8 = match NonZeroU8::new(10) {
    Some(n) => n,
    None => unreachable!(),
};

/// Persist handler configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// The root segment joined with a fresh identifier to build storage paths.
    output_root: PathBuf,
    /// Upper bound of in-flight requests when handling a batch.
    concurrency: NonZeroU8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_root: PathBuf::from(DEFAULT_OUTPUT_ROOT),
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

impl Config {
    #[inline]
    pub fn with_output_root(self, output_root: impl Into<PathBuf>) -> Self {
        Self {
            output_root: output_root.into(),
            ..self
        }
    }

    #[inline]
    pub fn with_concurrency(self, concurrency: NonZeroU8) -> Self {
        Self { concurrency, ..self }
    }

    #[inline]
    pub fn output_root(&self) -> &Path {
        self.output_root.as_path()
    }

    #[inline]
    pub fn concurrency(&self) -> NonZeroU8 {
        self.concurrency
    }
}
