//! Content persistence.

use std::future::Future;
use std::path::{Component, Path, PathBuf};

use bytes::Bytes;
use thiserror::Error;
use tokio::{fs, io, sync::Semaphore};

static MAX_FILE_HANDLES: Semaphore = Semaphore::const_new(100);

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("path `{}` does not exist", .path.display())]
    PathMissing {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("{0}")]
    Rejected(String),
}

/// Content store interface.
pub trait ContentStore: Send + Sync {
    /// Persist `content` at `path`.
    fn store(&self, content: Bytes, path: &Path) -> impl Future<Output = Result<(), StoreError>> + Send;
}

/// Local file system content store.
///
/// Storage paths are resolved against a root directory. Missing directories are never created,
/// so the output root must exist beforehand.
#[derive(Debug)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[inline]
    pub fn root(&self) -> &Path {
        self.root.as_path()
    }
}

impl ContentStore for FsStore {
    async fn store(&self, content: Bytes, path: &Path) -> Result<(), StoreError> {
        // storage paths must stay below the root
        if path.is_absolute() || path.components().any(|c| matches!(c, Component::ParentDir)) {
            return Err(StoreError::Rejected(format!("path `{}` escapes the store root", path.display())));
        }

        // the semaphore is never closed
        let _permit = MAX_FILE_HANDLES.acquire().await.map_err(io::Error::other)?;

        let path = self.root.join(path);

        tracing::trace!("Storing {} bytes to local storage: `{}`", content.len(), path.display());

        let file = match fs::File::options().write(true).create_new(true).open(&path).await {
            Ok(file) => file,
            Err(source) if source.kind() == io::ErrorKind::NotFound => {
                return Err(StoreError::PathMissing { path, source });
            }
            Err(err) => return Err(err.into()),
        };

        write_or_remove(file, &path, &content).await
    }
}

/// Write `content` to the newly created `file` at `path`, removing it on failure.
async fn write_or_remove(file: fs::File, path: &Path, content: &[u8]) -> Result<(), StoreError> {
    use io::AsyncWriteExt;

    let mut writer = io::BufWriter::new(file);

    let written: io::Result<()> = async {
        writer.write_all(content).await?;
        writer.shutdown().await?;
        writer.get_ref().sync_all().await
    }
    .await;

    if let Err(err) = written {
        tracing::trace!("Deleting incomplete file from local storage: `{}`", path.display());

        drop(writer);
        let _ = fs::remove_file(path).await;

        return Err(err.into());
    }

    Ok(())
}
