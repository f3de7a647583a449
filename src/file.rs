use camino::Utf8Path;
use tokio::fs;
use tracing::debug;

use crate::dir::{ensure_parent, path_exists};
use crate::error::{FsError, Result};

/// Write `content` to `path`, creating missing parent directories and
/// replacing any existing file.
///
/// Unlike [`ensure_directory`](crate::ensure_directory), the destination is
/// always treated as a file: writing `out/Makefile` creates `out`, never a
/// `Makefile` directory.
pub async fn write_text_file(path: impl AsRef<Utf8Path>, content: impl AsRef<str>) -> Result<()> {
    let path = path.as_ref();
    let content = content.as_ref();
    ensure_parent(path).await?;

    debug!(path = %path, bytes = content.len(), "writing file");
    fs::write(path, content)
        .await
        .map_err(|err| FsError::io(path, err))
}

/// Read the file at `path` as text.
///
/// Returns `None` when the file is missing or cannot be read for any reason.
/// Invalid UTF-8 is replaced rather than rejected.
pub async fn read_text_file(path: impl AsRef<Utf8Path>) -> Option<String> {
    let path = path.as_ref();
    match fs::read(path).await {
        Ok(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
        Err(err) => {
            debug!(path = %path, error = %err, "read failed; treating file as absent");
            None
        }
    }
}

/// Copy `from` to `to`, creating the destination's parent directories.
/// As with [`write_text_file`], `to` always names a file.
///
/// Returns the number of bytes copied.
pub async fn copy_file(from: impl AsRef<Utf8Path>, to: impl AsRef<Utf8Path>) -> Result<u64> {
    let (from, to) = (from.as_ref(), to.as_ref());
    ensure_parent(to).await?;

    debug!(from = %from, to = %to, "copying file");
    match fs::copy(from, to).await {
        Ok(bytes) => Ok(bytes),
        Err(err) if !path_exists(from).await => Err(FsError::io(from, err)),
        Err(err) => Err(FsError::io(to, err)),
    }
}
