use camino::Utf8Path;
use tokio::fs;
use tracing::debug;

use crate::error::{FsError, Result};

/// Ensure the directory implied by `path` exists, creating it recursively if needed.
///
/// A path without an extension is treated as the directory itself; a path with
/// one (`a/b/c.txt`) names a file, and its parent directory is created instead.
/// Calling this for a directory that already exists is a no-op.
pub async fn ensure_directory(path: impl AsRef<Utf8Path>) -> Result<()> {
    let path = path.as_ref();
    if path.as_str().is_empty() {
        return Err(FsError::invalid(path, "path is empty"));
    }

    let dir = if path.extension().is_none() {
        path
    } else {
        path.parent().unwrap_or(Utf8Path::new(""))
    };
    create_missing(dir).await
}

/// Ensure the parent directory of the file at `path` exists.
pub(crate) async fn ensure_parent(path: &Utf8Path) -> Result<()> {
    if path.as_str().is_empty() {
        return Err(FsError::invalid(path, "path is empty"));
    }
    match path.parent() {
        Some(parent) => create_missing(parent).await,
        None => Ok(()),
    }
}

/// Returns whether `path` is visible on the filesystem.
///
/// Any error while probing (including permission denied) reads as `false`.
pub async fn path_exists(path: impl AsRef<Utf8Path>) -> bool {
    let path = path.as_ref();
    match fs::try_exists(path).await {
        Ok(exists) => exists,
        Err(err) => {
            debug!(path = %path, error = %err, "existence probe failed");
            false
        }
    }
}

async fn create_missing(dir: &Utf8Path) -> Result<()> {
    // An empty parent is the current directory.
    if dir.as_str().is_empty() || path_exists(dir).await {
        return Ok(());
    }
    create_dirs(dir).await
}

/// `create_dir_all` already succeeds when the directory appears between the
/// probe and the create, so a concurrent creator is not an error.
async fn create_dirs(dir: &Utf8Path) -> Result<()> {
    debug!(path = %dir, "creating directory");
    fs::create_dir_all(dir)
        .await
        .map_err(|err| FsError::io(dir, err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use tempfile::TempDir;

    fn temp_root() -> (TempDir, Utf8PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
        (dir, root)
    }

    #[tokio::test]
    async fn empty_path_is_rejected() {
        let err = ensure_directory("").await.unwrap_err();
        assert!(matches!(err, FsError::InvalidArgument { .. }));
    }

    #[tokio::test]
    async fn file_like_path_creates_parent_only() {
        let (_guard, root) = temp_root();
        let target = root.join("a").join("b").join("c.txt");

        ensure_directory(&target).await.unwrap();

        assert!(root.join("a").join("b").is_dir());
        assert!(!target.exists());

        // Second call is a no-op.
        ensure_directory(&target).await.unwrap();
        assert!(root.join("a").join("b").is_dir());
    }

    #[tokio::test]
    async fn extensionless_path_is_created_as_directory() {
        let (_guard, root) = temp_root();
        let target = root.join("x").join("y");

        ensure_directory(&target).await.unwrap();

        assert!(target.is_dir());
        assert!(path_exists(&target).await);
    }

    #[tokio::test]
    async fn path_exists_reports_missing_and_created_paths() {
        let (_guard, root) = temp_root();
        let target = root.join("later");

        assert!(!path_exists(&target).await);
        ensure_directory(&target).await.unwrap();
        assert!(path_exists(&target).await);
    }

    #[tokio::test]
    async fn path_exists_after_write() {
        let (_guard, root) = temp_root();
        let target = root.join("docs").join("readme.md");

        assert!(!path_exists(&target).await);
        crate::file::write_text_file(&target, "hi").await.unwrap();
        assert!(path_exists(&target).await);
    }

    #[tokio::test]
    async fn creating_an_existing_directory_succeeds() {
        let (_guard, root) = temp_root();
        let target = root.join("raced");
        std::fs::create_dir_all(&target).unwrap();

        // Another actor won the race; creating again is not an error.
        create_dirs(&target).await.unwrap();
        assert!(target.is_dir());
    }

    #[tokio::test]
    async fn creating_over_a_file_fails() {
        let (_guard, root) = temp_root();
        let target = root.join("occupied");
        std::fs::write(&target, "file").unwrap();

        assert!(create_dirs(&target).await.is_err());
    }

    #[tokio::test]
    async fn ensure_parent_tolerates_bare_file_names() {
        ensure_parent(Utf8Path::new("bare.txt")).await.unwrap();
    }
}
