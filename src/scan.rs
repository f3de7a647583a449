use std::collections::HashSet;

use camino::{Utf8Path, Utf8PathBuf};
use tokio::fs;
use tracing::{debug, trace};

use crate::error::{FsError, Result};

/// File-name suffixes, each including the leading dot (`.json`), used to
/// filter scan results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionSet(HashSet<String>);

impl ExtensionSet {
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(extensions.into_iter().map(Into::into).collect())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, extension: &str) -> bool {
        self.0.contains(extension)
    }

    /// Whether the last extension of `path`, dot included, is a member.
    pub fn matches(&self, path: &Utf8Path) -> bool {
        let (Some(name), Some(ext)) = (path.file_name(), path.extension()) else {
            return false;
        };
        self.contains(&name[name.len() - ext.len() - 1..])
    }
}

impl<S: Into<String>> FromIterator<S> for ExtensionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl<S: Into<String>, const N: usize> From<[S; N]> for ExtensionSet {
    fn from(extensions: [S; N]) -> Self {
        Self::new(extensions)
    }
}

/// Collect every file below `root` whose extension is in `extensions`.
///
/// Directories are visited one at a time from an explicit stack, so deep trees
/// do not grow the call stack. Entries are classified after following
/// symlinks, which means a symlink cycle never terminates.
///
/// Paths come back in discovery order, which depends on directory listing
/// order; sort them if you need stability. Any error listing or stating an
/// entry aborts the scan.
pub async fn scan_files_by_extension(
    root: impl AsRef<Utf8Path>,
    extensions: &ExtensionSet,
) -> Result<Vec<Utf8PathBuf>> {
    let root = root.as_ref();
    let meta = fs::metadata(root)
        .await
        .map_err(|err| FsError::io(root, err))?;
    if !meta.is_dir() {
        return Err(FsError::invalid(root, "scan root is not a directory"));
    }
    if extensions.is_empty() {
        return Ok(Vec::new());
    }

    let mut matched = Vec::new();
    let mut frontier = vec![root.to_owned()];

    while let Some(dir) = frontier.pop() {
        trace!(path = %dir, "scanning directory");
        let mut entries = fs::read_dir(&dir)
            .await
            .map_err(|err| FsError::io(&dir, err))?;

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|err| FsError::io(&dir, err))?
        {
            let path = Utf8PathBuf::from_path_buf(entry.path()).map_err(|raw| {
                FsError::invalid(&dir, format!("entry {} is not valid UTF-8", raw.display()))
            })?;
            let meta = fs::metadata(&path)
                .await
                .map_err(|err| FsError::io(&path, err))?;

            if meta.is_dir() {
                frontier.push(path);
            } else if extensions.matches(&path) {
                matched.push(path);
            }
        }
    }

    debug!(root = %root, matched = matched.len(), "scan finished");
    Ok(matched)
}
