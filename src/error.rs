use std::io;

use camino::{Utf8Path, Utf8PathBuf};

/// Errors surfaced by the propagating helpers.
///
/// Every variant names the path the failing call was made against.
#[derive(Debug, thiserror::Error)]
pub enum FsError {
    #[error("invalid path {path:?}: {reason}")]
    InvalidArgument { path: Utf8PathBuf, reason: String },

    #[error("{path} not found")]
    NotFound { path: Utf8PathBuf },

    #[error("permission denied for {path}")]
    PermissionDenied { path: Utf8PathBuf },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: Utf8PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("serializing JSON for {path}: {source}")]
    Json {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T, E = FsError> = std::result::Result<T, E>;

impl FsError {
    pub(crate) fn invalid(path: &Utf8Path, reason: impl Into<String>) -> Self {
        FsError::InvalidArgument {
            path: path.to_owned(),
            reason: reason.into(),
        }
    }

    /// Classify an `io::Error` raised while operating on `path`.
    pub(crate) fn io(path: &Utf8Path, source: io::Error) -> Self {
        let path = path.to_owned();
        match source.kind() {
            io::ErrorKind::NotFound => FsError::NotFound { path },
            io::ErrorKind::PermissionDenied => FsError::PermissionDenied { path },
            _ => FsError::Io { path, source },
        }
    }

    /// The path the failing operation was working on.
    pub fn path(&self) -> &Utf8Path {
        match self {
            FsError::InvalidArgument { path, .. }
            | FsError::NotFound { path }
            | FsError::PermissionDenied { path }
            | FsError::Io { path, .. }
            | FsError::Json { path, .. } => path,
        }
    }
}
