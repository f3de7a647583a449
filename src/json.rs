use camino::Utf8Path;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{FsError, Result};
use crate::file::{read_text_file, write_text_file};

/// Read and deserialize the JSON file at `path`.
///
/// Returns `None` if the file is absent (see [`read_text_file`]) or its
/// contents do not parse as `T`. Use `serde_json::Value` for an untyped read.
pub async fn read_json_file<T: DeserializeOwned>(path: impl AsRef<Utf8Path>) -> Option<T> {
    let path = path.as_ref();
    let raw = read_text_file(path).await?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(err) => {
            debug!(path = %path, error = %err, "invalid JSON; treating file as absent");
            None
        }
    }
}

/// Serialize `value` as pretty-printed JSON and write it to `path`.
pub async fn write_json_file<T: Serialize + ?Sized>(
    path: impl AsRef<Utf8Path>,
    value: &T,
) -> Result<()> {
    let path = path.as_ref();
    let mut raw = serde_json::to_string_pretty(value).map_err(|source| FsError::Json {
        path: path.to_owned(),
        source,
    })?;
    raw.push('\n');
    write_text_file(path, raw).await
}
