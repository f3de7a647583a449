use anyhow::{Context, Result, anyhow};
use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;
use tracing::debug;

/// Optional user configuration, loaded from `~/.config/fsutil/config.toml` by default.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FsutilConfig {
    pub scan: ScanConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanConfig {
    /// Extensions used by `scan` when none are given on the command line.
    pub extensions: Vec<String>,
}

pub fn default_path() -> Option<Utf8PathBuf> {
    let dir = dirs::config_dir()?;
    let dir = Utf8PathBuf::from_path_buf(dir).ok()?;
    Some(dir.join("fsutil").join("config.toml"))
}

/// Load the explicit config file, or the default one when present.
///
/// A missing explicit file is an error; a missing default file means defaults.
pub async fn load(explicit: Option<&Utf8Path>) -> Result<FsutilConfig> {
    if let Some(path) = explicit {
        let raw = fsutil::read_text_file(path)
            .await
            .ok_or_else(|| anyhow!("reading config {}", path))?;
        return parse(path, &raw);
    }

    let Some(path) = default_path() else {
        return Ok(FsutilConfig::default());
    };
    match fsutil::read_text_file(&path).await {
        Some(raw) => parse(&path, &raw),
        None => {
            debug!(path = %path, "no config file; using defaults");
            Ok(FsutilConfig::default())
        }
    }
}

fn parse(path: &Utf8Path, raw: &str) -> Result<FsutilConfig> {
    toml::from_str(raw).with_context(|| format!("parsing config {}", path))
}
