use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result, anyhow};
use camino::{Utf8Path, Utf8PathBuf};
use tokio::io::AsyncReadExt;
use tracing::info;

use fsutil::ExtensionSet;

use crate::cli::{Cli, Command};
use crate::config;

pub async fn run(cli: Cli) -> Result<ExitCode> {
    let config_path = cli.config.map(utf8).transpose()?;

    match cli.command {
        Command::Ensure { path } => handle_ensure(utf8(path)?).await,
        Command::Exists { path } => handle_exists(utf8(path)?).await,
        Command::Write { path, text } => handle_write(utf8(path)?, text).await,
        Command::Read { path } => handle_read(utf8(path)?).await,
        Command::Json { path } => handle_json(utf8(path)?).await,
        Command::Copy { from, to } => handle_copy(utf8(from)?, utf8(to)?).await,
        Command::Scan { root, extensions } => {
            handle_scan(config_path.as_deref(), utf8(root)?, extensions).await
        }
    }
}

async fn handle_ensure(path: Utf8PathBuf) -> Result<ExitCode> {
    fsutil::ensure_directory(&path)
        .await
        .with_context(|| format!("ensuring directory for {}", path))?;
    Ok(ExitCode::SUCCESS)
}

async fn handle_exists(path: Utf8PathBuf) -> Result<ExitCode> {
    let exists = fsutil::path_exists(&path).await;
    println!("{}", exists);
    Ok(if exists {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

async fn handle_write(path: Utf8PathBuf, text: Option<String>) -> Result<ExitCode> {
    let content = match text {
        Some(text) => text,
        None => {
            let mut buffer = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buffer)
                .await
                .context("reading stdin")?;
            buffer
        }
    };

    fsutil::write_text_file(&path, &content)
        .await
        .with_context(|| format!("writing {}", path))?;
    info!(path = %path, bytes = content.len(), "wrote file");
    Ok(ExitCode::SUCCESS)
}

async fn handle_read(path: Utf8PathBuf) -> Result<ExitCode> {
    match fsutil::read_text_file(&path).await {
        Some(content) => {
            print!("{}", content);
            Ok(ExitCode::SUCCESS)
        }
        None => {
            eprintln!("{} is missing or unreadable", path);
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn handle_json(path: Utf8PathBuf) -> Result<ExitCode> {
    match fsutil::read_json_file::<serde_json::Value>(&path).await {
        Some(value) => {
            let pretty = serde_json::to_string_pretty(&value).context("formatting JSON")?;
            println!("{}", pretty);
            Ok(ExitCode::SUCCESS)
        }
        None => {
            eprintln!("{} is missing, unreadable, or not valid JSON", path);
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn handle_copy(from: Utf8PathBuf, to: Utf8PathBuf) -> Result<ExitCode> {
    let bytes = fsutil::copy_file(&from, &to)
        .await
        .with_context(|| format!("copying {} to {}", from, to))?;
    info!(from = %from, to = %to, bytes, "copied file");
    Ok(ExitCode::SUCCESS)
}

async fn handle_scan(
    config_path: Option<&Utf8Path>,
    root: Utf8PathBuf,
    extensions: Vec<String>,
) -> Result<ExitCode> {
    // The config is only consulted when no extension was given.
    let set = if extensions.is_empty() {
        let config = config::load(config_path).await?;
        info!(count = config.scan.extensions.len(), "using extensions from config");
        extension_set(&config.scan.extensions)
    } else {
        extension_set(&extensions)
    };
    let mut found = fsutil::scan_files_by_extension(&root, &set)
        .await
        .with_context(|| format!("scanning {}", root))?;
    found.sort();
    for path in &found {
        println!("{}", path);
    }
    info!(root = %root, matched = found.len(), "scan complete");
    Ok(ExitCode::SUCCESS)
}

fn extension_set(extensions: &[String]) -> ExtensionSet {
    extensions.iter().map(|ext| normalize_extension(ext)).collect()
}

/// Accept `json` as shorthand for `.json` on the command line.
fn normalize_extension(ext: &str) -> String {
    if ext.starts_with('.') {
        ext.to_owned()
    } else {
        format!(".{}", ext)
    }
}

fn utf8(path: PathBuf) -> Result<Utf8PathBuf> {
    Utf8PathBuf::from_path_buf(path)
        .map_err(|raw| anyhow!("path {} is not valid UTF-8", raw.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn extensions_gain_a_leading_dot() {
        assert_eq!(normalize_extension("json"), ".json");
        assert_eq!(normalize_extension(".json"), ".json");
        assert_eq!(normalize_extension("tar.gz"), ".tar.gz");
    }

    #[test]
    fn utf8_paths_convert() {
        let path = utf8(PathBuf::from("a/b.txt")).unwrap();
        assert_eq!(path, Utf8PathBuf::from("a/b.txt"));
    }

    fn temp_root() -> (tempfile::TempDir, Utf8PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
        (dir, root)
    }

    #[test]
    fn extension_set_normalizes_each_entry() {
        let set = extension_set(&["md".to_owned(), ".json".to_owned()]);
        assert_eq!(set, ExtensionSet::from([".md", ".json"]));
    }

    #[tokio::test]
    async fn read_ignores_a_broken_config() {
        let (_guard, root) = temp_root();
        let config = root.join("config.toml");
        let note = root.join("note.txt");
        fsutil::write_text_file(&config, "[scan]\nextension = []\n").await.unwrap();
        fsutil::write_text_file(&note, "hello").await.unwrap();

        let cli = Cli::try_parse_from(["fsutil", "--config", config.as_str(), "read", note.as_str()])
            .unwrap();
        run(cli).await.unwrap();
    }

    #[tokio::test]
    async fn scan_with_extensions_ignores_a_broken_config() {
        let (_guard, root) = temp_root();
        let config = root.join("config.toml");
        fsutil::write_text_file(&config, "not = [valid").await.unwrap();
        fsutil::write_text_file(root.join("keep.md"), "# hi").await.unwrap();

        handle_scan(Some(config.as_path()), root, vec!["md".to_owned()])
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn scan_without_extensions_reads_the_config() {
        let (_guard, root) = temp_root();
        let config = root.join("config.toml");
        fsutil::write_text_file(&config, "[scan]\nextension = []\n").await.unwrap();

        let err = handle_scan(Some(config.as_path()), root.clone(), Vec::new())
            .await
            .unwrap_err();
        assert!(err.to_string().starts_with("parsing config"));

        fsutil::write_text_file(&config, "[scan]\nextensions = [\"md\"]\n")
            .await
            .unwrap();
        handle_scan(Some(config.as_path()), root, Vec::new()).await.unwrap();
    }

    #[tokio::test]
    async fn copy_reports_missing_source_with_context() {
        let dir = tempfile::tempdir().unwrap();
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();

        let err = handle_copy(root.join("ghost.txt"), root.join("out.txt"))
            .await
            .unwrap_err();

        assert!(err.to_string().starts_with("copying "));
        assert!(err.downcast_ref::<fsutil::FsError>().is_some());
    }
}
