//! Application startup and utilities.
//!
//! This module contains exit codes, tracing setup, and the `dump` command
//! that support the main entry point.

use std::path::Path;

use gconf::cli::Format;
use gconf::reader::{FileStack, ReaderError};
use gconf::tree;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Application exit codes.
pub mod exit_code {
    use std::process::ExitCode;

    /// Success (exit code 0).
    pub const SUCCESS: ExitCode = ExitCode::SUCCESS;

    /// Configuration error (exit code 1) - unreadable file, syntax error, bad include, etc.
    pub const CONFIG_ERROR: ExitCode = ExitCode::FAILURE;

    /// Output error (exit code 2) - the tree could not be serialized.
    ///
    /// Note: This is a function rather than a constant because `ExitCode::from()` is not `const fn`.
    pub fn output_error() -> ExitCode {
        ExitCode::from(2)
    }
}

/// Error from the `dump` command.
#[derive(Debug, thiserror::Error)]
pub enum DumpError {
    /// Reading the configuration tree failed.
    #[error(transparent)]
    Config(#[from] ReaderError),

    /// Serializing the tree failed.
    #[error("Failed to serialize config tree: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Reads the tree rooted at `file` and renders it in `format`.
///
/// # Errors
///
/// Returns [`DumpError::Config`] if the tree cannot be read and
/// [`DumpError::Serialize`] if JSON output fails.
pub fn dump(file: &Path, format: Format) -> Result<String, DumpError> {
    let mut stack = FileStack::open(file)?;
    let nodes = tree::read_tree(&mut stack)?;
    tracing::debug!("read {} top-level option(s) from {}", nodes.len(), file.display());

    match format {
        Format::Text => Ok(tree::render(&nodes)),
        Format::Json => Ok(serde_json::to_string_pretty(&nodes)? + "\n"),
    }
}

/// Sets up the tracing subscriber for logging.
pub fn setup_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    mod dump {
        use super::*;

        #[test]
        fn text_output_inlines_includes() {
            let dir = TempDir::new().unwrap();
            let root = write(&dir, "root.conf", "name root\ninclude sub/*.conf\n");
            write(&dir, "sub/a.conf", "listen 1812\n");

            let output = dump(&root, Format::Text).unwrap();

            assert_eq!(output, "name root\nlisten 1812\n");
        }

        #[test]
        fn json_output_carries_locations() {
            let dir = TempDir::new().unwrap();
            let root = write(&dir, "root.conf", "server main {\n  port 1812\n}\n");

            let output = dump(&root, Format::Json).unwrap();
            let value: serde_json::Value = serde_json::from_str(&output).unwrap();

            assert_eq!(value[0]["name"], "server");
            assert_eq!(value[0]["kind"], "block_open");
            assert_eq!(value[0]["children"][0]["value"], "1812");
            let location = value[0]["children"][0]["location"].as_str().unwrap();
            assert!(location.ends_with("root.conf:2"));
        }

        #[test]
        fn missing_root_is_config_error() {
            let dir = TempDir::new().unwrap();

            let result = dump(&dir.path().join("absent.conf"), Format::Text);

            assert!(matches!(
                result,
                Err(DumpError::Config(ReaderError::FileOpen { .. }))
            ));
        }

        #[test]
        fn syntax_error_is_config_error() {
            let dir = TempDir::new().unwrap();
            let root = write(&dir, "root.conf", "}\n");

            let result = dump(&root, Format::Text);

            assert!(matches!(
                result,
                Err(DumpError::Config(ReaderError::UnexpectedBlockClose { .. }))
            ));
        }
    }
}
