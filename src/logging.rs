//! Log setup for the terminal game.
//!
//! The TUI owns stdout and stderr, so logs only ever go to a file, and only
//! when asked for with `--log-file` or the `SAFARI_LOG` environment variable.
//! `RUST_LOG` overrides the level as usual.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::app_dirs::AppDirs;

/// Set to a path, or to `1` for the default location
pub const LOG_ENV: &str = "SAFARI_LOG";

pub fn default_level(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "info"
    }
}

/// Where logs should go, if anywhere
pub fn resolve_log_path(cli_path: Option<PathBuf>) -> Option<PathBuf> {
    cli_path.or_else(|| {
        std::env::var_os(LOG_ENV).map(|value| {
            if value.is_empty() || value == "1" {
                AppDirs::log_path()
            } else {
                PathBuf::from(value)
            }
        })
    })
}

pub fn init(path: &Path, verbose: bool) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_level(verbose))),
        )
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))
}
