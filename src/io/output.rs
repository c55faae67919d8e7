//! Run output directories and figure display

use crate::io::configuration::FIGURE_EXTENSION;
use crate::io::error::{ExplorerError, Result};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

/// First free path among `base`, `base2`, `base3`, ...
pub fn increment_path(base: &Path) -> PathBuf {
    if !base.exists() {
        return base.to_path_buf();
    }

    let stem = base.file_name().unwrap_or_default().to_string_lossy().to_string();
    (2..)
        .map(|n| base.with_file_name(format!("{stem}{n}")))
        .find(|candidate| !candidate.exists())
        .unwrap_or_else(|| base.to_path_buf())
}

/// Create a fresh run directory `<project>/<name>`, disambiguated if taken
///
/// # Errors
///
/// Returns a file system error if the directory cannot be created.
pub fn create_run_dir(project: &Path, name: &str) -> Result<PathBuf> {
    let dir = increment_path(&project.join(name));
    std::fs::create_dir_all(&dir).map_err(|e| ExplorerError::FileSystem {
        path: dir.clone(),
        operation: "create run directory",
        source: e,
    })?;
    debug!(dir = %dir.display(), "created run directory");
    Ok(dir)
}

/// Location of an analysis' figure inside `dir`
pub fn figure_path(dir: &Path, analysis: &str) -> PathBuf {
    dir.join(format!("{analysis}.{FIGURE_EXTENSION}"))
}

/// Open a rendered figure with the platform's default viewer
///
/// # Errors
///
/// Returns a file system error if the viewer cannot be launched.
pub fn open_in_viewer(path: &Path) -> Result<()> {
    let mut command = viewer_command(path);
    command.spawn().map_err(|e| ExplorerError::FileSystem {
        path: path.to_path_buf(),
        operation: "open figure viewer",
        source: e,
    })?;
    Ok(())
}

#[cfg(target_os = "macos")]
fn viewer_command(path: &Path) -> Command {
    let mut command = Command::new("open");
    command.arg(path);
    command
}

#[cfg(target_os = "windows")]
fn viewer_command(path: &Path) -> Command {
    let mut command = Command::new("cmd");
    command.args(["/C", "start", ""]).arg(path);
    command
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn viewer_command(path: &Path) -> Command {
    let mut command = Command::new("xdg-open");
    command.arg(path);
    command
}
