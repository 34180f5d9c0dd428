//! Moves the staged client into the host project

use std::path::{Path, PathBuf};

use tokio::fs;
use walkdir::WalkDir;

use crate::core::{Error, Result};

/// What [`install`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstallReport {
    /// A previously installed tree was replaced
    pub replaced_previous: bool,
}

/// Recursively copy `src` into `dst` (created if missing)
pub fn copy_tree(src: &Path, dst: &Path) -> Result<()> {
    for entry in WalkDir::new(src) {
        let entry = entry.map_err(|e| Error::output(format!("Failed to walk {}: {e}", src.display())))?;
        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| Error::output(format!("Unexpected path {}: {e}", entry.path().display())))?;
        let target = dst.join(relative);

        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

fn sibling(path: &Path, suffix: &str) -> Result<PathBuf> {
    let parent = path
        .parent()
        .ok_or_else(|| Error::output(format!("{} has no parent directory", path.display())))?;
    let name = path
        .file_name()
        .ok_or_else(|| Error::output(format!("{} has no directory name", path.display())))?
        .to_string_lossy();
    Ok(parent.join(format!(".{name}.{suffix}")))
}

async fn remove_dir_if_exists(path: &Path) -> Result<bool> {
    if fs::try_exists(path).await? {
        fs::remove_dir_all(path).await?;
        return Ok(true);
    }
    Ok(false)
}

/// Move `installed` aside to `previous` and `incoming` into its place.
///
/// If the second rename fails the old tree is moved back before the error
/// is returned. Returns whether an old tree was moved aside.
pub(crate) async fn swap_into_place(incoming: &Path, installed: &Path, previous: &Path) -> Result<bool> {
    let had_previous = fs::try_exists(installed).await?;
    if had_previous {
        fs::rename(installed, previous).await?;
    }

    if let Err(e) = fs::rename(incoming, installed).await {
        if had_previous {
            match fs::rename(previous, installed).await {
                Ok(()) => tracing::warn!(path = %installed.display(), "Restored previously installed client"),
                Err(restore) => tracing::error!(
                    path = %installed.display(),
                    previous = %previous.display(),
                    error = %restore,
                    "Could not restore previously installed client"
                ),
            }
        }
        return Err(e.into());
    }
    Ok(had_previous)
}

/// Replace `installed` with the contents of `staging`, then delete `staging`.
///
/// The new tree is copied next to the destination first and swapped in by
/// renames, so the window without an installed client is two renames wide
/// instead of a whole recursive copy.
pub async fn install(staging: &Path, installed: &Path) -> Result<InstallReport> {
    if !fs::try_exists(staging).await? {
        return Err(Error::output(format!(
            "The directory {} does not exist",
            staging.display()
        )));
    }

    let incoming = sibling(installed, "incoming")?;
    let previous = sibling(installed, "previous")?;
    if let Some(parent) = installed.parent() {
        fs::create_dir_all(parent).await?;
    }
    // leftovers from an interrupted run
    remove_dir_if_exists(&incoming).await?;
    remove_dir_if_exists(&previous).await?;

    let (src, dst) = (staging.to_path_buf(), incoming.clone());
    tokio::task::spawn_blocking(move || copy_tree(&src, &dst))
        .await
        .map_err(|e| Error::output(format!("Copy task failed: {e}")))??;

    let replaced_previous = swap_into_place(&incoming, installed, &previous).await?;
    if replaced_previous {
        fs::remove_dir_all(&previous).await?;
        tracing::debug!(path = %installed.display(), "Removed previously installed client");
    }

    fs::remove_dir_all(staging).await?;
    tracing::info!(
        staging = %staging.display(),
        installed = %installed.display(),
        "Installed generated client"
    );

    Ok(InstallReport { replaced_previous })
}
