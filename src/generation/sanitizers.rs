//! Removal of generator output the host project does not use
//!
//! `typescript-axios` emits a standalone npm package. Only the TypeScript
//! sources are installed; packaging, ignore files, the sample test and the
//! push script are dropped.

use std::path::{Path, PathBuf};

use tokio::fs;

use crate::core::error::Result;

/// Files deleted from the staging directory when present
pub const DENYLIST: &[&str] = &[
    ".gitignore",
    ".swagger-codegen-ignore",
    "api_test.spec.ts",
    "git_push.sh",
    ".npmignore",
    "package.json",
    "tsconfig.json",
    "README.md",
];

/// Delete every denylisted file found in `staging_dir`.
///
/// Missing files are skipped, so calling this repeatedly is harmless.
/// Returns the paths that were actually removed.
pub async fn sanitize_output(staging_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut removed = Vec::new();

    for name in DENYLIST {
        let path = staging_dir.join(name);
        if fs::try_exists(&path).await? {
            fs::remove_file(&path).await?;
            tracing::debug!(path = %path.display(), "Removed generated file");
            removed.push(path);
        }
    }

    Ok(removed)
}
