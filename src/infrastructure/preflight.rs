//! Checks run before any generation work starts

use std::io::Write;
use std::path::{Path, PathBuf};

use tokio::fs;

use crate::core::{Error, Result};
use crate::infrastructure::http::HttpClient;

/// Locate `program` on `PATH`
pub fn ensure_runtime_available(program: &str) -> Result<PathBuf> {
    which::which(program).map_err(|e| {
        Error::MissingPrerequisite(format!("{program} is not installed or not on PATH ({e})"))
    })
}

/// Create the workspace directory if needed
pub async fn ensure_workspace(path: &Path) -> Result<()> {
    fs::create_dir_all(path).await?;
    Ok(())
}

/// Download the generator artifact to `dest` unless it is already there.
///
/// Returns `true` when a download happened. The bytes land in a temporary
/// file next to `dest` first, so an interrupted download never leaves a
/// truncated artifact at the final path. No checksum is verified.
pub async fn ensure_generator_artifact(client: &HttpClient, url: &str, dest: &Path) -> Result<bool> {
    if fs::try_exists(dest).await? {
        return Ok(false);
    }

    tracing::info!(url = %url, dest = %dest.display(), "Downloading generator artifact");
    let bytes = client.download(url).await?;

    let dir = dest
        .parent()
        .ok_or_else(|| Error::config(format!("{} has no parent directory", dest.display())))?
        .to_path_buf();
    let dest = dest.to_path_buf();

    tokio::task::spawn_blocking(move || -> Result<()> {
        let mut file = tempfile::NamedTempFile::new_in(&dir)?;
        file.write_all(&bytes)?;
        file.flush()?;
        file.persist(&dest).map_err(|e| Error::Io(e.error))?;
        Ok(())
    })
    .await
    .map_err(|e| Error::output(format!("Artifact write task failed: {e}")))??;

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_missing_runtime() {
        let err = ensure_runtime_available("definitely-not-a-real-runtime-4f2a").unwrap_err();
        assert!(matches!(err, Error::MissingPrerequisite(_)));
    }

    #[tokio::test]
    async fn test_ensure_workspace_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let workspace = dir.path().join(".tmp");

        ensure_workspace(&workspace).await.unwrap();
        std::fs::write(workspace.join("keep"), "x").unwrap();
        ensure_workspace(&workspace).await.unwrap();

        assert!(workspace.is_dir());
        assert!(workspace.join("keep").exists());
    }

    #[tokio::test]
    async fn test_artifact_downloaded_when_missing() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/cli.jar"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"jar-bytes".to_vec()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("swagger-codegen-cli.jar");
        let client = HttpClient::new().unwrap();
        let url = format!("{}/cli.jar", mock_server.uri());

        assert!(ensure_generator_artifact(&client, &url, &dest).await.unwrap());
        assert_eq!(std::fs::read(&dest).unwrap(), b"jar-bytes");

        // second call finds the artifact and does not hit the network again
        assert!(!ensure_generator_artifact(&client, &url, &dest).await.unwrap());
    }

    #[tokio::test]
    async fn test_artifact_http_error_leaves_nothing_behind() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("swagger-codegen-cli.jar");
        let client = HttpClient::new().unwrap();

        let err = ensure_generator_artifact(&client, &format!("{}/cli.jar", mock_server.uri()), &dest)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::HttpStatus { status: 404, .. }));
        assert!(!dest.exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
