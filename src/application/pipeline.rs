//! Pipeline orchestration - runs every stage of a client regeneration in order

use std::path::PathBuf;
use std::sync::Arc;

use tokio::fs;

use crate::application::{CredentialProvider, PipelineError, Stage};
use crate::core::{Config, Error, Result, Secret, status};
use crate::generation::{
    self, API_CLIENT_FILE, CodeGenerator, GenerateRequest, GeneratorOutput, PatchReport, PatchSet,
    SpecSource,
};
use crate::infrastructure::http::HttpClient;
use crate::infrastructure::output;
use crate::infrastructure::preflight;

/// How the specification reached the generator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcquisitionMode {
    /// The generator fetched the document from the backend itself
    Direct,
    /// The document was downloaded into the workspace first
    TwoStep,
}

/// What a successful run did
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub mode: AcquisitionMode,
    /// `Some(applied)` when the security-scheme patch was enabled
    pub security_patch_applied: Option<bool>,
    pub removed_files: Vec<PathBuf>,
    pub patch_report: PatchReport,
    pub replaced_previous: bool,
}

fn at(stage: Stage) -> impl FnOnce(Error) -> PipelineError {
    move |source| PipelineError::new(stage, source)
}

/// Orchestrates one regeneration run
pub struct Pipeline {
    config: Config,
    http: HttpClient,
    generator: Arc<dyn CodeGenerator>,
    credentials: Arc<dyn CredentialProvider>,
    patches: PatchSet,
}

impl Pipeline {
    /// Create a pipeline using the `typescript-axios` patch set
    pub fn new(
        config: Config,
        http: HttpClient,
        generator: Arc<dyn CodeGenerator>,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Result<Self> {
        let patches = PatchSet::typescript_axios(&config.base_url_env)?;
        Ok(Self {
            config,
            http,
            generator,
            credentials,
            patches,
        })
    }

    /// Replace the source patch rules
    pub fn with_patches(mut self, patches: PatchSet) -> Self {
        self.patches = patches;
        self
    }

    /// Execute every stage; the first failure aborts the run.
    ///
    /// On failure the transient specification file and the staging directory
    /// are removed before the error is returned.
    pub async fn run(&self) -> std::result::Result<RunSummary, PipelineError> {
        match self.run_stages().await {
            Ok(summary) => Ok(summary),
            Err(e) => {
                tracing::error!(stage = %e.stage, error = %e.source, "Pipeline stage failed");
                self.cleanup_after_failure().await;
                Err(e)
            }
        }
    }

    async fn run_stages(&self) -> std::result::Result<RunSummary, PipelineError> {
        self.preflight().await.map_err(at(Stage::Preflight))?;

        let token = self
            .resolve_token()
            .await
            .map_err(at(Stage::Authentication))?;

        let (mode, security_patch_applied) = if self.config.download_client_code_directly {
            self.download_client_code(&token)
                .await
                .map_err(at(Stage::Acquisition))?;
            (AcquisitionMode::Direct, None)
        } else {
            let applied = self
                .download_specification(&token)
                .await
                .map_err(at(Stage::Acquisition))?;
            self.generate_client_code()
                .await
                .map_err(at(Stage::Acquisition))?;
            (AcquisitionMode::TwoStep, applied)
        };

        let staging = &self.config.paths.staging_dir;
        let removed_files = generation::sanitize_output(staging)
            .await
            .map_err(at(Stage::Sanitize))?;
        status::success("Removed unused files from the generated client");

        let patch_report = self
            .patches
            .apply_to_file(&staging.join(API_CLIENT_FILE))
            .await
            .map_err(at(Stage::Patch))?;
        status::success("Applied source substitutions");

        let replaced_previous = self.install().await.map_err(at(Stage::Install))?;

        Ok(RunSummary {
            mode,
            security_patch_applied,
            removed_files,
            patch_report,
            replaced_previous,
        })
    }

    /// Runtime first, so a machine without it is left untouched
    async fn preflight(&self) -> Result<()> {
        self.generator.check_runtime()?;

        let workspace = &self.config.paths.workspace;
        preflight::ensure_workspace(workspace).await?;
        status::success(format!("Directory {} ready", workspace.display()));
        self.generator.prepare().await
    }

    async fn resolve_token(&self) -> Result<Secret> {
        if let Some(token) = &self.config.api_token {
            return Ok(token.clone());
        }

        status::lock("API_TOKEN not provided, authenticating with username and password...");
        let token = self.credentials.obtain_token().await?;
        if token.is_empty() {
            return Err(Error::Auth("login returned an empty token".to_string()));
        }
        status::success("Authenticated");
        Ok(token)
    }

    async fn reset_staging(&self) -> Result<()> {
        let staging = &self.config.paths.staging_dir;
        if fs::try_exists(staging).await? {
            fs::remove_dir_all(staging).await?;
            tracing::debug!(path = %staging.display(), "Cleared previous staging directory");
        }
        Ok(())
    }

    /// Generator exited cleanly and left a non-empty staging directory
    async fn verify_generation(&self, output: GeneratorOutput) -> Result<()> {
        if !output.is_success() {
            return Err(Error::generator(format!(
                "generator exited with code {}: {}",
                output.exit_code,
                output.stderr.trim()
            )));
        }

        let staging = &self.config.paths.staging_dir;
        if !fs::try_exists(staging).await? {
            return Err(Error::output(format!(
                "The directory {} was not created",
                staging.display()
            )));
        }
        if fs::read_dir(staging).await?.next_entry().await?.is_none() {
            return Err(Error::output(format!(
                "The directory {} is empty",
                staging.display()
            )));
        }
        Ok(())
    }

    /// Direct mode: the generator pulls the document from the backend
    async fn download_client_code(&self, token: &Secret) -> Result<()> {
        status::progress("Downloading client code ...");
        self.reset_staging().await?;

        let request = GenerateRequest::typescript_axios(
            SpecSource::Remote {
                url: self.config.spec_url(),
                token: token.clone(),
            },
            self.config.paths.staging_dir.clone(),
        );
        let output = self.generator.generate(&request).await?;
        self.verify_generation(output).await?;

        status::success("Client code downloaded");
        Ok(())
    }

    /// Two-step mode, first half: fetch, optionally patch, and store the document
    async fn download_specification(&self, token: &Secret) -> Result<Option<bool>> {
        let url = self.config.spec_url();
        let document = self.http.fetch_spec(&url, token).await?;

        let (document, applied) = if self.config.replace_security_definitions {
            let patch = generation::inject_token_auth(document);
            if !patch.applied {
                tracing::warn!(
                    url = %url,
                    "Basic-only security definition not found; specification left unchanged"
                );
                status::warning("Security definitions not replaced: expected fragment not found");
            }
            (patch.document, Some(patch.applied))
        } else {
            (document, None)
        };

        fs::write(&self.config.paths.spec_file, document).await?;
        status::success("Backend endpoints generated by Swagger downloaded");
        Ok(applied)
    }

    /// Two-step mode, second half: run the generator on the stored document
    async fn generate_client_code(&self) -> Result<()> {
        status::progress("Generating client code ...");
        self.reset_staging().await?;

        let spec_file = &self.config.paths.spec_file;
        let request = GenerateRequest::typescript_axios(
            SpecSource::File(spec_file.clone()),
            self.config.paths.staging_dir.clone(),
        );
        let result = self.generator.generate(&request).await;

        // the document is consumed whatever the outcome
        if fs::try_exists(spec_file).await? {
            fs::remove_file(spec_file).await?;
            status::success("Removed downloaded specification file");
        }

        self.verify_generation(result?).await?;
        status::success("Client code generated");
        Ok(())
    }

    async fn install(&self) -> Result<bool> {
        let paths = &self.config.paths;
        let report = output::install(&paths.staging_dir, &paths.installed_dir).await?;

        if report.replaced_previous {
            status::success(format!("Removed directory {}", paths.installed_dir.display()));
        }
        status::success(format!(
            "Copied new code to directory {}",
            paths.installed_dir.display()
        ));
        status::success(format!(
            "Removed client code from directory {}",
            paths.workspace.display()
        ));
        Ok(report.replaced_previous)
    }

    /// Best-effort removal of transient artifacts after a failed stage
    async fn cleanup_after_failure(&self) {
        let paths = &self.config.paths;

        if let Ok(true) = fs::try_exists(&paths.spec_file).await {
            match fs::remove_file(&paths.spec_file).await {
                Ok(()) => tracing::debug!(path = %paths.spec_file.display(), "Removed specification file"),
                Err(e) => tracing::warn!(path = %paths.spec_file.display(), error = %e, "Could not remove specification file"),
            }
        }

        if let Ok(true) = fs::try_exists(&paths.staging_dir).await {
            match fs::remove_dir_all(&paths.staging_dir).await {
                Ok(()) => tracing::debug!(path = %paths.staging_dir.display(), "Removed staging directory"),
                Err(e) => tracing::warn!(path = %paths.staging_dir.display(), error = %e, "Could not remove staging directory"),
            }
        }
    }
}
