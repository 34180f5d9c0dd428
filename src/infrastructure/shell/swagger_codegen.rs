//! Swagger Codegen CLI (Java jar) behind the `CodeGenerator` port

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;

use crate::core::{Config, Result, status};
use crate::generation::{CodeGenerator, GenerateRequest, GeneratorOutput, SpecSource};
use crate::infrastructure::http::{HttpClient, token_header_value};
use crate::infrastructure::preflight;
use crate::infrastructure::shell::CommandExecutor;

/// Runtime needed to launch the jar
pub const JAVA: &str = "java";

/// Runs `java -jar swagger-codegen-cli.jar generate ...`
pub struct SwaggerCodegenCli {
    executor: Arc<dyn CommandExecutor>,
    http: HttpClient,
    artifact: PathBuf,
    artifact_url: String,
    working_dir: PathBuf,
}

impl SwaggerCodegenCli {
    pub fn new(config: &Config, http: HttpClient, executor: Arc<dyn CommandExecutor>) -> Self {
        Self {
            executor,
            http,
            artifact: config.paths.generator_artifact.clone(),
            artifact_url: config.generator_artifact_url(),
            working_dir: config.paths.workspace.clone(),
        }
    }

    /// Arguments passed to `java`, in order
    pub fn arguments(&self, request: &GenerateRequest) -> Vec<String> {
        let mut args = vec![
            "-jar".to_string(),
            self.artifact.display().to_string(),
            "generate".to_string(),
            "-i".to_string(),
        ];

        match &request.source {
            SpecSource::Remote { url, token } => {
                args.push(url.clone());
                args.push("-a".to_string());
                args.push(format!("Authorization: {}", token_header_value(token)));
            }
            SpecSource::File(path) => args.push(path.display().to_string()),
        }

        args.push("-l".to_string());
        args.push(request.language.clone());

        if !request.additional_properties.is_empty() {
            let properties = request
                .additional_properties
                .iter()
                .map(|(k, v)| format!("{k}={v}"))
                .collect::<Vec<_>>()
                .join(",");
            args.push("--additional-properties".to_string());
            args.push(properties);
        }

        args.push("-o".to_string());
        args.push(request.output_dir.display().to_string());
        args
    }
}

/// Render a command line for display with the token masked
fn display_command(args: &[String]) -> String {
    let shown: Vec<String> = args
        .iter()
        .map(|arg| {
            if arg.starts_with("Authorization: ") {
                "\"Authorization: Token ***\"".to_string()
            } else {
                arg.clone()
            }
        })
        .collect();
    format!("{JAVA} {}", shown.join(" "))
}

#[async_trait]
impl CodeGenerator for SwaggerCodegenCli {
    fn check_runtime(&self) -> Result<()> {
        preflight::ensure_runtime_available(JAVA)?;
        status::success("Java is installed");
        Ok(())
    }

    async fn prepare(&self) -> Result<()> {
        if !self.artifact.exists() {
            status::notice(format!("File {} not found", self.artifact.display()));
            status::link(format!(
                "Downloading Swagger Codegen CLI from {}",
                self.artifact_url
            ));
        }
        preflight::ensure_generator_artifact(&self.http, &self.artifact_url, &self.artifact)
            .await?;
        status::success("swagger-codegen-cli.jar available");
        Ok(())
    }

    async fn generate(&self, request: &GenerateRequest) -> Result<GeneratorOutput> {
        let args = self.arguments(request);
        let shown = display_command(&args);
        status::link(format!("Running command: {shown}"));
        tracing::info!(command = %shown, "Invoking code generator");

        let result = self.executor.execute(JAVA, &args, &self.working_dir).await?;
        if !result.is_success() {
            tracing::warn!(
                exit_code = result.exit_code,
                stderr = %result.stderr.trim(),
                "Code generator exited with an error"
            );
        }

        tracing::debug!(
            exit_code = result.exit_code,
            stdout = %result.stdout.trim(),
            "Code generator finished"
        );
        Ok(GeneratorOutput {
            exit_code: result.exit_code,
            stdout: result.stdout,
            stderr: result.stderr,
        })
    }
}
