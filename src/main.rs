//! fetch-client-gen CLI entrypoint
//! Loads configuration and runs the regeneration pipeline once.
#![deny(unsafe_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

// External imports (alphabetized)
use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use fetch_client_gen::core::status;
use fetch_client_gen::infrastructure::{
    HttpClient, LoginCredentialProvider, ProcessCommandExecutor, SwaggerCodegenCli, TerminalPrompt,
};
use fetch_client_gen::{Config, Pipeline};

/// Regenerate the typed API client from the backend's Swagger specification.
///
/// Behavior is driven by environment variables, optionally bootstrapped from
/// `.env.development` or `.env` in the project directory.
#[derive(Parser, Debug)]
#[command(name = "fetch-client-gen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Project root holding the workspace and the installed client
    #[arg(long)]
    project_dir: Option<PathBuf>,
    /// Dotenv file to load instead of the project's default one
    #[arg(long)]
    env_file: Option<PathBuf>,
}

/// Load the explicit dotenv file, or the first default one that exists
fn load_env_file(project_dir: &Path, explicit: Option<&Path>) -> anyhow::Result<Option<PathBuf>> {
    if let Some(path) = explicit {
        dotenvy::from_path(path)
            .with_context(|| format!("Failed to load env file {}", path.display()))?;
        return Ok(Some(path.to_path_buf()));
    }

    for name in [".env.development", ".env"] {
        let path = project_dir.join(name);
        if path.is_file() {
            dotenvy::from_path(&path)
                .with_context(|| format!("Failed to load env file {}", path.display()))?;
            return Ok(Some(path));
        }
    }
    Ok(None)
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // the generator runs inside the workspace, so every path must be absolute
    let project_dir = match cli.project_dir {
        Some(dir) => std::path::absolute(&dir)
            .with_context(|| format!("Failed to resolve project directory {}", dir.display()))?,
        None => std::env::current_dir().context("Failed to resolve current directory")?,
    };

    if let Some(path) = load_env_file(&project_dir, cli.env_file.as_deref())? {
        info!(path = %path.display(), "Loaded environment file");
    }

    let config = Config::from_env(&project_dir).context("Invalid configuration")?;
    info!(
        endpoint = %config.api_endpoint,
        direct = config.download_client_code_directly,
        "Starting client regeneration"
    );

    let http = HttpClient::new()?;
    let generator = SwaggerCodegenCli::new(
        &config,
        http.clone(),
        Arc::new(ProcessCommandExecutor::new()),
    );
    let credentials =
        LoginCredentialProvider::new(Arc::new(TerminalPrompt::new()), http.clone(), config.login_url());

    let pipeline = Pipeline::new(config, http, Arc::new(generator), Arc::new(credentials))?;
    pipeline.run().await?;
    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        status::failure(format!("{e:#}"));
        std::process::exit(1);
    }
}
