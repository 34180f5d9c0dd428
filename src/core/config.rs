//! Run configuration resolved once at process start.
//!
//! `Config` is an immutable value. Only the binary reads the process
//! environment (via [`Config::from_env`]); every other component receives the
//! resolved value by parameter, which keeps them testable with injected maps.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use url::Url;

use crate::core::error::{Error, Result};
use crate::core::secret::Secret;

pub const CODEGEN_CLI_VERSION: &str = "CODEGEN_CLI_VERSION";
pub const API_ENDPOINT: &str = "API_ENDPOINT";
pub const API_TOKEN: &str = "API_TOKEN";
pub const SWAGGER_SCHEMA_FORMAT: &str = "SWAGGER_SCHEMA_FORMAT";
pub const REPLACE_SECURITY_DEFINITIONS: &str = "REPLACE_SECURITY_DEFINITIONS";
pub const DOWNLOAD_CLIENT_CODE: &str = "DOWNLOAD_CLIENT_CODE";
pub const CODEGEN_WORKSPACE_DIR: &str = "CODEGEN_WORKSPACE_DIR";
pub const CLIENT_OUTPUT_DIR: &str = "CLIENT_OUTPUT_DIR";
pub const CLIENT_BASE_URL_ENV: &str = "CLIENT_BASE_URL_ENV";
pub const CODEGEN_REPOSITORY_URL: &str = "CODEGEN_REPOSITORY_URL";

pub const DEFAULT_SCHEMA_FORMAT: &str = "/?format=json";
pub const DEFAULT_WORKSPACE_DIR: &str = ".tmp";
pub const DEFAULT_OUTPUT_DIR: &str = "src/lib/fetch-client";
pub const DEFAULT_BASE_URL_ENV: &str = "NEXT_PUBLIC_API_URL";
pub const DEFAULT_REPOSITORY_URL: &str = "https://repo1.maven.org/maven2";

pub const GENERATOR_ARTIFACT_NAME: &str = "swagger-codegen-cli.jar";
pub const SPEC_FILE_NAME: &str = "swagger_backend_openapi.json";
pub const STAGING_DIR_NAME: &str = "swagger-client";

/// Filesystem layout of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspacePaths {
    /// Scratch directory holding the artifact, spec file and staging tree
    pub workspace: PathBuf,
    pub generator_artifact: PathBuf,
    pub spec_file: PathBuf,
    pub staging_dir: PathBuf,
    /// Final location of the generated client in the host project
    pub installed_dir: PathBuf,
}

impl WorkspacePaths {
    pub fn new(project_dir: &Path, workspace: &str, output_dir: &str) -> Self {
        let workspace = project_dir.join(workspace);
        Self {
            generator_artifact: workspace.join(GENERATOR_ARTIFACT_NAME),
            spec_file: workspace.join(SPEC_FILE_NAME),
            staging_dir: workspace.join(STAGING_DIR_NAME),
            installed_dir: project_dir.join(output_dir),
            workspace,
        }
    }
}

/// Resolved, read-only configuration for one run
#[derive(Debug, Clone)]
pub struct Config {
    pub codegen_version: String,
    /// Backend base URL as configured
    pub api_endpoint: String,
    /// Static token; `None` means the run must authenticate
    pub api_token: Option<Secret>,
    pub schema_format: String,
    pub replace_security_definitions: bool,
    pub download_client_code_directly: bool,
    /// Environment variable the patched client reads its base URL from
    pub base_url_env: String,
    pub repository_url: String,
    pub paths: WorkspacePaths,
}

impl Config {
    /// Build the configuration from the current process environment
    pub fn from_env(project_dir: &Path) -> Result<Self> {
        let vars: HashMap<String, String> = std::env::vars().collect();
        Self::from_vars(project_dir, &vars)
    }

    /// Build the configuration from an explicit variable map
    pub fn from_vars(project_dir: &Path, vars: &HashMap<String, String>) -> Result<Self> {
        let get = |key: &str| {
            vars.get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        let codegen_version = get(CODEGEN_CLI_VERSION)
            .ok_or_else(|| Error::config(format!("{CODEGEN_CLI_VERSION} is not set")))?;

        let api_endpoint = get(API_ENDPOINT)
            .ok_or_else(|| Error::config(format!("{API_ENDPOINT} is not set")))?;
        Url::parse(&api_endpoint).map_err(|e| {
            Error::config(format!("{API_ENDPOINT} '{api_endpoint}' is not a valid URL: {e}"))
        })?;

        let repository_url = get(CODEGEN_REPOSITORY_URL)
            .unwrap_or_else(|| DEFAULT_REPOSITORY_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let workspace = get(CODEGEN_WORKSPACE_DIR).unwrap_or_else(|| DEFAULT_WORKSPACE_DIR.into());
        let output_dir = get(CLIENT_OUTPUT_DIR).unwrap_or_else(|| DEFAULT_OUTPUT_DIR.into());

        Ok(Self {
            codegen_version,
            api_endpoint,
            api_token: get(API_TOKEN).map(Secret::new),
            schema_format: get(SWAGGER_SCHEMA_FORMAT)
                .unwrap_or_else(|| DEFAULT_SCHEMA_FORMAT.to_string()),
            replace_security_definitions: parse_flag(
                vars.get(REPLACE_SECURITY_DEFINITIONS),
                false,
            ),
            download_client_code_directly: parse_flag(vars.get(DOWNLOAD_CLIENT_CODE), true),
            base_url_env: get(CLIENT_BASE_URL_ENV)
                .unwrap_or_else(|| DEFAULT_BASE_URL_ENV.to_string()),
            repository_url,
            paths: WorkspacePaths::new(project_dir, &workspace, &output_dir),
        })
    }

    /// URL serving the raw specification document.
    ///
    /// The suffix is appended verbatim; only a suffix starting with `/`
    /// absorbs the endpoint's trailing slashes.
    pub fn spec_url(&self) -> String {
        if self.schema_format.starts_with('/') {
            format!(
                "{}{}",
                self.api_endpoint.trim_end_matches('/'),
                self.schema_format
            )
        } else {
            format!("{}{}", self.api_endpoint, self.schema_format)
        }
    }

    /// Login endpoint used when no static token is configured
    pub fn login_url(&self) -> String {
        format!("{}/login", self.api_endpoint.trim_end_matches('/'))
    }

    /// Version-parameterized download URL of the generator jar
    pub fn generator_artifact_url(&self) -> String {
        let v = &self.codegen_version;
        format!(
            "{}/io/swagger/codegen/v3/swagger-codegen-cli/{v}/swagger-codegen-cli-{v}.jar",
            self.repository_url
        )
    }
}

/// Unset means `default`; otherwise only a case-insensitive `true` is true.
fn parse_flag(value: Option<&String>, default: bool) -> bool {
    match value {
        None => default,
        Some(v) => v.trim().eq_ignore_ascii_case("true"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn minimal() -> HashMap<String, String> {
        vars(&[
            (CODEGEN_CLI_VERSION, "3.0.54"),
            (API_ENDPOINT, "https://api.example.com/"),
        ])
    }

    #[test]
    fn test_defaults_applied() {
        let config = Config::from_vars(Path::new("/project"), &minimal()).unwrap();

        assert_eq!(config.codegen_version, "3.0.54");
        assert_eq!(config.api_endpoint, "https://api.example.com/");
        assert_eq!(config.spec_url(), "https://api.example.com/?format=json");
        assert_eq!(config.login_url(), "https://api.example.com/login");
        assert!(config.api_token.is_none());
        assert_eq!(config.schema_format, DEFAULT_SCHEMA_FORMAT);
        assert!(!config.replace_security_definitions);
        assert!(config.download_client_code_directly);
        assert_eq!(config.base_url_env, "NEXT_PUBLIC_API_URL");
        assert_eq!(
            config.paths.installed_dir,
            PathBuf::from("/project/src/lib/fetch-client")
        );
        assert_eq!(
            config.paths.staging_dir,
            PathBuf::from("/project/.tmp/swagger-client")
        );
        assert_eq!(
            config.paths.generator_artifact,
            PathBuf::from("/project/.tmp/swagger-codegen-cli.jar")
        );
    }

    #[test]
    fn test_flags_parse_case_insensitively() {
        let mut map = minimal();
        map.insert(REPLACE_SECURITY_DEFINITIONS.into(), "TRUE".into());
        map.insert(DOWNLOAD_CLIENT_CODE.into(), "False".into());
        let config = Config::from_vars(Path::new("/p"), &map).unwrap();
        assert!(config.replace_security_definitions);
        assert!(!config.download_client_code_directly);

        map.insert(DOWNLOAD_CLIENT_CODE.into(), "yes".into());
        let config = Config::from_vars(Path::new("/p"), &map).unwrap();
        assert!(!config.download_client_code_directly);
    }

    #[test]
    fn test_empty_token_means_unset() {
        let mut map = minimal();
        map.insert(API_TOKEN.into(), "  ".into());
        let config = Config::from_vars(Path::new("/p"), &map).unwrap();
        assert!(config.api_token.is_none());

        map.insert(API_TOKEN.into(), "abc".into());
        let config = Config::from_vars(Path::new("/p"), &map).unwrap();
        assert_eq!(config.api_token.unwrap().expose_secret(), "abc");
    }

    #[test]
    fn test_missing_required_values() {
        let err = Config::from_vars(Path::new("/p"), &vars(&[(API_ENDPOINT, "http://x")]))
            .unwrap_err();
        assert!(err.to_string().contains(CODEGEN_CLI_VERSION));

        let err = Config::from_vars(Path::new("/p"), &vars(&[(CODEGEN_CLI_VERSION, "3.0.54")]))
            .unwrap_err();
        assert!(err.to_string().contains(API_ENDPOINT));
    }

    #[test]
    fn test_invalid_endpoint_rejected() {
        let mut map = minimal();
        map.insert(API_ENDPOINT.into(), "not a url".into());
        let err = Config::from_vars(Path::new("/p"), &map).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_derived_urls() {
        let mut map = minimal();
        map.insert(SWAGGER_SCHEMA_FORMAT.into(), "/swagger.json".into());
        let config = Config::from_vars(Path::new("/p"), &map).unwrap();

        assert_eq!(config.spec_url(), "https://api.example.com/swagger.json");
        assert_eq!(config.login_url(), "https://api.example.com/login");
        assert_eq!(
            config.generator_artifact_url(),
            "https://repo1.maven.org/maven2/io/swagger/codegen/v3/swagger-codegen-cli/3.0.54/swagger-codegen-cli-3.0.54.jar"
        );
    }

    #[test]
    fn test_query_suffix_keeps_endpoint_slash() {
        let map = vars(&[
            (CODEGEN_CLI_VERSION, "3.0.54"),
            (API_ENDPOINT, "http://host/api/"),
            (SWAGGER_SCHEMA_FORMAT, "?format=openapi"),
        ]);
        let config = Config::from_vars(Path::new("/p"), &map).unwrap();

        assert_eq!(config.spec_url(), "http://host/api/?format=openapi");
        assert_eq!(config.login_url(), "http://host/api/login");
    }

    #[test]
    fn test_path_suffix_without_endpoint_slash() {
        let map = vars(&[
            (CODEGEN_CLI_VERSION, "3.0.54"),
            (API_ENDPOINT, "http://host/api"),
            (SWAGGER_SCHEMA_FORMAT, "?format=openapi"),
        ]);
        let config = Config::from_vars(Path::new("/p"), &map).unwrap();

        assert_eq!(config.spec_url(), "http://host/api?format=openapi");
    }

    #[test]
    fn test_custom_directories() {
        let mut map = minimal();
        map.insert(CODEGEN_WORKSPACE_DIR.into(), ".swagger-assets".into());
        map.insert(CLIENT_OUTPUT_DIR.into(), "src/lib/swagger-client".into());
        let config = Config::from_vars(Path::new("/p"), &map).unwrap();

        assert_eq!(config.paths.workspace, PathBuf::from("/p/.swagger-assets"));
        assert_eq!(
            config.paths.spec_file,
            PathBuf::from("/p/.swagger-assets/swagger_backend_openapi.json")
        );
        assert_eq!(
            config.paths.installed_dir,
            PathBuf::from("/p/src/lib/swagger-client")
        );
    }
}
