//! Request and result types exchanged with the code generator

use std::path::PathBuf;

use crate::core::Secret;

/// Target language passed to the generator
pub const TYPESCRIPT_AXIOS: &str = "typescript-axios";

/// Where the generator reads the specification from
#[derive(Debug, Clone)]
pub enum SpecSource {
    /// The generator fetches the document itself, sending the token header
    Remote { url: String, token: Secret },
    /// A document already downloaded into the workspace
    File(PathBuf),
}

/// One invocation of the generator
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub source: SpecSource,
    pub language: String,
    pub additional_properties: Vec<(String, String)>,
    pub output_dir: PathBuf,
}

impl GenerateRequest {
    /// `typescript-axios` client keeping the backend's property names
    pub fn typescript_axios(source: SpecSource, output_dir: PathBuf) -> Self {
        Self {
            source,
            language: TYPESCRIPT_AXIOS.to_string(),
            additional_properties: vec![("modelPropertyNaming".into(), "original".into())],
            output_dir,
        }
    }
}

/// Captured result of a generator run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratorOutput {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl GeneratorOutput {
    pub fn is_success(&self) -> bool {
        self.exit_code == 0
    }
}
