//! Port interfaces for the generation domain

use async_trait::async_trait;

use crate::core::Result;
use crate::generation::{GenerateRequest, GeneratorOutput};

/// External tool turning a specification document into client sources
#[async_trait]
pub trait CodeGenerator: Send + Sync {
    /// Fail fast when the runtime the generator needs is not installed
    fn check_runtime(&self) -> Result<()>;

    /// Fetch whatever the generator needs into the workspace
    async fn prepare(&self) -> Result<()>;

    /// Run the generator. A non-zero exit is reported in the output, not as
    /// an error; errors mean the process could not be started at all.
    async fn generate(&self, request: &GenerateRequest) -> Result<GeneratorOutput>;
}
