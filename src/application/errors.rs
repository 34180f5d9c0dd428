//! Pipeline stage identification for error reporting

use std::fmt;

/// The stages of a run, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Preflight,
    Authentication,
    Acquisition,
    Sanitize,
    Patch,
    Install,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Preflight => "preflight",
            Stage::Authentication => "authentication",
            Stage::Acquisition => "specification acquisition",
            Stage::Sanitize => "output sanitizing",
            Stage::Patch => "source patching",
            Stage::Install => "installation",
        };
        f.write_str(name)
    }
}

/// A fatal error annotated with the stage that raised it
#[derive(Debug, thiserror::Error)]
#[error("{stage} failed")]
pub struct PipelineError {
    pub stage: Stage,
    #[source]
    pub source: crate::core::Error,
}

impl PipelineError {
    pub fn new(stage: Stage, source: crate::core::Error) -> Self {
        Self { stage, source }
    }
}
