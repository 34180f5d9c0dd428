//! fetch-client-gen
//!
//! Regenerates a typed TypeScript API client from a backend's OpenAPI/Swagger
//! document: fetch (or let the generator fetch) the document, run Swagger
//! Codegen, drop unused output, patch `api.ts`, and install the result into
//! the host project.
#![deny(unsafe_code)]

pub mod application;
pub mod core;
pub mod generation;
pub mod infrastructure;

pub use application::{Pipeline, PipelineError, RunSummary, Stage};
pub use core::{Config, Error, Result};
