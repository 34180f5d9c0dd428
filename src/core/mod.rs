//! Core types shared by every pipeline stage: configuration, errors, secrets
//! and status output.

pub mod config;
pub mod error;
pub mod secret;
pub mod status;

pub use config::{Config, WorkspacePaths};
pub use error::{Error, Result};
pub use secret::Secret;
