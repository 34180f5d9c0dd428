//! Infrastructure layer - concrete implementations of domain ports

pub mod auth;
pub mod http;
pub mod output;
pub mod preflight;
pub mod shell;

pub use auth::{LoginCredentialProvider, TerminalPrompt};
pub use http::HttpClient;
pub use shell::*;
