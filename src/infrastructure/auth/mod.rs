//! Token acquisition through the backend's login endpoint

pub mod login;
pub mod terminal;

pub use login::LoginCredentialProvider;
pub use terminal::TerminalPrompt;

use async_trait::async_trait;

use crate::core::{Result, Secret};

/// Username and password typed by the user
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: Secret,
}

/// Source of login credentials
#[async_trait]
pub trait CredentialPrompt: Send + Sync {
    async fn credentials(&self) -> Result<Credentials>;
}
