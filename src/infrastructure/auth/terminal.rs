//! Interactive credential prompt

use async_trait::async_trait;
use dialoguer::{Input, Password};

use crate::core::{Error, Result, Secret};
use crate::infrastructure::auth::{CredentialPrompt, Credentials};

/// Asks for a username and a hidden password on the terminal
#[derive(Debug, Default)]
pub struct TerminalPrompt;

impl TerminalPrompt {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CredentialPrompt for TerminalPrompt {
    async fn credentials(&self) -> Result<Credentials> {
        tokio::task::spawn_blocking(|| -> Result<Credentials> {
            let username: String = Input::new()
                .with_prompt("🔑 Username")
                .interact_text()
                .map_err(|e| Error::Auth(format!("Failed to read username: {e}")))?;
            let password = Password::new()
                .with_prompt("🔑 Password")
                .interact()
                .map_err(|e| Error::Auth(format!("Failed to read password: {e}")))?;

            Ok(Credentials {
                username,
                password: Secret::new(password),
            })
        })
        .await
        .map_err(|e| Error::Auth(format!("Credential prompt task failed: {e}")))?
    }
}
