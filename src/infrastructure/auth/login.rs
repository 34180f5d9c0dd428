//! Credential provider backed by `POST {endpoint}/login`

use std::sync::Arc;

use async_trait::async_trait;

use crate::application::CredentialProvider;
use crate::core::{Result, Secret};
use crate::infrastructure::auth::CredentialPrompt;
use crate::infrastructure::http::HttpClient;

/// Prompts for credentials and exchanges them for a token. No retry.
pub struct LoginCredentialProvider {
    prompt: Arc<dyn CredentialPrompt>,
    http: HttpClient,
    login_url: String,
}

impl LoginCredentialProvider {
    pub fn new(prompt: Arc<dyn CredentialPrompt>, http: HttpClient, login_url: String) -> Self {
        Self {
            prompt,
            http,
            login_url,
        }
    }
}

#[async_trait]
impl CredentialProvider for LoginCredentialProvider {
    async fn obtain_token(&self) -> Result<Secret> {
        let credentials = self.prompt.credentials().await?;
        tracing::info!(
            login_url = %self.login_url,
            username = %credentials.username,
            "Authenticating against login endpoint"
        );
        self.http
            .login(&self.login_url, &credentials.username, &credentials.password)
            .await
    }
}
