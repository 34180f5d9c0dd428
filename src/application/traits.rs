//! Port interfaces for the application layer

use async_trait::async_trait;

use crate::core::{Result, Secret};

/// Supplies an API token when none is configured
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    async fn obtain_token(&self) -> Result<Secret>;
}
