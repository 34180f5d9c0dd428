//! HTTP access to the backend and the artifact repository

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::core::{Error, Result, Secret};

/// Header value for the backend's token scheme
pub fn token_header_value(token: &Secret) -> String {
    format!("Token {}", token.expose_secret())
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    token: String,
}

/// Thin wrapper over a shared `reqwest::Client`
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(30))
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .map_err(|e| Error::network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }

    /// Download the raw specification document
    pub async fn fetch_spec(&self, url: &str, token: &Secret) -> Result<String> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::AUTHORIZATION, token_header_value(token))
            .send()
            .await
            .map_err(|e| Error::network(format!("Failed to fetch specification from {url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| Error::network(format!("Failed to read response body: {e}")))
    }

    /// Exchange a username and password for an API token
    pub async fn login(&self, url: &str, username: &str, password: &Secret) -> Result<Secret> {
        let response = self
            .client
            .post(url)
            .json(&LoginRequest {
                username,
                password: password.expose_secret(),
            })
            .send()
            .await
            .map_err(|e| Error::network(format!("Failed to reach login endpoint {url}: {e}")))?;

        let status = response.status();
        if status != StatusCode::OK {
            let reason = status.canonical_reason().unwrap_or("unknown status");
            return Err(Error::Auth(format!(
                "login failed with HTTP {} {reason}",
                status.as_u16()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::network(format!("Failed to read login response: {e}")))?;
        let login: LoginResponse = serde_json::from_str(&body)
            .map_err(|e| Error::Auth(format!("login response has no usable token: {e}")))?;

        Ok(Secret::new(login.token))
    }

    /// Fetch a binary artifact; anything but 200 is an error
    pub async fn download(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::network(format!("Failed to download {url}: {e}")))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::network(format!("Failed to read {url}: {e}")))?;
        Ok(bytes.to_vec())
    }
}
