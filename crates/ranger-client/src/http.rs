//! HTTP transport for the Ranger admin API
//!
//! Every request carries HTTP basic credentials. Non-success statuses are
//! turned into [`RangerError`] values; nothing is retried here.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, error};

use crate::config::RangerClientConfig;
use crate::error::{RangerError, Result};

/// HTTP client bound to a single Ranger admin host
pub struct RangerHttpClient {
    client: Client,
    config: RangerClientConfig,
}

impl RangerHttpClient {
    /// Create a new HTTP client
    pub fn new(config: RangerClientConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .timeout(Duration::from_millis(config.read_timeout_ms))
            .build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &RangerClientConfig {
        &self.config
    }

    /// Build full URL from the configured host and an API path
    fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.config.host.trim_end_matches('/'), path)
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let request = self.client.get(self.build_url(path));
        let response = self.send(request, "GET", path).await?;
        Self::decode(response).await
    }

    /// Make a POST request with JSON body
    pub async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let request = self.client.post(self.build_url(path)).json(body);
        let response = self.send(request, "POST", path).await?;
        Self::decode(response).await
    }

    /// Make a PUT request with JSON body
    pub async fn put_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let request = self.client.put(self.build_url(path)).json(body);
        let response = self.send(request, "PUT", path).await?;
        Self::decode(response).await
    }

    /// Make a DELETE request, discarding any response body
    pub async fn delete(&self, path: &str) -> Result<()> {
        let request = self.client.delete(self.build_url(path));
        self.send(request, "DELETE", path).await?;
        Ok(())
    }

    /// Attach credentials, send, and map non-success statuses to errors
    async fn send(&self, request: RequestBuilder, method: &str, path: &str) -> Result<Response> {
        debug!("{} {}", method, path);

        let response = request
            .basic_auth(&self.config.username, Some(&self.config.password))
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        if status == StatusCode::NOT_FOUND {
            debug!("{} {} returned 404", method, path);
            return Err(RangerError::NotFound(path.to_string()));
        }

        error!("{} {} failed with status {}: {}", method, path, status, body);
        Err(RangerError::RequestFailed {
            status: status.as_u16(),
            body,
        })
    }

    /// Parse a successful response body as JSON
    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url() {
        let client =
            RangerHttpClient::new(RangerClientConfig::new("http://localhost:6080")).unwrap();
        assert_eq!(
            client.build_url("/service/public/v2/api/service"),
            "http://localhost:6080/service/public/v2/api/service"
        );
    }

    #[test]
    fn test_build_url_trailing_slash() {
        let client =
            RangerHttpClient::new(RangerClientConfig::new("http://localhost:6080/")).unwrap();
        assert_eq!(
            client.build_url("/service/public/v2/api/policy/3"),
            "http://localhost:6080/service/public/v2/api/policy/3"
        );
    }
}
