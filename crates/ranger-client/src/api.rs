// PolicyApi - the operations the provider needs from Ranger admin

use async_trait::async_trait;
use tracing::debug;

use crate::{
    config::RangerClientConfig,
    constants::api_path,
    error::{RangerError, Result},
    http::RangerHttpClient,
    model::{Policy, Service},
};

/// Policy and service operations against a Ranger admin server.
///
/// Implemented over HTTP by [`RangerClient`]; tests substitute in-memory
/// implementations.
#[async_trait]
pub trait PolicyApi: Send + Sync {
    /// Create a policy and return the server's representation of it
    async fn create_policy(&self, policy: &Policy) -> Result<Policy>;

    /// Fetch a policy by its numeric id
    async fn get_policy(&self, id: i64) -> Result<Policy>;

    /// Replace the policy addressed by `policy.id`
    async fn update_policy(&self, policy: &Policy) -> Result<Policy>;

    /// Delete a policy by its numeric id
    async fn delete_policy(&self, id: i64) -> Result<()>;

    /// List every service definition known to the server
    async fn get_services(&self) -> Result<Vec<Service>>;
}

/// Ranger admin client over HTTP
pub struct RangerClient {
    http_client: RangerHttpClient,
}

impl RangerClient {
    /// Create a new RangerClient with the given configuration
    pub fn new(config: RangerClientConfig) -> anyhow::Result<Self> {
        let http_client = RangerHttpClient::new(config)?;
        Ok(Self { http_client })
    }

    /// Create a new RangerClient from a host and credentials
    pub fn from_host(host: &str, username: &str, password: &str) -> anyhow::Result<Self> {
        Self::new(RangerClientConfig::new(host).with_auth(username, password))
    }

    pub fn host(&self) -> &str {
        &self.http_client.config().host
    }
}

#[async_trait]
impl PolicyApi for RangerClient {
    async fn create_policy(&self, policy: &Policy) -> Result<Policy> {
        let created: Policy = self.http_client.post_json(api_path::POLICY, policy).await?;
        debug!("Created policy '{}' with id {:?}", created.name, created.id);
        Ok(created)
    }

    async fn get_policy(&self, id: i64) -> Result<Policy> {
        self.http_client.get(&api_path::policy_by_id(id)).await
    }

    async fn update_policy(&self, policy: &Policy) -> Result<Policy> {
        let id = policy.id.ok_or(RangerError::MissingPolicyId)?;
        let updated: Policy = self
            .http_client
            .put_json(&api_path::policy_by_id(id), policy)
            .await?;
        debug!("Updated policy {} to version {:?}", id, updated.version);
        Ok(updated)
    }

    async fn delete_policy(&self, id: i64) -> Result<()> {
        self.http_client.delete(&api_path::policy_by_id(id)).await
    }

    async fn get_services(&self) -> Result<Vec<Service>> {
        self.http_client.get(api_path::SERVICE).await
    }
}
