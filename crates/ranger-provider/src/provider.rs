// RangerProvider - configures the Ranger client and hands it to resources

use std::sync::Arc;

use ::config::Map;
use ranger_client::{PolicyApi, RangerClient};
use serde_json::{Value, json};
use tracing::{debug, info};

use crate::config::{self, ProviderConfig};
use crate::data_source::ServiceDataSource;
use crate::diagnostics::{DiagResult, Diagnostics};
use crate::resource::PolicyResource;
use crate::schema::{self, Schema};

pub const PROVIDER_TYPE_NAME: &str = "ranger";

/// Unconfigured provider, as the host first sees it
#[derive(Clone, Debug)]
pub struct RangerProvider {
    version: String,
}

impl RangerProvider {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        PROVIDER_TYPE_NAME
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn schema(&self) -> Schema {
        schema::provider_schema()
    }

    /// Every schema the provider serves, keyed by type name
    pub fn schema_document(&self) -> Value {
        json!({
            "provider": { self.type_name(): self.schema() },
            "resources": { PolicyResource::type_name(): PolicyResource::schema() },
            "data_sources": { ServiceDataSource::type_name(): ServiceDataSource::schema() },
        })
    }

    /// Resolve the provider block against the process environment and build the client
    pub fn configure(&self, provider: &ProviderConfig) -> DiagResult<ConfiguredProvider> {
        self.configure_with_env(provider, None)
    }

    /// Like [`configure`](Self::configure) with an explicit `RANGER_*` environment
    pub fn configure_with_env(
        &self,
        provider: &ProviderConfig,
        env: Option<Map<String, String>>,
    ) -> DiagResult<ConfiguredProvider> {
        debug!("Configuring Ranger provider {}", self.version);

        let client_config = config::resolve(provider, env)?;

        info!(
            ranger_host = %client_config.host,
            ranger_username = %client_config.username,
            ranger_password = "***",
            "Creating Ranger client"
        );

        let client = RangerClient::new(client_config).map_err(|e| {
            Diagnostics::error(
                "Unable to Create Ranger API Client",
                format!(
                    "An unexpected error occurred when creating the Ranger API client: {}",
                    e
                ),
            )
        })?;

        info!("Configured Ranger client against {}", client.host());

        Ok(ConfiguredProvider::new(Arc::new(client)))
    }
}

/// Provider after a successful configure, owning the shared API client
#[derive(Clone)]
pub struct ConfiguredProvider {
    client: Arc<dyn PolicyApi>,
}

impl ConfiguredProvider {
    pub fn new(client: Arc<dyn PolicyApi>) -> Self {
        Self { client }
    }

    pub fn policy_resource(&self) -> PolicyResource {
        PolicyResource::new(self.client.clone())
    }

    pub fn service_data_source(&self) -> ServiceDataSource {
        ServiceDataSource::new(self.client.clone())
    }
}
