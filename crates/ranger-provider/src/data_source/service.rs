// `ranger_service` data source - look up a service by name

use std::sync::Arc;

use ranger_client::PolicyApi;
use tracing::debug;

use crate::diagnostics::{DiagResult, Diagnostics};
use crate::mapper;
use crate::model::ServiceLookup;
use crate::schema::{self, Schema};

pub const TYPE_NAME: &str = "ranger_service";

pub struct ServiceDataSource {
    client: Arc<dyn PolicyApi>,
}

impl ServiceDataSource {
    pub fn new(client: Arc<dyn PolicyApi>) -> Self {
        Self { client }
    }

    pub fn type_name() -> &'static str {
        TYPE_NAME
    }

    pub fn schema() -> Schema {
        schema::service_schema()
    }

    /// Find the first service whose name matches exactly.
    ///
    /// A missing service is an error, never a zero-valued lookup.
    pub async fn read(&self, name: &str) -> DiagResult<ServiceLookup> {
        debug!("Looking up service '{}'", name);

        let services = self.client.get_services().await.map_err(|e| {
            Diagnostics::error("Unable to Read Ranger Services", e.to_string())
        })?;

        match services.iter().find(|s| s.name == name) {
            Some(service) if service.id != 0 => Ok(mapper::service_to_lookup(service)),
            _ => Err(Diagnostics::error(
                "Service Not Found",
                format!("Service with name '{}' not found.", name),
            )),
        }
    }
}
