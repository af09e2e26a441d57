//! `ranger_policy` resource
//!
//! Sequences mapping, the remote call and diagnostics for each lifecycle
//! operation. A failed operation returns error diagnostics and no state, so
//! the host's recorded state stays untouched.

use std::sync::Arc;

use ranger_client::PolicyApi;
use tracing::{debug, warn};

use crate::diagnostics::{DiagResult, Diagnostics};
use crate::mapper;
use crate::model::PolicyConfig;
use crate::schema::{self, Schema};

pub const TYPE_NAME: &str = "ranger_policy";

/// Result of a refresh; `state` is `None` when the policy is gone
#[derive(Clone, Debug, PartialEq)]
pub struct Refreshed {
    pub state: Option<PolicyConfig>,
    pub warnings: Diagnostics,
}

pub struct PolicyResource {
    client: Arc<dyn PolicyApi>,
}

impl PolicyResource {
    pub fn new(client: Arc<dyn PolicyApi>) -> Self {
        Self { client }
    }

    pub fn type_name() -> &'static str {
        TYPE_NAME
    }

    pub fn schema() -> Schema {
        schema::policy_schema()
    }

    /// Create the policy described by `plan` and return it with server-assigned fields filled in
    pub async fn create(&self, mut plan: PolicyConfig) -> DiagResult<PolicyConfig> {
        let request = mapper::config_to_policy(&plan);
        debug!("Creating policy '{}' in service '{}'", request.name, request.service);

        let created = self.client.create_policy(&request).await.map_err(|e| {
            Diagnostics::error(
                "Error creating policy",
                format!("Could not create policy, unexpected error: {}", e),
            )
        })?;

        mapper::apply_policy_to_plan(&mut plan, &created);
        Ok(plan)
    }

    /// Refresh `state` from the server.
    ///
    /// A policy that no longer exists comes back with no state and a warning
    /// telling the host why it was dropped.
    pub async fn read(&self, state: &PolicyConfig) -> DiagResult<Refreshed> {
        let id = state.id.value_or_default();
        debug!("Reading policy {}", id);

        match self.client.get_policy(id).await {
            Ok(policy) => Ok(Refreshed {
                state: Some(mapper::policy_to_config(&policy)),
                warnings: Diagnostics::new(),
            }),
            Err(e) if e.is_not_found() => {
                warn!("Policy {} no longer exists, removing it from state", id);
                let mut warnings = Diagnostics::new();
                warnings.add_warning(
                    "Ranger policy not found",
                    format!(
                        "Policy ID {} no longer exists in Ranger and was removed from state.",
                        id
                    ),
                );
                Ok(Refreshed {
                    state: None,
                    warnings,
                })
            }
            Err(e) => Err(Diagnostics::error(
                "Error Reading Ranger policy",
                format!("Could not read policy ID {}: {}", id, e),
            )),
        }
    }

    /// Replace the policy recorded in `state` with the contents of `plan`
    pub async fn update(
        &self,
        mut plan: PolicyConfig,
        state: &PolicyConfig,
    ) -> DiagResult<PolicyConfig> {
        let id = state.id.value_or_default();

        let mut request = mapper::config_to_policy(&plan);
        request.id = Some(id);
        debug!("Updating policy {}", id);

        let updated = self.client.update_policy(&request).await.map_err(|e| {
            Diagnostics::error(
                "Error updating Ranger policy",
                format!("Could not update policy ID {}: {}", id, e),
            )
        })?;

        mapper::apply_policy_to_plan(&mut plan, &updated);
        Ok(plan)
    }

    /// Delete the policy recorded in `state`; on error the caller keeps the state
    pub async fn delete(&self, state: &PolicyConfig) -> DiagResult<()> {
        let id = state.id.value_or_default();
        debug!("Deleting policy {}", id);

        self.client.delete_policy(id).await.map_err(|e| {
            Diagnostics::error(
                "Error Deleting Ranger policy",
                format!("Could not delete policy, unexpected error: {}", e),
            )
        })
    }
}
