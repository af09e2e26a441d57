//! Host boundary
//!
//! Converts host-supplied JSON into typed models and runs the plan pipeline
//! the host would normally drive: schema defaults, state for unknown values
//! and validation before the remote call, then the state encoded back. Every
//! outcome is a [`HostResponse`] holding the state the host should record.

use std::io::Read;

use anyhow::Context;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::diagnostics::{DiagResult, Diagnostics};
use crate::model::PolicyConfig;
use crate::provider::ConfiguredProvider;
use crate::schema;

/// State to record plus the diagnostics produced on the way
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HostResponse {
    pub state: Value,
    pub diagnostics: Diagnostics,
}

impl HostResponse {
    pub fn success(state: Value) -> Self {
        Self {
            state,
            diagnostics: Diagnostics::new(),
        }
    }

    /// Error response; `state` is what the host keeps
    pub fn failed(diagnostics: Diagnostics, state: Value) -> Self {
        Self { state, diagnostics }
    }

    pub fn has_error(&self) -> bool {
        self.diagnostics.has_error()
    }
}

/// One `ranger_policy` lifecycle call with its raw host documents
#[derive(Clone, Debug)]
pub enum PolicyOperation {
    Create { plan: Value },
    Read { state: Value },
    Update { plan: Value, state: Value },
    Delete { state: Value },
}

impl PolicyOperation {
    /// State the host keeps if the operation fails
    pub fn prior_state(&self) -> Value {
        match self {
            PolicyOperation::Create { .. } => Value::Null,
            PolicyOperation::Read { state }
            | PolicyOperation::Update { state, .. }
            | PolicyOperation::Delete { state } => state.clone(),
        }
    }
}

/// Run a policy operation; on failure the prior state is echoed back unchanged
pub async fn run_policy(provider: &ConfiguredProvider, operation: PolicyOperation) -> HostResponse {
    let prior = operation.prior_state();

    let result = match &operation {
        PolicyOperation::Create { plan } => create_policy(provider, plan).await,
        PolicyOperation::Read { state } => read_policy(provider, state).await,
        PolicyOperation::Update { plan, state } => update_policy(provider, plan, state).await,
        PolicyOperation::Delete { state } => delete_policy(provider, state).await,
    };

    result.unwrap_or_else(|diagnostics| HostResponse::failed(diagnostics, prior))
}

/// Look up a service by name
pub async fn read_service(provider: &ConfiguredProvider, name: &str) -> HostResponse {
    let result = provider
        .service_data_source()
        .read(name)
        .await
        .and_then(|lookup| encode(&lookup, "Service"));

    match result {
        Ok(state) => HostResponse::success(state),
        Err(diagnostics) => HostResponse::failed(diagnostics, Value::Null),
    }
}

async fn create_policy(provider: &ConfiguredProvider, plan: &Value) -> DiagResult<HostResponse> {
    let mut plan: PolicyConfig = decode(plan, "Plan")?;
    schema::apply_policy_defaults(&mut plan);
    schema::validate_policy(&plan).into_result(())?;

    let created = provider.policy_resource().create(plan).await?;
    Ok(HostResponse::success(encode(&created, "State")?))
}

async fn read_policy(provider: &ConfiguredProvider, prior: &Value) -> DiagResult<HostResponse> {
    let state: PolicyConfig = decode(prior, "State")?;
    let refreshed = provider.policy_resource().read(&state).await?;

    let state = match &refreshed.state {
        Some(state) => encode(state, "State")?,
        None => Value::Null,
    };
    let mut response = HostResponse::success(state);
    response.diagnostics.extend(refreshed.warnings);
    Ok(response)
}

async fn update_policy(
    provider: &ConfiguredProvider,
    plan: &Value,
    prior: &Value,
) -> DiagResult<HostResponse> {
    let state: PolicyConfig = decode(prior, "State")?;
    let mut plan: PolicyConfig = decode(plan, "Plan")?;
    schema::apply_policy_defaults(&mut plan);
    schema::resolve_unknowns_from_state(&mut plan, &state);
    schema::validate_policy(&plan).into_result(())?;

    let updated = provider.policy_resource().update(plan, &state).await?;
    Ok(HostResponse::success(encode(&updated, "State")?))
}

async fn delete_policy(provider: &ConfiguredProvider, prior: &Value) -> DiagResult<HostResponse> {
    let state: PolicyConfig = decode(prior, "State")?;
    provider.policy_resource().delete(&state).await?;
    Ok(HostResponse::success(Value::Null))
}

/// Read a JSON document from a path, or stdin for `-`
pub fn load_document(source: &str) -> anyhow::Result<Value> {
    let text = if source == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read JSON from stdin")?;
        buf
    } else {
        std::fs::read_to_string(source).with_context(|| format!("Failed to read {}", source))?
    };
    serde_json::from_str(&text).with_context(|| format!("Invalid JSON in {}", source))
}

/// Decode host data into `T`, reporting shape mismatches as diagnostics
pub fn decode<T: DeserializeOwned>(value: &Value, what: &str) -> DiagResult<T> {
    serde_json::from_value(value.clone()).map_err(|e| {
        Diagnostics::error(
            format!("Unexpected {} Data Type", what),
            format!(
                "Expected {} data of the resource schema shape, got: {}. Decoder error: {}",
                what.to_lowercase(),
                json_type(value),
                e
            ),
        )
    })
}

/// Encode a typed model back into host JSON
pub fn encode<T: Serialize>(value: &T, what: &str) -> DiagResult<Value> {
    serde_json::to_value(value).map_err(|e| {
        Diagnostics::error(
            format!("Unable to Encode {}", what),
            format!("Could not convert {} to host data: {}", what.to_lowercase(), e),
        )
    })
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::model::PolicyConfig;
    use crate::value::AttrValue;

    #[test]
    fn test_decode_plan() {
        let plan: PolicyConfig = decode(
            &json!({
                "name": "test-policy",
                "service": "dev_kafka",
                "resources": {"topic": {"values": ["orders-*"]}}
            }),
            "Plan",
        )
        .unwrap();

        assert_eq!(plan.name, AttrValue::Known("test-policy".to_string()));
        assert!(plan.id.is_null());
        assert_eq!(plan.resources.topic.unwrap().values, vec!["orders-*"]);
    }

    #[test]
    fn test_decode_reports_observed_type() {
        let diags = decode::<PolicyConfig>(&json!(["not", "an", "object"]), "Plan").unwrap_err();
        let diag = diags.iter().next().unwrap();
        assert_eq!(diag.summary, "Unexpected Plan Data Type");
        assert!(diag.detail.contains("got: array"));
    }

    #[test]
    fn test_decode_nested_mismatch() {
        let diags =
            decode::<PolicyConfig>(&json!({"policy_items": "publish"}), "State").unwrap_err();
        let diag = diags.iter().next().unwrap();
        assert_eq!(diag.summary, "Unexpected State Data Type");
        assert!(diag.detail.contains("got: object"));
    }

    #[test]
    fn test_load_document() {
        let path = std::env::temp_dir().join(format!("ranger-plan-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"name": "test-policy"}"#).unwrap();
        let loaded = load_document(path.to_str().unwrap()).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded, json!({"name": "test-policy"}));

        assert!(load_document("/nonexistent/ranger-plan.json").is_err());
    }

    #[test]
    fn test_prior_state_kept_on_failure() {
        let state = json!({"id": 3});
        assert_eq!(
            PolicyOperation::Create { plan: json!({}) }.prior_state(),
            Value::Null
        );
        assert_eq!(
            PolicyOperation::Delete {
                state: state.clone()
            }
            .prior_state(),
            state
        );
    }

    #[test]
    fn test_encode_state() {
        let mut state = PolicyConfig::default();
        state.id = AttrValue::Known(7);
        let value = encode(&state, "State").unwrap();
        assert_eq!(value["id"], 7);
    }
}
