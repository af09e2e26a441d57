//! Shared fakes and fixtures for the provider integration tests
#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use ranger_client::{Policy, PolicyApi, RangerError, Service};
use ranger_provider::schema::apply_policy_defaults;
use ranger_provider::{
    AccessGrant, AttrValue, Diagnostics, PolicyConfig, PolicyRule, ResourceFilter,
};

#[derive(Default)]
struct ServerState {
    next_id: i64,
    policies: BTreeMap<i64, Policy>,
    update_requests: Vec<Policy>,
    requests: usize,
}

/// Ranger admin stand-in that assigns ids, guids and versions like the real server
#[derive(Default)]
pub struct InMemoryRanger {
    state: Mutex<ServerState>,
    services: Vec<Service>,
}

impl InMemoryRanger {
    pub fn with_services(services: Vec<Service>) -> Self {
        Self {
            services,
            ..Default::default()
        }
    }

    pub fn stored(&self, id: i64) -> Option<Policy> {
        self.state.lock().unwrap().policies.get(&id).cloned()
    }

    pub fn update_requests(&self) -> Vec<Policy> {
        self.state.lock().unwrap().update_requests.clone()
    }

    /// Number of API calls received so far
    pub fn request_count(&self) -> usize {
        self.state.lock().unwrap().requests
    }

    fn record_request(&self) {
        self.state.lock().unwrap().requests += 1;
    }
}

#[async_trait]
impl PolicyApi for InMemoryRanger {
    async fn create_policy(&self, policy: &Policy) -> ranger_client::Result<Policy> {
        let mut state = self.state.lock().unwrap();
        state.requests += 1;
        state.next_id += 1;
        let id = state.next_id;

        let mut created = policy.clone();
        created.id = Some(id);
        created.guid = Some(format!("6b3e5c4a-0000-4000-8000-{:012}", id));
        created.version = Some(1);
        created.service_type = Some("kafka".to_string());

        state.policies.insert(id, created.clone());
        Ok(created)
    }

    async fn get_policy(&self, id: i64) -> ranger_client::Result<Policy> {
        self.record_request();
        self.stored(id)
            .ok_or_else(|| RangerError::NotFound(format!("policy {}", id)))
    }

    async fn update_policy(&self, policy: &Policy) -> ranger_client::Result<Policy> {
        let id = policy.id.ok_or(RangerError::MissingPolicyId)?;
        let mut state = self.state.lock().unwrap();
        state.requests += 1;
        state.update_requests.push(policy.clone());

        let existing = state
            .policies
            .get(&id)
            .cloned()
            .ok_or_else(|| RangerError::NotFound(format!("policy {}", id)))?;

        let mut updated = policy.clone();
        updated.guid = existing.guid;
        updated.version = existing.version.map(|v| v + 1);
        updated.service_type = existing.service_type;

        state.policies.insert(id, updated.clone());
        Ok(updated)
    }

    async fn delete_policy(&self, id: i64) -> ranger_client::Result<()> {
        self.record_request();
        self.state
            .lock()
            .unwrap()
            .policies
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| RangerError::NotFound(format!("policy {}", id)))
    }

    async fn get_services(&self) -> ranger_client::Result<Vec<Service>> {
        self.record_request();
        Ok(self.services.clone())
    }
}

/// Server that rejects every call
pub struct FailingRanger;

fn internal_error() -> RangerError {
    RangerError::RequestFailed {
        status: 500,
        body: "internal error".to_string(),
    }
}

#[async_trait]
impl PolicyApi for FailingRanger {
    async fn create_policy(&self, _policy: &Policy) -> ranger_client::Result<Policy> {
        Err(internal_error())
    }

    async fn get_policy(&self, _id: i64) -> ranger_client::Result<Policy> {
        Err(internal_error())
    }

    async fn update_policy(&self, _policy: &Policy) -> ranger_client::Result<Policy> {
        Err(internal_error())
    }

    async fn delete_policy(&self, _id: i64) -> ranger_client::Result<()> {
        Err(internal_error())
    }

    async fn get_services(&self) -> ranger_client::Result<Vec<Service>> {
        Err(internal_error())
    }
}

pub fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// Plan for the kafka topic policy, after the host has applied schema defaults
pub fn create_plan() -> PolicyConfig {
    let mut plan = PolicyConfig {
        name: AttrValue::from("test-policy"),
        service: AttrValue::from("dev_kafka"),
        ..Default::default()
    };
    plan.resources.topic = Some(ResourceFilter::new([
        "topic-pattern-0-*",
        "topic-pattern-1-*",
    ]));
    plan.policy_items = Some(vec![PolicyRule {
        accesses: vec![AccessGrant::new("publish")],
        users: Some(strings(&["example-user"])),
        groups: Some(strings(&["example-group"])),
        ..Default::default()
    }]);
    apply_policy_defaults(&mut plan);
    plan
}

pub fn service(id: i64, name: &str) -> Service {
    Service {
        id,
        name: name.to_string(),
        type_: "kafka".to_string(),
        is_enabled: true,
        description: None,
    }
}

pub fn single(diags: &Diagnostics) -> (&str, &str) {
    assert_eq!(diags.len(), 1, "expected one diagnostic, got: {}", diags);
    let diag = diags.iter().next().unwrap();
    (diag.summary.as_str(), diag.detail.as_str())
}
