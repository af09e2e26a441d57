// Wire model types for the Ranger public v2 API

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Access-control policy as exchanged with Ranger admin
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Policy {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guid: Option<String>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub service: String,
    /// Resource selectors keyed by resource type name (e.g. "topic")
    pub resources: BTreeMap<String, PolicyResource>,
    pub is_audit_enabled: bool,
    pub is_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
    pub policy_type: i64,
    pub policy_priority: i64,
    pub is_deny_all_else: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy_items: Option<Vec<PolicyItem>>,
}

/// Pattern-based selector for one resource type
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PolicyResource {
    pub values: Vec<String>,
    pub is_excludes: bool,
    pub is_recursive: bool,
}

/// Grants plus the principals they apply to
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PolicyItem {
    pub accesses: Vec<Access>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub users: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groups: Option<Vec<String>>,
    pub delegate_admin: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Access {
    #[serde(rename = "type")]
    pub type_: String,
    #[serde(default = "default_true")]
    pub is_allowed: bool,
}

fn default_true() -> bool {
    true
}

/// Ranger service definition (only the fields the provider reads)
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Service {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub type_: String,
    pub is_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
