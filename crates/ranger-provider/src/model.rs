// Configuration model for the ranger_policy resource and ranger_service data source

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value::AttrValue;

/// Resource type dimensions a policy can constrain.
///
/// `ALL` fixes the processing order used everywhere filters are iterated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceKind {
    Topic,
    Database,
    Table,
    Url,
    HiveService,
    Global,
    Udf,
    Column,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 8] = [
        ResourceKind::Topic,
        ResourceKind::Database,
        ResourceKind::Table,
        ResourceKind::Url,
        ResourceKind::HiveService,
        ResourceKind::Global,
        ResourceKind::Udf,
        ResourceKind::Column,
    ];

    /// Key used both in the configuration schema and on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Topic => "topic",
            ResourceKind::Database => "database",
            ResourceKind::Table => "table",
            ResourceKind::Url => "url",
            ResourceKind::HiveService => "hiveservice",
            ResourceKind::Global => "global",
            ResourceKind::Udf => "udf",
            ResourceKind::Column => "column",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Desired or observed state of one Ranger policy
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    pub id: AttrValue<i64>,
    pub guid: AttrValue<String>,
    pub name: AttrValue<String>,
    pub description: AttrValue<String>,
    pub service: AttrValue<String>,
    pub resources: ResourceFilterSet,
    pub is_audit_enabled: AttrValue<bool>,
    pub is_enabled: AttrValue<bool>,
    pub version: AttrValue<i64>,
    pub policy_type: AttrValue<i64>,
    pub policy_priority: AttrValue<i64>,
    pub is_deny_all_else: AttrValue<bool>,
    pub service_type: AttrValue<String>,
    pub policy_items: Option<Vec<PolicyRule>>,
}

/// One optional filter per resource kind
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceFilterSet {
    pub topic: Option<ResourceFilter>,
    pub database: Option<ResourceFilter>,
    pub table: Option<ResourceFilter>,
    pub url: Option<ResourceFilter>,
    pub hiveservice: Option<ResourceFilter>,
    pub global: Option<ResourceFilter>,
    pub udf: Option<ResourceFilter>,
    pub column: Option<ResourceFilter>,
}

impl ResourceFilterSet {
    pub fn get(&self, kind: ResourceKind) -> Option<&ResourceFilter> {
        self.slot(kind).as_ref()
    }

    pub fn get_mut(&mut self, kind: ResourceKind) -> Option<&mut ResourceFilter> {
        self.slot_mut(kind).as_mut()
    }

    pub fn set(&mut self, kind: ResourceKind, filter: Option<ResourceFilter>) {
        *self.slot_mut(kind) = filter;
    }

    /// Present filters in `ResourceKind::ALL` order
    pub fn iter(&self) -> impl Iterator<Item = (ResourceKind, &ResourceFilter)> {
        ResourceKind::ALL
            .into_iter()
            .filter_map(move |kind| self.get(kind).map(|f| (kind, f)))
    }

    fn slot(&self, kind: ResourceKind) -> &Option<ResourceFilter> {
        match kind {
            ResourceKind::Topic => &self.topic,
            ResourceKind::Database => &self.database,
            ResourceKind::Table => &self.table,
            ResourceKind::Url => &self.url,
            ResourceKind::HiveService => &self.hiveservice,
            ResourceKind::Global => &self.global,
            ResourceKind::Udf => &self.udf,
            ResourceKind::Column => &self.column,
        }
    }

    fn slot_mut(&mut self, kind: ResourceKind) -> &mut Option<ResourceFilter> {
        match kind {
            ResourceKind::Topic => &mut self.topic,
            ResourceKind::Database => &mut self.database,
            ResourceKind::Table => &mut self.table,
            ResourceKind::Url => &mut self.url,
            ResourceKind::HiveService => &mut self.hiveservice,
            ResourceKind::Global => &mut self.global,
            ResourceKind::Udf => &mut self.udf,
            ResourceKind::Column => &mut self.column,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceFilter {
    pub values: Vec<String>,
    pub is_excludes: AttrValue<bool>,
    pub is_recursive: AttrValue<bool>,
}

impl ResourceFilter {
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            values: values.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }
}

/// Policy item: grants plus the principals they apply to
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyRule {
    pub accesses: Vec<AccessGrant>,
    pub users: Option<Vec<String>>,
    pub groups: Option<Vec<String>>,
    pub delegate_admin: AttrValue<bool>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessGrant {
    #[serde(rename = "type")]
    pub access_type: AttrValue<String>,
    pub is_allowed: AttrValue<bool>,
}

impl AccessGrant {
    pub fn new(access_type: &str) -> Self {
        Self {
            access_type: AttrValue::Known(access_type.to_string()),
            is_allowed: AttrValue::Null,
        }
    }
}

/// ranger_service data source
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceLookup {
    pub id: AttrValue<i64>,
    pub name: AttrValue<String>,
}
