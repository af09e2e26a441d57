//! Conversion between the configuration model and the Ranger wire model
//!
//! Presence is preserved in both directions: a filter, rule list or principal
//! list that is absent on one side is absent on the other, never an empty
//! collection. The conversions are total and do not validate; validation
//! belongs to [`crate::schema`].

use std::collections::BTreeMap;

use ranger_client::model::{Access, Policy, PolicyItem, PolicyResource, Service};

use crate::model::{
    AccessGrant, PolicyConfig, PolicyRule, ResourceFilter, ResourceFilterSet, ResourceKind,
    ServiceLookup,
};
use crate::value::AttrValue;

/// Build the request body for create and update.
///
/// Server-assigned fields (id, guid, version) are never set here; update
/// callers copy the id in from prior state themselves.
pub fn config_to_policy(config: &PolicyConfig) -> Policy {
    Policy {
        id: None,
        guid: None,
        name: config.name.value_or_default(),
        description: config.description.non_empty().map(str::to_string),
        service: config.service.value_or_default(),
        resources: filters_to_wire(&config.resources),
        is_audit_enabled: config.is_audit_enabled.value_or_default(),
        is_enabled: config.is_enabled.value_or_default(),
        version: None,
        policy_type: config.policy_type.value_or_default(),
        policy_priority: config.policy_priority.value_or_default(),
        is_deny_all_else: config.is_deny_all_else.value_or_default(),
        service_type: config.service_type.non_empty().map(str::to_string),
        policy_items: config
            .policy_items
            .as_ref()
            .map(|rules| rules.iter().map(rule_to_wire).collect()),
    }
}

/// Build a complete configuration value from a server response (refresh)
pub fn policy_to_config(policy: &Policy) -> PolicyConfig {
    let mut config = PolicyConfig::default();
    apply_policy_to_plan(&mut config, policy);
    // Refresh always reports the service type, even when the server sent none.
    config.service_type = AttrValue::Known(policy.service_type.clone().unwrap_or_default());
    config
}

/// Overwrite `plan` in place with everything the server returned
pub fn apply_policy_to_plan(plan: &mut PolicyConfig, policy: &Policy) {
    plan.id = AttrValue::Known(policy.id.unwrap_or_default());
    plan.guid = AttrValue::Known(policy.guid.clone().unwrap_or_default());
    plan.name = AttrValue::Known(policy.name.clone());
    plan.service = AttrValue::Known(policy.service.clone());
    plan.version = AttrValue::Known(policy.version.unwrap_or_default());
    plan.is_enabled = AttrValue::Known(policy.is_enabled);
    plan.is_audit_enabled = AttrValue::Known(policy.is_audit_enabled);
    plan.policy_type = AttrValue::Known(policy.policy_type);
    plan.policy_priority = AttrValue::Known(policy.policy_priority);
    plan.is_deny_all_else = AttrValue::Known(policy.is_deny_all_else);
    plan.description = non_empty_or_null(policy.description.as_deref());
    plan.service_type = non_empty_or_null(policy.service_type.as_deref());
    plan.resources = filters_from_wire(&policy.resources);
    plan.policy_items = policy
        .policy_items
        .as_ref()
        .map(|items| items.iter().map(rule_from_wire).collect());
}

pub fn service_to_lookup(service: &Service) -> ServiceLookup {
    ServiceLookup {
        id: AttrValue::Known(service.id),
        name: AttrValue::Known(service.name.clone()),
    }
}

fn non_empty_or_null(value: Option<&str>) -> AttrValue<String> {
    match value {
        Some(v) if !v.is_empty() => AttrValue::Known(v.to_string()),
        _ => AttrValue::Null,
    }
}

// ============================================================================
// Resource filters
// ============================================================================

fn filters_to_wire(filters: &ResourceFilterSet) -> BTreeMap<String, PolicyResource> {
    let mut resources = BTreeMap::new();
    for kind in ResourceKind::ALL {
        if let Some(filter) = filters.get(kind) {
            resources.insert(
                kind.as_str().to_string(),
                PolicyResource {
                    values: filter.values.clone(),
                    is_excludes: filter.is_excludes.value_or_default(),
                    is_recursive: filter.is_recursive.value_or_default(),
                },
            );
        }
    }
    resources
}

fn filters_from_wire(resources: &BTreeMap<String, PolicyResource>) -> ResourceFilterSet {
    let mut filters = ResourceFilterSet::default();
    for kind in ResourceKind::ALL {
        let filter = resources.get(kind.as_str()).map(|r| ResourceFilter {
            values: r.values.clone(),
            is_excludes: AttrValue::Known(r.is_excludes),
            is_recursive: AttrValue::Known(r.is_recursive),
        });
        filters.set(kind, filter);
    }
    filters
}

// ============================================================================
// Policy items
// ============================================================================

fn rule_to_wire(rule: &PolicyRule) -> PolicyItem {
    PolicyItem {
        accesses: rule
            .accesses
            .iter()
            .map(|grant| Access {
                type_: grant.access_type.value_or_default(),
                is_allowed: grant.is_allowed.value_or_default(),
            })
            .collect(),
        users: rule.users.clone(),
        groups: rule.groups.clone(),
        delegate_admin: rule.delegate_admin.value_or_default(),
    }
}

fn rule_from_wire(item: &PolicyItem) -> PolicyRule {
    PolicyRule {
        accesses: item
            .accesses
            .iter()
            .map(|access| AccessGrant {
                access_type: AttrValue::Known(access.type_.clone()),
                is_allowed: AttrValue::Known(access.is_allowed),
            })
            .collect(),
        users: item.users.clone(),
        groups: item.groups.clone(),
        delegate_admin: AttrValue::Known(item.delegate_admin),
    }
}
