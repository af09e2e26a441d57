//! Schema declarations for the provider, the `ranger_policy` resource and the
//! `ranger_service` data source, plus the schema-level behaviour the host
//! normally applies around them: static defaults, "use state for unknown"
//! plan modifiers and attribute validators.

use serde::Serialize;
use serde_json::{Value, json};

use crate::diagnostics::Diagnostics;
use crate::model::{PolicyConfig, ResourceKind};
use crate::value::AttrValue;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeType {
    String,
    Bool,
    Int64,
    ListOfString,
    Object,
    ListOfObject,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeMode {
    Required,
    Optional,
    Computed,
    OptionalComputed,
}

#[derive(Clone, Debug, Serialize)]
pub struct Attribute {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub attr_type: AttributeType,
    pub mode: AttributeMode,
    pub description: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub sensitive: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub use_state_for_unknown: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_items: Option<usize>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<Attribute>,
}

impl Attribute {
    fn new(
        name: &'static str,
        attr_type: AttributeType,
        mode: AttributeMode,
        description: &'static str,
    ) -> Self {
        Self {
            name,
            attr_type,
            mode,
            description,
            default: None,
            sensitive: false,
            use_state_for_unknown: false,
            min_items: None,
            attributes: Vec::new(),
        }
    }

    fn default(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    fn use_state_for_unknown(mut self) -> Self {
        self.use_state_for_unknown = true;
        self
    }

    fn min_items(mut self, min: usize) -> Self {
        self.min_items = Some(min);
        self
    }

    fn nested(mut self, attributes: Vec<Attribute>) -> Self {
        self.attributes = attributes;
        self
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct Schema {
    pub type_name: &'static str,
    pub description: &'static str,
    pub attributes: Vec<Attribute>,
}

impl Schema {
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }
}

use AttributeMode::{Computed, Optional, OptionalComputed, Required};
use AttributeType::{Bool, Int64, ListOfObject, ListOfString, Object};

pub fn provider_schema() -> Schema {
    Schema {
        type_name: "ranger",
        description: "Interact with Ranger.",
        attributes: vec![
            Attribute::new(
                "host",
                AttributeType::String,
                Optional,
                "URI for Ranger. May also be provided via RANGER_HOST environment variable.",
            ),
            Attribute::new(
                "username",
                AttributeType::String,
                Optional,
                "Username for Ranger. May also be provided via RANGER_USERNAME environment variable.",
            ),
            Attribute::new(
                "password",
                AttributeType::String,
                Optional,
                "Password for Ranger. May also be provided via RANGER_PASSWORD environment variable.",
            )
            .sensitive(),
        ],
    }
}

fn resource_filter_attribute(kind: ResourceKind) -> Attribute {
    Attribute::new(kind.as_str(), Object, Optional, "Resource selector.").nested(vec![
        Attribute::new("values", ListOfString, Required, "List of resource values."),
        Attribute::new(
            "is_excludes",
            Bool,
            OptionalComputed,
            "If true, the policy applies to all resources except those specified in the values list.",
        )
        .default(json!(false))
        .use_state_for_unknown(),
        Attribute::new(
            "is_recursive",
            Bool,
            OptionalComputed,
            "If true, the policy applies recursively to all sub-resources.",
        )
        .default(json!(false))
        .use_state_for_unknown(),
    ])
}

pub fn policy_schema() -> Schema {
    Schema {
        type_name: "ranger_policy",
        description: "Manages a Ranger access policy.",
        attributes: vec![
            Attribute::new("id", Int64, Computed, "The ID of the policy.").use_state_for_unknown(),
            Attribute::new("guid", AttributeType::String, Computed, "The GUID of the policy.")
                .use_state_for_unknown(),
            Attribute::new("name", AttributeType::String, Required, "The name of the policy."),
            Attribute::new(
                "description",
                AttributeType::String,
                OptionalComputed,
                "A description of the policy.",
            )
            .use_state_for_unknown(),
            Attribute::new(
                "service",
                AttributeType::String,
                Required,
                "The name of the service this policy applies to.",
            )
            .use_state_for_unknown(),
            Attribute::new(
                "resources",
                Object,
                Required,
                "Resources to which the policy applies.",
            )
            .nested(ResourceKind::ALL.into_iter().map(resource_filter_attribute).collect()),
            Attribute::new(
                "is_audit_enabled",
                Bool,
                OptionalComputed,
                "Enable or disable audit logging for this policy.",
            )
            .default(json!(true))
            .use_state_for_unknown(),
            Attribute::new("is_enabled", Bool, OptionalComputed, "Enable or disable this policy.")
                .default(json!(true))
                .use_state_for_unknown(),
            Attribute::new("version", Int64, Computed, "The version of the policy."),
            Attribute::new(
                "policy_type",
                Int64,
                OptionalComputed,
                "The type of the policy. This is typically used to differentiate between different policy types in Ranger.",
            )
            .default(json!(0))
            .use_state_for_unknown(),
            Attribute::new(
                "policy_priority",
                Int64,
                OptionalComputed,
                "The priority of the policy. Policies with lower numbers are evaluated first.",
            )
            .default(json!(0))
            .use_state_for_unknown(),
            Attribute::new(
                "is_deny_all_else",
                Bool,
                OptionalComputed,
                "If true, this policy denies all other access not explicitly allowed by other policies.",
            )
            .default(json!(false))
            .use_state_for_unknown(),
            Attribute::new(
                "service_type",
                AttributeType::String,
                Computed,
                "The type of service this policy applies to, such as 'kafka'.",
            )
            .use_state_for_unknown(),
            Attribute::new(
                "policy_items",
                ListOfObject,
                Optional,
                "List of policy items that define the access controls for this policy.",
            )
            .nested(vec![
                Attribute::new(
                    "accesses",
                    ListOfObject,
                    Required,
                    "List of accesses that define the permissions granted by this policy item.",
                )
                .min_items(1)
                .nested(vec![
                    Attribute::new(
                        "type",
                        AttributeType::String,
                        Required,
                        "The type of access such as 'publish', 'consume', etc.",
                    ),
                    Attribute::new(
                        "is_allowed",
                        Bool,
                        OptionalComputed,
                        "If true, the access is allowed; if false, it is denied.",
                    )
                    .default(json!(true))
                    .use_state_for_unknown(),
                ]),
                Attribute::new(
                    "users",
                    ListOfString,
                    Optional,
                    "List of users to which this policy applies.",
                ),
                Attribute::new(
                    "groups",
                    ListOfString,
                    Optional,
                    "List of groups to which this policy applies.",
                ),
                Attribute::new(
                    "delegate_admin",
                    Bool,
                    OptionalComputed,
                    "If true, allows the user to delegate admin privileges.",
                )
                .default(json!(false))
                .use_state_for_unknown(),
            ]),
        ],
    }
}

pub fn service_schema() -> Schema {
    Schema {
        type_name: "ranger_service",
        description: "Fetches a Ranger service by name.",
        attributes: vec![
            Attribute::new("id", Int64, Computed, "Unique identifier for the service."),
            Attribute::new("name", AttributeType::String, Required, "The name of the service."),
        ],
    }
}

// ============================================================================
// Plan-time behaviour
// ============================================================================

fn default_if_null<T>(value: &mut AttrValue<T>, default: T) {
    if value.is_null() {
        *value = AttrValue::Known(default);
    }
}

fn unknown_if_null<T>(value: &mut AttrValue<T>) {
    if value.is_null() {
        *value = AttrValue::Unknown;
    }
}

fn state_if_unknown<T: Clone>(value: &mut AttrValue<T>, state: &AttrValue<T>) {
    if value.is_unknown() {
        *value = state.clone();
    }
}

/// Fill null optional+computed attributes with their static defaults and
/// mark computed attributes as unknown
pub fn apply_policy_defaults(config: &mut PolicyConfig) {
    unknown_if_null(&mut config.id);
    unknown_if_null(&mut config.guid);
    unknown_if_null(&mut config.description);
    unknown_if_null(&mut config.version);
    unknown_if_null(&mut config.service_type);
    default_if_null(&mut config.is_audit_enabled, true);
    default_if_null(&mut config.is_enabled, true);
    default_if_null(&mut config.policy_type, 0);
    default_if_null(&mut config.policy_priority, 0);
    default_if_null(&mut config.is_deny_all_else, false);

    for kind in ResourceKind::ALL {
        if let Some(filter) = config.resources.get_mut(kind) {
            default_if_null(&mut filter.is_excludes, false);
            default_if_null(&mut filter.is_recursive, false);
        }
    }

    for rule in config.policy_items.iter_mut().flatten() {
        default_if_null(&mut rule.delegate_admin, false);
        for grant in &mut rule.accesses {
            default_if_null(&mut grant.is_allowed, true);
        }
    }
}

/// Replace unknown plan values with prior state for attributes marked
/// "use state for unknown". `version` is deliberately left unknown since
/// every update bumps it.
pub fn resolve_unknowns_from_state(plan: &mut PolicyConfig, state: &PolicyConfig) {
    state_if_unknown(&mut plan.id, &state.id);
    state_if_unknown(&mut plan.guid, &state.guid);
    state_if_unknown(&mut plan.description, &state.description);
    state_if_unknown(&mut plan.service, &state.service);
    state_if_unknown(&mut plan.is_audit_enabled, &state.is_audit_enabled);
    state_if_unknown(&mut plan.is_enabled, &state.is_enabled);
    state_if_unknown(&mut plan.policy_type, &state.policy_type);
    state_if_unknown(&mut plan.policy_priority, &state.policy_priority);
    state_if_unknown(&mut plan.is_deny_all_else, &state.is_deny_all_else);
    state_if_unknown(&mut plan.service_type, &state.service_type);

    for kind in ResourceKind::ALL {
        if let (Some(planned), Some(prior)) =
            (plan.resources.get_mut(kind), state.resources.get(kind))
        {
            state_if_unknown(&mut planned.is_excludes, &prior.is_excludes);
            state_if_unknown(&mut planned.is_recursive, &prior.is_recursive);
        }
    }

    if let (Some(rules), Some(prior_rules)) =
        (plan.policy_items.as_mut(), state.policy_items.as_ref())
    {
        for (rule, prior) in rules.iter_mut().zip(prior_rules) {
            state_if_unknown(&mut rule.delegate_admin, &prior.delegate_admin);
            for (grant, prior_grant) in rule.accesses.iter_mut().zip(&prior.accesses) {
                state_if_unknown(&mut grant.is_allowed, &prior_grant.is_allowed);
            }
        }
    }
}

fn require_string(diags: &mut Diagnostics, path: &str, value: &AttrValue<String>) {
    let missing = match value {
        AttrValue::Null => true,
        AttrValue::Known(v) => v.is_empty(),
        AttrValue::Unknown => false,
    };
    if missing {
        diags.add_attribute_error(
            path,
            "Missing required argument",
            format!("The argument \"{}\" is required, but no definition was found.", path),
        );
    }
}

fn require_min_items(diags: &mut Diagnostics, path: &str, len: usize, min: usize) {
    if len < min {
        diags.add_attribute_error(
            path,
            "Invalid Attribute Value",
            format!(
                "Attribute {} list must contain at least {} elements, got: {}",
                path, min, len
            ),
        );
    }
}

/// Attribute validators for a policy configuration
pub fn validate_policy(config: &PolicyConfig) -> Diagnostics {
    let mut diags = Diagnostics::new();

    require_string(&mut diags, "name", &config.name);
    require_string(&mut diags, "service", &config.service);

    for (kind, filter) in config.resources.iter() {
        require_min_items(
            &mut diags,
            &format!("resources.{}.values", kind),
            filter.values.len(),
            1,
        );
    }

    for (i, rule) in config.policy_items.iter().flatten().enumerate() {
        let accesses_path = format!("policy_items[{}].accesses", i);
        require_min_items(&mut diags, &accesses_path, rule.accesses.len(), 1);
        for (j, grant) in rule.accesses.iter().enumerate() {
            require_string(
                &mut diags,
                &format!("{}[{}].type", accesses_path, j),
                &grant.access_type,
            );
        }
    }

    diags
}
