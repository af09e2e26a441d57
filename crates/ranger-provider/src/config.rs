//! Provider configuration
//!
//! Connection settings come from the provider block, falling back to the
//! `RANGER_HOST`, `RANGER_USERNAME` and `RANGER_PASSWORD` environment
//! variables. A value set in the provider block always wins, and all three
//! must end up non-empty before a client is built.

use std::fmt;

use config::{Config, Environment, Map};
use ranger_client::RangerClientConfig;
use serde::{Deserialize, Serialize};

use crate::diagnostics::{DiagResult, Diagnostics};
use crate::value::AttrValue;

pub const ENV_PREFIX: &str = "RANGER";

const HOST: &str = "host";
const USERNAME: &str = "username";
const PASSWORD: &str = "password";

/// The provider block as supplied by the host
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub host: AttrValue<String>,
    pub username: AttrValue<String>,
    pub password: AttrValue<String>,
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let password = match &self.password {
            AttrValue::Known(_) => "***",
            AttrValue::Unknown => "<unknown>",
            AttrValue::Null => "<null>",
        };
        f.debug_struct("ProviderConfig")
            .field("host", &self.host)
            .field("username", &self.username)
            .field("password", &password)
            .finish()
    }
}

/// One entry per connection setting, in the order errors are reported
struct Setting<'a> {
    key: &'static str,
    label: &'static str,
    unknown_label: &'static str,
    value: &'a AttrValue<String>,
}

impl ProviderConfig {
    fn settings(&self) -> [Setting<'_>; 3] {
        [
            Setting {
                key: HOST,
                label: "Host",
                unknown_label: "Host",
                value: &self.host,
            },
            Setting {
                key: USERNAME,
                label: "Username",
                unknown_label: "Username",
                value: &self.username,
            },
            Setting {
                key: PASSWORD,
                label: "Password",
                unknown_label: "API Password",
                value: &self.password,
            },
        ]
    }
}

/// Resolve the provider block against the environment.
///
/// `env` replaces the process environment when given, which keeps callers
/// and tests independent of ambient `RANGER_*` variables.
pub fn resolve(
    provider: &ProviderConfig,
    env: Option<Map<String, String>>,
) -> DiagResult<RangerClientConfig> {
    let mut diags = Diagnostics::new();

    for setting in provider.settings() {
        if setting.value.is_unknown() {
            diags.add_attribute_error(
                setting.key,
                format!("Unknown Ranger {}", setting.unknown_label),
                format!(
                    "The provider cannot create the Ranger client as there is an unknown configuration value for the Ranger {}. \
                     Either target apply the source of the value first, set the value statically in the configuration, \
                     or use the {}_{} environment variable.",
                    setting.unknown_label.to_lowercase(),
                    ENV_PREFIX,
                    setting.key.to_uppercase()
                ),
            );
        }
    }
    if diags.has_error() {
        return Err(diags);
    }

    let layered = match layer(provider, env) {
        Ok(layered) => layered,
        Err(e) => {
            return Err(Diagnostics::error(
                "Invalid Provider Configuration",
                format!("Could not assemble the Ranger provider configuration: {}", e),
            ));
        }
    };

    let lookup = |key: &str| layered.get_string(key).unwrap_or_default();
    let host = lookup(HOST);
    let username = lookup(USERNAME);
    let password = lookup(PASSWORD);

    for (setting, value) in provider.settings().iter().zip([&host, &username, &password]) {
        if value.is_empty() {
            diags.add_attribute_error(
                setting.key,
                format!("Missing Ranger {}", setting.label),
                format!(
                    "The provider cannot create the Ranger client as there is a missing or empty value for the Ranger {}. \
                     Set the {} value in the configuration or use the {}_{} environment variable. \
                     If either is already set, ensure the value is not empty.",
                    setting.key,
                    setting.key,
                    ENV_PREFIX,
                    setting.key.to_uppercase()
                ),
            );
        }
    }

    if !host.is_empty() {
        if let Err(reason) = check_host(&host) {
            diags.add_attribute_error(
                HOST,
                "Invalid Ranger Host",
                format!("The Ranger host '{}' is not a usable URL: {}", host, reason),
            );
        }
    }

    diags.into_result(RangerClientConfig::new(&host).with_auth(&username, &password))
}

/// Environment first, explicit provider values layered on top
fn layer(
    provider: &ProviderConfig,
    env: Option<Map<String, String>>,
) -> Result<Config, config::ConfigError> {
    let mut builder =
        Config::builder().add_source(Environment::with_prefix(ENV_PREFIX).source(env));

    for setting in provider.settings() {
        if let AttrValue::Known(value) = setting.value {
            builder = builder.set_override(setting.key, value.as_str())?;
        }
    }

    builder.build()
}

fn check_host(host: &str) -> Result<(), String> {
    let url = url::Url::parse(host).map_err(|e| e.to_string())?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(format!("unsupported scheme '{}', expected http or https", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> Option<Map<String, String>> {
        Some(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    fn known(v: &str) -> AttrValue<String> {
        AttrValue::Known(v.to_string())
    }

    #[test]
    fn test_resolve_from_environment() {
        let resolved = resolve(
            &ProviderConfig::default(),
            env(&[
                ("RANGER_HOST", "http://ranger:6080"),
                ("RANGER_USERNAME", "admin"),
                ("RANGER_PASSWORD", "secret"),
            ]),
        )
        .unwrap();

        assert_eq!(resolved.host, "http://ranger:6080");
        assert_eq!(resolved.username, "admin");
        assert_eq!(resolved.password, "secret");
    }

    #[test]
    fn test_configuration_overrides_environment() {
        let provider = ProviderConfig {
            host: known("https://ranger.internal:6182"),
            username: known("terraform"),
            password: AttrValue::Null,
        };
        let resolved = resolve(
            &provider,
            env(&[
                ("RANGER_HOST", "http://ranger:6080"),
                ("RANGER_USERNAME", "admin"),
                ("RANGER_PASSWORD", "secret"),
            ]),
        )
        .unwrap();

        assert_eq!(resolved.host, "https://ranger.internal:6182");
        assert_eq!(resolved.username, "terraform");
        assert_eq!(resolved.password, "secret");
    }

    #[test]
    fn test_missing_values_reported_per_attribute() {
        let diags = resolve(&ProviderConfig::default(), env(&[])).unwrap_err();
        let found: Vec<(&str, &str)> = diags
            .iter()
            .map(|d| (d.attribute.as_deref().unwrap(), d.summary.as_str()))
            .collect();
        assert_eq!(
            found,
            vec![
                ("host", "Missing Ranger Host"),
                ("username", "Missing Ranger Username"),
                ("password", "Missing Ranger Password"),
            ]
        );
    }

    #[test]
    fn test_explicit_empty_value_is_not_replaced_by_environment() {
        let provider = ProviderConfig {
            username: known(""),
            ..Default::default()
        };
        let diags = resolve(
            &provider,
            env(&[
                ("RANGER_HOST", "http://ranger:6080"),
                ("RANGER_USERNAME", "admin"),
                ("RANGER_PASSWORD", "secret"),
            ]),
        )
        .unwrap_err();

        assert_eq!(diags.len(), 1);
        assert_eq!(
            diags.iter().next().unwrap().summary,
            "Missing Ranger Username"
        );
    }

    #[test]
    fn test_unknown_values_reported_before_anything_else() {
        let provider = ProviderConfig {
            host: AttrValue::Unknown,
            username: known("admin"),
            password: AttrValue::Unknown,
        };
        let diags = resolve(&provider, env(&[])).unwrap_err();
        let summaries: Vec<&str> = diags.iter().map(|d| d.summary.as_str()).collect();
        assert_eq!(
            summaries,
            vec!["Unknown Ranger Host", "Unknown Ranger API Password"]
        );
        assert!(diags.iter().next().unwrap().detail.contains("RANGER_HOST"));
    }

    #[test]
    fn test_invalid_host() {
        let provider = ProviderConfig {
            host: known("ranger:6080/admin"),
            username: known("admin"),
            password: known("secret"),
        };
        let diags = resolve(&provider, env(&[])).unwrap_err();
        let diag = diags.iter().next().unwrap();
        assert_eq!(diag.summary, "Invalid Ranger Host");
        assert_eq!(diag.attribute.as_deref(), Some("host"));
    }

    #[test]
    fn test_debug_masks_password() {
        let provider = ProviderConfig {
            host: known("http://ranger:6080"),
            username: known("admin"),
            password: known("hunter2"),
        };
        let out = format!("{:?}", provider);
        assert!(!out.contains("hunter2"));
        assert!(out.contains("***"));
    }
}
