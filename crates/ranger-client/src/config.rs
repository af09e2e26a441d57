// Configuration for RangerClient

/// Configuration for the Ranger HTTP client
#[derive(Clone, Debug)]
pub struct RangerClientConfig {
    /// Ranger admin base URL (e.g. "http://127.0.0.1:6080")
    pub host: String,
    /// Username for basic authentication
    pub username: String,
    /// Password for basic authentication
    pub password: String,
    /// Connection timeout in milliseconds (default: 5000)
    pub connect_timeout_ms: u64,
    /// Read timeout in milliseconds (default: 30000)
    pub read_timeout_ms: u64,
}

impl Default for RangerClientConfig {
    fn default() -> Self {
        Self {
            host: "http://127.0.0.1:6080".to_string(),
            username: String::new(),
            password: String::new(),
            connect_timeout_ms: 5000,
            read_timeout_ms: 30000,
        }
    }
}

impl RangerClientConfig {
    /// Create a new config for a single Ranger admin host
    pub fn new(host: &str) -> Self {
        Self {
            host: host.to_string(),
            ..Default::default()
        }
    }

    /// Set authentication credentials
    pub fn with_auth(mut self, username: &str, password: &str) -> Self {
        self.username = username.to_string();
        self.password = password.to_string();
        self
    }

    /// Set timeouts
    pub fn with_timeouts(mut self, connect_ms: u64, read_ms: u64) -> Self {
        self.connect_timeout_ms = connect_ms;
        self.read_timeout_ms = read_ms;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = RangerClientConfig::default();
        assert_eq!(config.host, "http://127.0.0.1:6080");
        assert!(config.username.is_empty());
        assert_eq!(config.connect_timeout_ms, 5000);
        assert_eq!(config.read_timeout_ms, 30000);
    }

    #[test]
    fn test_config_builder() {
        let config = RangerClientConfig::new("http://ranger:6080")
            .with_auth("admin", "secret")
            .with_timeouts(3000, 15000);

        assert_eq!(config.host, "http://ranger:6080");
        assert_eq!(config.username, "admin");
        assert_eq!(config.password, "secret");
        assert_eq!(config.connect_timeout_ms, 3000);
        assert_eq!(config.read_timeout_ms, 15000);
    }
}
