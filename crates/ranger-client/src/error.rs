// Error types for RangerClient

/// Errors that can occur during Ranger API calls
#[derive(Debug, thiserror::Error)]
pub enum RangerError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Request failed with status {status}: {body}")]
    RequestFailed { status: u16, body: String },

    #[error("Policy has no id; it must be created before it can be updated")]
    MissingPolicyId,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl RangerError {
    /// True when the server reported that the addressed entity does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, RangerError::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, RangerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RangerError::NotFound("/service/public/v2/api/policy/7".to_string());
        assert_eq!(
            err.to_string(),
            "Resource not found: /service/public/v2/api/policy/7"
        );

        let err = RangerError::RequestFailed {
            status: 400,
            body: "duplicate policy name".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Request failed with status 400: duplicate policy name"
        );
    }

    #[test]
    fn test_is_not_found() {
        assert!(RangerError::NotFound("x".to_string()).is_not_found());
        assert!(!RangerError::MissingPolicyId.is_not_found());
        assert!(
            !RangerError::RequestFailed {
                status: 500,
                body: String::new()
            }
            .is_not_found()
        );
    }
}
