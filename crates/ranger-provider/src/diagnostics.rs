// Diagnostics returned to the host instead of raised errors

use std::fmt;

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// A single (severity, summary, detail) record, optionally tied to an attribute path
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub summary: String,
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        match &self.attribute {
            Some(path) => write!(f, "{}: {} ({}): {}", level, self.summary, path, self.detail),
            None => write!(f, "{}: {}: {}", level, self.summary, self.detail),
        }
    }
}

/// Ordered collection of diagnostics accumulated during one operation
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Diagnostics(Vec<Diagnostic>);

/// Result of a host-facing operation; the error side always holds at least one error
pub type DiagResult<T> = Result<T, Diagnostics>;

impl Diagnostics {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Single-error collection, the common failure shape
    pub fn error(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        let mut diags = Self::new();
        diags.add_error(summary, detail);
        diags
    }

    pub fn add_error(&mut self, summary: impl Into<String>, detail: impl Into<String>) {
        self.push(Severity::Error, summary.into(), detail.into(), None);
    }

    pub fn add_warning(&mut self, summary: impl Into<String>, detail: impl Into<String>) {
        self.push(Severity::Warning, summary.into(), detail.into(), None);
    }

    pub fn add_attribute_error(
        &mut self,
        attribute: impl Into<String>,
        summary: impl Into<String>,
        detail: impl Into<String>,
    ) {
        self.push(
            Severity::Error,
            summary.into(),
            detail.into(),
            Some(attribute.into()),
        );
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.0.extend(other.0);
    }

    pub fn has_error(&self) -> bool {
        self.0.iter().any(|d| d.severity == Severity::Error)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.0.iter()
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.0.iter().filter(|d| d.severity == Severity::Error)
    }

    /// `Err(self)` if any error was recorded, otherwise `Ok(value)`
    pub fn into_result<T>(self, value: T) -> DiagResult<T> {
        if self.has_error() { Err(self) } else { Ok(value) }
    }

    fn push(
        &mut self,
        severity: Severity,
        summary: String,
        detail: String,
        attribute: Option<String>,
    ) {
        self.0.push(Diagnostic {
            severity,
            summary,
            detail,
            attribute,
        });
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, diag) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", diag)?;
        }
        Ok(())
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warnings_are_not_errors() {
        let mut diags = Diagnostics::new();
        diags.add_warning("Policy removed", "deleted outside of configuration");
        assert!(!diags.has_error());
        assert_eq!(diags.len(), 1);
        assert_eq!(diags.clone().into_result(5), Ok(5));

        diags.add_error("Error creating policy", "boom");
        assert!(diags.has_error());
        assert_eq!(diags.errors().count(), 1);
        assert!(diags.into_result(5).is_err());
    }

    #[test]
    fn test_attribute_error_display() {
        let mut diags = Diagnostics::new();
        diags.add_attribute_error("host", "Missing Ranger Host", "set RANGER_HOST");
        assert_eq!(
            diags.to_string(),
            "error: Missing Ranger Host (host): set RANGER_HOST"
        );
    }

    #[test]
    fn test_serialization() {
        let diags = Diagnostics::error("Service Not Found", "Service with name 'x' not found.");
        let json = serde_json::to_value(&diags).unwrap();
        assert_eq!(json[0]["severity"], "error");
        assert_eq!(json[0]["summary"], "Service Not Found");
        assert!(json[0].get("attribute").is_none());
    }

    #[test]
    fn test_extend_keeps_order() {
        let mut first = Diagnostics::error("a", "1");
        first.extend(Diagnostics::error("b", "2"));
        let summaries: Vec<&str> = first.iter().map(|d| d.summary.as_str()).collect();
        assert_eq!(summaries, vec!["a", "b"]);
    }
}
