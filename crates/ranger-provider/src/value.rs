//! Tri-state attribute values
//!
//! The host distinguishes an attribute that was never supplied (`Null`) from
//! one whose value will only be known after apply (`Unknown`). Both are
//! distinct from a concrete value, including the zero value of its type.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Wire spelling of an unknown value in host JSON documents
pub const UNKNOWN_SENTINEL: &str = "74D93920-ED26-11E3-AC10-0800200C9A66";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum AttrValue<T> {
    #[default]
    Null,
    Unknown,
    Known(T),
}

impl<T> AttrValue<T> {
    pub fn is_null(&self) -> bool {
        matches!(self, AttrValue::Null)
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, AttrValue::Unknown)
    }

    pub fn is_known(&self) -> bool {
        matches!(self, AttrValue::Known(_))
    }

    pub fn known(&self) -> Option<&T> {
        match self {
            AttrValue::Known(v) => Some(v),
            _ => None,
        }
    }

    /// `Some` becomes known, `None` becomes null
    pub fn from_option(value: Option<T>) -> Self {
        match value {
            Some(v) => AttrValue::Known(v),
            None => AttrValue::Null,
        }
    }
}

impl<T: Clone + Default> AttrValue<T> {
    /// Known value, or the type's zero value for null and unknown
    pub fn value_or_default(&self) -> T {
        self.known().cloned().unwrap_or_default()
    }
}

impl AttrValue<String> {
    /// Known and non-empty string, the rule used for optional string fields
    pub fn non_empty(&self) -> Option<&str> {
        self.known().map(String::as_str).filter(|s| !s.is_empty())
    }
}

impl<T> From<T> for AttrValue<T> {
    fn from(value: T) -> Self {
        AttrValue::Known(value)
    }
}

impl From<&str> for AttrValue<String> {
    fn from(value: &str) -> Self {
        AttrValue::Known(value.to_string())
    }
}

impl<T: Serialize> Serialize for AttrValue<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            AttrValue::Null => serializer.serialize_none(),
            AttrValue::Unknown => serializer.serialize_str(UNKNOWN_SENTINEL),
            AttrValue::Known(v) => v.serialize(serializer),
        }
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for AttrValue<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = serde_json::Value::deserialize(deserializer)?;
        match raw {
            serde_json::Value::Null => Ok(AttrValue::Null),
            serde_json::Value::String(ref s) if s == UNKNOWN_SENTINEL => Ok(AttrValue::Unknown),
            other => serde_json::from_value(other)
                .map(AttrValue::Known)
                .map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, Serialize, Deserialize)]
    struct Holder {
        #[serde(default)]
        flag: AttrValue<bool>,
        #[serde(default)]
        text: AttrValue<String>,
    }

    #[test]
    fn test_value_or_default() {
        assert!(!AttrValue::<bool>::Null.value_or_default());
        assert_eq!(AttrValue::<i64>::Unknown.value_or_default(), 0);
        assert_eq!(AttrValue::Known(7i64).value_or_default(), 7);
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(AttrValue::<String>::from("x").non_empty(), Some("x"));
        assert_eq!(AttrValue::<String>::from("").non_empty(), None);
        assert_eq!(AttrValue::<String>::Unknown.non_empty(), None);
    }

    #[test]
    fn test_deserialize_states() {
        let h: Holder = serde_json::from_str("{}").unwrap();
        assert!(h.flag.is_null());
        assert!(h.text.is_null());

        let h: Holder =
            serde_json::from_str(&format!(r#"{{"flag":"{UNKNOWN_SENTINEL}","text":null}}"#))
                .unwrap();
        assert!(h.flag.is_unknown());
        assert!(h.text.is_null());

        let h: Holder = serde_json::from_str(r#"{"flag":false,"text":""}"#).unwrap();
        assert_eq!(h.flag, AttrValue::Known(false));
        assert_eq!(h.text, AttrValue::Known(String::new()));
    }

    #[test]
    fn test_deserialize_wrong_type_fails() {
        let err = serde_json::from_str::<Holder>(r#"{"flag":"yes"}"#).unwrap_err();
        assert!(err.to_string().contains("invalid type"));
    }

    #[test]
    fn test_serialize_states() {
        let h = Holder {
            flag: AttrValue::Unknown,
            text: AttrValue::Null,
        };
        let json = serde_json::to_string(&h).unwrap();
        assert_eq!(json, format!(r#"{{"flag":"{UNKNOWN_SENTINEL}","text":null}}"#));
    }
}
