use std::{borrow::Cow, fmt};

use serde_json::Value;

/// What a resolution step or a whole resolution produced for a field.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub enum Outcome {
    Success(Value),
    /// An expected, per-field failure. Returned to the caller as data.
    Failure(FieldError),
    /// Resolution was handed over to a plugin which will finish it later.
    Deferred { plugin: PluginId, state: Value },
}

impl Outcome {
    pub fn success(value: impl Into<Value>) -> Self {
        Outcome::Success(value.into())
    }

    pub fn failure(error: impl Into<FieldError>) -> Self {
        Outcome::Failure(error.into())
    }

    pub fn deferred(plugin: impl Into<PluginId>, state: impl Into<Value>) -> Self {
        Outcome::Deferred {
            plugin: plugin.into(),
            state: state.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn value(&self) -> Option<&Value> {
        match self {
            Outcome::Success(value) => Some(value),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct PluginId(pub String);

impl From<&str> for PluginId {
    fn from(value: &str) -> Self {
        PluginId(value.to_owned())
    }
}

impl From<String> for PluginId {
    fn from(value: String) -> Self {
        PluginId(value)
    }
}

impl fmt::Display for PluginId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A field failure: a message with optional structured extensions.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    pub message: Cow<'static, str>,
    // Serialized as a map, but kept as a Vec for efficiency.
    pub extensions: Vec<(Cow<'static, str>, Value)>,
}

impl FieldError {
    pub fn new(message: impl Into<Cow<'static, str>>) -> Self {
        FieldError {
            message: message.into(),
            extensions: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_extension(mut self, key: impl Into<Cow<'static, str>>, value: impl Into<Value>) -> Self {
        self.extensions.push((key.into(), value.into()));
        self
    }

    pub fn extension(&self, key: &str) -> Option<&Value> {
        self.extensions
            .iter()
            .find_map(|(name, value)| (name == key).then_some(value))
    }
}

impl From<&'static str> for FieldError {
    fn from(message: &'static str) -> Self {
        FieldError::new(message)
    }
}

impl From<String> for FieldError {
    fn from(message: String) -> Self {
        FieldError::new(message)
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl serde::Serialize for FieldError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("message", &self.message)?;

        if !self.extensions.is_empty() {
            map.serialize_entry("extensions", &Extensions(&self.extensions))?;
        }

        map.end()
    }
}

struct Extensions<'a>(&'a [(Cow<'static, str>, Value)]);

impl serde::Serialize for Extensions<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_map(self.0.iter().map(|(key, value)| (key, value)))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn structured_failure_serializes_extensions_as_map() {
        let error = FieldError::new("location not found")
            .with_extension("code", "NOT_FOUND")
            .with_extension("location_id", 7);

        insta::assert_json_snapshot!(error, @r###"
        {
          "message": "location not found",
          "extensions": {
            "code": "NOT_FOUND",
            "location_id": 7
          }
        }
        "###);
        assert_eq!(error.extension("location_id"), Some(&json!(7)));
    }

    #[test]
    fn plain_failure_has_no_extensions_key() {
        let outcome = Outcome::failure("boom");
        let Outcome::Failure(error) = &outcome else {
            unreachable!()
        };

        assert_eq!(serde_json::to_value(error).unwrap(), json!({ "message": "boom" }));
        assert!(!outcome.is_success());
        assert_eq!(outcome.value(), None);
    }
}
