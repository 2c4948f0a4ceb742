use std::fmt;

/// Where a field, argument or type was declared.
///
/// References are only used for diagnostics. Once a definition has been assembled its reference
/// is never changed.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Reference {
    /// The schema module the declaration belongs to.
    pub module: String,
    /// The identifier of the declared member.
    pub identifier: String,
    #[serde(default)]
    pub location: Location,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Location {
    pub file: Option<String>,
    pub line: Option<u32>,
}

impl Reference {
    pub fn new(module: impl Into<String>, identifier: impl Into<String>) -> Self {
        Reference {
            module: module.into(),
            identifier: identifier.into(),
            location: Location::default(),
        }
    }

    #[must_use]
    pub fn with_location(mut self, file: impl Into<String>, line: u32) -> Self {
        self.location = Location {
            file: Some(file.into()),
            line: Some(line),
        };
        self
    }

    /// A copy of this reference pointing at another identifier of the same declaration site.
    pub fn for_identifier(&self, identifier: &str) -> Reference {
        Reference {
            identifier: identifier.to_owned(),
            ..self.clone()
        }
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.module, self.identifier)?;

        match (&self.location.file, self.location.line) {
            (Some(file), Some(line)) => write!(f, " ({file}:{line})"),
            (Some(file), None) => write!(f, " ({file})"),
            (None, Some(line)) => write!(f, " (line {line})"),
            (None, None) => Ok(()),
        }
    }
}

/// Declarations that may carry their own reference.
pub trait Referenced {
    fn reference(&self) -> Option<&Reference>;

    fn set_reference(&mut self, reference: Reference);
}

/// Stamps `attributes` with a reference derived from `default_reference` unless they already
/// carry one. Only the identifier of the derived reference differs from the default.
pub fn propagate<A: Referenced>(mut attributes: A, own_identifier: &str, default_reference: &Reference) -> A {
    if attributes.reference().is_none() {
        attributes.set_reference(default_reference.for_identifier(own_identifier));
    }
    attributes
}
