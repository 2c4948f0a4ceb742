use std::{fmt, str::FromStr};

/// A symbolic reference to a type, resolved lazily against a type registry.
///
/// Written in SDL notation when declared as text: `user`, `id!`, `[user!]!`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TypeReference {
    Named(String),
    List(Box<TypeReference>),
    NonNull(Box<TypeReference>),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid type reference `{0}`")]
pub struct InvalidTypeReference(pub String);

impl TypeReference {
    pub fn named(identifier: impl Into<String>) -> Self {
        TypeReference::Named(identifier.into())
    }

    #[must_use]
    pub fn list(self) -> Self {
        TypeReference::List(Box::new(self))
    }

    #[must_use]
    pub fn non_null(self) -> Self {
        TypeReference::NonNull(Box::new(self))
    }

    /// The identifier of the named type once every wrapper has been removed.
    pub fn base_identifier(&self) -> &str {
        match self {
            TypeReference::Named(identifier) => identifier,
            TypeReference::List(inner) | TypeReference::NonNull(inner) => inner.base_identifier(),
        }
    }

    /// Fails when the named base type is not a valid identifier.
    pub fn validate(&self) -> Result<(), InvalidTypeReference> {
        let base = self.base_identifier();
        if is_identifier(base) {
            Ok(())
        } else {
            Err(InvalidTypeReference(base.to_owned()))
        }
    }

    pub fn is_non_null(&self) -> bool {
        matches!(self, TypeReference::NonNull(_))
    }

    pub fn is_list(&self) -> bool {
        match self {
            TypeReference::List(_) => true,
            TypeReference::NonNull(inner) => inner.is_list(),
            TypeReference::Named(_) => false,
        }
    }
}

/// Parses SDL notation. Malformed input is kept as a single named reference, which
/// [`TypeReference::validate`] rejects when fields and arguments are built.
impl From<&str> for TypeReference {
    fn from(input: &str) -> Self {
        input
            .parse()
            .unwrap_or_else(|_| TypeReference::Named(input.to_owned()))
    }
}

impl FromStr for TypeReference {
    type Err = InvalidTypeReference;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let ty = input.trim();

        if let Some(inner) = ty.strip_suffix('!') {
            let inner: TypeReference = inner.parse().map_err(|_| InvalidTypeReference(input.to_owned()))?;
            if inner.is_non_null() {
                return Err(InvalidTypeReference(input.to_owned()));
            }
            return Ok(inner.non_null());
        }

        if let Some(inner) = ty.strip_prefix('[').and_then(|rest| rest.strip_suffix(']')) {
            let inner: TypeReference = inner.parse().map_err(|_| InvalidTypeReference(input.to_owned()))?;
            return Ok(inner.list());
        }

        if is_identifier(ty) {
            Ok(TypeReference::Named(ty.to_owned()))
        } else {
            Err(InvalidTypeReference(input.to_owned()))
        }
    }
}

fn is_identifier(ty: &str) -> bool {
    !ty.is_empty()
        && !ty.starts_with(|c: char| c.is_ascii_digit())
        && ty.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl TryFrom<String> for TypeReference {
    type Error = InvalidTypeReference;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TypeReference> for String {
    fn from(value: TypeReference) -> Self {
        value.to_string()
    }
}

impl fmt::Display for TypeReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeReference::Named(identifier) => f.write_str(identifier),
            TypeReference::List(inner) => write!(f, "[{inner}]"),
            TypeReference::NonNull(inner) => write!(f, "{inner}!"),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Deprecation {
    #[default]
    NoDeprecated,
    Deprecated {
        reason: Option<String>,
    },
}

impl Deprecation {
    pub fn is_deprecated(&self) -> bool {
        matches!(self, Deprecation::Deprecated { .. })
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Deprecation::NoDeprecated => None,
            Deprecation::Deprecated { reason } => reason.as_deref(),
        }
    }
}
