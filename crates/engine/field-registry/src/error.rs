use crate::InvalidTypeReference;

/// Schema construction failures. All of them abort the build.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("Field `{identifier}` is declared more than once on `{container}`")]
    DuplicateField { container: String, identifier: String },
    #[error("Argument `{identifier}` is declared more than once on field `{field}`")]
    DuplicateArgument { field: String, identifier: String },
    #[error("Type `{identifier}` is declared more than once")]
    DuplicateType { identifier: String },
    #[error("`{identifier}` has no reference and none can be derived from its container")]
    MissingReference { identifier: String },
    #[error("Cannot attach a resolver to `{container}.{field}`: no such field")]
    UnknownField { container: String, field: String },
    #[error("`{container}.{field}` already has a resolver")]
    DuplicateResolver { container: String, field: String },
    #[error("`{container}.{identifier}` has an invalid type: {source}")]
    InvalidType {
        container: String,
        identifier: String,
        source: InvalidTypeReference,
    },
}
