//! Field and argument declarations, before they are built.
//!
//! This is the loosely structured input of the builders. The data part deserializes from any
//! serde format, resolve functions and middleware are attached in code.

use indexmap::IndexMap;
use serde_json::Value;

use crate::{Deprecation, Middleware, Reference, Referenced, ResolveFn, ResolverContext, ResolverResult, TypeReference};

#[derive(Clone, Debug, serde::Deserialize)]
#[serde(from = "FieldDeclaration")]
pub struct FieldSpec {
    pub identifier: String,
    pub attributes: FieldAttributes,
}

#[derive(Clone, Debug, Default)]
pub struct FieldAttributes {
    /// Overrides the name derived from the identifier.
    pub name: Option<String>,
    pub ty: Option<TypeReference>,
    pub description: Option<String>,
    pub deprecation: Deprecation,
    pub default_value: Option<Value>,
    pub args: Vec<ArgumentSpec>,
    pub resolve: Option<ResolveFn>,
    pub middleware: Vec<Middleware>,
    pub reference: Option<Reference>,
    pub private_extensions: IndexMap<String, Value>,
}

/// The serialized form of a [`FieldSpec`]. Unknown keys are rejected.
#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct FieldDeclaration {
    identifier: String,
    name: Option<String>,
    #[serde(rename = "type")]
    ty: Option<TypeReference>,
    description: Option<String>,
    #[serde(default)]
    deprecation: Deprecation,
    default_value: Option<Value>,
    #[serde(default)]
    args: Vec<ArgumentSpec>,
    reference: Option<Reference>,
    #[serde(default)]
    private_extensions: IndexMap<String, Value>,
}

impl From<FieldDeclaration> for FieldSpec {
    fn from(declaration: FieldDeclaration) -> Self {
        FieldSpec {
            identifier: declaration.identifier,
            attributes: FieldAttributes {
                name: declaration.name,
                ty: declaration.ty,
                description: declaration.description,
                deprecation: declaration.deprecation,
                default_value: declaration.default_value,
                args: declaration.args,
                resolve: None,
                middleware: Vec::new(),
                reference: declaration.reference,
                private_extensions: declaration.private_extensions,
            },
        }
    }
}

impl FieldSpec {
    pub fn new(identifier: impl Into<String>) -> Self {
        FieldSpec {
            identifier: identifier.into(),
            attributes: FieldAttributes::default(),
        }
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.attributes.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn ty(mut self, ty: impl Into<TypeReference>) -> Self {
        self.attributes.ty = Some(ty.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.attributes.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn deprecated(mut self, reason: Option<&str>) -> Self {
        self.attributes.deprecation = Deprecation::Deprecated {
            reason: reason.map(str::to_owned),
        };
        self
    }

    #[must_use]
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.attributes.default_value = Some(value.into());
        self
    }

    #[must_use]
    pub fn arg(mut self, arg: ArgumentSpec) -> Self {
        self.attributes.args.push(arg);
        self
    }

    #[must_use]
    pub fn resolve_with(mut self, resolve: ResolveFn) -> Self {
        self.attributes.resolve = Some(resolve);
        self
    }

    /// Shorthand for [`FieldSpec::resolve_with`] with a synchronous function.
    #[must_use]
    pub fn resolve<F>(self, f: F) -> Self
    where
        F: Fn(ResolverContext<'_>) -> ResolverResult + Send + Sync + 'static,
    {
        self.resolve_with(ResolveFn::sync(f))
    }

    /// Appends a middleware entry. Entries run in the order they are added.
    #[must_use]
    pub fn middleware(mut self, middleware: impl Into<Middleware>) -> Self {
        self.attributes.middleware.push(middleware.into());
        self
    }

    #[must_use]
    pub fn reference(mut self, reference: Reference) -> Self {
        self.attributes.reference = Some(reference);
        self
    }

    #[must_use]
    pub fn private_extension(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.private_extensions.insert(key.into(), value.into());
        self
    }
}

impl Referenced for FieldAttributes {
    fn reference(&self) -> Option<&Reference> {
        self.reference.as_ref()
    }

    fn set_reference(&mut self, reference: Reference) {
        self.reference = Some(reference);
    }
}

#[derive(Clone, Debug, serde::Deserialize)]
#[serde(from = "ArgumentDeclaration")]
pub struct ArgumentSpec {
    pub identifier: String,
    pub attributes: ArgumentAttributes,
}

#[derive(Clone, Debug, Default)]
pub struct ArgumentAttributes {
    pub name: Option<String>,
    pub ty: Option<TypeReference>,
    pub description: Option<String>,
    pub default_value: Option<Value>,
    pub reference: Option<Reference>,
    pub private_extensions: IndexMap<String, Value>,
}

#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct ArgumentDeclaration {
    identifier: String,
    name: Option<String>,
    #[serde(rename = "type")]
    ty: Option<TypeReference>,
    description: Option<String>,
    default_value: Option<Value>,
    reference: Option<Reference>,
    #[serde(default)]
    private_extensions: IndexMap<String, Value>,
}

impl From<ArgumentDeclaration> for ArgumentSpec {
    fn from(declaration: ArgumentDeclaration) -> Self {
        ArgumentSpec {
            identifier: declaration.identifier,
            attributes: ArgumentAttributes {
                name: declaration.name,
                ty: declaration.ty,
                description: declaration.description,
                default_value: declaration.default_value,
                reference: declaration.reference,
                private_extensions: declaration.private_extensions,
            },
        }
    }
}

impl ArgumentSpec {
    pub fn new(identifier: impl Into<String>) -> Self {
        ArgumentSpec {
            identifier: identifier.into(),
            attributes: ArgumentAttributes::default(),
        }
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.attributes.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn ty(mut self, ty: impl Into<TypeReference>) -> Self {
        self.attributes.ty = Some(ty.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.attributes.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.attributes.default_value = Some(value.into());
        self
    }

    #[must_use]
    pub fn reference(mut self, reference: Reference) -> Self {
        self.attributes.reference = Some(reference);
        self
    }
}

impl Referenced for ArgumentAttributes {
    fn reference(&self) -> Option<&Reference> {
        self.reference.as_ref()
    }

    fn set_reference(&mut self, reference: Reference) {
        self.reference = Some(reference);
    }
}
