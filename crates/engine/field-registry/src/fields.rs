use indexmap::IndexMap;
use serde_json::Value;

use crate::{Deprecation, Middleware, Reference, TypeReference};

/// A named, typed and resolvable member of an object type.
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    pub identifier: String,
    pub name: String,
    pub description: Option<String>,
    pub ty: Option<TypeReference>,
    pub deprecation: Deprecation,
    /// Only meaningful when the field is used as an input member.
    pub default_value: Option<Value>,
    pub args: IndexMap<String, Argument>,
    /// Declaration order is execution order.
    pub middleware: Vec<Middleware>,
    pub reference: Reference,
    /// Reserved for other subsystems, never interpreted here.
    pub private_extensions: IndexMap<String, Value>,
}

impl Field {
    pub fn argument(&self, identifier: &str) -> Option<&Argument> {
        self.args.get(identifier)
    }

    pub fn argument_by_name(&self, name: &str) -> Option<&Argument> {
        self.args.values().find(|arg| arg.name == name)
    }

    pub fn has_middleware(&self) -> bool {
        !self.middleware.is_empty()
    }

    pub fn is_deprecated(&self) -> bool {
        self.deprecation.is_deprecated()
    }
}

/// An input parameter of a [`Field`], also used for input object members.
#[derive(Clone, Debug, PartialEq)]
pub struct Argument {
    pub identifier: String,
    pub name: String,
    pub description: Option<String>,
    pub ty: Option<TypeReference>,
    pub default_value: Option<Value>,
    pub reference: Reference,
    pub private_extensions: IndexMap<String, Value>,
}
