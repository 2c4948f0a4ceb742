use indexmap::IndexMap;

use crate::{Argument, Field, Reference};

/// The type definitions fields can point at.
#[derive(Clone, Debug, PartialEq)]
pub enum TypeDefinition {
    Scalar(ScalarType),
    Enum(EnumType),
    Object(ObjectType),
    InputObject(InputObjectType),
}

impl TypeDefinition {
    pub fn identifier(&self) -> &str {
        match self {
            TypeDefinition::Scalar(ty) => &ty.identifier,
            TypeDefinition::Enum(ty) => &ty.identifier,
            TypeDefinition::Object(ty) => &ty.identifier,
            TypeDefinition::InputObject(ty) => &ty.identifier,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            TypeDefinition::Scalar(ty) => &ty.name,
            TypeDefinition::Enum(ty) => &ty.name,
            TypeDefinition::Object(ty) => &ty.name,
            TypeDefinition::InputObject(ty) => &ty.name,
        }
    }

    pub fn kind(&self) -> TypeKind {
        match self {
            TypeDefinition::Scalar(_) => TypeKind::Scalar,
            TypeDefinition::Enum(_) => TypeKind::Enum,
            TypeDefinition::Object(_) => TypeKind::Object,
            TypeDefinition::InputObject(_) => TypeKind::InputObject,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectType> {
        match self {
            TypeDefinition::Object(object) => Some(object),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Scalar,
    Enum,
    Object,
    InputObject,
}

impl TypeKind {
    pub fn is_input(self) -> bool {
        matches!(self, TypeKind::Scalar | TypeKind::Enum | TypeKind::InputObject)
    }

    pub fn is_output(self) -> bool {
        !matches!(self, TypeKind::InputObject)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScalarType {
    pub identifier: String,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EnumType {
    pub identifier: String,
    pub name: String,
    pub description: Option<String>,
    pub values: Vec<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ObjectType {
    pub identifier: String,
    pub name: String,
    pub description: Option<String>,
    pub fields: IndexMap<String, Field>,
    pub reference: Reference,
}

impl ObjectType {
    pub fn field(&self, identifier: &str) -> Option<&Field> {
        self.fields.get(identifier)
    }

    pub fn field_by_name(&self, name: &str) -> Option<&Field> {
        self.fields.values().find(|field| field.name == name)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct InputObjectType {
    pub identifier: String,
    pub name: String,
    pub description: Option<String>,
    pub fields: IndexMap<String, Argument>,
    pub reference: Reference,
}
