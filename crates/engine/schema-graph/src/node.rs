use field_registry::{Argument, Field, TypeDefinition, TypeReference};

use crate::{IntegrityError, Referrer, TypeRegistry};

/// What a traversal needs to follow type references.
#[derive(Clone, Copy)]
pub struct TraversalContext<'a> {
    registry: &'a dyn TypeRegistry,
}

impl<'a> TraversalContext<'a> {
    pub fn new(registry: &'a dyn TypeRegistry) -> Self {
        TraversalContext { registry }
    }

    pub fn registry(&self) -> &'a dyn TypeRegistry {
        self.registry
    }

    /// Resolves the base type of `ty`, list and non-null wrappers are looked through.
    pub fn resolve(
        &self,
        ty: Option<&TypeReference>,
        referrer: impl FnOnce() -> Referrer,
    ) -> Result<&'a TypeDefinition, IntegrityError> {
        let Some(ty) = ty else {
            return Err(IntegrityError::MissingType {
                referrer: referrer(),
                known: self.known_types(),
            });
        };

        self.lookup(ty.base_identifier(), referrer)
    }

    pub fn lookup(
        &self,
        identifier: &str,
        referrer: impl FnOnce() -> Referrer,
    ) -> Result<&'a TypeDefinition, IntegrityError> {
        self.registry
            .lookup_type(identifier)
            .ok_or_else(|| IntegrityError::UnknownType {
                referrer: referrer(),
                identifier: identifier.to_owned(),
                known: self.known_types(),
            })
    }

    fn known_types(&self) -> Vec<String> {
        self.registry
            .type_identifiers()
            .into_iter()
            .map(str::to_owned)
            .collect()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Node<'a> {
    Type(&'a TypeDefinition),
    Field(&'a Field),
    Argument(&'a Argument),
}

impl<'a> Node<'a> {
    /// Same as [`GraphNode::children`] without borrowing the node, for traversals holding copies.
    pub fn edges(self, ctx: &TraversalContext<'a>) -> Result<Vec<Node<'a>>, IntegrityError> {
        match self {
            Node::Type(definition) => definition.children(ctx),
            Node::Field(field) => field.children(ctx),
            Node::Argument(argument) => argument.children(ctx),
        }
    }
}

impl<'a> From<&'a TypeDefinition> for Node<'a> {
    fn from(definition: &'a TypeDefinition) -> Self {
        Node::Type(definition)
    }
}

impl<'a> From<&'a Field> for Node<'a> {
    fn from(field: &'a Field) -> Self {
        Node::Field(field)
    }
}

impl<'a> From<&'a Argument> for Node<'a> {
    fn from(argument: &'a Argument) -> Self {
        Node::Argument(argument)
    }
}

/// An element of the schema graph.
pub trait GraphNode {
    /// The nodes this one points at. Fails if a type reference does not resolve in the registry.
    fn children<'a>(&'a self, ctx: &TraversalContext<'a>) -> Result<Vec<Node<'a>>, IntegrityError>;
}

/// The field's type first, then its arguments in declaration order.
impl GraphNode for Field {
    fn children<'a>(&'a self, ctx: &TraversalContext<'a>) -> Result<Vec<Node<'a>>, IntegrityError> {
        let ty = ctx.resolve(self.ty.as_ref(), || Referrer::Field(self.identifier.clone()))?;

        let mut children = Vec::with_capacity(self.args.len() + 1);
        children.push(Node::Type(ty));
        children.extend(self.args.values().map(Node::Argument));
        Ok(children)
    }
}

impl GraphNode for Argument {
    fn children<'a>(&'a self, ctx: &TraversalContext<'a>) -> Result<Vec<Node<'a>>, IntegrityError> {
        let ty = ctx.resolve(self.ty.as_ref(), || Referrer::Argument(self.identifier.clone()))?;
        Ok(vec![Node::Type(ty)])
    }
}

impl GraphNode for TypeDefinition {
    fn children<'a>(&'a self, _: &TraversalContext<'a>) -> Result<Vec<Node<'a>>, IntegrityError> {
        Ok(match self {
            TypeDefinition::Object(object) => object.fields.values().map(Node::Field).collect(),
            TypeDefinition::InputObject(input) => input.fields.values().map(Node::Argument).collect(),
            TypeDefinition::Scalar(_) | TypeDefinition::Enum(_) => Vec::new(),
        })
    }
}

impl GraphNode for Node<'_> {
    fn children<'a>(&'a self, ctx: &TraversalContext<'a>) -> Result<Vec<Node<'a>>, IntegrityError> {
        (*self).edges(ctx)
    }
}
