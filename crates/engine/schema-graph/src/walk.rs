use field_registry::Schema;
use indexmap::IndexSet;

use crate::{IntegrityError, Node, Referrer, TraversalContext, TypeRegistry};

/// Depth-first traversal from `roots`, returning the identifier of every reachable type in
/// discovery order. Each type is expanded once, so recursive types terminate.
pub fn walk<'a, N>(
    roots: impl IntoIterator<Item = N>,
    registry: &'a dyn TypeRegistry,
) -> Result<Vec<&'a str>, IntegrityError>
where
    N: Into<Node<'a>>,
{
    let ctx = TraversalContext::new(registry);
    let mut visited = IndexSet::new();

    let mut stack: Vec<Node<'a>> = roots.into_iter().map(Into::into).collect();
    stack.reverse();

    while let Some(node) = stack.pop() {
        if let Node::Type(definition) = node {
            if !visited.insert(definition.identifier()) {
                continue;
            }
        }

        let children = node.edges(&ctx)?;
        stack.extend(children.into_iter().rev());
    }

    Ok(visited.into_iter().collect())
}

/// Checks every type reference of `schema`.
///
/// Returns the types reachable from the root operation types. Unreachable types are checked too,
/// but not part of the result.
pub fn validate(schema: &Schema) -> Result<Vec<&str>, IntegrityError> {
    let ctx = TraversalContext::new(schema);
    let roots = [
        ("query", Some(schema.roots().query.as_str())),
        ("mutation", schema.roots().mutation.as_deref()),
        ("subscription", schema.roots().subscription.as_deref()),
    ];

    let mut root_types = Vec::with_capacity(roots.len());
    for (operation, identifier) in roots {
        if let Some(identifier) = identifier {
            root_types.push(ctx.lookup(identifier, || Referrer::Root(operation.to_owned()))?);
        }
    }

    let reachable = walk(root_types, schema)?;

    let unreachable = schema
        .types()
        .filter(|definition| !reachable.contains(&definition.identifier()))
        .collect::<Vec<_>>();
    if !unreachable.is_empty() {
        tracing::debug!(count = unreachable.len(), "checking types unreachable from the roots");
        walk(unreachable, schema)?;
    }

    tracing::debug!(reachable = reachable.len(), "validated schema references");

    Ok(reachable)
}
