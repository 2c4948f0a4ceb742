use std::collections::HashSet;

use indexmap::{map::Entry, IndexMap};

use crate::{propagate, Argument, ArgumentSpec, BuildError, Field, FieldSpec, Middleware, Reference, TypeReference};

/// Builds one [`Field`] per spec, keyed by identifier and kept in declaration order.
///
/// Fields without their own reference inherit `default_reference` with their identifier swapped
/// in. A `resolve` function becomes the first middleware entry, followed by the declared ones.
pub fn build_fields(
    container: &str,
    specs: impl IntoIterator<Item = FieldSpec>,
    default_reference: Option<&Reference>,
) -> Result<IndexMap<String, Field>, BuildError> {
    let specs = specs.into_iter();
    let mut fields = IndexMap::with_capacity(specs.size_hint().0);
    let mut names = HashSet::new();

    for FieldSpec { identifier, attributes } in specs {
        let mut attributes = match default_reference {
            Some(default_reference) => propagate(attributes, &identifier, default_reference),
            None => attributes,
        };

        let Some(reference) = attributes.reference.take() else {
            return Err(BuildError::MissingReference { identifier });
        };

        let name = attributes.name.take().unwrap_or_else(|| identifier.clone());

        if !names.insert(name.clone()) {
            return Err(BuildError::DuplicateField {
                container: container.to_owned(),
                identifier,
            });
        }

        let middleware = attributes
            .resolve
            .take()
            .map(Middleware::Resolve)
            .into_iter()
            .chain(attributes.middleware)
            .collect();

        check_type(container, &identifier, attributes.ty.as_ref())?;
        let args = build_arguments(&identifier, attributes.args, &reference)?;

        let field = Field {
            identifier: identifier.clone(),
            name,
            description: attributes.description,
            ty: attributes.ty,
            deprecation: attributes.deprecation,
            default_value: attributes.default_value,
            args,
            middleware,
            reference,
            private_extensions: attributes.private_extensions,
        };

        match fields.entry(identifier) {
            Entry::Occupied(entry) => {
                return Err(BuildError::DuplicateField {
                    container: container.to_owned(),
                    identifier: entry.key().clone(),
                });
            }
            Entry::Vacant(entry) => {
                entry.insert(field);
            }
        }
    }

    tracing::trace!(container, fields = fields.len(), "built fields");

    Ok(fields)
}

/// Builds the argument map of a field. Arguments without a reference inherit the field's.
pub fn build_arguments(
    field: &str,
    specs: impl IntoIterator<Item = ArgumentSpec>,
    default_reference: &Reference,
) -> Result<IndexMap<String, Argument>, BuildError> {
    let mut args = IndexMap::new();

    for ArgumentSpec { identifier, attributes } in specs {
        let mut attributes = propagate(attributes, &identifier, default_reference);

        check_type(field, &identifier, attributes.ty.as_ref())?;

        let argument = Argument {
            name: attributes.name.take().unwrap_or_else(|| identifier.clone()),
            identifier: identifier.clone(),
            description: attributes.description,
            ty: attributes.ty,
            default_value: attributes.default_value,
            reference: attributes
                .reference
                .unwrap_or_else(|| default_reference.for_identifier(&identifier)),
            private_extensions: attributes.private_extensions,
        };

        if args.values().any(|existing: &Argument| existing.name == argument.name) || args.contains_key(&identifier) {
            return Err(BuildError::DuplicateArgument {
                field: field.to_owned(),
                identifier,
            });
        }

        args.insert(identifier, argument);
    }

    Ok(args)
}

fn check_type(container: &str, identifier: &str, ty: Option<&TypeReference>) -> Result<(), BuildError> {
    let Some(ty) = ty else { return Ok(()) };

    ty.validate().map_err(|source| BuildError::InvalidType {
        container: container.to_owned(),
        identifier: identifier.to_owned(),
        source,
    })
}
