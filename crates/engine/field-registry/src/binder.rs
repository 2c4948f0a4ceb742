use indexmap::IndexMap;

use crate::{DefaultResolver, Field, Middleware};

/// The fallback for a field without middleware: the schema's custom default resolver when there
/// is one, the system default resolver bound to `identifier` otherwise.
pub fn default_middleware(identifier: &str, custom_default_resolver: Option<&Middleware>) -> Middleware {
    match custom_default_resolver {
        Some(custom) => custom.clone(),
        None => Middleware::DefaultResolver(DefaultResolver::new(identifier)),
    }
}

/// Gives every field without middleware its fallback resolver.
///
/// Fields which already have middleware are left untouched, running this twice is a no-op.
pub fn bind_defaults(
    mut fields: IndexMap<String, Field>,
    custom_default_resolver: Option<&Middleware>,
) -> IndexMap<String, Field> {
    bind_defaults_in_place(&mut fields, custom_default_resolver);
    fields
}

pub(crate) fn bind_defaults_in_place(
    fields: &mut IndexMap<String, Field>,
    custom_default_resolver: Option<&Middleware>,
) -> usize {
    let mut bound = 0;

    for field in fields.values_mut().filter(|field| field.middleware.is_empty()) {
        field
            .middleware
            .push(default_middleware(&field.identifier, custom_default_resolver));
        bound += 1;
    }

    bound
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::{build_fields, FieldSpec, Outcome, Reference, ResolveFn};

    fn fields(resolve: &ResolveFn) -> IndexMap<String, Field> {
        build_fields(
            "user",
            [
                FieldSpec::new("a").ty("string").resolve_with(resolve.clone()),
                FieldSpec::new("b").ty("string"),
            ],
            Some(&Reference::new("Schema", "user")),
        )
        .unwrap()
    }

    #[test]
    fn explicit_resolvers_are_kept() {
        let resolve = ResolveFn::sync(|_| Ok(Outcome::success("a")));

        let bound = bind_defaults(fields(&resolve), None);

        assert_eq!(bound["a"].middleware, [Middleware::Resolve(resolve)]);
        assert_eq!(bound["b"].middleware, [Middleware::default_resolver("b")]);
    }

    #[test]
    fn custom_default_takes_precedence_over_system_default() {
        let resolve = ResolveFn::sync(|_| Ok(Outcome::success("a")));
        let custom = Middleware::from(ResolveFn::sync(|_| Ok(Outcome::success("custom"))));

        let bound = bind_defaults(fields(&resolve), Some(&custom));

        assert_eq!(bound["a"].middleware, [Middleware::Resolve(resolve)]);
        assert_eq!(bound["b"].middleware, [custom]);
    }

    #[rstest]
    #[case::system_default(None)]
    #[case::custom_default(Some(ResolveFn::sync(|_| Ok(Outcome::success(0))).into()))]
    fn binding_is_idempotent(#[case] custom: Option<Middleware>) {
        let resolve = ResolveFn::sync(|_| Ok(Outcome::success("a")));

        let once = bind_defaults(fields(&resolve), custom.as_ref());
        let twice = bind_defaults(once.clone(), custom.as_ref());

        assert_eq!(once, twice);
        assert!(twice.values().all(|field| field.middleware.len() == 1));
    }

    #[test]
    fn default_middleware_is_bound_to_identifier() {
        let mut fields = fields(&ResolveFn::sync(|_| Ok(Outcome::success("a"))));
        fields["b"].name = "renamed".into();

        let bound = bind_defaults(fields, None);

        let Middleware::DefaultResolver(default) = &bound["b"].middleware[0] else {
            unreachable!("expected the system default resolver");
        };
        assert_eq!(default.identifier(), "b");
    }
}
