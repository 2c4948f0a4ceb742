#![allow(unused_crate_dependencies)]

use engine_field_registry::{
    BuildError, Config, FieldSpec, Middleware, ObjectSpec, Outcome, Reference, ResolveFn, Schema, SchemaDocument,
    SchemaSettings, TypeDefinition, TypeReference,
};
use indoc::indoc;
use rstest::rstest;
use serde_json::json;

const ACCOUNTS: &str = indoc! {r#"
    query = "root_query"

    [[types]]
    kind = "scalar"
    identifier = "string"

    [[types]]
    kind = "scalar"
    identifier = "id"

    [[types]]
    kind = "object"
    identifier = "root_query"
    name = "RootQuery"
    reference = { module = "Accounts.Schema", identifier = "root_query", location = { file = "accounts.ex", line = 3 } }

    [[types.fields]]
    identifier = "users"
    type = "[user!]!"
    description = "Users registered at a location"

    [[types.fields.args]]
    identifier = "location_id"
    type = "id!"

    [[types]]
    kind = "object"
    identifier = "user"
    reference = { module = "Accounts.Schema", identifier = "user" }

    [[types.fields]]
    identifier = "name"
    type = "string"

    [[types.fields]]
    identifier = "email_address"
    name = "emailAddress"
    type = "string"
    private_extensions = { meta = { pii = true } }
"#};

fn document() -> SchemaDocument {
    ACCOUNTS.parse().unwrap()
}

#[test]
fn compiles_a_document() {
    let users = ResolveFn::sync(|_| Ok(Outcome::success(json!([]))));

    let schema = Schema::builder(SchemaSettings::default())
        .with_document(document())
        .with_resolver("root_query", "users", users.clone())
        .build()
        .unwrap();

    assert_eq!(schema.roots().query, "root_query");
    assert_eq!(
        schema.types().map(TypeDefinition::identifier).collect::<Vec<_>>(),
        ["string", "id", "root_query", "user"]
    );

    let field = schema.field("root_query", "users").unwrap();
    assert_eq!(field.middleware, [Middleware::Resolve(users)]);
    assert_eq!(
        field.ty,
        Some(TypeReference::named("user").non_null().list().non_null())
    );
    assert_eq!(field.description.as_deref(), Some("Users registered at a location"));

    let location_id = field.argument("location_id").unwrap();
    assert_eq!(
        location_id.reference,
        Reference::new("Accounts.Schema", "location_id").with_location("accounts.ex", 3)
    );

    let email = schema.field("user", "email_address").unwrap();
    assert_eq!(email.name, "emailAddress");
    assert_eq!(email.middleware, [Middleware::default_resolver("email_address")]);
    assert_eq!(email.private_extensions["meta"], json!({ "pii": true }));
    assert_eq!(email.reference, Reference::new("Accounts.Schema", "email_address"));
}

#[test]
fn custom_default_resolver_is_bound_at_compile_time() {
    let custom = Middleware::from(ResolveFn::sync(|ctx| {
        Ok(Outcome::success(ctx.parent.get("data").cloned().unwrap_or_default()))
    }));

    let schema = Schema::builder(SchemaSettings::default().with_custom_default_resolver(custom.clone()))
        .with_document(document())
        .build()
        .unwrap();

    let object = schema.object("user").unwrap();
    assert!(object.fields.values().all(|field| field.middleware == [custom.clone()]));
    assert_eq!(schema.settings().custom_default_resolver(), Some(&custom));
}

#[test]
fn settings_carry_configuration() {
    let config: Config = indoc! {r#"
        [resolution]
        timeout = "2s"
    "#}
    .parse()
    .unwrap();

    let schema = Schema::builder(SchemaSettings::new(config))
        .with_document(document())
        .build()
        .unwrap();

    assert_eq!(
        schema.execution_info().settings().resolution_timeout(),
        Some(std::time::Duration::from_secs(2))
    );
}

#[test]
fn duplicate_types_fail_the_build() {
    let error = Schema::builder(SchemaSettings::default())
        .with_document(document())
        .with_scalar("id")
        .build()
        .unwrap_err();

    insta::assert_snapshot!(error.to_string(), @"Type `id` is declared more than once");
}

#[test]
fn resolvers_must_target_declared_fields() {
    let error = Schema::builder(SchemaSettings::default())
        .with_document(document())
        .with_resolver("user", "age", ResolveFn::sync(|_| Ok(Outcome::success(36))))
        .build()
        .unwrap_err();

    assert_eq!(
        error,
        BuildError::UnknownField {
            container: "user".into(),
            field: "age".into()
        }
    );
}

#[test]
fn documents_load_from_json() {
    let document: SchemaDocument = serde_json::from_value(json!({
        "types": [
            { "kind": "scalar", "identifier": "string" },
            {
                "kind": "object",
                "identifier": "query",
                "reference": { "module": "Schema", "identifier": "query" },
                "fields": [
                    { "identifier": "greeting", "type": "string", "default_value": "hello" },
                    { "identifier": "greeting", "type": "string" }
                ]
            }
        ]
    }))
    .unwrap();

    let error = Schema::builder(SchemaSettings::default())
        .with_document(document)
        .build()
        .unwrap_err();

    insta::assert_snapshot!(error.to_string(), @"Field `greeting` is declared more than once on `query`");
}

#[test]
fn a_field_holds_a_single_resolver() {
    let users = ResolveFn::sync(|_| Ok(Outcome::success(json!([]))));

    let error = Schema::builder(SchemaSettings::default())
        .with_document(document())
        .with_resolver("root_query", "users", users.clone())
        .with_resolver("root_query", "users", users)
        .build()
        .unwrap_err();

    assert_eq!(
        error,
        BuildError::DuplicateResolver {
            container: "root_query".into(),
            field: "users".into()
        }
    );
    insta::assert_snapshot!(error.to_string(), @"`root_query.users` already has a resolver");
}

#[test]
fn declared_resolvers_are_not_replaced() {
    let reference = Reference::new("Accounts.Schema", "query");
    let declared = ResolveFn::sync(|_| Ok(Outcome::success("declared")));

    let error = Schema::builder(SchemaSettings::default())
        .with_scalar("string")
        .with_object(
            ObjectSpec::new("query", reference)
                .field(FieldSpec::new("version").ty("string").resolve_with(declared)),
        )
        .with_resolver("query", "version", ResolveFn::sync(|_| Ok(Outcome::success("late"))))
        .build()
        .unwrap_err();

    insta::assert_snapshot!(error.to_string(), @"`query.version` already has a resolver");
}

#[rstest]
#[case::field_key(indoc! {r#"
    [[types]]
    kind = "object"
    identifier = "user"
    reference = { module = "Accounts.Schema", identifier = "user" }

    [[types.fields]]
    identifier = "name"
    tpye = "string"
"#}, "tpye")]
#[case::argument_key(indoc! {r#"
    [[types]]
    kind = "object"
    identifier = "query"
    reference = { module = "Accounts.Schema", identifier = "query" }

    [[types.fields]]
    identifier = "users"
    type = "[user]"

    [[types.fields.args]]
    identifier = "location_id"
    default = 1
"#}, "default")]
#[case::type_key(indoc! {r#"
    [[types]]
    kind = "scalar"
    identifier = "string"
    descripton = "Text"
"#}, "descripton")]
fn unknown_keys_are_rejected(#[case] input: &str, #[case] key: &str) {
    let error = input.parse::<SchemaDocument>().unwrap_err();

    assert!(
        error.to_string().contains(&format!("unknown field `{key}`")),
        "{error}"
    );
}

#[test]
fn malformed_types_in_documents_are_rejected() {
    let error = indoc! {r#"
        [[types]]
        kind = "object"
        identifier = "user"
        reference = { module = "Accounts.Schema", identifier = "user" }

        [[types.fields]]
        identifier = "friends"
        type = "[user"
    "#}
    .parse::<SchemaDocument>()
    .unwrap_err();

    assert!(error.to_string().contains("Invalid type reference `[user`"), "{error}");
}
