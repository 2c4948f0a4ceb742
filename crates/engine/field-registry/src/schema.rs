use std::sync::Arc;

use indexmap::{map::Entry, IndexMap};

use crate::{
    binder::bind_defaults_in_place, build_arguments, build_fields, ArgumentSpec, BuildError, EnumType, ExecutionInfo,
    Field, FieldSpec, InputObjectType, ObjectType, Reference, ResolveFn, ScalarType, SchemaSettings, TypeDefinition,
};

/// The declarative description of one type.
#[derive(Clone, Debug, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeSpec {
    Scalar(ScalarSpec),
    Enum(EnumSpec),
    Object(ObjectSpec),
    InputObject(InputObjectSpec),
}

impl TypeSpec {
    pub fn identifier(&self) -> &str {
        match self {
            TypeSpec::Scalar(spec) => &spec.identifier,
            TypeSpec::Enum(spec) => &spec.identifier,
            TypeSpec::Object(spec) => &spec.identifier,
            TypeSpec::InputObject(spec) => &spec.identifier,
        }
    }
}

#[derive(Clone, Debug, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScalarSpec {
    pub identifier: String,
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Clone, Debug, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnumSpec {
    pub identifier: String,
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub values: Vec<String>,
}

#[derive(Clone, Debug, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ObjectSpec {
    pub identifier: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub reference: Reference,
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
}

impl ObjectSpec {
    pub fn new(identifier: impl Into<String>, reference: Reference) -> Self {
        ObjectSpec {
            identifier: identifier.into(),
            name: None,
            description: None,
            reference,
            fields: Vec::new(),
        }
    }

    #[must_use]
    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }
}

#[derive(Clone, Debug, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputObjectSpec {
    pub identifier: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub reference: Reference,
    #[serde(default)]
    pub fields: Vec<ArgumentSpec>,
}

/// A whole schema declared as data, typically loaded from TOML or JSON.
#[derive(Clone, Debug, Default, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SchemaDocument {
    pub query: Option<String>,
    pub mutation: Option<String>,
    pub subscription: Option<String>,
    pub types: Vec<TypeSpec>,
}

impl std::str::FromStr for SchemaDocument {
    type Err = toml::de::Error;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        toml::from_str(input)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RootTypes {
    pub query: String,
    pub mutation: Option<String>,
    pub subscription: Option<String>,
}

impl Default for RootTypes {
    fn default() -> Self {
        RootTypes {
            query: "query".to_owned(),
            mutation: None,
            subscription: None,
        }
    }
}

impl RootTypes {
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.query.as_str())
            .chain(self.mutation.as_deref())
            .chain(self.subscription.as_deref())
    }
}

/// Compiles type specs into a [`Schema`]: builds every field, then binds default resolvers.
#[derive(Default)]
pub struct SchemaBuilder {
    settings: SchemaSettings,
    roots: RootTypes,
    specs: Vec<TypeSpec>,
    resolvers: Vec<(String, String, ResolveFn)>,
}

impl SchemaBuilder {
    pub fn new(settings: SchemaSettings) -> Self {
        SchemaBuilder {
            settings,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_document(mut self, document: SchemaDocument) -> Self {
        if let Some(query) = document.query {
            self.roots.query = query;
        }
        self.roots.mutation = document.mutation.or(self.roots.mutation);
        self.roots.subscription = document.subscription.or(self.roots.subscription);
        self.specs.extend(document.types);
        self
    }

    #[must_use]
    pub fn with_type(mut self, spec: TypeSpec) -> Self {
        self.specs.push(spec);
        self
    }

    #[must_use]
    pub fn with_object(self, spec: ObjectSpec) -> Self {
        self.with_type(TypeSpec::Object(spec))
    }

    #[must_use]
    pub fn with_scalar(self, identifier: impl Into<String>) -> Self {
        self.with_type(TypeSpec::Scalar(ScalarSpec {
            identifier: identifier.into(),
            name: None,
            description: None,
        }))
    }

    #[must_use]
    pub fn with_roots(mut self, roots: RootTypes) -> Self {
        self.roots = roots;
        self
    }

    /// Attaches a resolve function to a field declared in a document. A field can only hold one,
    /// attaching a second one fails the build.
    #[must_use]
    pub fn with_resolver(mut self, object: &str, field: &str, resolve: ResolveFn) -> Self {
        self.resolvers.push((object.to_owned(), field.to_owned(), resolve));
        self
    }

    pub fn build(self) -> Result<Schema, BuildError> {
        let SchemaBuilder {
            settings,
            roots,
            mut specs,
            resolvers,
        } = self;

        for (object, field, resolve) in resolvers {
            let target = specs.iter_mut().find_map(|spec| match spec {
                TypeSpec::Object(spec) if spec.identifier == object => {
                    spec.fields.iter_mut().find(|spec| spec.identifier == field)
                }
                _ => None,
            });

            let Some(target) = target else {
                return Err(BuildError::UnknownField {
                    container: object,
                    field,
                });
            };
            if target.attributes.resolve.is_some() {
                return Err(BuildError::DuplicateResolver {
                    container: object,
                    field,
                });
            }
            target.attributes.resolve = Some(resolve);
        }

        let mut types = IndexMap::with_capacity(specs.len());

        for spec in specs {
            let definition = build_type(spec)?;

            match types.entry(definition.identifier().to_owned()) {
                Entry::Occupied(entry) => {
                    return Err(BuildError::DuplicateType {
                        identifier: entry.key().clone(),
                    })
                }
                Entry::Vacant(entry) => {
                    entry.insert(definition);
                }
            }
        }

        let mut bound = 0;
        for definition in types.values_mut() {
            if let TypeDefinition::Object(object) = definition {
                bound += bind_defaults_in_place(&mut object.fields, settings.custom_default_resolver());
            }
        }

        tracing::debug!(
            types = types.len(),
            default_resolvers = bound,
            custom_default = settings.custom_default_resolver().is_some(),
            "compiled schema"
        );

        Ok(Schema {
            types,
            roots,
            settings: Arc::new(settings),
        })
    }
}

fn build_type(spec: TypeSpec) -> Result<TypeDefinition, BuildError> {
    Ok(match spec {
        TypeSpec::Scalar(ScalarSpec {
            identifier,
            name,
            description,
        }) => TypeDefinition::Scalar(ScalarType {
            name: name.unwrap_or_else(|| identifier.clone()),
            identifier,
            description,
        }),
        TypeSpec::Enum(EnumSpec {
            identifier,
            name,
            description,
            values,
        }) => TypeDefinition::Enum(EnumType {
            name: name.unwrap_or_else(|| identifier.clone()),
            identifier,
            description,
            values,
        }),
        TypeSpec::Object(ObjectSpec {
            identifier,
            name,
            description,
            reference,
            fields,
        }) => {
            let fields = build_fields(&identifier, fields, Some(&reference))?;
            tracing::trace!(object = identifier.as_str(), fields = fields.len(), "built object");

            TypeDefinition::Object(ObjectType {
                name: name.unwrap_or_else(|| identifier.clone()),
                identifier,
                description,
                fields,
                reference,
            })
        }
        TypeSpec::InputObject(InputObjectSpec {
            identifier,
            name,
            description,
            reference,
            fields,
        }) => {
            let fields = build_arguments(&identifier, fields, &reference)?;

            TypeDefinition::InputObject(InputObjectType {
                name: name.unwrap_or_else(|| identifier.clone()),
                identifier,
                description,
                fields,
                reference,
            })
        }
    })
}

/// A compiled schema. Immutable, share it behind an `Arc` across requests.
#[derive(Debug)]
pub struct Schema {
    types: IndexMap<String, TypeDefinition>,
    roots: RootTypes,
    settings: Arc<SchemaSettings>,
}

impl Schema {
    pub fn builder(settings: SchemaSettings) -> SchemaBuilder {
        SchemaBuilder::new(settings)
    }

    pub fn lookup_type(&self, identifier: &str) -> Option<&TypeDefinition> {
        self.types.get(identifier)
    }

    pub fn types(&self) -> impl ExactSizeIterator<Item = &TypeDefinition> {
        self.types.values()
    }

    pub fn type_map(&self) -> &IndexMap<String, TypeDefinition> {
        &self.types
    }

    pub fn object(&self, identifier: &str) -> Option<&ObjectType> {
        self.lookup_type(identifier).and_then(TypeDefinition::as_object)
    }

    pub fn field(&self, object: &str, field: &str) -> Option<&Field> {
        self.object(object).and_then(|object| object.field(field))
    }

    pub fn roots(&self) -> &RootTypes {
        &self.roots
    }

    pub fn settings(&self) -> &Arc<SchemaSettings> {
        &self.settings
    }

    /// Fresh per-request execution info bound to this schema's settings.
    pub fn execution_info(&self) -> ExecutionInfo {
        ExecutionInfo::new(Arc::clone(&self.settings))
    }
}
