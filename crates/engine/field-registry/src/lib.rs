//! Field definitions for the engine schema.
//!
//! Declarative [`FieldSpec`]s are turned into [`Field`]s by [`build_fields`], every field without
//! middleware then receives a fallback resolver from [`bind_defaults`]. The fallback is the
//! schema's custom default resolver when one is configured in [`SchemaSettings`], the system
//! [`DefaultResolver`] otherwise. Running the middleware lives in the resolution crate.

mod binder;
mod builder;
mod config;
mod error;
mod field_types;
mod fields;
mod middleware;
mod outcome;
mod reference;
mod resolution;
mod schema;
mod spec;
mod types;

pub use binder::{bind_defaults, default_middleware};
pub use builder::{build_arguments, build_fields};
pub use config::{Config, ResolutionConfig, SchemaSettings};
pub use error::BuildError;
pub use field_types::{Deprecation, InvalidTypeReference, TypeReference};
pub use fields::{Argument, Field};
pub use middleware::{DefaultResolver, Middleware, ResolutionStep, ResolveFn, ResolverResult};
pub use outcome::{FieldError, Outcome, PluginId};
pub use reference::{propagate, Location, Reference, Referenced};
pub use resolution::{
    Arguments, BoxError, ExecutionInfo, Flow, PathSegment, Resolution, ResolutionError, ResolutionState, ResolverContext,
    ResponsePath,
};
pub use schema::{
    EnumSpec, InputObjectSpec, ObjectSpec, RootTypes, ScalarSpec, Schema, SchemaBuilder, SchemaDocument, TypeSpec,
};
pub use spec::{ArgumentAttributes, ArgumentSpec, FieldAttributes, FieldSpec};
pub use types::{EnumType, InputObjectType, ObjectType, ScalarType, TypeDefinition, TypeKind};

// Used by the trait definition in `middleware`, re-exported for implementors.
pub use async_trait::async_trait;
