//! Resolution steps attached to fields.
//!
//! A field's middleware is an ordered chain. The first entry runs first and every entry sees the
//! [`Resolution`] left behind by the ones before it. Entries are plain data here, running them is
//! the job of the resolution crate.

use std::{fmt, sync::Arc};

use futures::future::BoxFuture;
use serde_json::Value;

use crate::{Flow, Outcome, Resolution, ResolutionError, ResolverContext};

pub type ResolverResult = Result<Outcome, ResolutionError>;

#[derive(Clone)]
pub enum Middleware {
    /// A user supplied resolution function.
    Resolve(ResolveFn),
    /// The built-in fallback reading the field out of its parent value.
    DefaultResolver(DefaultResolver),
    /// Any other step, for example a plugin or an authorization check.
    Step(Arc<dyn ResolutionStep>),
}

impl Middleware {
    pub fn resolve<F>(f: F) -> Self
    where
        F: for<'a> Fn(ResolverContext<'a>) -> BoxFuture<'a, ResolverResult> + Send + Sync + 'static,
    {
        Middleware::Resolve(ResolveFn::new(f))
    }

    pub fn step(step: impl ResolutionStep + 'static) -> Self {
        Middleware::Step(Arc::new(step))
    }

    pub fn default_resolver(identifier: impl Into<String>) -> Self {
        Middleware::DefaultResolver(DefaultResolver::new(identifier))
    }

    pub fn kind(&self) -> &str {
        match self {
            Middleware::Resolve(_) => "resolve",
            Middleware::DefaultResolver(_) => "default_resolver",
            Middleware::Step(step) => step.name(),
        }
    }

    pub fn is_default_resolver(&self) -> bool {
        matches!(self, Middleware::DefaultResolver(_))
    }
}

impl fmt::Debug for Middleware {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Middleware::Resolve(resolve) => f.debug_tuple("Resolve").field(resolve).finish(),
            Middleware::DefaultResolver(default) => f.debug_tuple("DefaultResolver").field(default).finish(),
            Middleware::Step(step) => f.debug_tuple("Step").field(&step.name()).finish(),
        }
    }
}

/// Functions and steps compare by identity, default resolvers by the identifier they read.
impl PartialEq for Middleware {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Middleware::Resolve(left), Middleware::Resolve(right)) => left == right,
            (Middleware::DefaultResolver(left), Middleware::DefaultResolver(right)) => left == right,
            (Middleware::Step(left), Middleware::Step(right)) => std::ptr::addr_eq(Arc::as_ptr(left), Arc::as_ptr(right)),
            _ => false,
        }
    }
}

impl From<ResolveFn> for Middleware {
    fn from(resolve: ResolveFn) -> Self {
        Middleware::Resolve(resolve)
    }
}

impl From<DefaultResolver> for Middleware {
    fn from(default: DefaultResolver) -> Self {
        Middleware::DefaultResolver(default)
    }
}

type ResolveCallback = dyn for<'a> Fn(ResolverContext<'a>) -> BoxFuture<'a, ResolverResult> + Send + Sync;

/// A resolution function: `(arguments, parent value, execution info) -> outcome`.
#[derive(Clone)]
pub struct ResolveFn(Arc<ResolveCallback>);

impl ResolveFn {
    pub fn new<F>(f: F) -> Self
    where
        F: for<'a> Fn(ResolverContext<'a>) -> BoxFuture<'a, ResolverResult> + Send + Sync + 'static,
    {
        ResolveFn(Arc::new(f))
    }

    /// Wraps a function which does not need to await anything.
    pub fn sync<F>(f: F) -> Self
    where
        F: Fn(ResolverContext<'_>) -> ResolverResult + Send + Sync + 'static,
    {
        ResolveFn::new(move |ctx| Box::pin(futures::future::ready(f(ctx))))
    }

    pub fn call<'a>(&self, ctx: ResolverContext<'a>) -> BoxFuture<'a, ResolverResult> {
        (self.0)(ctx)
    }
}

impl PartialEq for ResolveFn {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.0), Arc::as_ptr(&other.0))
    }
}

impl fmt::Debug for ResolveFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ResolveFn").field(&Arc::as_ptr(&self.0)).finish()
    }
}

/// Resolves a field by looking its identifier up in the parent value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DefaultResolver {
    identifier: String,
}

impl DefaultResolver {
    pub fn new(identifier: impl Into<String>) -> Self {
        DefaultResolver {
            identifier: identifier.into(),
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Never fails: missing keys and non-object parents produce `null`.
    pub fn resolve(&self, parent: &Value) -> Outcome {
        let value = parent.get(&self.identifier).cloned().unwrap_or(Value::Null);
        Outcome::Success(value)
    }
}

/// A custom middleware step.
///
/// Steps see the whole [`Resolution`]: they may inspect or replace the outcome produced so far
/// and decide whether the rest of the chain runs.
#[async_trait::async_trait]
pub trait ResolutionStep: Send + Sync {
    fn name(&self) -> &str;

    async fn call(&self, resolution: &mut Resolution<'_>) -> Result<Flow, ResolutionError>;
}
