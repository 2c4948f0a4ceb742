use std::{fmt, sync::Arc, time::Duration};

use indexmap::IndexMap;
use serde_json::Value;

use crate::{Middleware, Outcome, SchemaSettings};

/// Argument values of a field, already coerced by the caller.
pub type Arguments = IndexMap<String, Value>;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors raised while resolving, as opposed to [`Outcome::Failure`] which is ordinary data.
#[derive(thiserror::Error, Debug)]
pub enum ResolutionError {
    /// Raised by user resolver code. Propagated untouched.
    #[error(transparent)]
    Resolver(BoxError),
    #[error("Resolving `{path}` timed out after {timeout:?}")]
    TimedOut { path: ResponsePath, timeout: Duration },
    /// A resolution timeout is configured but the field is not resolved on a Tokio runtime.
    #[error("Resolving `{path}` with a timeout of {timeout:?} requires a Tokio runtime")]
    NoRuntime { path: ResponsePath, timeout: Duration },
}

impl ResolutionError {
    pub fn resolver(error: impl Into<BoxError>) -> Self {
        ResolutionError::Resolver(error.into())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PathSegment {
    Field(String),
    Index(usize),
}

/// Position of the field being resolved inside the response.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ResponsePath(Vec<PathSegment>);

impl ResponsePath {
    #[must_use]
    pub fn child(&self, segment: PathSegment) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment);
        ResponsePath(segments)
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }
}

impl<S: Into<String>> FromIterator<S> for ResponsePath {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        ResponsePath(iter.into_iter().map(|name| PathSegment::Field(name.into())).collect())
    }
}

impl fmt::Display for ResponsePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Field(name) if i == 0 => write!(f, "{name}")?,
                PathSegment::Field(name) => write!(f, ".{name}")?,
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

/// Per request information handed to every resolution step.
#[derive(Clone, Debug)]
pub struct ExecutionInfo {
    settings: Arc<SchemaSettings>,
    path: ResponsePath,
    context: Arc<serde_json::Map<String, Value>>,
}

impl ExecutionInfo {
    pub fn new(settings: Arc<SchemaSettings>) -> Self {
        ExecutionInfo {
            settings,
            path: ResponsePath::default(),
            context: Default::default(),
        }
    }

    #[must_use]
    pub fn with_path(self, path: ResponsePath) -> Self {
        ExecutionInfo { path, ..self }
    }

    #[must_use]
    pub fn with_context(self, context: serde_json::Map<String, Value>) -> Self {
        ExecutionInfo {
            context: Arc::new(context),
            ..self
        }
    }

    pub fn settings(&self) -> &SchemaSettings {
        &self.settings
    }

    pub fn custom_default_resolver(&self) -> Option<&Middleware> {
        self.settings.custom_default_resolver()
    }

    pub fn path(&self) -> &ResponsePath {
        &self.path
    }

    /// Request scoped data, such as the current viewer.
    pub fn context(&self) -> &serde_json::Map<String, Value> {
        &self.context
    }
}

/// What a resolver function sees of the field being resolved.
#[derive(Clone, Copy, Debug)]
pub struct ResolverContext<'a> {
    pub arguments: &'a Arguments,
    pub parent: &'a Value,
    pub info: &'a ExecutionInfo,
}

impl<'a> ResolverContext<'a> {
    pub fn argument(&self, name: &str) -> Option<&'a Value> {
        self.arguments.get(name)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum ResolutionState {
    #[default]
    Unresolved,
    Resolved(Outcome),
}

/// Tells the chain whether the following steps should run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Halt,
}

/// The state threaded through a field's middleware chain.
#[derive(Debug)]
pub struct Resolution<'a> {
    context: ResolverContext<'a>,
    state: ResolutionState,
}

impl<'a> Resolution<'a> {
    pub fn new(context: ResolverContext<'a>) -> Self {
        Resolution {
            context,
            state: ResolutionState::Unresolved,
        }
    }

    pub fn context(&self) -> ResolverContext<'a> {
        self.context
    }

    pub fn arguments(&self) -> &'a Arguments {
        self.context.arguments
    }

    pub fn parent(&self) -> &'a Value {
        self.context.parent
    }

    pub fn info(&self) -> &'a ExecutionInfo {
        self.context.info
    }

    pub fn state(&self) -> &ResolutionState {
        &self.state
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self.state, ResolutionState::Resolved(_))
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        match &self.state {
            ResolutionState::Resolved(outcome) => Some(outcome),
            ResolutionState::Unresolved => None,
        }
    }

    pub fn outcome_mut(&mut self) -> Option<&mut Outcome> {
        match &mut self.state {
            ResolutionState::Resolved(outcome) => Some(outcome),
            ResolutionState::Unresolved => None,
        }
    }

    pub fn put_outcome(&mut self, outcome: Outcome) {
        self.state = ResolutionState::Resolved(outcome);
    }

    /// The final outcome. A chain that never resolved produces `null`.
    pub fn into_outcome(self) -> Outcome {
        match self.state {
            ResolutionState::Resolved(outcome) => outcome,
            ResolutionState::Unresolved => Outcome::Success(Value::Null),
        }
    }
}
