//! Resolution of a single field.
//!
//! [`resolve`] runs the middleware chain of a [`Field`] against a parent value and returns the
//! outcome. Fields that reach execution without middleware get their fallback resolver bound on
//! the fly, using the same precedence as the schema builder: the custom default resolver of the
//! schema, then the system default resolver.

mod chain;

use std::borrow::Cow;

use field_registry::{
    default_middleware, Arguments, ExecutionInfo, Field, Middleware, Outcome, ResolutionError, ResolverContext,
    ResponsePath,
};
use serde_json::Value;
use tracing::Instrument;

pub use chain::run_chain;

/// Resolves `field` for `parent`.
///
/// User resolver errors and timeouts are returned as [`ResolutionError`], a
/// [`Outcome::Failure`] is a successful resolution carrying a field error.
///
/// Without a configured resolution timeout any executor can drive the returned future. With one,
/// it must be polled on a Tokio runtime with the time driver enabled. Outside of any Tokio runtime
/// [`ResolutionError::NoRuntime`] is returned.
pub async fn resolve(
    field: &Field,
    arguments: &Arguments,
    parent: &Value,
    info: &ExecutionInfo,
) -> Result<Outcome, ResolutionError> {
    let span = tracing::info_span!("resolve_field", field = field.name.as_str(), path = %info.path());

    async {
        let middleware = effective_middleware(field, info);
        let chain = run_chain(
            &middleware,
            ResolverContext {
                arguments,
                parent,
                info,
            },
        );

        let Some(timeout) = info.settings().resolution_timeout() else {
            return chain.await;
        };

        if tokio::runtime::Handle::try_current().is_err() {
            tracing::warn!(?timeout, "no Tokio runtime to enforce the resolution timeout");

            return Err(ResolutionError::NoRuntime {
                path: error_path(field, info),
                timeout,
            });
        }

        match tokio::time::timeout(timeout, chain).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(?timeout, "field resolution timed out");

                Err(ResolutionError::TimedOut {
                    path: error_path(field, info),
                    timeout,
                })
            }
        }
    }
    .instrument(span)
    .await
}

/// The chain to run. The field itself is never modified, a missing resolver is bound on a copy.
fn effective_middleware<'a>(field: &'a Field, info: &ExecutionInfo) -> Cow<'a, [Middleware]> {
    if !field.middleware.is_empty() {
        return Cow::Borrowed(&field.middleware);
    }

    tracing::debug!(
        field = field.identifier.as_str(),
        "binding default resolver at execution time"
    );

    Cow::Owned(vec![default_middleware(
        &field.identifier,
        info.custom_default_resolver(),
    )])
}

fn error_path(field: &Field, info: &ExecutionInfo) -> ResponsePath {
    if info.path().segments().is_empty() {
        ResponsePath::from_iter([field.name.as_str()])
    } else {
        info.path().clone()
    }
}
