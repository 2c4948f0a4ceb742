use field_registry::{Flow, Middleware, Outcome, Resolution, ResolutionError, ResolverContext};

/// Runs `chain` in declaration order and returns the outcome left behind by the last step.
///
/// Resolvers skip once an earlier entry resolved the field, custom steps always run and may stop
/// the chain by returning [`Flow::Halt`]. An empty or never resolving chain produces `null`.
pub async fn run_chain(chain: &[Middleware], context: ResolverContext<'_>) -> Result<Outcome, ResolutionError> {
    let mut resolution = Resolution::new(context);

    for (position, middleware) in chain.iter().enumerate() {
        tracing::trace!(position, kind = middleware.kind(), "running middleware");

        if run_middleware(middleware, &mut resolution).await? == Flow::Halt {
            tracing::trace!(position, "middleware chain halted");
            break;
        }
    }

    Ok(resolution.into_outcome())
}

async fn run_middleware(middleware: &Middleware, resolution: &mut Resolution<'_>) -> Result<Flow, ResolutionError> {
    match middleware {
        Middleware::Resolve(resolve) => {
            if !resolution.is_resolved() {
                let outcome = resolve.call(resolution.context()).await?;
                resolution.put_outcome(outcome);
            }
            Ok(Flow::Continue)
        }
        Middleware::DefaultResolver(default) => {
            if !resolution.is_resolved() {
                resolution.put_outcome(default.resolve(resolution.parent()));
            }
            Ok(Flow::Continue)
        }
        Middleware::Step(step) => step.call(resolution).await,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use field_registry::{async_trait, Arguments, ExecutionInfo, FieldError, ResolveFn, ResolutionStep};
    use serde_json::{json, Value};

    use super::*;

    /// Records the state it observes, then lets the chain continue.
    struct Recorder {
        name: &'static str,
        seen: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl ResolutionStep for Recorder {
        fn name(&self) -> &str {
            self.name
        }

        async fn call(&self, resolution: &mut Resolution<'_>) -> Result<Flow, ResolutionError> {
            let state = match resolution.outcome() {
                Some(outcome) => format!("{}: {outcome:?}", self.name),
                None => format!("{}: unresolved", self.name),
            };
            self.seen.lock().unwrap().push(state);
            Ok(Flow::Continue)
        }
    }

    struct Uppercase;

    #[async_trait]
    impl ResolutionStep for Uppercase {
        fn name(&self) -> &str {
            "uppercase"
        }

        async fn call(&self, resolution: &mut Resolution<'_>) -> Result<Flow, ResolutionError> {
            if let Some(Outcome::Success(Value::String(value))) = resolution.outcome_mut() {
                *value = value.to_uppercase();
            }
            Ok(Flow::Continue)
        }
    }

    struct Deny;

    #[async_trait]
    impl ResolutionStep for Deny {
        fn name(&self) -> &str {
            "deny"
        }

        async fn call(&self, resolution: &mut Resolution<'_>) -> Result<Flow, ResolutionError> {
            if resolution.info().context().get("viewer").is_none() {
                resolution.put_outcome(Outcome::failure(
                    FieldError::new("Unauthorized").with_extension("code", "UNAUTHORIZED"),
                ));
                return Ok(Flow::Halt);
            }
            Ok(Flow::Continue)
        }
    }

    struct Defer;

    #[async_trait]
    impl ResolutionStep for Defer {
        fn name(&self) -> &str {
            "defer"
        }

        async fn call(&self, resolution: &mut Resolution<'_>) -> Result<Flow, ResolutionError> {
            let id = resolution.parent()["id"].clone();
            resolution.put_outcome(Outcome::deferred("batch", json!({ "ids": [id] })));
            Ok(Flow::Continue)
        }
    }

    async fn run(chain: &[Middleware], parent: Value, info: &ExecutionInfo) -> Result<Outcome, ResolutionError> {
        let arguments = Arguments::new();
        run_chain(
            chain,
            ResolverContext {
                arguments: &arguments,
                parent: &parent,
                info,
            },
        )
        .await
    }

    fn info() -> ExecutionInfo {
        ExecutionInfo::new(Default::default())
    }

    #[tokio::test]
    async fn empty_chain_produces_null() {
        let outcome = run(&[], json!({ "name": "Ada" }), &info()).await.unwrap();
        assert_eq!(outcome, Outcome::Success(Value::Null));
    }

    #[tokio::test]
    async fn steps_run_in_declaration_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let chain = [
            Middleware::step(Recorder {
                name: "before",
                seen: seen.clone(),
            }),
            Middleware::default_resolver("name"),
            Middleware::step(Uppercase),
            Middleware::step(Recorder {
                name: "after",
                seen: seen.clone(),
            }),
        ];

        let outcome = run(&chain, json!({ "name": "Ada" }), &info()).await.unwrap();

        assert_eq!(outcome, Outcome::success("ADA"));
        insta::assert_debug_snapshot!(seen.lock().unwrap(), @r###"
        [
            "before: unresolved",
            "after: Success(String(\"ADA\"))",
        ]
        "###);
    }

    #[tokio::test]
    async fn resolvers_skip_resolved_fields() {
        let chain = [
            Middleware::from(ResolveFn::sync(|_| Ok(Outcome::success("explicit")))),
            Middleware::default_resolver("name"),
            Middleware::from(ResolveFn::sync(|_| Ok(Outcome::success("second")))),
        ];

        let outcome = run(&chain, json!({ "name": "Ada" }), &info()).await.unwrap();

        assert_eq!(outcome, Outcome::success("explicit"));
    }

    #[tokio::test]
    async fn halting_skips_the_rest() {
        let chain = [
            Middleware::step(Deny),
            Middleware::from(ResolveFn::sync(|_| Ok(Outcome::success("secret")))),
        ];

        let outcome = run(&chain, json!({}), &info()).await.unwrap();
        insta::assert_json_snapshot!(outcome, @r###"
        {
          "Failure": {
            "message": "Unauthorized",
            "extensions": {
              "code": "UNAUTHORIZED"
            }
          }
        }
        "###);

        let mut context = serde_json::Map::new();
        context.insert("viewer".into(), json!({ "id": 1 }));
        let outcome = run(&chain, json!({}), &info().with_context(context)).await.unwrap();
        assert_eq!(outcome, Outcome::success("secret"));
    }

    #[tokio::test]
    async fn resolver_errors_propagate() {
        let chain = [
            Middleware::from(ResolveFn::sync(|_| Err(ResolutionError::resolver("database unavailable")))),
            Middleware::default_resolver("name"),
        ];

        let error = run(&chain, json!({ "name": "Ada" }), &info()).await.unwrap_err();

        assert!(matches!(error, ResolutionError::Resolver(_)));
        insta::assert_snapshot!(error.to_string(), @"database unavailable");
    }

    #[tokio::test]
    async fn deferred_outcomes_pass_through() {
        let outcome = run(&[Middleware::step(Defer)], json!({ "id": 4 }), &info()).await.unwrap();

        assert_eq!(outcome, Outcome::deferred("batch", json!({ "ids": [4] })));
    }
}
