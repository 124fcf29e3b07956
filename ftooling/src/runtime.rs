//! Tool invocation: argument binding, handler dispatch, and result rendering.
//!
//! Faults (unknown tool, bad arguments, failing handler) become result text for
//! the model. The only exception is a handler failure on a tool registered
//! with `propagate_errors`, which is returned as `Err`.

use std::sync::Arc;
use std::time::{Duration, Instant};

use fprovider::{ToolCall, ToolSpecification};
use futures_util::future::join_all;

use crate::{
    NoopToolRuntimeHooks, ToolEntry, ToolError, ToolExecutionContext,
    ToolExecutionResult, ToolFuture, ToolRegistry, ToolRuntimeHooks,
};

pub trait ToolInvoker: Send + Sync {
    fn invoke<'a>(
        &'a self,
        entry: &'a ToolEntry,
        tool_call: ToolCall,
        context: ToolExecutionContext,
    ) -> ToolFuture<'a, Result<ToolExecutionResult, ToolError>>;

    /// Result for a call naming a tool that is not registered.
    fn unknown_tool(
        &self,
        tool_call: ToolCall,
        _context: &ToolExecutionContext,
    ) -> ToolExecutionResult {
        let message = ToolError::not_found(&tool_call.name).message;
        ToolExecutionResult::new(tool_call, message)
    }
}

#[derive(Clone)]
pub struct DefaultToolInvoker {
    hooks: Arc<dyn ToolRuntimeHooks>,
}

impl Default for DefaultToolInvoker {
    fn default() -> Self {
        Self::new()
    }
}

impl DefaultToolInvoker {
    pub fn new() -> Self {
        Self {
            hooks: Arc::new(NoopToolRuntimeHooks),
        }
    }

    pub fn with_hooks(mut self, hooks: Arc<dyn ToolRuntimeHooks>) -> Self {
        self.hooks = hooks;
        self
    }
}

impl ToolInvoker for DefaultToolInvoker {
    fn invoke<'a>(
        &'a self,
        entry: &'a ToolEntry,
        tool_call: ToolCall,
        context: ToolExecutionContext,
    ) -> ToolFuture<'a, Result<ToolExecutionResult, ToolError>> {
        Box::pin(async move {
            self.hooks.on_execution_start(&tool_call, &context);
            let started_at = Instant::now();

            let outcome = match entry.bind(&tool_call.arguments) {
                Ok(arguments) => (entry.handler())(arguments, context.clone()).await,
                Err(error) => Err(error),
            };

            match outcome {
                Ok(output) => {
                    let result = ToolExecutionResult::new(tool_call, output.to_text());
                    self.hooks.on_execution_success(
                        &result.request,
                        &context,
                        &result,
                        started_at.elapsed(),
                    );
                    Ok(result)
                }
                Err(error) => {
                    let error = error
                        .with_tool_name(&tool_call.name)
                        .with_tool_call_id(&tool_call.id);
                    self.hooks.on_execution_failure(
                        &tool_call,
                        &context,
                        &error,
                        started_at.elapsed(),
                    );

                    if entry.propagate_errors() && !error.is_user_error() {
                        return Err(error);
                    }

                    Ok(ToolExecutionResult::new(tool_call, error.message))
                }
            }
        })
    }

    fn unknown_tool(
        &self,
        tool_call: ToolCall,
        context: &ToolExecutionContext,
    ) -> ToolExecutionResult {
        let error = ToolError::not_found(&tool_call.name).with_tool_call_id(&tool_call.id);
        self.hooks.on_execution_start(&tool_call, context);
        self.hooks
            .on_execution_failure(&tool_call, context, &error, Duration::ZERO);
        ToolExecutionResult::new(tool_call, error.message)
    }
}

/// One executed call together with the raw-return flag of its tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolExecution {
    pub result: ToolExecutionResult,
    /// `false` for calls naming an unknown tool.
    pub return_raw: bool,
}

/// Registry-backed executor shared by chat calls.
#[derive(Clone)]
pub struct ToolRuntime {
    registry: Arc<ToolRegistry>,
    invoker: Arc<dyn ToolInvoker>,
}

impl ToolRuntime {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self {
            registry,
            invoker: Arc::new(DefaultToolInvoker::new()),
        }
    }

    pub fn with_invoker(mut self, invoker: Arc<dyn ToolInvoker>) -> Self {
        self.invoker = invoker;
        self
    }

    pub fn with_hooks(self, hooks: Arc<dyn ToolRuntimeHooks>) -> Self {
        self.with_invoker(Arc::new(DefaultToolInvoker::new().with_hooks(hooks)))
    }

    pub fn registry(&self) -> Arc<ToolRegistry> {
        Arc::clone(&self.registry)
    }

    pub fn specifications(&self) -> Vec<ToolSpecification> {
        self.registry.specifications()
    }

    pub async fn execute(
        &self,
        tool_call: ToolCall,
        context: ToolExecutionContext,
    ) -> Result<ToolExecution, ToolError> {
        let Some(entry) = self.registry.lookup(&tool_call.name) else {
            return Ok(ToolExecution {
                result: self.invoker.unknown_tool(tool_call, &context),
                return_raw: false,
            });
        };

        let result = self
            .invoker
            .invoke(entry.as_ref(), tool_call, context)
            .await?;
        Ok(ToolExecution {
            result,
            return_raw: entry.return_raw(),
        })
    }

    /// Executes every call of one model response. Results come back in request
    /// order regardless of completion order.
    pub async fn execute_round(
        &self,
        tool_calls: Vec<ToolCall>,
        context: &ToolExecutionContext,
        parallel: bool,
    ) -> Result<Vec<ToolExecution>, ToolError> {
        if parallel {
            let executions = join_all(
                tool_calls
                    .into_iter()
                    .map(|tool_call| self.execute(tool_call, context.clone())),
            )
            .await;
            return executions.into_iter().collect();
        }

        let mut executions = Vec::with_capacity(tool_calls.len());
        for tool_call in tool_calls {
            executions.push(self.execute(tool_call, context.clone()).await?);
        }
        Ok(executions)
    }
}

impl std::fmt::Debug for ToolRuntime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRuntime")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use fschema::{ParameterShape, TypeShape};

    use super::*;
    use crate::{ToolDescriptor, ToolErrorKind, ToolOutput};

    fn add(return_raw: bool) -> ToolDescriptor {
        ToolDescriptor::sync("add", |args, _| {
            Ok(ToolOutput::from(args.i64("arg0")? + args.i64("arg1")?))
        })
        .parameter(ParameterShape::new(TypeShape::i32()))
        .parameter(ParameterShape::new(TypeShape::i32()))
        .return_raw(return_raw)
    }

    fn broken(propagate_errors: bool) -> ToolDescriptor {
        ToolDescriptor::sync("broken", |_, _| Err(ToolError::execution("tool exploded")))
            .propagate_errors(propagate_errors)
    }

    fn runtime(descriptors: Vec<ToolDescriptor>) -> ToolRuntime {
        ToolRuntime::new(Arc::new(
            ToolRegistry::from_descriptors(descriptors).expect("registry should build"),
        ))
    }

    fn context() -> ToolExecutionContext {
        ToolExecutionContext::new("session-1")
    }

    #[derive(Default)]
    struct RecordingHooks {
        events: Mutex<Vec<String>>,
    }

    impl ToolRuntimeHooks for RecordingHooks {
        fn on_execution_start(&self, tool_call: &ToolCall, _context: &ToolExecutionContext) {
            self.events
                .lock()
                .expect("events lock")
                .push(format!("start:{}", tool_call.name));
        }

        fn on_execution_success(
            &self,
            tool_call: &ToolCall,
            _context: &ToolExecutionContext,
            result: &ToolExecutionResult,
            _elapsed: Duration,
        ) {
            self.events
                .lock()
                .expect("events lock")
                .push(format!("success:{}={}", tool_call.name, result.result));
        }

        fn on_execution_failure(
            &self,
            tool_call: &ToolCall,
            _context: &ToolExecutionContext,
            error: &ToolError,
            _elapsed: Duration,
        ) {
            self.events
                .lock()
                .expect("events lock")
                .push(format!("failure:{}:{:?}", tool_call.name, error.kind));
        }
    }

    #[tokio::test]
    async fn runtime_executes_registered_tool() {
        let execution = runtime(vec![add(true)])
            .execute(ToolCall::new("call_1", "add", r#"{"arg0":37,"arg1":87}"#), context())
            .await
            .expect("execution should succeed");

        assert_eq!(execution.result.tool_call_id(), "call_1");
        assert_eq!(execution.result.result, "124");
        assert!(execution.return_raw);
    }

    #[tokio::test]
    async fn unknown_tool_is_reported_as_result_text() {
        let execution = runtime(Vec::new())
            .execute(ToolCall::new("call_2", "missing", "{}"), context())
            .await
            .expect("unknown tool is not an error");

        assert_eq!(execution.result.result, "There is no tool called 'missing'");
        assert!(!execution.return_raw);
    }

    #[tokio::test]
    async fn binding_faults_are_captured_as_result_text() {
        let execution = runtime(vec![add(false)])
            .execute(ToolCall::new("call_3", "add", r#"{"arg0":"two","arg1":3}"#), context())
            .await
            .expect("binding fault is captured");

        assert!(execution.result.result.contains("arg0"));
    }

    #[tokio::test]
    async fn handler_faults_are_captured_unless_propagated() {
        let captured = runtime(vec![broken(false)])
            .execute(ToolCall::new("call_4", "broken", ""), context())
            .await
            .expect("fault is captured");
        assert_eq!(captured.result.result, "tool exploded");

        let error = runtime(vec![broken(true)])
            .execute(ToolCall::new("call_5", "broken", ""), context())
            .await
            .expect_err("fault should propagate");
        assert_eq!(error.kind, ToolErrorKind::Execution);
        assert_eq!(error.tool_call_id.as_deref(), Some("call_5"));
    }

    #[tokio::test]
    async fn propagating_tools_still_capture_binding_faults() {
        let descriptor = add(false).propagate_errors(true);
        let execution = runtime(vec![descriptor])
            .execute(ToolCall::new("call_6", "add", "{}"), context())
            .await
            .expect("missing argument is captured");

        assert!(execution.result.result.contains("missing required field 'arg0'"));
    }

    #[tokio::test]
    async fn round_results_follow_request_order() {
        let slow = ToolDescriptor::new("slow", |_, _| async {
            tokio::time::sleep(Duration::from_millis(30)).await;
            Ok(ToolOutput::from("slow"))
        });
        let fast = ToolDescriptor::sync("fast", |_, _| Ok(ToolOutput::from("fast")));
        let runtime = runtime(vec![slow, fast]);

        for parallel in [true, false] {
            let executions = runtime
                .execute_round(
                    vec![
                        ToolCall::new("call_a", "slow", ""),
                        ToolCall::new("call_b", "fast", ""),
                        ToolCall::new("call_c", "slow", ""),
                    ],
                    &context(),
                    parallel,
                )
                .await
                .expect("round should succeed");

            let results = executions
                .iter()
                .map(|execution| execution.result.result.as_str())
                .collect::<Vec<_>>();
            assert_eq!(results, vec!["slow", "fast", "slow"]);
        }
    }

    #[tokio::test]
    async fn hooks_observe_success_and_failure() {
        let hooks = Arc::new(RecordingHooks::default());
        let runtime = runtime(vec![add(false)]).with_hooks(hooks.clone());

        runtime
            .execute_round(
                vec![
                    ToolCall::new("call_1", "add", r#"{"arg0":2,"arg1":3}"#),
                    ToolCall::new("call_2", "nope", ""),
                ],
                &context(),
                false,
            )
            .await
            .expect("round should succeed");

        let events = hooks.events.lock().expect("events lock").clone();
        assert_eq!(
            events,
            vec![
                "start:add".to_string(),
                "success:add=5".to_string(),
                "start:nope".to_string(),
                "failure:nope:NotFound".to_string(),
            ]
        );
    }
}
