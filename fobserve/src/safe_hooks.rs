use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::Duration;

use fchat::{ChatError, ChatPhase, ChatRuntimeHooks, ChatSession, ChatTurnResult};
use fprovider::{ModelResponse, ToolCall};
use ftooling::{ToolError, ToolExecutionContext, ToolExecutionResult, ToolRuntimeHooks};

pub struct SafeToolHooks<H> {
    inner: H,
}

impl<H> SafeToolHooks<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }
}

impl<H> ToolRuntimeHooks for SafeToolHooks<H>
where
    H: ToolRuntimeHooks,
{
    fn on_execution_start(&self, tool_call: &ToolCall, context: &ToolExecutionContext) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_execution_start(tool_call, context)
        }));
    }

    fn on_execution_success(
        &self,
        tool_call: &ToolCall,
        context: &ToolExecutionContext,
        result: &ToolExecutionResult,
        elapsed: Duration,
    ) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner
                .on_execution_success(tool_call, context, result, elapsed)
        }));
    }

    fn on_execution_failure(
        &self,
        tool_call: &ToolCall,
        context: &ToolExecutionContext,
        error: &ToolError,
        elapsed: Duration,
    ) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner
                .on_execution_failure(tool_call, context, error, elapsed)
        }));
    }
}

pub struct SafeChatHooks<H> {
    inner: H,
}

impl<H> SafeChatHooks<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }
}

impl<H> ChatRuntimeHooks for SafeChatHooks<H>
where
    H: ChatRuntimeHooks,
{
    fn on_phase(&self, session: &ChatSession, phase: ChatPhase) {
        let _ = catch_unwind(AssertUnwindSafe(|| self.inner.on_phase(session, phase)));
    }

    fn on_round_start(&self, session: &ChatSession, round: usize) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_round_start(session, round)
        }));
    }

    fn on_model_response(&self, session: &ChatSession, round: usize, response: &ModelResponse) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_model_response(session, round, response)
        }));
    }

    fn on_tools_executed(
        &self,
        session: &ChatSession,
        round: usize,
        results: &[ToolExecutionResult],
    ) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_tools_executed(session, round, results)
        }));
    }

    fn on_turn_complete(&self, session: &ChatSession, result: &ChatTurnResult) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_turn_complete(session, result)
        }));
    }

    fn on_turn_failure(&self, session: &ChatSession, error: &ChatError) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_turn_failure(session, error)
        }));
    }
}
