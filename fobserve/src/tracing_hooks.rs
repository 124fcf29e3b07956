//! Tracing-based observability hooks for tool execution and chat rounds.
//!
//! ```rust
//! use fchat::ChatRuntimeHooks;
//! use fobserve::TracingObservabilityHooks;
//!
//! fn accepts_chat_hooks(_hooks: &dyn ChatRuntimeHooks) {}
//!
//! let hooks = TracingObservabilityHooks;
//! accepts_chat_hooks(&hooks);
//! ```

use std::time::Duration;

use fchat::{ChatError, ChatPhase, ChatRuntimeHooks, ChatSession, ChatTurnResult};
use fprovider::{ModelResponse, ToolCall};
use ftooling::{ToolError, ToolExecutionContext, ToolExecutionResult, ToolRuntimeHooks};

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObservabilityHooks;

impl ToolRuntimeHooks for TracingObservabilityHooks {
    fn on_execution_start(&self, tool_call: &ToolCall, context: &ToolExecutionContext) {
        tracing::info!(
            phase = "tool",
            event = "execution_start",
            tool_name = tool_call.name,
            tool_call_id = tool_call.id,
            session_id = %context.session_id,
            round = context.round
        );
    }

    fn on_execution_success(
        &self,
        tool_call: &ToolCall,
        context: &ToolExecutionContext,
        result: &ToolExecutionResult,
        elapsed: Duration,
    ) {
        tracing::info!(
            phase = "tool",
            event = "execution_success",
            tool_name = tool_call.name,
            tool_call_id = tool_call.id,
            session_id = %context.session_id,
            round = context.round,
            result_len = result.result.len(),
            elapsed_ms = elapsed.as_millis() as u64
        );
    }

    fn on_execution_failure(
        &self,
        tool_call: &ToolCall,
        context: &ToolExecutionContext,
        error: &ToolError,
        elapsed: Duration,
    ) {
        if error.is_user_error() {
            tracing::warn!(
                phase = "tool",
                event = "execution_rejected",
                tool_name = tool_call.name,
                tool_call_id = tool_call.id,
                session_id = %context.session_id,
                round = context.round,
                error_kind = ?error.kind,
                error = %error
            );
            return;
        }

        tracing::error!(
            phase = "tool",
            event = "execution_failure",
            tool_name = tool_call.name,
            tool_call_id = tool_call.id,
            session_id = %context.session_id,
            round = context.round,
            elapsed_ms = elapsed.as_millis() as u64,
            error_kind = ?error.kind,
            error = %error
        );
    }
}

impl ChatRuntimeHooks for TracingObservabilityHooks {
    fn on_phase(&self, session: &ChatSession, phase: ChatPhase) {
        tracing::debug!(
            phase = "chat",
            event = "phase",
            chat_phase = ?phase,
            session_id = %session.id
        );
    }

    fn on_round_start(&self, session: &ChatSession, round: usize) {
        tracing::info!(
            phase = "chat",
            event = "round_start",
            session_id = %session.id,
            model = session.model,
            round
        );
    }

    fn on_model_response(&self, session: &ChatSession, round: usize, response: &ModelResponse) {
        let (_, tool_calls) = response.split_output();
        tracing::info!(
            phase = "chat",
            event = "model_response",
            session_id = %session.id,
            round,
            stop_reason = ?response.stop_reason,
            tool_calls = tool_calls.len()
        );
    }

    fn on_tools_executed(
        &self,
        session: &ChatSession,
        round: usize,
        results: &[ToolExecutionResult],
    ) {
        tracing::info!(
            phase = "chat",
            event = "tools_executed",
            session_id = %session.id,
            tool_round = round,
            results = results.len()
        );
    }

    fn on_turn_complete(&self, session: &ChatSession, result: &ChatTurnResult) {
        tracing::info!(
            phase = "chat",
            event = "turn_complete",
            session_id = %session.id,
            model_rounds = result.model_rounds,
            tool_executions = result.tool_executions.len(),
            raw = result.is_raw()
        );
    }

    fn on_turn_failure(&self, session: &ChatSession, error: &ChatError) {
        tracing::error!(
            phase = "chat",
            event = "turn_failure",
            session_id = %session.id,
            chat_phase = ?error.phase,
            error_kind = ?error.kind,
            error = %error
        );
    }
}
