//! Metrics-based observability hooks for tool execution and chat rounds.
//!
//! ```rust
//! use fobserve::MetricsObservabilityHooks;
//! use ftooling::ToolRuntimeHooks;
//!
//! fn accepts_tool_hooks(_hooks: &dyn ToolRuntimeHooks) {}
//!
//! let hooks = MetricsObservabilityHooks;
//! accepts_tool_hooks(&hooks);
//! ```

use std::time::Duration;

use fchat::{ChatError, ChatRuntimeHooks, ChatSession, ChatTurnResult};
use fprovider::{ModelResponse, ToolCall};
use ftooling::{ToolError, ToolExecutionContext, ToolExecutionResult, ToolRuntimeHooks};

#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsObservabilityHooks;

impl ToolRuntimeHooks for MetricsObservabilityHooks {
    fn on_execution_start(&self, tool_call: &ToolCall, _context: &ToolExecutionContext) {
        metrics::counter!(
            "fassistant_tool_execution_start_total",
            "tool_name" => tool_call.name.clone()
        )
        .increment(1);
    }

    fn on_execution_success(
        &self,
        tool_call: &ToolCall,
        _context: &ToolExecutionContext,
        _result: &ToolExecutionResult,
        elapsed: Duration,
    ) {
        metrics::counter!(
            "fassistant_tool_execution_success_total",
            "tool_name" => tool_call.name.clone()
        )
        .increment(1);
        metrics::histogram!(
            "fassistant_tool_execution_duration_seconds",
            "tool_name" => tool_call.name.clone(),
            "status" => "success"
        )
        .record(elapsed.as_secs_f64());
    }

    fn on_execution_failure(
        &self,
        tool_call: &ToolCall,
        _context: &ToolExecutionContext,
        error: &ToolError,
        elapsed: Duration,
    ) {
        metrics::counter!(
            "fassistant_tool_execution_failure_total",
            "tool_name" => tool_call.name.clone(),
            "error_kind" => format!("{:?}", error.kind)
        )
        .increment(1);
        metrics::histogram!(
            "fassistant_tool_execution_duration_seconds",
            "tool_name" => tool_call.name.clone(),
            "status" => "failure"
        )
        .record(elapsed.as_secs_f64());
    }
}

impl ChatRuntimeHooks for MetricsObservabilityHooks {
    fn on_round_start(&self, session: &ChatSession, _round: usize) {
        metrics::counter!("fassistant_chat_rounds_total", "model" => session.model.clone())
            .increment(1);
    }

    fn on_model_response(&self, session: &ChatSession, _round: usize, response: &ModelResponse) {
        metrics::counter!(
            "fassistant_chat_model_responses_total",
            "model" => session.model.clone(),
            "stop_reason" => format!("{:?}", response.stop_reason)
        )
        .increment(1);
    }

    fn on_tools_executed(
        &self,
        session: &ChatSession,
        _round: usize,
        results: &[ToolExecutionResult],
    ) {
        metrics::histogram!(
            "fassistant_chat_tool_calls_per_round",
            "model" => session.model.clone()
        )
        .record(results.len() as f64);
    }

    fn on_turn_complete(&self, session: &ChatSession, result: &ChatTurnResult) {
        let outcome = if result.is_raw() { "raw" } else { "summarized" };
        metrics::counter!(
            "fassistant_chat_turn_complete_total",
            "model" => session.model.clone(),
            "outcome" => outcome
        )
        .increment(1);
        metrics::histogram!(
            "fassistant_chat_model_rounds_per_turn",
            "model" => session.model.clone()
        )
        .record(result.model_rounds as f64);
    }

    fn on_turn_failure(&self, session: &ChatSession, error: &ChatError) {
        metrics::counter!(
            "fassistant_chat_turn_failure_total",
            "model" => session.model.clone(),
            "error_kind" => format!("{:?}", error.kind)
        )
        .increment(1);
    }
}
