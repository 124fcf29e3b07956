use std::sync::{Arc, Mutex};
use std::time::Duration;

use fchat::{ChatError, ChatPhase, ChatRuntimeHooks, ChatSession, ChatTurnResult};
use fprovider::{ModelResponse, StopReason, ToolCall};
use ftooling::{ToolError, ToolExecutionContext, ToolExecutionResult, ToolRuntimeHooks};

use crate::{MetricsObservabilityHooks, SafeChatHooks, SafeToolHooks, TracingObservabilityHooks};

fn sample_tool_call() -> ToolCall {
    ToolCall::new("call-1", "add", r#"{"arg0":2,"arg1":3}"#)
}

fn sample_tool_context() -> ToolExecutionContext {
    ToolExecutionContext::new("session-1").with_round(2)
}

fn sample_result() -> ToolExecutionResult {
    ToolExecutionResult::new(sample_tool_call(), "5")
}

fn sample_session() -> ChatSession {
    ChatSession::new("session-1", "test-model")
}

fn sample_turn() -> ChatTurnResult {
    ChatTurnResult {
        session_id: "session-1".into(),
        content: None,
        tool_executions: vec![sample_result()],
        model_rounds: 1,
        messages: Vec::new(),
        stop_reason: StopReason::ToolUse,
    }
}

fn exercise_tool_hooks(hooks: &dyn ToolRuntimeHooks) {
    hooks.on_execution_start(&sample_tool_call(), &sample_tool_context());
    hooks.on_execution_success(
        &sample_tool_call(),
        &sample_tool_context(),
        &sample_result(),
        Duration::from_millis(20),
    );
    hooks.on_execution_failure(
        &sample_tool_call(),
        &sample_tool_context(),
        &ToolError::execution("tool failed"),
        Duration::from_millis(20),
    );
    hooks.on_execution_failure(
        &sample_tool_call(),
        &sample_tool_context(),
        &ToolError::not_found("divide"),
        Duration::ZERO,
    );
}

fn exercise_chat_hooks(hooks: &dyn ChatRuntimeHooks) {
    let session = sample_session();
    hooks.on_phase(&session, ChatPhase::AwaitingModel);
    hooks.on_round_start(&session, 1);
    hooks.on_model_response(
        &session,
        1,
        &ModelResponse::tool_calls("test-model", vec![sample_tool_call()]),
    );
    hooks.on_tools_executed(&session, 1, &[sample_result()]);
    hooks.on_turn_complete(&session, &sample_turn());
    hooks.on_turn_failure(
        &session,
        &ChatError::max_rounds_exceeded(10).with_phase(ChatPhase::ExecutingTools),
    );
}

#[test]
fn tracing_hooks_smoke_test_all_callbacks() {
    exercise_tool_hooks(&TracingObservabilityHooks);
    exercise_chat_hooks(&TracingObservabilityHooks);
}

#[test]
fn metrics_hooks_smoke_test_all_callbacks() {
    exercise_tool_hooks(&MetricsObservabilityHooks);
    exercise_chat_hooks(&MetricsObservabilityHooks);
}

#[derive(Default, Clone)]
struct RecordingToolHooks {
    events: Arc<Mutex<Vec<&'static str>>>,
}

impl ToolRuntimeHooks for RecordingToolHooks {
    fn on_execution_start(&self, _tool_call: &ToolCall, _context: &ToolExecutionContext) {
        self.events.lock().expect("events lock").push("start");
    }

    fn on_execution_success(
        &self,
        _tool_call: &ToolCall,
        _context: &ToolExecutionContext,
        _result: &ToolExecutionResult,
        _elapsed: Duration,
    ) {
        self.events.lock().expect("events lock").push("success");
    }

    fn on_execution_failure(
        &self,
        _tool_call: &ToolCall,
        _context: &ToolExecutionContext,
        _error: &ToolError,
        _elapsed: Duration,
    ) {
        self.events.lock().expect("events lock").push("failure");
    }
}

#[derive(Default, Clone)]
struct RecordingChatHooks {
    events: Arc<Mutex<Vec<&'static str>>>,
}

impl ChatRuntimeHooks for RecordingChatHooks {
    fn on_phase(&self, _session: &ChatSession, _phase: ChatPhase) {
        self.events.lock().expect("events lock").push("phase");
    }

    fn on_round_start(&self, _session: &ChatSession, _round: usize) {
        self.events.lock().expect("events lock").push("round_start");
    }

    fn on_model_response(&self, _session: &ChatSession, _round: usize, _response: &ModelResponse) {
        self.events.lock().expect("events lock").push("model_response");
    }

    fn on_tools_executed(
        &self,
        _session: &ChatSession,
        _round: usize,
        _results: &[ToolExecutionResult],
    ) {
        self.events.lock().expect("events lock").push("tools_executed");
    }

    fn on_turn_complete(&self, _session: &ChatSession, _result: &ChatTurnResult) {
        self.events.lock().expect("events lock").push("turn_complete");
    }

    fn on_turn_failure(&self, _session: &ChatSession, _error: &ChatError) {
        self.events.lock().expect("events lock").push("turn_failure");
    }
}

struct PanicToolHooks;

impl ToolRuntimeHooks for PanicToolHooks {
    fn on_execution_start(&self, _tool_call: &ToolCall, _context: &ToolExecutionContext) {
        panic!("start panic");
    }

    fn on_execution_success(
        &self,
        _tool_call: &ToolCall,
        _context: &ToolExecutionContext,
        _result: &ToolExecutionResult,
        _elapsed: Duration,
    ) {
        panic!("success panic");
    }

    fn on_execution_failure(
        &self,
        _tool_call: &ToolCall,
        _context: &ToolExecutionContext,
        _error: &ToolError,
        _elapsed: Duration,
    ) {
        panic!("failure panic");
    }
}

struct PanicChatHooks;

impl ChatRuntimeHooks for PanicChatHooks {
    fn on_phase(&self, _session: &ChatSession, _phase: ChatPhase) {
        panic!("phase panic");
    }

    fn on_round_start(&self, _session: &ChatSession, _round: usize) {
        panic!("round panic");
    }

    fn on_model_response(&self, _session: &ChatSession, _round: usize, _response: &ModelResponse) {
        panic!("response panic");
    }

    fn on_tools_executed(
        &self,
        _session: &ChatSession,
        _round: usize,
        _results: &[ToolExecutionResult],
    ) {
        panic!("tools panic");
    }

    fn on_turn_complete(&self, _session: &ChatSession, _result: &ChatTurnResult) {
        panic!("complete panic");
    }

    fn on_turn_failure(&self, _session: &ChatSession, _error: &ChatError) {
        panic!("failure panic");
    }
}

#[test]
fn safe_tool_hooks_delegate_when_inner_succeeds() {
    let inner = RecordingToolHooks::default();
    let events = Arc::clone(&inner.events);

    exercise_tool_hooks(&SafeToolHooks::new(inner));

    assert_eq!(
        *events.lock().expect("events lock"),
        vec!["start", "success", "failure", "failure"]
    );
}

#[test]
fn safe_chat_hooks_delegate_when_inner_succeeds() {
    let inner = RecordingChatHooks::default();
    let events = Arc::clone(&inner.events);

    exercise_chat_hooks(&SafeChatHooks::new(inner));

    assert_eq!(events.lock().expect("events lock").len(), 6);
}

#[test]
fn safe_tool_hooks_swallow_panics() {
    exercise_tool_hooks(&SafeToolHooks::new(PanicToolHooks));
}

#[test]
fn safe_chat_hooks_swallow_panics() {
    exercise_chat_hooks(&SafeChatHooks::new(PanicChatHooks));
}
