//! Lifecycle hooks for chat calls.
//!
//! ```rust
//! use fchat::{ChatRuntimeHooks, NoopChatRuntimeHooks};
//!
//! fn assert_hooks_trait(_hooks: &dyn ChatRuntimeHooks) {}
//!
//! assert_hooks_trait(&NoopChatRuntimeHooks);
//! ```

use fprovider::ModelResponse;
use ftooling::ToolExecutionResult;

use crate::{ChatError, ChatPhase, ChatSession, ChatTurnResult};

pub trait ChatRuntimeHooks: Send + Sync {
    fn on_phase(&self, _session: &ChatSession, _phase: ChatPhase) {}

    /// `round` counts model requests, starting at one.
    fn on_round_start(&self, _session: &ChatSession, _round: usize) {}

    fn on_model_response(&self, _session: &ChatSession, _round: usize, _response: &ModelResponse) {
    }

    fn on_tools_executed(
        &self,
        _session: &ChatSession,
        _round: usize,
        _results: &[ToolExecutionResult],
    ) {
    }

    fn on_turn_complete(&self, _session: &ChatSession, _result: &ChatTurnResult) {}

    fn on_turn_failure(&self, _session: &ChatSession, _error: &ChatError) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopChatRuntimeHooks;

impl ChatRuntimeHooks for NoopChatRuntimeHooks {}
