//! Chat session, turn, and phase types.

use fcommon::{GenerationOptions, MetadataMap, SessionId};
use fprovider::{Message, StopReason};
use ftooling::ToolExecutionResult;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatSession {
    pub id: SessionId,
    pub model: String,
    pub system_prompt: Option<String>,
}

impl ChatSession {
    pub fn new(id: impl Into<SessionId>, model: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            model: model.into(),
            system_prompt: None,
        }
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(system_prompt.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatTurnRequest {
    pub session: ChatSession,
    pub user_input: String,
    pub options: GenerationOptions,
    pub metadata: MetadataMap,
}

impl ChatTurnRequest {
    pub fn new(session: ChatSession, user_input: impl Into<String>) -> Self {
        Self {
            session,
            user_input: user_input.into(),
            options: GenerationOptions::default(),
            metadata: MetadataMap::new(),
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.options.temperature = Some(temperature);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.options.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }

    /// Forwarded on every model request and to every tool invocation.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// Where a chat call currently is in its round protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChatPhase {
    AwaitingModel,
    ExecutingTools,
    Terminal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTurnResult {
    pub session_id: SessionId,
    /// Final model text; `None` when the raw tool results were returned
    /// without a summarizing round.
    pub content: Option<String>,
    /// Every tool execution of the call, in round order then request order.
    pub tool_executions: Vec<ToolExecutionResult>,
    pub model_rounds: usize,
    pub messages: Vec<Message>,
    pub stop_reason: StopReason,
}

impl ChatTurnResult {
    pub fn is_raw(&self) -> bool {
        self.content.is_none()
    }

    pub fn tool_results(&self) -> Vec<&str> {
        self.tool_executions
            .iter()
            .map(|execution| execution.result.as_str())
            .collect()
    }
}
