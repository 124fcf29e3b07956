//! Tool runtime context and execution result types.

use fcommon::{MetadataMap, SessionId};
use fprovider::{Message, ToolCall};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolExecutionContext {
    pub session_id: SessionId,
    /// One-based tool round within the current chat call.
    pub round: usize,
    pub metadata: MetadataMap,
}

impl ToolExecutionContext {
    pub fn new(session_id: impl Into<SessionId>) -> Self {
        Self {
            session_id: session_id.into(),
            round: 1,
            metadata: MetadataMap::new(),
        }
    }

    pub fn with_round(mut self, round: usize) -> Self {
        self.round = round;
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// Outcome of one tool call: the originating request and the text handed back
/// to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolExecutionResult {
    pub request: ToolCall,
    pub result: String,
}

impl ToolExecutionResult {
    pub fn new(request: ToolCall, result: impl Into<String>) -> Self {
        Self {
            request,
            result: result.into(),
        }
    }

    pub fn tool_call_id(&self) -> &str {
        &self.request.id
    }

    pub fn tool_name(&self) -> &str {
        &self.request.name
    }

    pub fn into_message(self) -> Message {
        Message::tool_result(self.request.id, self.result)
    }
}
