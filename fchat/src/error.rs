//! Chat-layer errors and classification.
//!
//! ```rust
//! use fchat::{ChatError, ChatErrorKind, ChatPhase};
//!
//! let err = ChatError::max_rounds_exceeded(10).with_phase(ChatPhase::ExecutingTools);
//! assert_eq!(err.kind, ChatErrorKind::MaxRoundsExceeded);
//! assert!(err.to_string().starts_with("MaxRoundsExceeded [phase=ExecutingTools]"));
//! ```

use std::error::Error;
use std::fmt::{Display, Formatter};

use fprovider::ProviderError;
use ftooling::{ToolError, ToolErrorKind};

use crate::ChatPhase;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatErrorKind {
    InvalidRequest,
    Provider,
    /// A tool registered with `propagate_errors` failed.
    Tooling,
    /// The tool set was rejected while building the registry.
    Registry,
    MaxRoundsExceeded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatError {
    pub kind: ChatErrorKind,
    pub message: String,
    pub phase: Option<ChatPhase>,
    pub tool_name: Option<String>,
    pub tool_error_kind: Option<ToolErrorKind>,
}

impl ChatError {
    pub fn new(kind: ChatErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            phase: None,
            tool_name: None,
            tool_error_kind: None,
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ChatErrorKind::InvalidRequest, message)
    }

    pub fn provider(message: impl Into<String>) -> Self {
        Self::new(ChatErrorKind::Provider, message)
    }

    pub fn tooling(message: impl Into<String>) -> Self {
        Self::new(ChatErrorKind::Tooling, message)
    }

    /// Wraps a registration failure, keeping the tool and its error kind.
    pub fn registry(error: ToolError) -> Self {
        let mut registry = Self::new(ChatErrorKind::Registry, error.to_string());
        registry.tool_error_kind = Some(error.kind);
        registry.tool_name = error.tool_name;
        registry
    }

    pub fn max_rounds_exceeded(max_tool_rounds: usize) -> Self {
        Self::new(
            ChatErrorKind::MaxRoundsExceeded,
            format!("model kept requesting tools after {max_tool_rounds} tool rounds"),
        )
    }

    pub fn with_phase(mut self, phase: ChatPhase) -> Self {
        self.phase = Some(phase);
        self
    }

    pub fn with_tool_name(mut self, tool_name: impl Into<String>) -> Self {
        self.tool_name = Some(tool_name.into());
        self
    }

    pub fn is_user_error(&self) -> bool {
        self.kind == ChatErrorKind::InvalidRequest
    }
}

impl Display for ChatError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match (&self.phase, &self.tool_name) {
            (Some(phase), Some(tool_name)) => write!(
                f,
                "{:?} [phase={:?}, tool={}]: {}",
                self.kind, phase, tool_name, self.message
            ),
            (Some(phase), None) => write!(f, "{:?} [phase={:?}]: {}", self.kind, phase, self.message),
            _ => write!(f, "{:?}: {}", self.kind, self.message),
        }
    }
}

impl Error for ChatError {}

impl From<ProviderError> for ChatError {
    fn from(value: ProviderError) -> Self {
        ChatError::provider(value.to_string()).with_phase(ChatPhase::AwaitingModel)
    }
}

impl From<ToolError> for ChatError {
    fn from(value: ToolError) -> Self {
        let tool_name = value.tool_name.clone();
        let mut error =
            ChatError::tooling(value.to_string()).with_phase(ChatPhase::ExecutingTools);
        error.tool_error_kind = Some(value.kind);
        match tool_name {
            Some(tool_name) => error.with_tool_name(tool_name),
            None => error,
        }
    }
}
