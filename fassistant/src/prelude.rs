//! Common imports for applications built on the facade.

pub use crate::{
    ArgumentValue, Assistant, AssistantBuilder, ChatError, ChatErrorKind, ChatPolicy,
    ChatRuntimeHooks, ChatSession, ChatTurnRequest, ChatTurnResult, GenerationOptions, Message,
    ModelProvider, ModelRequest, ModelResponse, ObjectShape, ParameterShape, ProviderError,
    ProviderFuture, Role, SessionId, StopReason, ToolArguments, ToolCall, ToolDescriptor,
    ToolError, ToolErrorKind, ToolExecutionContext, ToolExecutionResult, ToolOutput,
    ToolRegistry, ToolRuntimeHooks, TypeShape,
};
pub use crate::fa_session;
