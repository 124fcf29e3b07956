//! Unified facade over the fassistant workspace crates.
//!
//! Most applications only need this crate: it re-exports the schema, tooling,
//! provider, chat, and observability crates and adds the [`Assistant`]
//! builder plus session and turn helpers for driving a `ChatService` directly.
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use fassistant::prelude::*;
//!
//! struct Echo;
//!
//! impl ModelProvider for Echo {
//!     fn complete<'a>(
//!         &'a self,
//!         request: ModelRequest,
//!     ) -> ProviderFuture<'a, Result<ModelResponse, ProviderError>> {
//!         Box::pin(async move { Ok(ModelResponse::text(request.model, "pong")) })
//!     }
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let assistant = Assistant::builder(Arc::new(Echo), "test-model")
//!     .system_prompt("Answer briefly.")
//!     .build()
//!     .expect("assistant should build");
//!
//! let result = assistant.chat("ping").await.expect("chat should succeed");
//! assert_eq!(result.content.as_deref(), Some("pong"));
//! # }
//! ```

mod assistant;
mod macros;

pub mod prelude;
pub mod util;

pub use fchat;
pub use fcommon;
pub use fobserve;
pub use fprovider;
pub use fschema;
pub use ftooling;

pub use assistant::{Assistant, AssistantBuilder, DEFAULT_SESSION_ID};
pub use fchat::{
    ChatError, ChatErrorKind, ChatPhase, ChatPolicy, ChatRuntimeHooks, ChatService,
    ChatServiceBuilder, ChatSession, ChatTurnRequest, ChatTurnResult, NoopChatRuntimeHooks,
};
pub use fcommon::{BoxFuture, GenerationOptions, MetadataMap, SessionId};
pub use fobserve::{
    MetricsObservabilityHooks, SafeChatHooks, SafeToolHooks, TracingObservabilityHooks,
};
pub use fprovider::{
    Message, ModelProvider, ModelRequest, ModelRequestBuilder, ModelResponse, OutputItem,
    ProviderError, ProviderErrorKind, ProviderFuture, Role, StopReason, ToolCall,
    ToolSpecification,
};
pub use fschema::{
    EnumShape, FieldShape, GeneratedSchema, JsonSchemaElement, ObjectShape, ParameterShape,
    SchemaError, SchemaErrorKind, SchemaGenerator, TypeShape,
};
pub use ftooling::{
    ArgumentValue, NoopToolRuntimeHooks, ToolArguments, ToolDescriptor, ToolError,
    ToolErrorKind, ToolExecutionContext, ToolExecutionResult, ToolFuture, ToolOutput,
    ToolRegistry, ToolRuntime, ToolRuntimeHooks,
};

pub use util::{session, turn};
