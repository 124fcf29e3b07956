//! Conversational orchestration over a model provider and a tool runtime.
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use fchat::prelude::*;
//! use fprovider::{ModelProvider, ModelRequest, ModelResponse, ProviderError, ProviderFuture};
//!
//! struct Canned;
//!
//! impl ModelProvider for Canned {
//!     fn complete<'a>(
//!         &'a self,
//!         request: ModelRequest,
//!     ) -> ProviderFuture<'a, Result<ModelResponse, ProviderError>> {
//!         Box::pin(async move { Ok(ModelResponse::text(request.model, "hi there")) })
//!     }
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let service = ChatService::builder(Arc::new(Canned)).max_tool_rounds(4).build();
//! let result = service
//!     .run_turn(ChatTurnRequest::new(ChatSession::new("s1", "test-model"), "hello"))
//!     .await
//!     .expect("turn should succeed");
//!
//! assert_eq!(result.content.as_deref(), Some("hi there"));
//! # }
//! ```

mod error;
mod hooks;
mod policy;
mod service;
mod types;

pub mod prelude {
    pub use crate::{
        ChatError, ChatErrorKind, ChatPhase, ChatPolicy, ChatRuntimeHooks, ChatService,
        ChatServiceBuilder, ChatSession, ChatTurnRequest, ChatTurnResult,
    };
    pub use fcommon::{MetadataMap, SessionId};
    pub use ftooling::{
        ToolDescriptor, ToolError, ToolErrorKind, ToolExecutionContext, ToolExecutionResult,
        ToolOutput, ToolRegistry, ToolRuntime,
    };
}

pub use error::{ChatError, ChatErrorKind};
pub use hooks::{ChatRuntimeHooks, NoopChatRuntimeHooks};
pub use policy::{ChatPolicy, DEFAULT_MAX_TOOL_ROUNDS};
pub use service::{ChatService, ChatServiceBuilder};
pub use types::{ChatPhase, ChatSession, ChatTurnRequest, ChatTurnResult};
