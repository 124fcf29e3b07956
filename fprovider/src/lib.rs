//! Provider-agnostic model boundary: conversation messages, tool
//! specifications, requests, responses, and the provider trait.

mod error;
mod model;
mod provider;

pub mod prelude;

pub use error::{ProviderError, ProviderErrorKind};
pub use model::{
    Message, ModelRequest, ModelRequestBuilder, ModelResponse, OutputItem, Role, StopReason,
    ToolCall, ToolSpecification,
};
pub use provider::{ModelProvider, ProviderFuture};
