//! Common `fprovider` imports for downstream crates.

pub use crate::{
    Message, ModelProvider, ModelRequest, ModelRequestBuilder, ModelResponse, OutputItem,
    ProviderError, ProviderErrorKind, ProviderFuture, Role, StopReason, ToolCall,
    ToolSpecification,
};
pub use fcommon::{BoxFuture, MetadataMap};
