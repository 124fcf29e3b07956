//! Model collaborator contract.
//!
//! A provider receives the full conversation so far together with the tool
//! specifications and answers with text, tool calls, or both. Transports,
//! authentication, and retries live behind implementations of this trait.
//!
//! ```rust
//! use fprovider::{ModelProvider, ModelRequest, ModelResponse, ProviderError, ProviderFuture};
//!
//! struct Echo;
//!
//! impl ModelProvider for Echo {
//!     fn complete<'a>(
//!         &'a self,
//!         request: ModelRequest,
//!     ) -> ProviderFuture<'a, Result<ModelResponse, ProviderError>> {
//!         Box::pin(async move {
//!             let last = request.messages.last().map(|m| m.content.clone()).unwrap_or_default();
//!             Ok(ModelResponse::text(request.model, last))
//!         })
//!     }
//! }
//!
//! fn accepts_provider(_provider: &dyn ModelProvider) {}
//! accepts_provider(&Echo);
//! ```

use fcommon::BoxFuture;

use crate::{ModelRequest, ModelResponse, ProviderError};

pub type ProviderFuture<'a, T> = BoxFuture<'a, T>;

pub trait ModelProvider: Send + Sync {
    fn complete<'a>(
        &'a self,
        request: ModelRequest,
    ) -> ProviderFuture<'a, Result<ModelResponse, ProviderError>>;
}
