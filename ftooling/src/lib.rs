//! Capability layer for declaring, registering, and executing tools.
//!
//! A tool is declared once as a [`ToolDescriptor`]; the [`ToolRegistry`]
//! derives its JSON schema specification, and the [`ToolRuntime`] binds
//! model-supplied arguments and runs it.
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use fprovider::ToolCall;
//! use fschema::{ParameterShape, TypeShape};
//! use ftooling::prelude::*;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let registry = ToolRegistry::from_descriptors([ToolDescriptor::sync("add", |args, _| {
//!     Ok(ToolOutput::from(args.i64("arg0")? + args.i64("arg1")?))
//! })
//! .parameter(ParameterShape::new(TypeShape::i32()))
//! .parameter(ParameterShape::new(TypeShape::i32()))])
//! .expect("registry should build");
//!
//! let runtime = ToolRuntime::new(Arc::new(registry));
//! let execution = runtime
//!     .execute(
//!         ToolCall::new("call_1", "add", r#"{"arg0":37,"arg1":87}"#),
//!         ToolExecutionContext::new("session-1"),
//!     )
//!     .await
//!     .expect("execution should succeed");
//!
//! assert_eq!(execution.result.result, "124");
//! # }
//! ```

mod args;
mod error;
mod hooks;
mod registry;
mod runtime;
mod tool;
mod types;
mod value;

pub mod prelude {
    pub use crate::{
        ArgumentValue, DefaultToolInvoker, ToolArguments, ToolDescriptor, ToolError,
        ToolErrorKind, ToolExecution, ToolExecutionContext, ToolExecutionResult, ToolFuture,
        ToolInvoker, ToolOutput, ToolRegistry, ToolRuntime, ToolRuntimeHooks,
    };
}

pub use args::{bind_arguments, parse_json_object, parse_json_value};
pub use error::{ToolError, ToolErrorKind};
pub use hooks::{NoopToolRuntimeHooks, ToolRuntimeHooks};
pub use registry::{ToolEntry, ToolRegistry};
pub use runtime::{DefaultToolInvoker, ToolExecution, ToolInvoker, ToolRuntime};
pub use tool::{ToolDescriptor, ToolFuture};
pub use types::{ToolExecutionContext, ToolExecutionResult};
pub use value::{ArgumentValue, ToolArguments, ToolOutput};
