//! Tool descriptors: name, declared parameters, execution flags, and the
//! handler that runs the tool.
//!
//! ```rust
//! use fschema::{ParameterShape, TypeShape};
//! use ftooling::{ToolDescriptor, ToolOutput};
//!
//! let add = ToolDescriptor::sync("add", |args, _ctx| {
//!     Ok(ToolOutput::from(args.i64("arg0")? + args.i64("arg1")?))
//! })
//! .with_description("Adds two integers")
//! .parameter(ParameterShape::new(TypeShape::i32()))
//! .parameter(ParameterShape::new(TypeShape::i32()))
//! .return_raw(true);
//!
//! assert_eq!(add.name(), "add");
//! assert_eq!(add.parameters().len(), 2);
//! assert!(add.is_return_raw());
//! ```

use std::fmt::{Debug, Formatter};
use std::future::Future;
use std::sync::Arc;

use fcommon::BoxFuture;
use fschema::ParameterShape;

use crate::{ToolArguments, ToolError, ToolExecutionContext, ToolOutput};

pub type ToolFuture<'a, T> = BoxFuture<'a, T>;

pub(crate) type ToolHandler = dyn Fn(ToolArguments, ToolExecutionContext) -> ToolFuture<'static, Result<ToolOutput, ToolError>>
    + Send
    + Sync;

/// Declaration of one tool. Immutable once handed to a registry.
#[derive(Clone)]
pub struct ToolDescriptor {
    name: String,
    description: Option<String>,
    parameters: Vec<ParameterShape>,
    handler: Arc<ToolHandler>,
    return_raw: bool,
    propagate_errors: bool,
}

impl ToolDescriptor {
    pub fn new<F, Fut>(name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(ToolArguments, ToolExecutionContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<ToolOutput, ToolError>> + Send + 'static,
    {
        let handler: Arc<ToolHandler> =
            Arc::new(move |arguments, context| Box::pin(handler(arguments, context)));

        Self {
            name: name.into(),
            description: None,
            parameters: Vec::new(),
            handler,
            return_raw: false,
            propagate_errors: false,
        }
    }

    pub fn sync<F>(name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(ToolArguments, ToolExecutionContext) -> Result<ToolOutput, ToolError>
            + Send
            + Sync
            + 'static,
    {
        Self::new(name, move |arguments, context| {
            let output = handler(arguments, context);
            async move { output }
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn parameter(mut self, parameter: ParameterShape) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn parameters_from<I>(mut self, parameters: I) -> Self
    where
        I: IntoIterator<Item = ParameterShape>,
    {
        self.parameters.extend(parameters);
        self
    }

    /// When every tool executed in a chat call returns raw, the results are
    /// handed to the caller without a summarizing model round.
    pub fn return_raw(mut self, return_raw: bool) -> Self {
        self.return_raw = return_raw;
        self
    }

    /// Surface handler failures to the caller instead of reporting them to
    /// the model.
    pub fn propagate_errors(mut self, propagate_errors: bool) -> Self {
        self.propagate_errors = propagate_errors;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn parameters(&self) -> &[ParameterShape] {
        &self.parameters
    }

    pub fn is_return_raw(&self) -> bool {
        self.return_raw
    }

    pub fn is_propagate_errors(&self) -> bool {
        self.propagate_errors
    }

    pub(crate) fn handler(&self) -> Arc<ToolHandler> {
        Arc::clone(&self.handler)
    }
}

impl Debug for ToolDescriptor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolDescriptor")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("parameters", &self.parameters)
            .field("return_raw", &self.return_raw)
            .field("propagate_errors", &self.propagate_errors)
            .finish_non_exhaustive()
    }
}
