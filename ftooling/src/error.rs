//! Tool registration and execution errors and classifications.

use std::error::Error;
use std::fmt::{Display, Formatter};

use fschema::SchemaError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolErrorKind {
    /// No tool is registered under the requested name.
    NotFound,
    /// The arguments text is not a JSON object.
    InvalidArguments,
    ArgumentCoercion,
    MissingField,
    /// The tool body itself failed.
    Execution,
    DuplicateName,
    InvalidDefinition,
    Schema,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolError {
    pub kind: ToolErrorKind,
    pub message: String,
    pub tool_name: Option<String>,
    pub tool_call_id: Option<String>,
}

impl ToolError {
    pub fn new(kind: ToolErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            tool_name: None,
            tool_call_id: None,
        }
    }

    pub fn not_found(tool_name: impl Into<String>) -> Self {
        let tool_name = tool_name.into();
        Self::new(
            ToolErrorKind::NotFound,
            format!("There is no tool called '{tool_name}'"),
        )
        .with_tool_name(tool_name)
    }

    pub fn invalid_arguments(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::InvalidArguments, message)
    }

    pub fn coercion(path: &str, message: impl Display) -> Self {
        Self::new(
            ToolErrorKind::ArgumentCoercion,
            format!("argument '{path}': {message}"),
        )
    }

    pub fn missing_field(path: &str) -> Self {
        Self::new(
            ToolErrorKind::MissingField,
            format!("missing required field '{path}'"),
        )
    }

    pub fn execution(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::Execution, message)
    }

    pub fn duplicate_name(tool_name: impl Into<String>) -> Self {
        let tool_name = tool_name.into();
        Self::new(
            ToolErrorKind::DuplicateName,
            format!("a tool named '{tool_name}' is already registered"),
        )
        .with_tool_name(tool_name)
    }

    pub fn invalid_definition(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::InvalidDefinition, message)
    }

    pub fn with_tool_name(mut self, tool_name: impl Into<String>) -> Self {
        self.tool_name = Some(tool_name.into());
        self
    }

    pub fn with_tool_call_id(mut self, tool_call_id: impl Into<String>) -> Self {
        self.tool_call_id = Some(tool_call_id.into());
        self
    }

    /// Errors caused by what the model sent rather than by the tool body.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self.kind,
            ToolErrorKind::NotFound
                | ToolErrorKind::InvalidArguments
                | ToolErrorKind::ArgumentCoercion
                | ToolErrorKind::MissingField
        )
    }

    /// Errors raised while building a registry.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self.kind,
            ToolErrorKind::DuplicateName | ToolErrorKind::InvalidDefinition | ToolErrorKind::Schema
        )
    }
}

impl Display for ToolError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match (&self.tool_name, &self.tool_call_id) {
            (Some(tool_name), Some(tool_call_id)) => write!(
                f,
                "{:?} [tool={}, call_id={}]: {}",
                self.kind, tool_name, tool_call_id, self.message
            ),
            (Some(tool_name), None) => {
                write!(f, "{:?} [tool={}]: {}", self.kind, tool_name, self.message)
            }
            _ => write!(f, "{:?}: {}", self.kind, self.message),
        }
    }
}

impl Error for ToolError {}

impl From<SchemaError> for ToolError {
    fn from(value: SchemaError) -> Self {
        ToolError::new(ToolErrorKind::Schema, value.to_string())
    }
}
