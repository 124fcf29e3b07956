//! Provider-agnostic request, response, message, and tool specification types.
//!
//! ```rust
//! use fprovider::{Message, ModelRequest, ProviderErrorKind, Role};
//!
//! let ok = ModelRequest::new_validated(
//!     "gpt-4o-mini",
//!     vec![Message::new(Role::User, "How much is 37 plus 87?")],
//! );
//! assert!(ok.is_ok());
//!
//! let err = ModelRequest::new_validated("", vec![Message::new(Role::User, "hi")])
//!     .err()
//!     .expect("empty model should fail");
//! assert_eq!(err.kind, ProviderErrorKind::InvalidRequest);
//! ```

use std::collections::BTreeMap;

use fcommon::{GenerationOptions, MetadataMap};
use fschema::{GeneratedSchema, JsonSchemaElement};
use serde::Serialize;
use serde_json::Value;

use crate::ProviderError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    System,
    User,
    Assistant,
    Tool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub content: String,
    /// Tool calls issued by an assistant message.
    pub tool_calls: Vec<ToolCall>,
    /// The call a tool message answers.
    pub tool_call_id: Option<String>,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            tool_calls: Vec::new(),
            tool_call_id: None,
        }
    }

    pub fn assistant_tool_calls(content: impl Into<String>, tool_calls: Vec<ToolCall>) -> Self {
        Self {
            tool_calls,
            ..Self::new(Role::Assistant, content)
        }
    }

    pub fn tool_result(tool_call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            tool_call_id: Some(tool_call_id.into()),
            ..Self::new(Role::Tool, content)
        }
    }
}

/// A tool execution request issued by the model. `arguments` is the raw JSON
/// text exactly as the model produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    pub arguments: String,
}

impl ToolCall {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        arguments: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            arguments: arguments.into(),
        }
    }
}

/// Schema-level description of a tool as sent to the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolSpecification {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<JsonSchemaElement>,
    #[serde(rename = "$defs", skip_serializing_if = "BTreeMap::is_empty")]
    pub definitions: BTreeMap<String, JsonSchemaElement>,
}

impl ToolSpecification {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            parameters: None,
            definitions: BTreeMap::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_parameters(mut self, generated: GeneratedSchema) -> Self {
        self.parameters = Some(generated.schema);
        self.definitions = generated.definitions;
        self
    }

    /// Parameters schema as a standalone JSON schema document, with
    /// definitions inlined under `$defs` when present.
    pub fn parameters_json(&self) -> Option<Value> {
        let mut schema = self.parameters.as_ref()?.to_json();
        if !self.definitions.is_empty() {
            schema["$defs"] = serde_json::to_value(&self.definitions).ok()?;
        }
        Some(schema)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputItem {
    Message(Message),
    ToolCall(ToolCall),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    EndTurn,
    MaxTokens,
    ToolUse,
    Cancelled,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelResponse {
    pub model: String,
    pub output: Vec<OutputItem>,
    pub stop_reason: StopReason,
}

impl ModelResponse {
    pub fn text(model: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            output: vec![OutputItem::Message(Message::new(Role::Assistant, content))],
            stop_reason: StopReason::EndTurn,
        }
    }

    pub fn tool_calls(model: impl Into<String>, calls: Vec<ToolCall>) -> Self {
        Self {
            model: model.into(),
            output: calls.into_iter().map(OutputItem::ToolCall).collect(),
            stop_reason: StopReason::ToolUse,
        }
    }

    /// Concatenated assistant text and the tool calls, in output order.
    pub fn split_output(&self) -> (String, Vec<ToolCall>) {
        let mut text = String::new();
        let mut tool_calls = Vec::new();

        for item in &self.output {
            match item {
                OutputItem::Message(message) => {
                    if message.role == Role::Assistant {
                        text.push_str(&message.content);
                    }
                }
                OutputItem::ToolCall(call) => tool_calls.push(call.clone()),
            }
        }

        (text, tool_calls)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModelRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub options: GenerationOptions,
    pub tools: Vec<ToolSpecification>,
    pub metadata: MetadataMap,
}

impl ModelRequest {
    pub fn builder(model: impl Into<String>) -> ModelRequestBuilder {
        ModelRequestBuilder::new(model)
    }

    pub fn new(model: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            model: model.into(),
            messages,
            options: GenerationOptions::default(),
            tools: Vec::new(),
            metadata: MetadataMap::new(),
        }
    }

    pub fn new_validated(
        model: impl Into<String>,
        messages: Vec<Message>,
    ) -> Result<Self, ProviderError> {
        let request = Self::new(model, messages);
        request.validate()?;
        Ok(request)
    }

    pub fn with_tools(mut self, tools: Vec<ToolSpecification>) -> Self {
        self.tools = tools;
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn validate(&self) -> Result<(), ProviderError> {
        if self.model.trim().is_empty() {
            return Err(ProviderError::invalid_request("model must not be empty"));
        }

        if self.messages.is_empty() {
            return Err(ProviderError::invalid_request(
                "at least one message is required",
            ));
        }

        if let Some(max_tokens) = self.options.max_tokens
            && max_tokens == 0
        {
            return Err(ProviderError::invalid_request(
                "max_tokens must be greater than zero",
            ));
        }

        if let Some(temperature) = self.options.temperature
            && !(0.0..=2.0).contains(&temperature)
        {
            return Err(ProviderError::invalid_request(
                "temperature must be in the inclusive range 0.0..=2.0",
            ));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModelRequestBuilder {
    model: String,
    messages: Vec<Message>,
    options: GenerationOptions,
    tools: Vec<ToolSpecification>,
    metadata: MetadataMap,
}

impl ModelRequestBuilder {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            messages: Vec::new(),
            options: GenerationOptions::default(),
            tools: Vec::new(),
            metadata: MetadataMap::new(),
        }
    }

    pub fn message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    pub fn messages(mut self, messages: Vec<Message>) -> Self {
        self.messages.extend(messages);
        self
    }

    pub fn options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.options.temperature = Some(temperature);
        self
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.options.max_tokens = Some(max_tokens);
        self
    }

    pub fn tools(mut self, tools: Vec<ToolSpecification>) -> Self {
        self.tools = tools;
        self
    }

    pub fn metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn build(self) -> Result<ModelRequest, ProviderError> {
        let request = ModelRequest {
            model: self.model,
            messages: self.messages,
            options: self.options,
            tools: self.tools,
            metadata: self.metadata,
        };

        request.validate()?;
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use fschema::{ParameterShape, TypeShape, generate_parameters};
    use serde_json::json;

    use super::*;

    #[test]
    fn builder_rejects_out_of_range_options() {
        let error = ModelRequest::builder("gpt-4o-mini")
            .message(Message::new(Role::User, "hi"))
            .temperature(3.5)
            .build()
            .expect_err("temperature should be rejected");
        assert_eq!(error.kind, crate::ProviderErrorKind::InvalidRequest);

        let error = ModelRequest::builder("gpt-4o-mini")
            .message(Message::new(Role::User, "hi"))
            .max_tokens(0)
            .build()
            .expect_err("max_tokens should be rejected");
        assert!(error.message.contains("max_tokens"));
    }

    #[test]
    fn split_output_separates_text_and_tool_calls() {
        let response = ModelResponse {
            model: "m".to_string(),
            output: vec![
                OutputItem::Message(Message::new(Role::Assistant, "thinking")),
                OutputItem::ToolCall(ToolCall::new("call_1", "add", "{}")),
                OutputItem::ToolCall(ToolCall::new("call_2", "add", "{}")),
            ],
            stop_reason: StopReason::ToolUse,
        };

        let (text, calls) = response.split_output();
        assert_eq!(text, "thinking");
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1].id, "call_2");
    }

    #[test]
    fn specification_serializes_without_absent_parts() {
        let bare = ToolSpecification::new("currentTime");
        assert_eq!(
            serde_json::to_value(&bare).expect("serialize"),
            json!({"name": "currentTime"})
        );
        assert_eq!(bare.parameters_json(), None);

        let generated = generate_parameters(&[ParameterShape::new(TypeShape::i32())])
            .expect("describable")
            .expect("one parameter");
        let add = ToolSpecification::new("add")
            .with_description("adds numbers")
            .with_parameters(generated);

        assert_eq!(
            serde_json::to_value(&add).expect("serialize"),
            json!({
                "name": "add",
                "description": "adds numbers",
                "parameters": {
                    "type": "object",
                    "properties": {"arg0": {"type": "integer"}},
                    "required": ["arg0"]
                }
            })
        );
    }
}
