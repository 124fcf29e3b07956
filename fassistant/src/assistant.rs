//! Facade-owned builder for a ready-to-chat assistant.
//!
//! The tool registry is built exactly once, in [`AssistantBuilder::build`],
//! and shared read-only by every later [`Assistant::chat`] call.

use std::sync::Arc;

use crate::{
    ChatError, ChatPolicy, ChatRuntimeHooks, ChatService, ChatSession, ChatTurnRequest,
    ChatTurnResult, GenerationOptions, MetadataMap, ModelProvider, SafeChatHooks, SafeToolHooks,
    SessionId, ToolDescriptor, ToolRegistry, ToolRuntime, ToolRuntimeHooks,
    TracingObservabilityHooks,
};

pub const DEFAULT_SESSION_ID: &str = "default";

pub struct AssistantBuilder {
    provider: Arc<dyn ModelProvider>,
    model: String,
    session_id: SessionId,
    system_prompt: Option<String>,
    tools: Vec<ToolDescriptor>,
    policy: ChatPolicy,
    options: GenerationOptions,
    chat_hooks: Option<Arc<dyn ChatRuntimeHooks>>,
    tool_hooks: Option<Arc<dyn ToolRuntimeHooks>>,
}

impl AssistantBuilder {
    pub fn new(provider: Arc<dyn ModelProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            session_id: SessionId::new(DEFAULT_SESSION_ID),
            system_prompt: None,
            tools: Vec::new(),
            policy: ChatPolicy::default(),
            options: GenerationOptions::default(),
            chat_hooks: None,
            tool_hooks: None,
        }
    }

    pub fn session_id(mut self, session_id: impl Into<SessionId>) -> Self {
        self.session_id = session_id.into();
        self
    }

    pub fn system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(system_prompt.into());
        self
    }

    pub fn tool(mut self, tool: ToolDescriptor) -> Self {
        self.tools.push(tool);
        self
    }

    pub fn tools<I>(mut self, tools: I) -> Self
    where
        I: IntoIterator<Item = ToolDescriptor>,
    {
        self.tools.extend(tools);
        self
    }

    pub fn policy(mut self, policy: ChatPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn max_tool_rounds(mut self, max_tool_rounds: usize) -> Self {
        self.policy = self.policy.with_max_tool_rounds(max_tool_rounds);
        self
    }

    pub fn options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn chat_hooks(mut self, hooks: Arc<dyn ChatRuntimeHooks>) -> Self {
        self.chat_hooks = Some(hooks);
        self
    }

    pub fn tool_hooks(mut self, hooks: Arc<dyn ToolRuntimeHooks>) -> Self {
        self.tool_hooks = Some(hooks);
        self
    }

    /// Installs panic-safe tracing hooks on both the chat loop and the tool runtime.
    pub fn with_tracing(self) -> Self {
        self.chat_hooks(Arc::new(SafeChatHooks::new(TracingObservabilityHooks)))
            .tool_hooks(Arc::new(SafeToolHooks::new(TracingObservabilityHooks)))
    }

    /// Validates the policy and builds the tool registry.
    ///
    /// Registry failures surface as [`ChatErrorKind::Registry`](crate::ChatErrorKind)
    /// with the offending tool and the underlying
    /// [`ToolErrorKind`](crate::ToolErrorKind) (`DuplicateName`, `Schema`, ...).
    pub fn build(self) -> Result<Assistant, ChatError> {
        if self.model.trim().is_empty() {
            return Err(ChatError::invalid_request("model must not be empty"));
        }
        self.policy.validate()?;

        let registry = ToolRegistry::from_descriptors(self.tools).map_err(ChatError::registry)?;

        let mut tool_runtime = ToolRuntime::new(Arc::new(registry));
        if let Some(hooks) = self.tool_hooks {
            tool_runtime = tool_runtime.with_hooks(hooks);
        }

        let mut chat_builder = ChatService::builder(self.provider)
            .tool_runtime(tool_runtime)
            .policy(self.policy);
        if let Some(hooks) = self.chat_hooks {
            chat_builder = chat_builder.hooks(hooks);
        }

        let mut session = ChatSession::new(self.session_id, self.model);
        session.system_prompt = self.system_prompt;

        Ok(Assistant {
            chat: chat_builder.build(),
            session,
            options: self.options,
        })
    }
}

/// A provider, a model, and a fixed tool set, ready to answer user messages.
pub struct Assistant {
    chat: ChatService,
    session: ChatSession,
    options: GenerationOptions,
}

impl Assistant {
    pub fn builder(provider: Arc<dyn ModelProvider>, model: impl Into<String>) -> AssistantBuilder {
        AssistantBuilder::new(provider, model)
    }

    pub fn session(&self) -> &ChatSession {
        &self.session
    }

    pub fn registry(&self) -> Arc<ToolRegistry> {
        self.chat.tool_runtime().registry()
    }

    pub fn chat_service(&self) -> &ChatService {
        &self.chat
    }

    /// Runs one orchestration for `user_message` in the assistant's session.
    pub async fn chat(&self, user_message: impl Into<String>) -> Result<ChatTurnResult, ChatError> {
        self.chat_with_metadata(user_message, MetadataMap::new())
            .await
    }

    /// Like [`Assistant::chat`], forwarding `metadata` to the provider and the tool handlers.
    pub async fn chat_with_metadata(
        &self,
        user_message: impl Into<String>,
        metadata: MetadataMap,
    ) -> Result<ChatTurnResult, ChatError> {
        let mut request =
            ChatTurnRequest::new(self.session.clone(), user_message).with_options(self.options);
        request.metadata = metadata;
        self.chat.run_turn(request).await
    }

    /// Runs one orchestration under a caller-chosen session id.
    pub async fn chat_in_session(
        &self,
        session_id: impl Into<SessionId>,
        user_message: impl Into<String>,
    ) -> Result<ChatTurnResult, ChatError> {
        let session = ChatSession {
            id: session_id.into(),
            ..self.session.clone()
        };
        let request = ChatTurnRequest::new(session, user_message).with_options(self.options);
        self.chat.run_turn(request).await
    }
}

impl std::fmt::Debug for Assistant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Assistant")
            .field("session", &self.session)
            .field("options", &self.options)
            .field("policy", &self.chat.policy())
            .field("tools", &self.registry().names().collect::<Vec<_>>())
            .finish()
    }
}
