//! Chat service: drives the model/tool round protocol for one chat call.
//!
//! Each round sends the full history to the provider. A response without
//! tool calls ends the call. Otherwise every requested tool runs, results are
//! appended in request order, and the history goes back to the model, unless
//! every tool executed so far in the call returns raw, in which case the
//! results are handed straight back to the caller.

use std::sync::Arc;

use fprovider::{Message, ModelProvider, ModelRequest, Role, StopReason};
use ftooling::{ToolExecutionContext, ToolExecutionResult, ToolRegistry, ToolRuntime};

use crate::{
    ChatError, ChatPhase, ChatPolicy, ChatRuntimeHooks, ChatTurnRequest, ChatTurnResult,
    NoopChatRuntimeHooks,
};

#[derive(Clone)]
pub struct ChatService {
    provider: Arc<dyn ModelProvider>,
    tool_runtime: ToolRuntime,
    policy: ChatPolicy,
    hooks: Arc<dyn ChatRuntimeHooks>,
}

impl ChatService {
    pub fn new(provider: Arc<dyn ModelProvider>) -> Self {
        Self::builder(provider).build()
    }

    pub fn builder(provider: Arc<dyn ModelProvider>) -> ChatServiceBuilder {
        ChatServiceBuilder::new(provider)
    }

    pub fn policy(&self) -> ChatPolicy {
        self.policy
    }

    pub fn tool_runtime(&self) -> &ToolRuntime {
        &self.tool_runtime
    }

    pub async fn run_turn(&self, request: ChatTurnRequest) -> Result<ChatTurnResult, ChatError> {
        let session = request.session.clone();
        match self.drive(request).await {
            Ok(result) => {
                self.hooks.on_phase(&session, ChatPhase::Terminal);
                self.hooks.on_turn_complete(&session, &result);
                Ok(result)
            }
            Err(error) => {
                self.hooks.on_turn_failure(&session, &error);
                Err(error)
            }
        }
    }

    async fn drive(&self, request: ChatTurnRequest) -> Result<ChatTurnResult, ChatError> {
        if request.user_input.trim().is_empty() {
            return Err(ChatError::invalid_request("user_input must not be empty"));
        }
        self.policy.validate()?;

        let ChatTurnRequest {
            session,
            user_input,
            options,
            metadata,
        } = request;

        let mut messages = Vec::new();
        if let Some(system_prompt) = &session.system_prompt {
            messages.push(Message::new(Role::System, system_prompt.clone()));
        }
        messages.push(Message::new(Role::User, user_input));

        let tools = self.tool_runtime.specifications();
        let mut tool_executions = Vec::new();
        let mut model_rounds = 0;
        let mut tool_rounds = 0;
        let mut all_raw = true;

        loop {
            model_rounds += 1;
            self.hooks.on_phase(&session, ChatPhase::AwaitingModel);
            self.hooks.on_round_start(&session, model_rounds);

            let mut builder = ModelRequest::builder(session.model.clone())
                .messages(messages.clone())
                .options(options)
                .tools(tools.clone());
            for (key, value) in &metadata {
                builder = builder.metadata(key.clone(), value.clone());
            }
            let model_request = builder.build().map_err(|err| {
                ChatError::invalid_request(err.message).with_phase(ChatPhase::AwaitingModel)
            })?;

            let response = self.provider.complete(model_request).await?;
            self.hooks
                .on_model_response(&session, model_rounds, &response);

            let (text, tool_calls) = response.split_output();
            if tool_calls.is_empty() {
                messages.push(Message::new(Role::Assistant, text.clone()));
                return Ok(ChatTurnResult {
                    session_id: session.id.clone(),
                    content: Some(text),
                    tool_executions,
                    model_rounds,
                    messages,
                    stop_reason: response.stop_reason,
                });
            }

            if tool_rounds >= self.policy.max_tool_rounds {
                return Err(ChatError::max_rounds_exceeded(self.policy.max_tool_rounds)
                    .with_phase(ChatPhase::ExecutingTools));
            }
            tool_rounds += 1;

            self.hooks.on_phase(&session, ChatPhase::ExecutingTools);
            messages.push(Message::assistant_tool_calls(text, tool_calls.clone()));

            let mut context = ToolExecutionContext::new(session.id.clone()).with_round(tool_rounds);
            context.metadata = metadata.clone();

            let executions = self
                .tool_runtime
                .execute_round(tool_calls, &context, self.policy.parallel_tool_execution)
                .await?;

            all_raw &= executions.iter().all(|execution| execution.return_raw);
            let results: Vec<ToolExecutionResult> = executions
                .into_iter()
                .map(|execution| execution.result)
                .collect();
            self.hooks.on_tools_executed(&session, tool_rounds, &results);

            messages.extend(results.iter().cloned().map(ToolExecutionResult::into_message));
            tool_executions.extend(results);

            if all_raw {
                return Ok(ChatTurnResult {
                    session_id: session.id.clone(),
                    content: None,
                    tool_executions,
                    model_rounds,
                    messages,
                    stop_reason: StopReason::ToolUse,
                });
            }
        }
    }
}

pub struct ChatServiceBuilder {
    provider: Arc<dyn ModelProvider>,
    tool_runtime: Option<ToolRuntime>,
    policy: ChatPolicy,
    hooks: Arc<dyn ChatRuntimeHooks>,
}

impl ChatServiceBuilder {
    pub fn new(provider: Arc<dyn ModelProvider>) -> Self {
        Self {
            provider,
            tool_runtime: None,
            policy: ChatPolicy::default(),
            hooks: Arc::new(NoopChatRuntimeHooks),
        }
    }

    pub fn tool_runtime(mut self, tool_runtime: ToolRuntime) -> Self {
        self.tool_runtime = Some(tool_runtime);
        self
    }

    pub fn tool_registry(self, registry: Arc<ToolRegistry>) -> Self {
        self.tool_runtime(ToolRuntime::new(registry))
    }

    pub fn policy(mut self, policy: ChatPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn max_tool_rounds(mut self, max_tool_rounds: usize) -> Self {
        self.policy.max_tool_rounds = max_tool_rounds;
        self
    }

    pub fn parallel_tool_execution(mut self, parallel: bool) -> Self {
        self.policy.parallel_tool_execution = parallel;
        self
    }

    pub fn hooks(mut self, hooks: Arc<dyn ChatRuntimeHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn build(self) -> ChatService {
        ChatService {
            provider: self.provider,
            tool_runtime: self
                .tool_runtime
                .unwrap_or_else(|| ToolRuntime::new(Arc::new(ToolRegistry::new()))),
            policy: self.policy,
            hooks: self.hooks,
        }
    }
}
