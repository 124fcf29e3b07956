use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use fassistant::prelude::*;
use fassistant::{ChatPhase, MetadataMap, turn};

#[derive(Debug, Default)]
struct ScriptedProvider {
    script: Mutex<VecDeque<ModelResponse>>,
    requests: Mutex<Vec<ModelRequest>>,
}

impl ScriptedProvider {
    fn new(script: Vec<ModelResponse>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn requests(&self) -> Vec<ModelRequest> {
        self.requests.lock().expect("requests lock").clone()
    }
}

impl ModelProvider for ScriptedProvider {
    fn complete<'a>(
        &'a self,
        request: ModelRequest,
    ) -> ProviderFuture<'a, Result<ModelResponse, ProviderError>> {
        Box::pin(async move {
            self.requests
                .lock()
                .expect("requests lock")
                .push(request.clone());
            self.script
                .lock()
                .expect("script lock")
                .pop_front()
                .ok_or_else(|| ProviderError::invalid_response("script exhausted"))
        })
    }
}

fn add() -> ToolDescriptor {
    ToolDescriptor::sync("add", |args, _ctx| {
        Ok(ToolOutput::from(args.i64("arg0")? + args.i64("arg1")?))
    })
    .with_description("Adds two integers")
    .parameter(ParameterShape::new(TypeShape::i32()))
    .parameter(ParameterShape::new(TypeShape::i32()))
}

fn person_shape() -> TypeShape {
    TypeShape::object(
        ObjectShape::new("Person")
            .field("name", TypeShape::String)
            .field("age", TypeShape::i32()),
    )
}

fn greet() -> ToolDescriptor {
    ToolDescriptor::sync("greet", |args, _ctx| {
        let person = args.value("arg0")?;
        let name = person
            .field("name")
            .and_then(ArgumentValue::as_str)
            .unwrap_or("stranger");
        let age = person.field("age").and_then(ArgumentValue::as_i64).unwrap_or(0);
        Ok(ToolOutput::from(format!("Hello {name}, age {age}")))
    })
    .parameter(ParameterShape::new(person_shape()))
    .return_raw(true)
}

#[tokio::test]
async fn assistant_summarizes_tool_results() {
    let provider = ScriptedProvider::new(vec![
        ModelResponse::tool_calls(
            "test-model",
            vec![ToolCall::new("c1", "add", r#"{"arg0":37,"arg1":87}"#)],
        ),
        ModelResponse::text("test-model", "The answer is 124"),
    ]);

    let assistant = Assistant::builder(provider.clone(), "test-model")
        .system_prompt("You are a calculator.")
        .tool(add())
        .build()
        .expect("assistant should build");

    let result = assistant
        .chat("How much is 37 plus 87?")
        .await
        .expect("chat should succeed");

    assert_eq!(result.content.as_deref(), Some("The answer is 124"));
    assert_eq!(result.tool_results(), vec!["124"]);
    assert_eq!(result.model_rounds, 2);

    let requests = provider.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].messages[0].role, Role::System);
    assert_eq!(requests[0].tools.len(), 1);
    assert_eq!(requests[0].tools[0].name, "add");
}

#[tokio::test]
async fn assistant_returns_raw_record_arguments_bound_from_json() {
    let provider = ScriptedProvider::new(vec![ModelResponse::tool_calls(
        "test-model",
        vec![ToolCall::new(
            "c1",
            "greet",
            r#"{"arg0":{"name":"Kate","age":31}}"#,
        )],
    )]);

    let assistant = Assistant::builder(provider.clone(), "test-model")
        .tool(greet())
        .build()
        .expect("assistant should build");

    let result = assistant.chat("Greet Kate").await.expect("chat should succeed");

    assert_eq!(result.content, None);
    assert!(result.is_raw());
    assert_eq!(result.tool_results(), vec!["Hello Kate, age 31"]);
    assert_eq!(provider.requests().len(), 1);
}

#[tokio::test]
async fn assistant_forwards_session_and_metadata_to_tool_handlers() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let recorder = Arc::clone(&seen);
    let whoami = ToolDescriptor::sync("whoami", move |_args, ctx| {
        let tenant = ctx.metadata.get("tenant").cloned().unwrap_or_default();
        recorder
            .lock()
            .expect("seen lock")
            .push((ctx.session_id.to_string(), tenant, ctx.round));
        Ok(ToolOutput::from("ok"))
    })
    .return_raw(true);

    let provider = ScriptedProvider::new(vec![
        ModelResponse::tool_calls("test-model", vec![ToolCall::new("c1", "whoami", "")]),
        ModelResponse::tool_calls("test-model", vec![ToolCall::new("c2", "whoami", "null")]),
    ]);
    let assistant = Assistant::builder(provider, "test-model")
        .session_id("main")
        .tool(whoami)
        .build()
        .expect("assistant should build");

    let mut metadata = MetadataMap::new();
    metadata.insert("tenant".to_string(), "acme".to_string());
    assistant
        .chat_with_metadata("who am I?", metadata)
        .await
        .expect("first chat should succeed");
    assistant
        .chat_in_session("side", "and now?")
        .await
        .expect("second chat should succeed");

    assert_eq!(
        *seen.lock().expect("seen lock"),
        vec![
            ("main".to_string(), "acme".to_string(), 1),
            ("side".to_string(), String::new(), 1),
        ]
    );
}

#[tokio::test]
async fn assistant_applies_generation_options_to_every_request() {
    let provider = ScriptedProvider::new(vec![ModelResponse::text("test-model", "hi")]);
    let assistant = Assistant::builder(provider.clone(), "test-model")
        .options(GenerationOptions::default().with_temperature(0.1).with_max_tokens(64))
        .build()
        .expect("assistant should build");

    assistant.chat("hello").await.expect("chat should succeed");

    let requests = provider.requests();
    assert_eq!(requests[0].options.temperature, Some(0.1));
    assert_eq!(requests[0].options.max_tokens, Some(64));
}

#[tokio::test]
async fn assistant_enforces_round_limit_from_builder() {
    let provider = ScriptedProvider::new(vec![
        ModelResponse::tool_calls(
            "test-model",
            vec![ToolCall::new("c1", "add", r#"{"arg0":1,"arg1":1}"#)],
        ),
        ModelResponse::tool_calls(
            "test-model",
            vec![ToolCall::new("c2", "add", r#"{"arg0":2,"arg1":2}"#)],
        ),
    ]);
    let assistant = Assistant::builder(provider.clone(), "test-model")
        .tool(add())
        .max_tool_rounds(1)
        .build()
        .expect("assistant should build");

    let error = assistant
        .chat("keep adding")
        .await
        .expect_err("second tool round should be refused");

    assert_eq!(error.kind, ChatErrorKind::MaxRoundsExceeded);
    assert_eq!(provider.requests().len(), 2);
}

#[derive(Default)]
struct RecordingChatHooks {
    phases: Mutex<Vec<ChatPhase>>,
}

impl ChatRuntimeHooks for RecordingChatHooks {
    fn on_phase(&self, _session: &ChatSession, phase: ChatPhase) {
        self.phases.lock().expect("phases lock").push(phase);
    }
}

#[derive(Default)]
struct CountingToolHooks {
    starts: Mutex<usize>,
}

impl ToolRuntimeHooks for CountingToolHooks {
    fn on_execution_start(&self, _tool_call: &ToolCall, _context: &ToolExecutionContext) {
        *self.starts.lock().expect("starts lock") += 1;
    }
}

#[tokio::test]
async fn assistant_wires_chat_and_tool_hooks() {
    let provider = ScriptedProvider::new(vec![
        ModelResponse::tool_calls(
            "test-model",
            vec![
                ToolCall::new("c1", "add", r#"{"arg0":1,"arg1":2}"#),
                ToolCall::new("c2", "add", r#"{"arg0":3,"arg1":4}"#),
            ],
        ),
        ModelResponse::text("test-model", "3 and 7"),
    ]);
    let chat_hooks = Arc::new(RecordingChatHooks::default());
    let tool_hooks = Arc::new(CountingToolHooks::default());

    let assistant = Assistant::builder(provider, "test-model")
        .tool(add())
        .chat_hooks(chat_hooks.clone())
        .tool_hooks(tool_hooks.clone())
        .build()
        .expect("assistant should build");

    assistant.chat("add twice").await.expect("chat should succeed");

    assert_eq!(*tool_hooks.starts.lock().expect("starts lock"), 2);
    assert_eq!(
        *chat_hooks.phases.lock().expect("phases lock"),
        vec![
            ChatPhase::AwaitingModel,
            ChatPhase::ExecutingTools,
            ChatPhase::AwaitingModel,
            ChatPhase::Terminal,
        ]
    );
}

#[tokio::test]
async fn assistant_with_tracing_runs_the_same_loop() {
    let provider = ScriptedProvider::new(vec![
        ModelResponse::tool_calls("test-model", vec![ToolCall::new("c1", "divide", "{}")]),
        ModelResponse::text("test-model", "I cannot divide"),
    ]);
    let assistant = Assistant::builder(provider.clone(), "test-model")
        .tool(add())
        .with_tracing()
        .build()
        .expect("assistant should build");

    let result = assistant.chat("divide 4 by 2").await.expect("chat should succeed");

    assert_eq!(result.content.as_deref(), Some("I cannot divide"));
    assert_eq!(result.tool_results(), vec!["There is no tool called 'divide'"]);
    assert_eq!(provider.requests().len(), 2);
}

#[tokio::test]
async fn chat_service_runs_turns_built_from_facade_helpers() {
    let provider = ScriptedProvider::new(vec![
        ModelResponse::tool_calls(
            "test-model",
            vec![ToolCall::new("c1", "add", r#"{"arg0":2,"arg1":3}"#)],
        ),
        ModelResponse::text("test-model", "It is 5"),
    ]);
    let assistant = Assistant::builder(provider.clone(), "test-model")
        .tool(add())
        .build()
        .expect("assistant should build");

    let request = turn(fa_session!("side-session", "other-model", "Be terse."), "2 plus 3?")
        .with_temperature(0.3);
    let result = assistant
        .chat_service()
        .run_turn(request)
        .await
        .expect("turn should succeed");

    assert_eq!(result.session_id.as_str(), "side-session");
    assert_eq!(result.content.as_deref(), Some("It is 5"));

    let requests = provider.requests();
    assert_eq!(requests[0].model, "other-model");
    assert_eq!(requests[0].messages[0].content, "Be terse.");
    assert_eq!(requests[1].options.temperature, Some(0.3));
}

#[test]
fn build_reports_duplicate_names_and_unsupported_types_as_distinct_kinds() {
    let provider = ScriptedProvider::new(Vec::new());

    let duplicate = Assistant::builder(provider.clone(), "test-model")
        .tool(add())
        .tool(add())
        .build()
        .expect_err("duplicate tool should be rejected");
    let unsupported = Assistant::builder(provider, "test-model")
        .tool(add().parameter(ParameterShape::new(TypeShape::map(TypeShape::opaque(
            "java.time.LocalTime",
        )))))
        .build()
        .expect_err("unbindable map value should be rejected");

    assert_eq!(duplicate.kind, ChatErrorKind::Registry);
    assert_eq!(unsupported.kind, ChatErrorKind::Registry);
    assert_eq!(duplicate.tool_error_kind, Some(ToolErrorKind::DuplicateName));
    assert_eq!(unsupported.tool_error_kind, Some(ToolErrorKind::Schema));
}
