use std::sync::Mutex;

use fprovider::prelude::*;

fn trailing_tool_results(request: &ModelRequest) -> Vec<&Message> {
    let mut results = request
        .messages
        .iter()
        .rev()
        .take_while(|message| message.role == Role::Tool)
        .collect::<Vec<_>>();
    results.reverse();
    results
}

#[derive(Debug, Default)]
struct CalculatorProvider {
    requests: Mutex<Vec<ModelRequest>>,
}

impl ModelProvider for CalculatorProvider {
    fn complete<'a>(
        &'a self,
        request: ModelRequest,
    ) -> ProviderFuture<'a, Result<ModelResponse, ProviderError>> {
        Box::pin(async move {
            request.validate()?;
            self.requests
                .lock()
                .expect("requests lock")
                .push(request.clone());

            let results = trailing_tool_results(&request);
            if results.is_empty() {
                return Ok(ModelResponse::tool_calls(
                    request.model,
                    vec![ToolCall::new("call_1", "add", "{\"arg0\":37,\"arg1\":87}")],
                ));
            }

            Ok(ModelResponse::text(
                request.model.clone(),
                format!("The answer is {}", results[0].content),
            ))
        })
    }
}

#[tokio::test]
async fn provider_sees_tool_results_in_follow_up_request() {
    let provider = CalculatorProvider::default();
    let user = Message::new(Role::User, "How much is 37 plus 87?");

    let first = provider
        .complete(
            ModelRequest::builder("test-model")
                .message(user.clone())
                .tools(vec![ToolSpecification::new("add")])
                .build()
                .expect("request should validate"),
        )
        .await
        .expect("first round");
    let (text, calls) = first.split_output();
    assert!(text.is_empty());
    assert_eq!(first.stop_reason, StopReason::ToolUse);

    let second = provider
        .complete(ModelRequest::new(
            "test-model",
            vec![
                user,
                Message::assistant_tool_calls(text, calls.clone()),
                Message::tool_result(calls[0].id.clone(), "124"),
            ],
        ))
        .await
        .expect("second round");

    assert_eq!(second.split_output().0, "The answer is 124");
    assert_eq!(provider.requests.lock().expect("requests lock").len(), 2);
}

#[tokio::test]
async fn provider_rejects_invalid_request() {
    let provider = CalculatorProvider::default();

    let error = provider
        .complete(ModelRequest::new("test-model", Vec::new()))
        .await
        .expect_err("empty history should be rejected");

    assert_eq!(error.kind, ProviderErrorKind::InvalidRequest);
    assert!(provider.requests.lock().expect("requests lock").is_empty());
}
