//! Tests for resource creation from templates: producer invocation, context
//! injection, and error wrapping.

use schemars::JsonSchema;
use serde::Deserialize;
use solidres::{ResourceError, ResourceTemplate, TemplateOptions};
use std::sync::{
    atomic::{AtomicU32, Ordering},
    Arc,
};
use tokio::sync::mpsc;

// Live, non-serializable context: holds a channel sender and a counter.
struct TestContext {
    label: String,
    events: mpsc::UnboundedSender<String>,
    producer_calls: AtomicU32,
}

impl TestContext {
    fn new(label: &str) -> (Arc<Self>, mpsc::UnboundedReceiver<String>) {
        let (events, rx) = mpsc::unbounded_channel();
        (
            Arc::new(Self {
                label: label.to_string(),
                events,
                producer_calls: AtomicU32::new(0),
            }),
            rx,
        )
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
struct GreetInput {
    user: String,
}

fn greeting_template() -> ResourceTemplate<TestContext> {
    ResourceTemplate::from_function(
        |input: GreetInput, ctx: Option<Arc<TestContext>>| async move {
            if let Some(ctx) = &ctx {
                ctx.producer_calls.fetch_add(1, Ordering::SeqCst);
                ctx.events.send(format!("greeted {}", input.user)).ok();
            }
            Ok(format!("hello, {}", input.user))
        },
        "greet://{user}",
        TemplateOptions {
            name: Some("greeting".to_string()),
            description: Some("Greets a user by name".to_string()),
            ..Default::default()
        },
    )
    .unwrap()
}

#[tokio::test]
async fn create_resource_produces_readable_resource() {
    let template = greeting_template();
    let uri = "greet://ada";
    let params = template.matches(uri).unwrap();

    let resource = template.create_resource(uri, &params, None).await.unwrap();

    assert_eq!(resource.uri(), uri);
    assert_eq!(resource.name(), "greeting");
    assert_eq!(resource.description(), Some("Greets a user by name"));
    assert_eq!(resource.mime_type(), "text/plain");

    let contents = resource.read(None).await.unwrap();
    assert_eq!(contents.as_text(), Some("hello, ada"));
}

#[tokio::test]
async fn producer_runs_once_per_create_not_per_read() {
    let template = greeting_template();
    let (ctx, _rx) = TestContext::new("counting");
    let params = template.matches("greet://bob").unwrap();

    let resource = template
        .create_resource("greet://bob", &params, Some(Arc::clone(&ctx)))
        .await
        .unwrap();
    assert_eq!(ctx.producer_calls.load(Ordering::SeqCst), 1);

    // Repeated reads return the captured value without re-invoking.
    for _ in 0..3 {
        let contents = resource.read(None).await.unwrap();
        assert_eq!(contents.as_text(), Some("hello, bob"));
    }
    assert_eq!(ctx.producer_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn context_never_appears_in_parameters_schema() {
    let template = greeting_template();
    let schema = template.parameters();

    let properties = schema["properties"].as_object().unwrap();
    assert!(properties.contains_key("user"));
    assert!(!properties.contains_key("ctx"));
    assert!(!properties.contains_key("context"));
    assert_eq!(properties.len(), 1);
}

#[tokio::test]
async fn opaque_context_flows_through_untouched() {
    let template = greeting_template();
    let (ctx, mut rx) = TestContext::new("live");
    let params = template.matches("greet://eve").unwrap();

    // A context holding an open channel is not serializable; creation must
    // still succeed because it bypasses schema validation entirely.
    template
        .create_resource("greet://eve", &params, Some(Arc::clone(&ctx)))
        .await
        .unwrap();

    assert_eq!(rx.recv().await.unwrap(), "greeted eve");
    assert_eq!(ctx.label, "live");
}

#[tokio::test]
async fn producer_failure_wraps_into_creation_error() {
    let template: ResourceTemplate<()> = ResourceTemplate::from_function(
        |input: GreetInput, _ctx| async move {
            if input.user == "nobody" {
                anyhow::bail!("no such user: nobody");
            }
            Ok(input.user)
        },
        "greet://{user}",
        TemplateOptions::named("failing"),
    )
    .unwrap();

    let params = template.matches("greet://nobody").unwrap();
    let err = template
        .create_resource("greet://nobody", &params, None)
        .await
        .unwrap_err();

    match err {
        ResourceError::Creation(message) => {
            assert!(
                message.contains("no such user: nobody"),
                "original failure text must be preserved, got: {message}"
            );
        }
        other => panic!("expected Creation error, got: {other:?}"),
    }
}

#[tokio::test]
async fn validation_failure_wraps_into_creation_error() {
    #[derive(Deserialize, JsonSchema)]
    struct TypedInput {
        id: u32,
    }
    let template: ResourceTemplate<()> = ResourceTemplate::from_function(
        |input: TypedInput, _ctx| async move { Ok(input.id.to_string()) },
        "items://{id}",
        TemplateOptions::named("items"),
    )
    .unwrap();

    let params = template.matches("items://not-a-number").unwrap();
    let err = template
        .create_resource("items://not-a-number", &params, None)
        .await
        .unwrap_err();

    // Schema-validation failures and producer failures surface as the same
    // error kind.
    match err {
        ResourceError::Creation(message) => {
            assert!(message.contains("invalid resource arguments"));
        }
        other => panic!("expected Creation error, got: {other:?}"),
    }
}

#[tokio::test]
async fn captures_coerce_to_typed_input() {
    #[derive(Deserialize, JsonSchema)]
    struct TypedInput {
        id: u32,
    }
    let template: ResourceTemplate<()> = ResourceTemplate::from_function(
        |input: TypedInput, _ctx| async move { Ok(format!("item #{}", input.id + 1)) },
        "items://{id}",
        TemplateOptions::named("items"),
    )
    .unwrap();

    let params = template.matches("items://41").unwrap();
    let resource = template
        .create_resource("items://41", &params, None)
        .await
        .unwrap();
    let contents = resource.read(None).await.unwrap();
    assert_eq!(contents.as_text(), Some("item #42"));
}

#[tokio::test]
async fn binary_producers_yield_blob_contents() {
    #[derive(Deserialize, JsonSchema)]
    struct RawInput {
        name: String,
    }
    let template: ResourceTemplate<()> = ResourceTemplate::from_function(
        |input: RawInput, _ctx| async move { Ok(input.name.into_bytes()) },
        "raw://{name}",
        TemplateOptions {
            name: Some("raw".to_string()),
            mime_type: Some("application/octet-stream".to_string()),
            ..Default::default()
        },
    )
    .unwrap();

    let params = template.matches("raw://abc").unwrap();
    let resource = template
        .create_resource("raw://abc", &params, None)
        .await
        .unwrap();

    assert_eq!(resource.mime_type(), "application/octet-stream");
    let contents = resource.read(None).await.unwrap();
    assert_eq!(contents.as_blob(), Some(b"abc".as_slice()));
}
