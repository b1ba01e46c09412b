//! Schema-driven argument binding for producer functions.
//!
//! `ArgumentBinder` is built once per template. It derives a JSON schema
//! from the producer's typed input, coerces the string captures extracted
//! from a URI into the JSON types that schema declares, deserializes them
//! into the input type, and invokes the producer. The request context is a
//! separate formal parameter of the producer and is passed through
//! out-of-band; it never appears in the schema and is never subjected to
//! validation or serialization.

use {
    crate::content::ResourceContents,
    anyhow::Context,
    schemars::JsonSchema,
    serde::de::DeserializeOwned,
    serde_json::{Map, Value},
    std::{collections::HashMap, future::Future, pin::Pin, sync::Arc},
};

/// Type-erased producer wrapper.
///
/// Takes the coerced JSON arguments and the optional request context,
/// returning the produced content. Mirrors the shape of a registered tool
/// handler: deserialize, invoke, convert.
type BoundProducer<C> = Box<
    dyn Fn(Value, Option<Arc<C>>) -> Pin<Box<dyn Future<Output = anyhow::Result<ResourceContents>> + Send>>
        + Send
        + Sync,
>;

/// Binds raw URI captures to a producer's typed arguments and invokes it.
pub struct ArgumentBinder<C> {
    schema: Value,
    invoke: BoundProducer<C>,
}

impl<C: Send + Sync + 'static> ArgumentBinder<C> {
    /// Build a binder around a producer function.
    ///
    /// # Type Parameters
    /// - `I`: Input type deserialized from URI captures (drives the schema)
    /// - `O`: Producer output, convertible into `ResourceContents`
    /// - `F`: The producer function
    /// - `Fut`: Future returned by the producer
    pub fn new<I, O, F, Fut>(producer: F) -> Self
    where
        I: JsonSchema + DeserializeOwned + Send + 'static,
        O: Into<ResourceContents> + 'static,
        F: Fn(I, Option<Arc<C>>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<O>> + Send + 'static,
    {
        let schema = schemars::SchemaGenerator::default()
            .into_root_schema_for::<I>()
            .to_value();

        let producer = Arc::new(producer);
        let invoke: BoundProducer<C> = Box::new(move |args, context| {
            let producer = Arc::clone(&producer);
            Box::pin(async move {
                let input: I =
                    serde_json::from_value(args).context("invalid resource arguments")?;
                let output = producer(input, context).await?;
                Ok(output.into())
            })
        });

        Self { schema, invoke }
    }

    /// JSON schema describing the producer's arguments.
    pub fn schema(&self) -> &Value {
        &self.schema
    }

    /// Validate and coerce raw captures, then invoke the producer.
    ///
    /// Coercion and deserialization failures surface as errors from the
    /// returned future, as do producer failures.
    pub fn bind_and_invoke(
        &self,
        raw: &HashMap<String, String>,
        context: Option<Arc<C>>,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<ResourceContents>> + Send>> {
        let args = Value::Object(self.coerce(raw));
        (self.invoke)(args, context)
    }

    /// Coerce string captures to the JSON types the schema declares.
    ///
    /// Captures without a matching schema property stay strings; serde
    /// ignores unknown fields on deserialization. A capture that fails to
    /// parse as the declared type also stays a string so the
    /// deserialization error names the offending field.
    fn coerce(&self, raw: &HashMap<String, String>) -> Map<String, Value> {
        let properties = self.schema.get("properties").and_then(Value::as_object);
        raw.iter()
            .map(|(name, capture)| {
                let declared = properties
                    .and_then(|props| props.get(name))
                    .and_then(property_type);
                (name.clone(), coerce_capture(capture, declared))
            })
            .collect()
    }
}

/// Extract the declared primitive type of a schema property.
///
/// Handles both `"type": "integer"` and the `"type": ["integer", "null"]`
/// form schemars emits for `Option` fields.
fn property_type(property: &Value) -> Option<&str> {
    match property.get("type") {
        Some(Value::String(ty)) => Some(ty.as_str()),
        Some(Value::Array(types)) => types
            .iter()
            .filter_map(Value::as_str)
            .find(|ty| *ty != "null"),
        _ => None,
    }
}

fn coerce_capture(capture: &str, declared: Option<&str>) -> Value {
    match declared {
        Some("integer") => capture
            .parse::<i64>()
            .map(Value::from)
            .unwrap_or_else(|_| Value::String(capture.to_string())),
        Some("number") => capture
            .parse::<f64>()
            .map(Value::from)
            .unwrap_or_else(|_| Value::String(capture.to_string())),
        Some("boolean") => capture
            .parse::<bool>()
            .map(Value::Bool)
            .unwrap_or_else(|_| Value::String(capture.to_string())),
        _ => Value::String(capture.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, JsonSchema)]
    struct LookupInput {
        id: u32,
        verbose: bool,
        label: String,
    }

    fn raw(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn schema_lists_input_properties() {
        let binder: ArgumentBinder<()> = ArgumentBinder::new(
            |input: LookupInput, _ctx| async move { Ok(input.label) },
        );
        let properties = binder.schema()["properties"].as_object().unwrap();
        assert!(properties.contains_key("id"));
        assert!(properties.contains_key("verbose"));
        assert!(properties.contains_key("label"));
    }

    #[tokio::test]
    async fn captures_are_coerced_to_declared_types() {
        let binder: ArgumentBinder<()> = ArgumentBinder::new(
            |input: LookupInput, _ctx| async move {
                Ok(format!("{}:{}:{}", input.id, input.verbose, input.label))
            },
        );
        let contents = binder
            .bind_and_invoke(&raw(&[("id", "42"), ("verbose", "true"), ("label", "x")]), None)
            .await
            .unwrap();
        assert_eq!(contents.as_text(), Some("42:true:x"));
    }

    #[tokio::test]
    async fn unparsable_capture_fails_validation() {
        let binder: ArgumentBinder<()> = ArgumentBinder::new(
            |input: LookupInput, _ctx| async move { Ok(input.label) },
        );
        let err = binder
            .bind_and_invoke(
                &raw(&[("id", "not-a-number"), ("verbose", "true"), ("label", "x")]),
                None,
            )
            .await
            .unwrap_err();
        assert!(err.to_string().contains("invalid resource arguments"));
    }

    #[tokio::test]
    async fn unknown_captures_are_ignored() {
        #[derive(Deserialize, JsonSchema)]
        struct OneField {
            city: String,
        }
        let binder: ArgumentBinder<()> =
            ArgumentBinder::new(|input: OneField, _ctx| async move { Ok(input.city) });
        let contents = binder
            .bind_and_invoke(&raw(&[("city", "oslo"), ("extra", "1")]), None)
            .await
            .unwrap();
        assert_eq!(contents.as_text(), Some("oslo"));
    }
}
