//! Resource templates: parameterized, producer-backed resources.
//!
//! A `ResourceTemplate` compiles a URI pattern like `weather://{city}/current`
//! into a matcher and pairs it with a producer function. When a concrete URI
//! matches, the extracted parameters are validated against the producer's
//! input schema and the producer runs once, yielding a fresh function-backed
//! `Resource` that holds the already-computed content.
//!
//! Templates are stateless factories: after construction there is no mutable
//! state, so concurrent `create_resource` calls are independent.

use {
    crate::{
        binder::ArgumentBinder,
        content::{Annotations, Icon, ResourceContents},
        error::{ResourceError, ResourceResult},
        resource::{validate_mime_type, Resource, ResourceMetadata, DEFAULT_MIME_TYPE},
        uri_template::UriTemplate,
    },
    schemars::JsonSchema,
    serde::de::DeserializeOwned,
    serde_json::Value,
    std::{collections::HashMap, future::Future, sync::Arc},
    tracing::debug,
};

/// Metadata supplied when registering a template.
///
/// `name` is mandatory: producer functions are closures with no
/// introspectable name, so registering without one fails with
/// `NameRequired`. Everything else defaults.
#[derive(Debug, Clone, Default)]
pub struct TemplateOptions {
    /// Name of the template (required)
    pub name: Option<String>,
    /// Human-readable title
    pub title: Option<String>,
    /// Description of what the template produces
    pub description: Option<String>,
    /// MIME type of produced content; defaults to "text/plain"
    pub mime_type: Option<String>,
    /// Optional list of icons
    pub icons: Option<Vec<Icon>>,
    /// Optional annotations
    pub annotations: Option<Annotations>,
}

impl TemplateOptions {
    /// Options with just a name set.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }
}

/// A factory for dynamically created resources.
///
/// # Type Parameters
/// - `C`: The application context type injected into producers per request
pub struct ResourceTemplate<C> {
    uri_template: UriTemplate,
    name: String,
    title: Option<String>,
    description: Option<String>,
    mime_type: String,
    icons: Option<Vec<Icon>>,
    annotations: Option<Annotations>,
    binder: ArgumentBinder<C>,
}

impl<C: Send + Sync + 'static> ResourceTemplate<C> {
    /// Build a template from a producer function and a URI pattern.
    ///
    /// The producer takes its typed input (deserialized from URI captures)
    /// and an optional request context. The context is injected as-is and
    /// never flows through the argument schema — it is declared by the
    /// producer's signature, not discovered.
    ///
    /// # Parameters
    /// - `producer`: Async function generating the resource content
    /// - `uri_template`: Pattern with `{name}` placeholders
    /// - `options`: Metadata; `options.name` is required
    ///
    /// # Examples
    /// ```rust
    /// use solidres::{ResourceTemplate, TemplateOptions};
    /// use schemars::JsonSchema;
    /// use serde::Deserialize;
    ///
    /// #[derive(Deserialize, JsonSchema)]
    /// struct WeatherInput {
    ///     city: String,
    /// }
    ///
    /// let template: solidres::ResourceResult<ResourceTemplate<()>> =
    ///     ResourceTemplate::from_function(
    ///         |input: WeatherInput, _ctx| async move {
    ///             Ok(format!("Weather for {}", input.city))
    ///         },
    ///         "weather://{city}/current",
    ///         TemplateOptions::named("weather"),
    ///     );
    /// assert!(template.is_ok());
    /// ```
    pub fn from_function<I, O, F, Fut>(
        producer: F,
        uri_template: &str,
        options: TemplateOptions,
    ) -> ResourceResult<Self>
    where
        I: JsonSchema + DeserializeOwned + Send + 'static,
        O: Into<ResourceContents> + 'static,
        F: Fn(I, Option<Arc<C>>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<O>> + Send + 'static,
    {
        let name = options.name.ok_or(ResourceError::NameRequired)?;
        let uri_template = UriTemplate::compile(uri_template)?;
        let mime_type = match options.mime_type {
            Some(mime_type) => validate_mime_type(&mime_type)?,
            None => DEFAULT_MIME_TYPE.to_string(),
        };

        Ok(Self {
            uri_template,
            name,
            title: options.title,
            description: options.description,
            mime_type,
            icons: options.icons,
            annotations: options.annotations,
            binder: ArgumentBinder::new(producer),
        })
    }

    /// Check whether a URI matches this template and extract its parameters.
    ///
    /// `None` is the normal no-match result used for registry fallthrough.
    pub fn matches(&self, uri: &str) -> Option<HashMap<String, String>> {
        self.uri_template.matches(uri)
    }

    /// Create a resource for a matched URI.
    ///
    /// Validates and coerces `params` against the producer's input schema,
    /// invokes the producer exactly once (the context passes through
    /// untouched), and wraps the result in a function-backed `Resource`
    /// whose `read` yields the already-computed value. Any validation or
    /// producer failure is re-signaled uniformly as a `Creation` error
    /// carrying the original message.
    pub async fn create_resource(
        &self,
        uri: &str,
        params: &HashMap<String, String>,
        context: Option<Arc<C>>,
    ) -> ResourceResult<Resource<C>> {
        debug!(template = %self.uri_template, uri, "creating resource from template");

        let contents = self
            .binder
            .bind_and_invoke(params, context)
            .await
            .map_err(|e| ResourceError::Creation(format!("{e:#}")))?;

        Resource::from_fn(
            uri,
            ResourceMetadata {
                name: Some(self.name.clone()),
                title: self.title.clone(),
                description: self.description.clone(),
                mime_type: Some(self.mime_type.clone()),
                icons: self.icons.clone(),
                annotations: self.annotations.clone(),
            },
            move |_context| {
                let contents = contents.clone();
                async move { Ok(contents) }
            },
        )
    }

    /// JSON schema for the producer's arguments.
    ///
    /// The context parameter is not part of the producer's input type, so it
    /// can never appear here.
    pub fn parameters(&self) -> &Value {
        self.binder.schema()
    }

    /// The raw URI template string.
    pub fn uri_template(&self) -> &str {
        self.uri_template.as_str()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn icons(&self) -> Option<&[Icon]> {
        self.icons.as_deref()
    }

    pub fn annotations(&self) -> Option<&Annotations> {
        self.annotations.as_ref()
    }
}
