//! Dynamic, URI-templated resource dispatch for MCP-style servers.
//!
//! Servers expose named, URI-addressed data sources. Some are static
//! ([`Resource`] constructed up front), some are templated
//! ([`ResourceTemplate`] — a URI pattern with `{name}` placeholders backed
//! by a producer function that generates content on demand). A
//! [`ResourceRegistry`] resolves a concrete URI by trying exact matches
//! first, then templates in registration order.
//!
//! # Quick Start
//!
//! ```rust
//! use solidres::{Resource, ResourceRegistry, ResourceTemplate, TemplateOptions};
//! use schemars::JsonSchema;
//! use serde::Deserialize;
//! use std::sync::Arc;
//!
//! #[derive(Deserialize, JsonSchema)]
//! struct WeatherInput {
//!     city: String,
//! }
//!
//! // Application context shared with producers (any type)
//! struct AppContext {
//!     api_base: String,
//! }
//!
//! # tokio_test::block_on(async {
//! let mut registry: ResourceRegistry<AppContext> = ResourceRegistry::new();
//!
//! registry.add_resource(Resource::text("config://app", "debug = false").unwrap());
//!
//! registry.add_template(
//!     ResourceTemplate::from_function(
//!         |input: WeatherInput, ctx: Option<Arc<AppContext>>| async move {
//!             let base = ctx.map(|c| c.api_base.clone()).unwrap_or_default();
//!             Ok(format!("{base}: sunny in {}", input.city))
//!         },
//!         "weather://{city}/current",
//!         TemplateOptions::named("weather"),
//!     )
//!     .unwrap(),
//! );
//!
//! let ctx = Arc::new(AppContext { api_base: "wx".into() });
//! let resource = registry
//!     .get_resource("weather://paris/current", Some(ctx))
//!     .await
//!     .unwrap();
//! let contents = resource.read(None).await.unwrap();
//! assert_eq!(contents.as_text(), Some("wx: sunny in paris"));
//! # });
//! ```

pub mod binder;
pub mod content;
pub mod error;
pub mod registry;
pub mod resource;
pub mod template;
pub mod uri_template;

// Re-export key types
pub use binder::ArgumentBinder;
pub use content::{Annotations, Icon, ResourceContents};
pub use error::{ResourceError, ResourceResult};
pub use registry::ResourceRegistry;
pub use resource::{ContentSource, ReadFn, Resource, ResourceMetadata, DEFAULT_MIME_TYPE};
pub use template::{ResourceTemplate, TemplateOptions};
pub use uri_template::UriTemplate;
