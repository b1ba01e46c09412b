//! Registry for static resources and resource templates.
//!
//! Lookup order on `get_resource`: exact static match first, then the first
//! template whose pattern matches the URI. A template hit invokes the
//! producer and yields a fresh resource per call; nothing is cached.

use {
    crate::{
        error::{ResourceError, ResourceResult},
        resource::Resource,
        template::ResourceTemplate,
    },
    std::{collections::HashMap, sync::Arc},
    tracing::{debug, warn},
};

/// Holds registered resources and templates for a server instance.
///
/// # Type Parameters
/// - `C`: The application context type shared with producers and read functions
pub struct ResourceRegistry<C> {
    resources: HashMap<String, Arc<Resource<C>>>,
    templates: Vec<Arc<ResourceTemplate<C>>>,
}

impl<C> Default for ResourceRegistry<C> {
    fn default() -> Self {
        Self {
            resources: HashMap::new(),
            templates: Vec::new(),
        }
    }
}

impl<C: Send + Sync + 'static> ResourceRegistry<C> {
    /// Create a new, empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a static resource, keyed by its URI.
    ///
    /// Re-registering a URI replaces the previous resource with a warning,
    /// and returns the replaced resource.
    pub fn add_resource(&mut self, resource: Resource<C>) -> Option<Arc<Resource<C>>> {
        let uri = resource.uri().to_string();
        let replaced = self.resources.insert(uri.clone(), Arc::new(resource));
        if replaced.is_some() {
            warn!(uri = %uri, "replacing registered resource");
        }
        replaced
    }

    /// Register a resource template.
    ///
    /// Templates are tried in registration order during lookup.
    pub fn add_template(&mut self, template: ResourceTemplate<C>) -> Arc<ResourceTemplate<C>> {
        let template = Arc::new(template);
        self.templates.push(Arc::clone(&template));
        template
    }

    /// All registered static resources, in arbitrary order.
    pub fn list_resources(&self) -> Vec<Arc<Resource<C>>> {
        self.resources.values().cloned().collect()
    }

    /// All registered templates, in registration order.
    pub fn list_templates(&self) -> Vec<Arc<ResourceTemplate<C>>> {
        self.templates.clone()
    }

    /// Resolve a URI to a resource.
    ///
    /// Tries an exact static match first, then each template in order. A
    /// template match calls `create_resource` with the extracted parameters
    /// and the supplied context. Fails with `NotFound` when nothing matches;
    /// a matching template's creation failure propagates as-is.
    pub async fn get_resource(
        &self,
        uri: &str,
        context: Option<Arc<C>>,
    ) -> ResourceResult<Arc<Resource<C>>> {
        if let Some(resource) = self.resources.get(uri) {
            debug!(uri, "resolved static resource");
            return Ok(Arc::clone(resource));
        }

        for template in &self.templates {
            if let Some(params) = template.matches(uri) {
                debug!(uri, template = template.uri_template(), "resolved templated resource");
                let resource = template.create_resource(uri, &params, context).await?;
                return Ok(Arc::new(resource));
            }
        }

        Err(ResourceError::NotFound(uri.to_string()))
    }
}
