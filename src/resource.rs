//! The `Resource` descriptor: an immutable, URI-addressed unit of content.
//!
//! A resource pairs identity and metadata (uri, name, mime type, ...) with a
//! capability to produce its content asynchronously. Content comes from one
//! of three sources: static text, a static binary blob, or a producer
//! function invoked on every read. Templates only ever construct the
//! function-backed variant.

use {
    crate::{
        content::{Annotations, Icon, ResourceContents},
        error::{ResourceError, ResourceResult},
    },
    once_cell::sync::Lazy,
    regex::Regex,
    std::{future::Future, pin::Pin, sync::Arc},
};

/// Mime type used when none is supplied.
pub const DEFAULT_MIME_TYPE: &str = "text/plain";

static MIME_TYPE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9]+/[a-zA-Z0-9\-+.]+$").unwrap());

/// Validate a mime type against the `type/subtype` token pattern.
pub(crate) fn validate_mime_type(mime_type: &str) -> ResourceResult<String> {
    if MIME_TYPE_PATTERN.is_match(mime_type) {
        Ok(mime_type.to_string())
    } else {
        Err(ResourceError::InvalidMimeType(mime_type.to_string()))
    }
}

/// A boxed read function backing a dynamic resource.
///
/// Receives the optional per-request context and resolves to the resource
/// content. The context is an opaque live value owned by the calling
/// session; most read functions ignore it.
pub type ReadFn<C> = Box<
    dyn Fn(Option<Arc<C>>) -> Pin<Box<dyn Future<Output = anyhow::Result<ResourceContents>> + Send>>
        + Send
        + Sync,
>;

/// Where a resource's content comes from.
pub enum ContentSource<C> {
    /// Static UTF-8 text
    Text(String),
    /// Static binary data
    Blob(Vec<u8>),
    /// Content produced by a function on each read
    Function(ReadFn<C>),
}

impl<C> std::fmt::Debug for Resource<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resource")
            .field("uri", &self.uri)
            .field("name", &self.name)
            .field("title", &self.title)
            .field("description", &self.description)
            .field("mime_type", &self.mime_type)
            .field("icons", &self.icons)
            .field("annotations", &self.annotations)
            .finish_non_exhaustive()
    }
}

/// Optional metadata supplied at resource construction time.
#[derive(Debug, Clone, Default)]
pub struct ResourceMetadata {
    /// Name of the resource; defaults to the uri when absent
    pub name: Option<String>,
    /// Human-readable title
    pub title: Option<String>,
    /// Description of the resource
    pub description: Option<String>,
    /// MIME type of the content; defaults to "text/plain"
    pub mime_type: Option<String>,
    /// Optional list of icons
    pub icons: Option<Vec<Icon>>,
    /// Optional annotations
    pub annotations: Option<Annotations>,
}

/// An immutable, URI-addressed resource.
///
/// # Type Parameters
/// - `C`: The application context type passed through to function-backed reads
///
/// Fields are fixed at construction; a `Resource` is safe to share and read
/// concurrently without synchronization.
pub struct Resource<C> {
    uri: String,
    name: String,
    title: Option<String>,
    description: Option<String>,
    mime_type: String,
    icons: Option<Vec<Icon>>,
    annotations: Option<Annotations>,
    source: ContentSource<C>,
}

impl<C: Send + Sync + 'static> Resource<C> {
    /// Construct a resource from a content source and metadata.
    ///
    /// Validates the mime type against `type/subtype` and defaults the name
    /// to the uri's string form. Fails with `MissingIdentity` when neither a
    /// name nor a non-empty uri is available, and with `InvalidMimeType`
    /// when the mime type does not conform.
    pub fn new(
        uri: impl Into<String>,
        metadata: ResourceMetadata,
        source: ContentSource<C>,
    ) -> ResourceResult<Self> {
        let uri = uri.into();

        let name = match metadata.name.filter(|n| !n.is_empty()) {
            Some(name) => name,
            None if !uri.is_empty() => uri.clone(),
            None => return Err(ResourceError::MissingIdentity),
        };

        let mime_type = match metadata.mime_type {
            Some(mime_type) => validate_mime_type(&mime_type)?,
            None => DEFAULT_MIME_TYPE.to_string(),
        };

        Ok(Self {
            uri,
            name,
            title: metadata.title,
            description: metadata.description,
            mime_type,
            icons: metadata.icons,
            annotations: metadata.annotations,
            source,
        })
    }

    /// Construct a static text resource with default metadata.
    pub fn text(uri: impl Into<String>, content: impl Into<String>) -> ResourceResult<Self> {
        Self::new(
            uri,
            ResourceMetadata::default(),
            ContentSource::Text(content.into()),
        )
    }

    /// Construct a static binary resource.
    ///
    /// Defaults the mime type to "application/octet-stream" unless the
    /// metadata overrides it.
    pub fn blob(uri: impl Into<String>, data: Vec<u8>) -> ResourceResult<Self> {
        Self::new(
            uri,
            ResourceMetadata {
                mime_type: Some("application/octet-stream".to_string()),
                ..Default::default()
            },
            ContentSource::Blob(data),
        )
    }

    /// Construct a function-backed resource.
    ///
    /// The function runs on every `read` call and receives the optional
    /// request context.
    pub fn from_fn<F, Fut, O>(
        uri: impl Into<String>,
        metadata: ResourceMetadata,
        read_fn: F,
    ) -> ResourceResult<Self>
    where
        F: Fn(Option<Arc<C>>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<O>> + Send + 'static,
        O: Into<ResourceContents> + 'static,
    {
        let wrapped: ReadFn<C> = Box::new(move |context| {
            let fut = read_fn(context);
            Box::pin(async move { fut.await.map(Into::into) })
        });
        Self::new(uri, metadata, ContentSource::Function(wrapped))
    }

    /// Read the resource content.
    ///
    /// Static variants clone their stored value and ignore the context.
    /// The function-backed variant forwards the context to its read
    /// function; producer failures propagate unchanged.
    pub async fn read(&self, context: Option<Arc<C>>) -> anyhow::Result<ResourceContents> {
        match &self.source {
            ContentSource::Text(text) => Ok(ResourceContents::Text(text.clone())),
            ContentSource::Blob(data) => Ok(ResourceContents::Blob(data.clone())),
            ContentSource::Function(read_fn) => read_fn(context).await,
        }
    }

    pub fn uri(&self) -> &str {
        &self.uri
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
