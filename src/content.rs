//! Value types for resource content and metadata.
//!
//! `ResourceContents` is what a resource read ultimately produces: either
//! UTF-8 text or a raw binary blob. The `From` conversions let producer
//! functions return plain strings, byte vectors, or JSON values without
//! wrapping them by hand.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Content produced by reading a resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceContents {
    /// UTF-8 text content
    Text(String),
    /// Raw binary content
    Blob(Vec<u8>),
}

impl ResourceContents {
    /// Borrow the text content, if this is a text resource.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Blob(_) => None,
        }
    }

    /// Borrow the binary content, if this is a binary resource.
    pub fn as_blob(&self) -> Option<&[u8]> {
        match self {
            Self::Text(_) => None,
            Self::Blob(data) => Some(data),
        }
    }
}

impl From<String> for ResourceContents {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for ResourceContents {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<Vec<u8>> for ResourceContents {
    fn from(data: Vec<u8>) -> Self {
        Self::Blob(data)
    }
}

impl From<Value> for ResourceContents {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => Self::Text(text),
            other => Self::Text(other.to_string()),
        }
    }
}

/// An icon associated with a resource or template.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Icon {
    /// URI of the icon image
    pub src: String,

    /// MIME type of the icon (e.g., "image/png")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,

    /// Available sizes (e.g., "48x48")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sizes: Option<String>,
}

/// Optional annotations describing how a resource should be used.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Annotations {
    /// Intended audience roles (e.g., "user", "assistant")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audience: Option<Vec<String>>,

    /// Relative priority, 0.0 (least) to 1.0 (most important)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<f64>,
}
