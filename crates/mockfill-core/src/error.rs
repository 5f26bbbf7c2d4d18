//! Error types for mockfill Core
//!
//! Provides error handling for:
//! - Host failures (fonts, image decoding, UI messaging)
//! - Catalog lookups during populate
//! - Image responses that match no pending request
//! - Malformed UI messages and configuration files

use crate::document::{FontName, NodeId};
use crate::pending::RequestId;
use mockfill_catalog::CatalogError;
use std::path::PathBuf;

/// Main plugin error type
#[derive(Debug, thiserror::Error)]
pub enum PluginError {
    /// Merchant lookup failed
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Image bytes arrived for a request id that is not pending
    #[error("no pending image request with id {0}")]
    UnknownImageRequest(RequestId),

    /// A node referenced by id is no longer in the document
    #[error("node not found: {0}")]
    NodeNotFound(NodeId),

    /// A node exists but cannot receive the requested update
    #[error("node {node} is a {actual} node, expected {expected}")]
    WrongNodeKind {
        /// Offending node
        node: NodeId,
        /// Required kind
        expected: &'static str,
        /// Actual host type name
        actual: String,
    },

    /// Host call failed
    #[error("host error: {0}")]
    Host(#[from] HostError),

    /// UI message could not be decoded
    #[error("malformed message: {0}")]
    MalformedMessage(#[from] serde_json::Error),

    /// Configuration file is invalid
    #[error("configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// IO error reading a configuration file
    #[error("io error reading {path}: {source}")]
    Io {
        /// File being read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

impl PluginError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Check if the error came from the host rather than plugin state
    #[inline]
    #[must_use]
    pub fn is_host_failure(&self) -> bool {
        matches!(self, Self::Host(_))
    }
}

/// Errors reported by the host application
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    /// Font could not be loaded
    #[error("font unavailable: {0}")]
    FontUnavailable(FontName),

    /// Image bytes could not be decoded
    #[error("image decode failed: {0}")]
    ImageDecode(String),

    /// UI channel rejected a message
    #[error("ui messaging failed: {0}")]
    Messaging(String),
}

/// Result type alias for plugin operations
pub type PluginResult<T> = Result<T, PluginError>;
