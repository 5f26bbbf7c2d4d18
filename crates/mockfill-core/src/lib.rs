//! mockfill Core - placeholder fill engine
//!
//! The plugin side of a design-tool integration that:
//! - Lists the mock merchant catalog to the plugin UI
//! - Walks the selected nodes and fills `[data-*]` placeholders
//! - Requests cover images from the UI and paints the returned bytes
//!
//! All I/O goes through the [`Host`] trait.
//!
//! # Example
//!
//! ```rust,ignore
//! use mockfill_core::prelude::*;
//!
//! # async fn example(document: Document) -> Result<(), PluginError> {
//! let mut plugin = Plugin::new(RecordingHost::new(), document, PluginConfig::new().with_seed(7));
//!
//! let handled = plugin
//!     .handle_json(r#"{"type":"populate_merchant_node","merchantId":"merchant1"}"#)
//!     .await?;
//! println!("{handled:?}");
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]

// Core modules
pub mod config;
pub mod document;
pub mod error;
pub mod fill;
pub mod host;
pub mod message;
pub mod pending;
pub mod plugin;

// Re-exports for convenience
pub use config::PluginConfig;
pub use document::{Document, FontName, ImageHash, NodeId, NodeKind, Paint, Rgb, ScaleMode, SceneNode};
pub use error::{HostError, PluginError, PluginResult};
pub use fill::{collect_targets, FieldResolver, FillAction, FillReport, FillSession, FillTarget, SkippedNode};
pub use host::{image_hash_of, Host, RecordingHost};
pub use message::{PluginMessage, UiMessage};
pub use pending::{PendingImages, RequestId};
pub use plugin::{Handled, Plugin};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for driving the plugin
    pub use crate::{
        Document, FillReport, Handled, Host, HostError, Plugin, PluginConfig, PluginError,
        PluginMessage, RecordingHost, SceneNode, UiMessage,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
