//! Host application seam
//!
//! The plugin owns no I/O. Fonts, image decoding and the UI channel are all
//! reached through [`Host`]. [`RecordingHost`] is an in-memory host that
//! records everything it is asked to do.

use crate::document::{FontName, ImageHash};
use crate::error::HostError;
use crate::message::PluginMessage;
use async_trait::async_trait;
use parking_lot::Mutex;
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::sync::Arc;

/// Services the host application exposes to the plugin
#[async_trait]
pub trait Host: Send + Sync {
    /// Make `font` available for editing text that uses it
    async fn load_font(&self, font: &FontName) -> Result<(), HostError>;

    /// Decode image bytes and return the host's hash for them
    fn create_image(&self, data: &[u8]) -> Result<ImageHash, HostError>;

    /// Deliver a message to the plugin UI
    fn post_message(&self, message: PluginMessage) -> Result<(), HostError>;
}

#[async_trait]
impl<H: Host + ?Sized> Host for Arc<H> {
    async fn load_font(&self, font: &FontName) -> Result<(), HostError> {
        (**self).load_font(font).await
    }

    fn create_image(&self, data: &[u8]) -> Result<ImageHash, HostError> {
        (**self).create_image(data)
    }

    fn post_message(&self, message: PluginMessage) -> Result<(), HostError> {
        (**self).post_message(message)
    }
}

/// Hash image bytes the way [`RecordingHost`] does
///
/// Hex SHA-256, truncated to the 40 characters hosts typically use.
#[must_use]
pub fn image_hash_of(data: &[u8]) -> ImageHash {
    let digest = Sha256::digest(data);
    let mut hex = hex::encode(digest);
    hex.truncate(40);
    ImageHash(hex)
}

#[derive(Debug, Default)]
struct RecordingState {
    messages: Vec<PluginMessage>,
    loaded_fonts: Vec<FontName>,
    images: Vec<ImageHash>,
    unavailable_fonts: HashSet<FontName>,
}

/// In-memory host that records calls
#[derive(Debug, Default)]
pub struct RecordingHost {
    state: Mutex<RecordingState>,
}

impl RecordingHost {
    /// Create a host where every font loads
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With `font` failing to load
    #[must_use]
    pub fn with_unavailable_font(self, font: FontName) -> Self {
        self.state.lock().unavailable_fonts.insert(font);
        self
    }

    /// Messages posted so far
    #[must_use]
    pub fn messages(&self) -> Vec<PluginMessage> {
        self.state.lock().messages.clone()
    }

    /// Drain posted messages
    pub fn take_messages(&self) -> Vec<PluginMessage> {
        std::mem::take(&mut self.state.lock().messages)
    }

    /// Fonts loaded so far, in call order
    #[must_use]
    pub fn loaded_fonts(&self) -> Vec<FontName> {
        self.state.lock().loaded_fonts.clone()
    }

    /// Image hashes created so far
    #[must_use]
    pub fn images(&self) -> Vec<ImageHash> {
        self.state.lock().images.clone()
    }
}

#[async_trait]
impl Host for RecordingHost {
    async fn load_font(&self, font: &FontName) -> Result<(), HostError> {
        let mut state = self.state.lock();
        if state.unavailable_fonts.contains(font) {
            return Err(HostError::FontUnavailable(font.clone()));
        }
        state.loaded_fonts.push(font.clone());
        Ok(())
    }

    fn create_image(&self, data: &[u8]) -> Result<ImageHash, HostError> {
        if data.is_empty() {
            return Err(HostError::ImageDecode("empty image data".to_string()));
        }
        let hash = image_hash_of(data);
        self.state.lock().images.push(hash.clone());
        Ok(hash)
    }

    fn post_message(&self, message: PluginMessage) -> Result<(), HostError> {
        self.state.lock().messages.push(message);
        Ok(())
    }
}
