//! Plugin dispatcher
//!
//! [`Plugin`] owns the plugin state for one host session:
//! - the catalog it serves merchants from
//! - the document it edits
//! - the pending-image table
//! - the random source shared by successive fills
//!
//! Messages are handled one at a time, in arrival order.

use crate::config::PluginConfig;
use crate::document::{Document, NodeId, NodeKind, Paint};
use crate::error::{PluginError, PluginResult};
use crate::fill::{FieldResolver, FillReport, FillSession};
use crate::host::Host;
use crate::message::{PluginMessage, UiMessage};
use crate::pending::{PendingImages, RequestId};
use mockfill_catalog::{Catalog, FieldMap};
use rand::rngs::StdRng;

/// Result of handling one UI message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Handled {
    /// Merchant list posted; number of merchants
    MerchantsListed(usize),
    /// Selection filled
    Populated(FillReport),
    /// Image applied to a rectangle
    ImageApplied(NodeId),
}

/// Plugin state for one host session
pub struct Plugin<H: Host> {
    host: H,
    catalog: Catalog,
    config: PluginConfig,
    document: Document,
    pending: PendingImages,
    rng: StdRng,
}

impl<H: Host> Plugin<H> {
    /// Create plugin serving the built-in catalog
    #[must_use]
    pub fn new(host: H, document: Document, config: PluginConfig) -> Self {
        let rng = config.rng();
        Self {
            host,
            catalog: Catalog::builtin(),
            config,
            document,
            pending: PendingImages::new(),
            rng,
        }
    }

    /// With a different catalog
    #[must_use]
    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Host
    #[inline]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Catalog
    #[inline]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Configuration
    #[inline]
    pub fn config(&self) -> &PluginConfig {
        &self.config
    }

    /// Current document
    #[inline]
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Mutable document, for host adapters that sync selection changes
    #[inline]
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// Outstanding image requests
    #[inline]
    pub fn pending(&self) -> &PendingImages {
        &self.pending
    }

    /// Consume the plugin, returning the edited document
    #[must_use]
    pub fn into_document(self) -> Document {
        self.document
    }

    /// Handle a decoded UI message
    ///
    /// # Errors
    /// Propagates the error of the operation the message maps to
    pub async fn handle(&mut self, message: UiMessage) -> PluginResult<Handled> {
        tracing::info!("Handling {} message", message.kind());
        match message {
            UiMessage::GetMerchants => self.list_merchants().map(Handled::MerchantsListed),
            UiMessage::PopulateMerchantNode { merchant_id } => self
                .populate(merchant_id.as_str())
                .await
                .map(Handled::Populated),
            UiMessage::OnImageDataResponse { node_id, data } => {
                self.apply_image(node_id, &data).map(Handled::ImageApplied)
            }
        }
    }

    /// Decode and handle a raw JSON UI message
    ///
    /// # Errors
    /// Returns [`PluginError::MalformedMessage`] if the JSON does not decode
    pub async fn handle_json(&mut self, raw: &str) -> PluginResult<Handled> {
        let message = UiMessage::from_json(raw)?;
        self.handle(message).await
    }

    /// Post the merchant list to the UI
    ///
    /// # Errors
    /// Returns [`PluginError::Host`] if the UI channel rejects the message
    pub fn list_merchants(&self) -> PluginResult<usize> {
        let merchants: Vec<_> = self.catalog.merchants().cloned().collect();
        let count = merchants.len();
        self.host
            .post_message(PluginMessage::MerchantsResponse { merchants })?;
        Ok(count)
    }

    /// Fill placeholders under the selection with `merchant_id`'s data
    ///
    /// # Errors
    /// Returns [`PluginError::Catalog`] for an unknown merchant, or the
    /// error of a failed download request
    pub async fn populate(&mut self, merchant_id: &str) -> PluginResult<FillReport> {
        let merchant = self.catalog.get(merchant_id)?;
        let fields = FieldMap::for_merchant(merchant);
        let resolver = FieldResolver::new(&fields, self.config.recent_window);

        let report = FillSession::new(&self.host, &mut self.pending, &mut self.rng, resolver)
            .traverse_frames(self.config.traverse_frames)
            .run(&mut self.document)
            .await?;

        tracing::info!(
            "Populated with {}: {} texts, {} images, {} skipped",
            merchant_id,
            report.texts_filled,
            report.images_requested,
            report.skipped.len()
        );
        Ok(report)
    }

    /// Paint downloaded image bytes into the rectangle waiting on `request`
    ///
    /// The pending entry is consumed even when decoding fails.
    ///
    /// # Errors
    /// Returns [`PluginError::UnknownImageRequest`] for an id that is not
    /// pending, [`PluginError::NodeNotFound`] if the rectangle is gone, or
    /// [`PluginError::Host`] if the bytes do not decode
    pub fn apply_image(&mut self, request: RequestId, data: &[u8]) -> PluginResult<NodeId> {
        let Some(node_id) = self.pending.take(request) else {
            tracing::warn!("Image response for unknown request {}", request);
            return Err(PluginError::UnknownImageRequest(request));
        };

        let node = self
            .document
            .find_mut(&node_id)
            .ok_or_else(|| PluginError::NodeNotFound(node_id.clone()))?;
        match &mut node.kind {
            NodeKind::Rectangle { fills } => {
                let image_hash = self.host.create_image(data)?;
                *fills = vec![Paint::Image {
                    image_hash,
                    scale_mode: self.config.image_scale_mode,
                }];
            }
            other => {
                return Err(PluginError::WrongNodeKind {
                    node: node_id,
                    expected: "RECTANGLE",
                    actual: other.type_name().to_string(),
                });
            }
        }
        tracing::debug!("Applied image {} to {}", request, node_id);
        Ok(node_id)
    }
}
