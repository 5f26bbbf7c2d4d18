//! Testing utilities for mockfill workspace
//!
//! Shared test fixtures, hosts, and document accessors.

#![allow(missing_docs)]

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use mockfill_catalog::{Catalog, Merchant};
use mockfill_core::{
    Document, FontName, Host, HostError, ImageHash, NodeId, NodeKind, Paint, PluginMessage,
    SceneNode,
};

pub fn builtin_merchant(id: &str) -> Merchant {
    Catalog::builtin().get(id).cloned().unwrap()
}

pub fn inter_regular() -> FontName {
    FontName::new("Inter", "Regular")
}

pub fn inter_bold() -> FontName {
    FontName::new("Inter", "Bold")
}

/// Restaurant card: an instance holding name, cuisine, address, tag and
/// cover placeholders plus a few unrelated layers.
pub fn merchant_card(prefix: &str) -> SceneNode {
    let id = |suffix: &str| format!("{prefix}:{suffix}");
    SceneNode::new(
        id("card").as_str(),
        "Restaurant card",
        NodeKind::Instance {
            children: vec![
                SceneNode::rectangle(&id("cover"), "[data-cover]"),
                SceneNode::group(
                    &id("details"),
                    "Details",
                    vec![
                        SceneNode::text(&id("name"), "[data-name]", "Restaurant name", inter_bold()),
                        SceneNode::text(&id("cuisine"), "[data-cuisine]", "Cuisine", inter_regular()),
                        SceneNode::text(&id("address"), "[data-address]", "Address", inter_regular()),
                        SceneNode::text(&id("tag"), "[data-tag]", "Tag", inter_regular()),
                    ],
                ),
                SceneNode::text(&id("label"), "Label", "Open now", inter_regular()),
                SceneNode::rectangle(&id("background"), "Background"),
            ],
        },
    )
}

/// Menu section: a component with `count` rows of item, description and price
pub fn menu_section(prefix: &str, count: usize) -> SceneNode {
    let rows = (0..count)
        .map(|row| {
            let id = |suffix: &str| format!("{prefix}:{row}:{suffix}");
            SceneNode::group(
                &id("row"),
                "Menu row",
                vec![
                    SceneNode::text(&id("item"), "[data-menu-item]", "Item", inter_bold()),
                    SceneNode::text(
                        &id("description"),
                        "[data-menu-description]",
                        "Description",
                        inter_regular(),
                    ),
                    SceneNode::text(&id("price"), "[data-menu-price]", "$0.00", inter_regular()),
                ],
            )
        })
        .collect();
    SceneNode::new(
        format!("{prefix}:menu").as_str(),
        "Menu",
        NodeKind::Component { children: rows },
    )
}

/// Page with one card and one menu, both selected
pub fn sample_document() -> Document {
    Document::new(vec![merchant_card("1"), menu_section("2", 3)]).with_selection(["1:card", "2:menu"])
}

/// [`sample_document`] as host JSON
pub fn sample_document_json() -> String {
    serde_json::to_string_pretty(&sample_document()).expect("sample document serializes")
}

pub fn text_of<'a>(document: &'a Document, id: &str) -> Option<&'a str> {
    match &document.find(&NodeId::from(id))?.kind {
        NodeKind::Text { characters, .. } => Some(characters.as_str()),
        _ => None,
    }
}

pub fn fills_of<'a>(document: &'a Document, id: &str) -> Option<&'a [Paint]> {
    match &document.find(&NodeId::from(id))?.kind {
        NodeKind::Rectangle { fills } => Some(fills.as_slice()),
        _ => None,
    }
}

/// Download URLs in posted order
pub fn download_urls(messages: &[PluginMessage]) -> Vec<String> {
    messages
        .iter()
        .filter_map(|message| match message {
            PluginMessage::DownloadImage { url, .. } => Some(url.clone()),
            PluginMessage::MerchantsResponse { .. } => None,
        })
        .collect()
}

/// Host whose UI channel is closed
#[derive(Debug, Default)]
pub struct ClosedChannelHost;

#[async_trait]
impl Host for ClosedChannelHost {
    async fn load_font(&self, _font: &FontName) -> Result<(), HostError> {
        Ok(())
    }

    fn create_image(&self, _data: &[u8]) -> Result<ImageHash, HostError> {
        Ok(ImageHash("closed".to_string()))
    }

    fn post_message(&self, _message: PluginMessage) -> Result<(), HostError> {
        Err(HostError::Messaging("ui closed".to_string()))
    }
}

/// Host whose UI channel accepts `capacity` messages, then closes
#[derive(Debug)]
pub struct ClosingChannelHost {
    remaining: AtomicUsize,
}

impl ClosingChannelHost {
    pub fn new(capacity: usize) -> Self {
        Self {
            remaining: AtomicUsize::new(capacity),
        }
    }
}

#[async_trait]
impl Host for ClosingChannelHost {
    async fn load_font(&self, _font: &FontName) -> Result<(), HostError> {
        Ok(())
    }

    fn create_image(&self, data: &[u8]) -> Result<ImageHash, HostError> {
        Ok(mockfill_core::image_hash_of(data))
    }

    fn post_message(&self, _message: PluginMessage) -> Result<(), HostError> {
        self.remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .map(|_| ())
            .map_err(|_| HostError::Messaging("ui closed".to_string()))
    }
}
