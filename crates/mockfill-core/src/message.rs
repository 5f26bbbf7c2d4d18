//! UI message protocol
//!
//! JSON objects with a snake_case `type` discriminator, exchanged with the
//! plugin UI through the host.

use crate::error::PluginResult;
use crate::pending::RequestId;
use mockfill_catalog::{Merchant, MerchantId};
use serde::{Deserialize, Serialize};

/// Message sent by the UI to the plugin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UiMessage {
    /// Ask for the merchant list
    GetMerchants,

    /// Fill the current selection with a merchant
    PopulateMerchantNode {
        /// Merchant to use
        #[serde(rename = "merchantId")]
        merchant_id: MerchantId,
    },

    /// Image bytes for an earlier download request
    OnImageDataResponse {
        /// Request id from the matching `download_image`
        #[serde(rename = "nodeId")]
        node_id: RequestId,
        /// Encoded image
        data: Vec<u8>,
    },
}

impl UiMessage {
    /// Decode a JSON message
    ///
    /// # Errors
    /// Returns [`crate::PluginError::MalformedMessage`] on invalid JSON or an unknown type
    pub fn from_json(raw: &str) -> PluginResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Wire name of the message type
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            UiMessage::GetMerchants => "get_merchants",
            UiMessage::PopulateMerchantNode { .. } => "populate_merchant_node",
            UiMessage::OnImageDataResponse { .. } => "on_image_data_response",
        }
    }
}

/// Message sent by the plugin to the UI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PluginMessage {
    /// Catalog listing
    MerchantsResponse {
        /// Merchants in catalog order
        merchants: Vec<Merchant>,
    },

    /// Ask the UI to download an image
    DownloadImage {
        /// Id to echo back in `on_image_data_response`
        #[serde(rename = "nodeId")]
        node_id: RequestId,
        /// Image location
        url: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn decodes_ui_messages() {
        assert_eq!(
            UiMessage::from_json(r#"{"type":"get_merchants"}"#).unwrap(),
            UiMessage::GetMerchants
        );
        assert_eq!(
            UiMessage::from_json(r#"{"type":"populate_merchant_node","merchantId":"merchant2"}"#)
                .unwrap(),
            UiMessage::PopulateMerchantNode {
                merchant_id: MerchantId::from("merchant2")
            }
        );
        assert_eq!(
            UiMessage::from_json(r#"{"type":"on_image_data_response","nodeId":3,"data":[137,80]}"#)
                .unwrap(),
            UiMessage::OnImageDataResponse {
                node_id: RequestId(3),
                data: vec![137, 80]
            }
        );
    }

    #[test]
    fn rejects_unknown_type() {
        assert!(UiMessage::from_json(r#"{"type":"close"}"#).is_err());
        assert!(UiMessage::from_json("not json").is_err());
    }

    #[test]
    fn encodes_download_request() {
        let message = PluginMessage::DownloadImage {
            node_id: RequestId(0),
            url: "https://img".to_string(),
        };

        assert_eq!(
            serde_json::to_value(&message).unwrap(),
            serde_json::json!({ "type": "download_image", "nodeId": 0, "url": "https://img" })
        );
    }

    #[test]
    fn kind_matches_wire_name() {
        let message = UiMessage::OnImageDataResponse {
            node_id: RequestId(1),
            data: Vec::new(),
        };
        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(value["type"], message.kind());
    }
}
