//! Merchant records
//!
//! Serialized in camelCase because the plugin UI consumes them directly.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Merchant identifier
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MerchantId(pub String);

impl MerchantId {
    /// Borrow as `&str`
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MerchantId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for MerchantId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for MerchantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

/// Menu entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    /// Dish name
    pub name: String,
    /// Short description
    pub description: String,
    /// Price in cents
    pub price_cents: u32,
}

impl MenuItem {
    /// Create a menu item
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>, price_cents: u32) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            price_cents,
        }
    }

    /// Price formatted as dollars, e.g. `$14.50`
    #[must_use]
    pub fn display_price(&self) -> String {
        format!("${}.{:02}", self.price_cents / 100, self.price_cents % 100)
    }
}

/// Mock merchant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Merchant {
    /// Catalog key
    pub merchant_id: MerchantId,
    /// Display name
    pub name: String,
    /// Primary cuisine
    pub cuisine: String,
    /// Street address
    pub address: String,
    /// Cover image URL
    pub cover_url: String,
    /// Cuisine tags
    #[serde(default)]
    pub tags: Vec<String>,
    /// Menu entries
    #[serde(default)]
    pub menu: Vec<MenuItem>,
}

impl Merchant {
    /// Create a merchant with no tags and an empty menu
    #[must_use]
    pub fn new(
        merchant_id: impl Into<MerchantId>,
        name: impl Into<String>,
        cuisine: impl Into<String>,
        address: impl Into<String>,
        cover_url: impl Into<String>,
    ) -> Self {
        Self {
            merchant_id: merchant_id.into(),
            name: name.into(),
            cuisine: cuisine.into(),
            address: address.into(),
            cover_url: cover_url.into(),
            tags: Vec::new(),
            menu: Vec::new(),
        }
    }

    /// With cuisine tags
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// With an additional menu item
    #[must_use]
    pub fn with_menu_item(mut self, item: MenuItem) -> Self {
        self.menu.push(item);
        self
    }
}
