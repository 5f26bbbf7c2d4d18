//! Placeholder field tags
//!
//! A design node is a placeholder when its name is exactly one of the
//! [`FieldTag`] strings, e.g. `[data-name]`. [`FieldMap`] resolves each tag
//! to a merchant value: either fixed or a list of candidates to pick from.

use crate::merchant::Merchant;
use indexmap::IndexMap;
use std::fmt;
use std::str::FromStr;

/// Placeholder vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldTag {
    /// `[data-name]`
    Name,
    /// `[data-cuisine]`
    Cuisine,
    /// `[data-address]`
    Address,
    /// `[data-cover]`, filled with an image
    Cover,
    /// `[data-tag]`
    Tag,
    /// `[data-menu-item]`
    MenuItem,
    /// `[data-menu-description]`
    MenuDescription,
    /// `[data-menu-price]`
    MenuPrice,
}

impl FieldTag {
    /// Every tag, in matching order
    pub const ALL: [FieldTag; 8] = [
        FieldTag::Name,
        FieldTag::Cuisine,
        FieldTag::Address,
        FieldTag::Cover,
        FieldTag::Tag,
        FieldTag::MenuItem,
        FieldTag::MenuDescription,
        FieldTag::MenuPrice,
    ];

    /// Node name that marks this placeholder
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            FieldTag::Name => "[data-name]",
            FieldTag::Cuisine => "[data-cuisine]",
            FieldTag::Address => "[data-address]",
            FieldTag::Cover => "[data-cover]",
            FieldTag::Tag => "[data-tag]",
            FieldTag::MenuItem => "[data-menu-item]",
            FieldTag::MenuDescription => "[data-menu-description]",
            FieldTag::MenuPrice => "[data-menu-price]",
        }
    }

    /// Match a node name against the vocabulary
    ///
    /// Matching is exact: no trimming, no case folding.
    #[must_use]
    pub fn from_node_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tag| tag.as_str() == name)
    }

    /// Whether the value is an image URL to be painted into a rectangle
    #[inline]
    #[must_use]
    pub const fn is_image(self) -> bool {
        matches!(self, FieldTag::Cover)
    }
}

impl fmt::Display for FieldTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for names outside the vocabulary
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("not a field tag: '{0}'")]
pub struct UnknownFieldTag(pub String);

impl FromStr for FieldTag {
    type Err = UnknownFieldTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_node_name(s).ok_or_else(|| UnknownFieldTag(s.to_string()))
    }
}

/// Value bound to a tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Same value on every node
    Fixed(String),
    /// One candidate per node, chosen without immediate repeats
    Choice(Vec<String>),
}

/// Tag to value table for one merchant
#[derive(Debug, Clone, Default)]
pub struct FieldMap {
    values: IndexMap<FieldTag, FieldValue>,
}

impl FieldMap {
    /// Build the table for `merchant`
    #[must_use]
    pub fn for_merchant(merchant: &Merchant) -> Self {
        let mut values = IndexMap::with_capacity(FieldTag::ALL.len());
        values.insert(FieldTag::Name, FieldValue::Fixed(merchant.name.clone()));
        values.insert(FieldTag::Cuisine, FieldValue::Fixed(merchant.cuisine.clone()));
        values.insert(FieldTag::Address, FieldValue::Fixed(merchant.address.clone()));
        values.insert(FieldTag::Cover, FieldValue::Fixed(merchant.cover_url.clone()));
        values.insert(FieldTag::Tag, FieldValue::Choice(merchant.tags.clone()));
        values.insert(
            FieldTag::MenuItem,
            FieldValue::Choice(merchant.menu.iter().map(|item| item.name.clone()).collect()),
        );
        values.insert(
            FieldTag::MenuDescription,
            FieldValue::Choice(
                merchant
                    .menu
                    .iter()
                    .map(|item| item.description.clone())
                    .collect(),
            ),
        );
        values.insert(
            FieldTag::MenuPrice,
            FieldValue::Choice(merchant.menu.iter().map(|item| item.display_price()).collect()),
        );
        Self { values }
    }

    /// Value for `tag`
    #[inline]
    #[must_use]
    pub fn get(&self, tag: FieldTag) -> Option<&FieldValue> {
        self.values.get(&tag)
    }

    /// Override the value for `tag`
    pub fn set(&mut self, tag: FieldTag, value: FieldValue) {
        self.values.insert(tag, value);
    }

    /// Entries in tag order
    pub fn iter(&self) -> impl Iterator<Item = (FieldTag, &FieldValue)> {
        self.values.iter().map(|(tag, value)| (*tag, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use pretty_assertions::assert_eq;

    #[test]
    fn node_name_roundtrip() {
        for tag in FieldTag::ALL {
            assert_eq!(FieldTag::from_node_name(tag.as_str()), Some(tag));
        }
    }

    #[test]
    fn node_name_match_is_exact() {
        assert_eq!(FieldTag::from_node_name("[data-name] "), None);
        assert_eq!(FieldTag::from_node_name("[DATA-NAME]"), None);
        assert_eq!(FieldTag::from_node_name("data-name"), None);
        assert!("Title".parse::<FieldTag>().is_err());
    }

    #[test]
    fn only_cover_is_image() {
        let images: Vec<FieldTag> = FieldTag::ALL.into_iter().filter(|t| t.is_image()).collect();
        assert_eq!(images, vec![FieldTag::Cover]);
    }

    #[test]
    fn field_map_for_builtin_merchant() {
        let catalog = Catalog::builtin();
        let fields = FieldMap::for_merchant(catalog.get("merchant1").unwrap());

        assert_eq!(
            fields.get(FieldTag::Address),
            Some(&FieldValue::Fixed("340 Front St W, Toronto, ON M5V 3W7".to_string()))
        );
        match fields.get(FieldTag::MenuPrice) {
            Some(FieldValue::Choice(prices)) => {
                assert_eq!(prices, &vec!["$16.99", "$14.50", "$6.99", "$8.99"]);
            }
            other => panic!("unexpected price field: {other:?}"),
        }
        assert_eq!(fields.iter().count(), FieldTag::ALL.len());
    }
}
