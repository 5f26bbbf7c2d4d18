//! Merchant catalog
//!
//! Provides [`Catalog`], an insertion-ordered merchant table, and the
//! built-in dataset shipped with the plugin.

use crate::error::CatalogError;
use crate::merchant::{MenuItem, Merchant, MerchantId};
use indexmap::IndexMap;

/// Insertion-ordered merchant table
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    merchants: IndexMap<MerchantId, Merchant>,
}

impl Catalog {
    /// Create empty catalog
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a merchant
    ///
    /// # Errors
    /// Returns [`CatalogError::DuplicateMerchant`] if the id is taken
    pub fn insert(&mut self, merchant: Merchant) -> Result<(), CatalogError> {
        if self.merchants.contains_key(&merchant.merchant_id) {
            return Err(CatalogError::DuplicateMerchant(merchant.merchant_id));
        }
        self.merchants.insert(merchant.merchant_id.clone(), merchant);
        Ok(())
    }

    /// Look up a merchant by id
    ///
    /// # Errors
    /// Returns [`CatalogError::UnknownMerchant`] if no merchant has the id
    pub fn get(&self, id: &str) -> Result<&Merchant, CatalogError> {
        self.merchants
            .get(&MerchantId::from(id))
            .ok_or_else(|| CatalogError::UnknownMerchant(MerchantId::from(id)))
    }

    /// Merchants in registration order
    pub fn merchants(&self) -> impl Iterator<Item = &Merchant> {
        self.merchants.values()
    }

    /// Number of merchants
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.merchants.len()
    }

    /// Whether the catalog is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.merchants.is_empty()
    }

    /// Dataset bundled with the plugin
    #[must_use]
    pub fn builtin() -> Self {
        let merchants = [
            Merchant::new(
                "merchant1",
                "Pizza Pizza my dude",
                "Pizza",
                "340 Front St W, Toronto, ON M5V 3W7",
                "https://images.unsplash.com/photo-1565299624946-b28f40a0ae38?ixid=MnwxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8&ixlib=rb-1.2.1&auto=format&fit=crop&w=781&q=80",
            )
            .with_tags(["Pizza", "Italian", "Late night", "Comfort food"])
            .with_menu_item(MenuItem::new(
                "Pepperoni Classic",
                "Tomato sauce, mozzarella and a double layer of pepperoni",
                1699,
            ))
            .with_menu_item(MenuItem::new(
                "Margherita",
                "San Marzano tomatoes, fresh basil, fior di latte",
                1450,
            ))
            .with_menu_item(MenuItem::new(
                "Garlic Knots",
                "Six knots brushed with garlic butter and parmesan",
                699,
            ))
            .with_menu_item(MenuItem::new(
                "Caesar Salad",
                "Romaine, croutons, bacon bits and house dressing",
                899,
            )),
            Merchant::new(
                "merchant2",
                "Frozen Sushi",
                "japanese",
                "409 Richmond St W, Toronto, ON M5V 1X2",
                "https://images.unsplash.com/photo-1579871494447-9811cf80d66c?ixlib=rb-1.2.1&ixid=MnwxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8&auto=format&fit=crop&w=1170&q=80",
            )
            .with_tags(["Japanese", "Sushi", "Healthy", "Seafood"])
            .with_menu_item(MenuItem::new(
                "Salmon Nigiri",
                "Two pieces of Atlantic salmon over seasoned rice",
                650,
            ))
            .with_menu_item(MenuItem::new(
                "Dragon Roll",
                "Shrimp tempura and cucumber topped with avocado and eel sauce",
                1495,
            ))
            .with_menu_item(MenuItem::new(
                "Miso Soup",
                "Tofu, wakame and scallions in dashi broth",
                395,
            ))
            .with_menu_item(MenuItem::new(
                "Spicy Tuna Roll",
                "Tuna, sriracha mayo and tempura crunch",
                1150,
            )),
            Merchant::new(
                "merchant3",
                "Frasheee",
                "Salad",
                "310 Richmond St W, Toronto, ON M5V 1X2",
                "https://images.unsplash.com/photo-1607532941433-304659e8198a?ixid=MnwxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8&ixlib=rb-1.2.1&auto=format&fit=crop&w=1078&q=80",
            )
            .with_tags(["Salad", "Vegetarian", "Healthy", "Bowls"])
            .with_menu_item(MenuItem::new(
                "Harvest Bowl",
                "Roasted squash, kale, quinoa and maple tahini",
                1295,
            ))
            .with_menu_item(MenuItem::new(
                "Greek Salad",
                "Cucumber, tomato, olives, feta and oregano vinaigrette",
                1150,
            ))
            .with_menu_item(MenuItem::new(
                "Avocado Toast",
                "Sourdough, smashed avocado, chili flakes and lime",
                975,
            )),
        ];

        Self {
            merchants: merchants
                .into_iter()
                .map(|merchant| (merchant.merchant_id.clone(), merchant))
                .collect(),
        }
    }
}
