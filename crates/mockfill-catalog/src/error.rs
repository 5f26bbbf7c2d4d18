//! Error types for catalog lookups

use crate::merchant::MerchantId;

/// Catalog errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// No merchant registered under the id
    #[error("unknown merchant: '{0}'")]
    UnknownMerchant(MerchantId),

    /// A merchant with the same id is already registered
    #[error("duplicate merchant: '{0}'")]
    DuplicateMerchant(MerchantId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_merchant_display() {
        let err = CatalogError::UnknownMerchant(MerchantId::from("merchant9"));
        assert_eq!(err.to_string(), "unknown merchant: 'merchant9'");
    }
}
