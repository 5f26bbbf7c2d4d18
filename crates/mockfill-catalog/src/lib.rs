//! mockfill Catalog
//!
//! Static merchant dataset and the placeholder vocabulary used to match
//! design nodes against merchant fields.
//!
//! # Example
//!
//! ```rust
//! use mockfill_catalog::{Catalog, FieldMap, FieldTag, FieldValue};
//!
//! let catalog = Catalog::builtin();
//! let merchant = catalog.get("merchant2").unwrap();
//!
//! let fields = FieldMap::for_merchant(merchant);
//! assert_eq!(
//!     fields.get(FieldTag::Name),
//!     Some(&FieldValue::Fixed("Frozen Sushi".to_string()))
//! );
//! ```

#![warn(missing_docs)]

pub mod catalog;
pub mod error;
pub mod fields;
pub mod merchant;

// Re-exports
pub use catalog::Catalog;
pub use error::CatalogError;
pub use fields::{FieldMap, FieldTag, FieldValue, UnknownFieldTag};
pub use merchant::{MenuItem, Merchant, MerchantId};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
