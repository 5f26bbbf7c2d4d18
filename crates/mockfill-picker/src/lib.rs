//! mockfill Picker
//!
//! Random index selection without immediate repetition.
//!
//! # Overview
//!
//! The picker crate provides:
//! - **IndexPicker**: draws indices in `[0, N)` while excluding a recent-use window
//! - **RecentWindow**: fixed-capacity FIFO of recently returned indices
//! - **CandidatePicker**: an [`IndexPicker`] bound to an owned candidate list
//!
//! # Example
//!
//! ```rust
//! use mockfill_picker::IndexPicker;
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let mut picker = IndexPicker::new(3);
//!
//! let a = picker.next(&mut rng);
//! let b = picker.next(&mut rng);
//! let c = picker.next(&mut rng);
//!
//! // Every index is used once before any repeats
//! let mut seen = vec![a, b, c];
//! seen.sort_unstable();
//! assert_eq!(seen, vec![0, 1, 2]);
//! ```

#![warn(missing_docs)]

pub mod candidate;
pub mod error;
pub mod picker;
pub mod window;

// Re-exports
pub use candidate::CandidatePicker;
pub use error::PickerError;
pub use picker::IndexPicker;
pub use window::RecentWindow;

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for picker operations
    pub use crate::{CandidatePicker, IndexPicker, PickerError, RecentWindow};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
