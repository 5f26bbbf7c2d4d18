//! Candidate-bound picker
//!
//! [`CandidatePicker`] owns a list of values and hands out references to them
//! in non-repeating random order.

use crate::error::PickerResult;
use crate::picker::IndexPicker;
use rand::Rng;

/// Picker bound to an owned candidate list
#[derive(Debug, Clone)]
pub struct CandidatePicker<T> {
    candidates: Vec<T>,
    picker: IndexPicker,
}

impl<T> CandidatePicker<T> {
    /// Create a picker whose window spans the whole candidate list
    #[must_use]
    pub fn new(candidates: impl Into<Vec<T>>) -> Self {
        let candidates = candidates.into();
        let picker = IndexPicker::new(candidates.len());
        Self { candidates, picker }
    }

    /// Create a picker with an explicit window capacity
    ///
    /// See [`IndexPicker::with_window`] for clamping rules.
    #[must_use]
    pub fn with_window(candidates: impl Into<Vec<T>>, window: usize) -> Self {
        let candidates = candidates.into();
        let picker = IndexPicker::with_window(candidates.len(), window);
        Self { candidates, picker }
    }

    /// Pick the next candidate
    ///
    /// # Errors
    /// Returns [`crate::PickerError::EmptyCandidateSet`] when there are no candidates
    pub fn pick<R: Rng + ?Sized>(&mut self, rng: &mut R) -> PickerResult<&T> {
        let index = self.picker.try_next(rng)?;
        Ok(&self.candidates[index])
    }

    /// Candidate list
    #[inline]
    #[must_use]
    pub fn candidates(&self) -> &[T] {
        &self.candidates
    }

    /// Number of candidates
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Whether there are no candidates
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}
