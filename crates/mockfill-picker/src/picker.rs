//! Non-repeating random index picker
//!
//! [`IndexPicker`] draws uniformly from `[0, N)` but never returns an index
//! that is still in its recent-use window. With the default window the
//! picker cycles through every index before any of them repeats.

use crate::error::{PickerError, PickerResult};
use crate::window::RecentWindow;
use rand::Rng;

/// Index picker over a candidate set of fixed size
///
/// The window is evicted before each draw once it is full, so at least one
/// index is always available and the rejection loop terminates.
#[derive(Debug, Clone)]
pub struct IndexPicker {
    size: usize,
    window: RecentWindow,
}

impl IndexPicker {
    /// Create a picker over `size` candidates with a window of `size`
    #[inline]
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self::with_window(size, size)
    }

    /// Create a picker with an explicit window capacity
    ///
    /// The capacity is clamped to `size`. A capacity of zero selects `size`.
    #[must_use]
    pub fn with_window(size: usize, window: usize) -> Self {
        let capacity = if window == 0 { size } else { window.min(size) };
        Self {
            size,
            window: RecentWindow::new(capacity, size),
        }
    }

    /// Number of candidates
    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether the candidate set is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Recent-use window
    #[inline]
    #[must_use]
    pub fn window(&self) -> &RecentWindow {
        &self.window
    }

    /// Draw the next index
    ///
    /// Returns 0 for an empty candidate set. Callers that index into a
    /// candidate list must check for emptiness first, or use
    /// [`try_next`](Self::try_next).
    pub fn next<R: Rng + ?Sized>(&mut self, rng: &mut R) -> usize {
        if self.size == 0 {
            return 0;
        }

        self.make_room();
        debug_assert!(self.window.len() < self.size);

        loop {
            let candidate = rng.random_range(0..self.size);
            if !self.window.contains(candidate) {
                self.window.push(candidate);
                return candidate;
            }
        }
    }

    /// Evict the oldest entry of a full window so a draw can succeed
    fn make_room(&mut self) {
        if self.window.is_full() {
            self.window.evict_oldest();
        }
    }

    /// Draw the next index, failing on an empty candidate set
    ///
    /// # Errors
    /// Returns [`PickerError::EmptyCandidateSet`] when the picker has no candidates
    pub fn try_next<R: Rng + ?Sized>(&mut self, rng: &mut R) -> PickerResult<usize> {
        if self.size == 0 {
            return Err(PickerError::EmptyCandidateSet);
        }
        Ok(self.next(rng))
    }

    /// Forget every recently returned index
    pub fn reset(&mut self) {
        self.window.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn empty_picker_returns_zero() {
        let mut rng = rng();
        let mut picker = IndexPicker::new(0);

        for _ in 0..5 {
            assert_eq!(picker.next(&mut rng), 0);
        }
        assert!(picker.window().is_empty());
    }

    #[test]
    fn empty_picker_try_next_fails() {
        let mut rng = rng();
        let mut picker = IndexPicker::new(0);

        assert_eq!(picker.try_next(&mut rng), Err(PickerError::EmptyCandidateSet));
    }

    #[test]
    fn single_candidate_always_zero() {
        let mut rng = rng();
        let mut picker = IndexPicker::new(1);

        for _ in 0..20 {
            assert_eq!(picker.next(&mut rng), 0);
        }
    }

    #[test]
    fn first_cycle_is_a_permutation() {
        let mut rng = rng();
        let mut picker = IndexPicker::new(6);

        let mut drawn: Vec<usize> = (0..6).map(|_| picker.next(&mut rng)).collect();
        drawn.sort_unstable();
        assert_eq!(drawn, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn window_stays_below_size_before_draw() {
        let mut rng = rng();

        for (size, window) in [(1, 0), (4, 0), (4, 4), (6, 3), (3, 9)] {
            let mut picker = IndexPicker::with_window(size, window);
            for _ in 0..40 {
                picker.make_room();
                assert!(
                    picker.window().len() < size,
                    "size {size} window {window}: {} entries before draw",
                    picker.window().len()
                );
                picker.next(&mut rng);
                assert!(picker.window().len() <= size);
            }
        }
    }

    #[test]
    fn returned_index_was_not_in_window() {
        let mut rng = rng();
        let mut picker = IndexPicker::with_window(8, 5);

        for _ in 0..200 {
            let mut excluded: Vec<usize> = picker.window().iter().collect();
            if picker.window().is_full() {
                excluded.remove(0);
            }
            let index = picker.next(&mut rng);
            assert!(!excluded.contains(&index));
        }
    }

    #[test]
    fn window_capacity_clamped() {
        assert_eq!(IndexPicker::with_window(3, 10).window().capacity(), 3);
        assert_eq!(IndexPicker::with_window(3, 0).window().capacity(), 3);
        assert_eq!(IndexPicker::with_window(9, 2).window().capacity(), 2);
    }

    #[test]
    fn reset_clears_history() {
        let mut rng = rng();
        let mut picker = IndexPicker::new(3);
        picker.next(&mut rng);
        picker.next(&mut rng);

        picker.reset();
        assert!(picker.window().is_empty());
    }

    #[test]
    fn seeded_sequences_are_reproducible() {
        let mut a = IndexPicker::new(7);
        let mut b = IndexPicker::new(7);
        let mut rng_a = StdRng::seed_from_u64(9);
        let mut rng_b = StdRng::seed_from_u64(9);

        let seq_a: Vec<usize> = (0..30).map(|_| a.next(&mut rng_a)).collect();
        let seq_b: Vec<usize> = (0..30).map(|_| b.next(&mut rng_b)).collect();
        assert_eq!(seq_a, seq_b);
    }
}
