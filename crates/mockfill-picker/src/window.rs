//! Recent-use window
//!
//! Provides [`RecentWindow`], a ring buffer of indices with O(1) membership.
//! Both buffers are allocated once when the window is created.

/// Bounded FIFO of recently returned indices
///
/// Indices must be smaller than the `universe` given at construction.
/// Each index appears at most once.
#[derive(Debug, Clone)]
pub struct RecentWindow {
    /// Ring storage, oldest entry at `head`
    slots: Box<[usize]>,

    /// Membership flags indexed by candidate index
    present: Box<[bool]>,

    head: usize,
    len: usize,
}

impl RecentWindow {
    /// Create an empty window holding at most `capacity` of `universe` indices
    ///
    /// `capacity` is clamped to `universe`.
    #[must_use]
    pub fn new(capacity: usize, universe: usize) -> Self {
        Self {
            slots: vec![0; capacity.min(universe)].into_boxed_slice(),
            present: vec![false; universe].into_boxed_slice(),
            head: 0,
            len: 0,
        }
    }

    /// Maximum number of entries
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Current number of entries
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the window holds no entries
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether the window has reached its capacity
    #[inline]
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.len >= self.slots.len()
    }

    /// Whether `index` is currently in the window
    #[inline]
    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.present.get(index).copied().unwrap_or(false)
    }

    /// Append `index` as the newest entry
    ///
    /// Returns `false` and leaves the window unchanged when the window is
    /// full, the index is already present, or it lies outside the universe.
    pub fn push(&mut self, index: usize) -> bool {
        if self.is_full() || index >= self.present.len() || self.present[index] {
            return false;
        }
        let tail = (self.head + self.len) % self.slots.len();
        self.slots[tail] = index;
        self.present[index] = true;
        self.len += 1;
        true
    }

    /// Remove and return the oldest entry
    pub fn evict_oldest(&mut self) -> Option<usize> {
        if self.len == 0 {
            return None;
        }
        let oldest = self.slots[self.head];
        self.present[oldest] = false;
        self.head = (self.head + 1) % self.slots.len();
        self.len -= 1;
        Some(oldest)
    }

    /// Entries from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.len).map(move |offset| self.slots[(self.head + offset) % self.slots.len()])
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        while self.evict_oldest().is_some() {}
        self.head = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_contains() {
        let mut window = RecentWindow::new(3, 5);
        assert!(window.is_empty());

        assert!(window.push(4));
        assert!(window.push(1));

        assert!(window.contains(4));
        assert!(window.contains(1));
        assert!(!window.contains(0));
        assert_eq!(window.len(), 2);
    }

    #[test]
    fn rejects_duplicates_and_out_of_range() {
        let mut window = RecentWindow::new(3, 3);
        assert!(window.push(2));
        assert!(!window.push(2));
        assert!(!window.push(3));
        assert_eq!(window.len(), 1);
    }

    #[test]
    fn rejects_push_when_full() {
        let mut window = RecentWindow::new(2, 4);
        assert!(window.push(0));
        assert!(window.push(1));
        assert!(window.is_full());
        assert!(!window.push(2));
    }

    #[test]
    fn evicts_in_fifo_order_across_wraparound() {
        let mut window = RecentWindow::new(3, 6);
        window.push(0);
        window.push(1);
        window.push(2);

        assert_eq!(window.evict_oldest(), Some(0));
        assert!(window.push(5));
        assert_eq!(window.iter().collect::<Vec<_>>(), vec![1, 2, 5]);

        assert_eq!(window.evict_oldest(), Some(1));
        assert_eq!(window.evict_oldest(), Some(2));
        assert!(!window.contains(1));
        assert_eq!(window.iter().collect::<Vec<_>>(), vec![5]);
    }

    #[test]
    fn capacity_clamped_to_universe() {
        let window = RecentWindow::new(10, 4);
        assert_eq!(window.capacity(), 4);
    }

    #[test]
    fn zero_universe_is_always_full() {
        let mut window = RecentWindow::new(0, 0);
        assert!(window.is_full());
        assert!(!window.push(0));
        assert_eq!(window.evict_oldest(), None);
    }

    #[test]
    fn clear_resets_membership() {
        let mut window = RecentWindow::new(2, 2);
        window.push(0);
        window.push(1);
        window.clear();

        assert!(window.is_empty());
        assert!(!window.contains(0));
        assert!(window.push(1));
    }
}
