//! Picker Property Tests
//!
//! Repetition and distribution properties of the index picker.
//!
use mockfill_picker::prelude::*;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

proptest! {
    #[test]
    fn prop_no_repeat_within_full_cycle(
        size in 1..24usize,
        draws in 0..96usize,
        seed in any::<u64>(),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut picker = IndexPicker::new(size);
        let sequence: Vec<usize> = (0..draws).map(|_| picker.next(&mut rng)).collect();

        for (i, index) in sequence.iter().enumerate() {
            prop_assert!(*index < size);
            let start = i.saturating_sub(size - 1);
            // calls fewer than `size` apart never agree
            prop_assert!(!sequence[start..i].contains(index));
        }
    }

    #[test]
    fn prop_no_repeat_within_custom_window(
        size in 1..24usize,
        window in 1..24usize,
        draws in 0..96usize,
        seed in any::<u64>(),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut picker = IndexPicker::with_window(size, window);
        let span = window.min(size);
        let sequence: Vec<usize> = (0..draws).map(|_| picker.next(&mut rng)).collect();

        for (i, index) in sequence.iter().enumerate() {
            let start = i.saturating_sub(span - 1);
            prop_assert!(!sequence[start..i].contains(index));
        }
    }

    #[test]
    fn prop_window_never_exceeds_capacity(
        size in 0..16usize,
        draws in 0..64usize,
        seed in any::<u64>(),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut picker = IndexPicker::new(size);

        for _ in 0..draws {
            picker.next(&mut rng);
            prop_assert!(picker.window().len() <= size);
        }
    }
}

#[test]
fn test_single_candidate_always_zero() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut picker = IndexPicker::new(1);

    assert!((0..100).all(|_| picker.next(&mut rng) == 0));
}

#[test]
fn test_empty_candidate_set_sentinel() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut picker = IndexPicker::new(0);

    assert_eq!(picker.next(&mut rng), 0);
    assert_eq!(picker.try_next(&mut rng), Err(PickerError::EmptyCandidateSet));
}

#[test]
fn test_long_run_frequency_is_uniform() {
    const SIZE: usize = 5;
    const DRAWS: usize = 50_000;

    let mut rng = StdRng::seed_from_u64(2024);
    let mut picker = IndexPicker::new(SIZE);
    let mut counts = [0usize; SIZE];

    for _ in 0..DRAWS {
        counts[picker.next(&mut rng)] += 1;
    }

    for count in counts {
        let frequency = count as f64 / DRAWS as f64;
        assert!(
            (frequency - 0.2).abs() < 0.01,
            "frequency {frequency} too far from 1/5"
        );
    }
}

#[test]
fn test_short_window_frequency_is_uniform() {
    const SIZE: usize = 5;
    const DRAWS: usize = 50_000;

    let mut rng = StdRng::seed_from_u64(77);
    let mut picker = IndexPicker::with_window(SIZE, 2);
    let mut counts = [0usize; SIZE];

    for _ in 0..DRAWS {
        counts[picker.next(&mut rng)] += 1;
    }

    for count in counts {
        let frequency = count as f64 / DRAWS as f64;
        assert!((frequency - 0.2).abs() < 0.02);
    }
}
