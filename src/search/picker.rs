//! Uniform random selection of one search result.

use rand::Rng;

/// Returns one element of `items`, chosen uniformly at random.
///
/// # Panics
///
/// Panics if `items` is empty. Callers guard against empty result sets before
/// picking, so an empty slice here is a bug rather than a runtime condition.
///
/// # Examples
///
/// ```
/// use jiffy::search::pick;
/// use rand::SeedableRng;
///
/// let mut rng = rand::rngs::StdRng::seed_from_u64(7);
/// let picked = pick(&["a", "b", "c"], &mut rng);
/// assert!(["a", "b", "c"].contains(picked));
/// ```
pub fn pick<'a, T, R: Rng + ?Sized>(items: &'a [T], rng: &mut R) -> &'a T {
    assert!(!items.is_empty(), "pick requires a non-empty slice");
    &items[rng.gen_range(0..items.len())]
}

/// [`pick`] using the thread-local random source.
///
/// # Panics
///
/// Panics if `items` is empty.
pub fn pick_random<T>(items: &[T]) -> &T {
    pick(items, &mut rand::thread_rng())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn picked_element_is_a_member() {
        let items = vec![10, 20, 30, 40, 50];
        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            assert!(items.contains(pick(&items, &mut rng)));
        }
    }

    #[test]
    fn single_element_is_always_picked() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(*pick(&["only"], &mut rng), "only");
    }

    #[test]
    fn every_position_gets_picked() {
        let items = ["a", "b", "c"];
        let mut counts = [0_usize; 3];
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..3000 {
            let picked = pick(&items, &mut rng);
            let idx = items.iter().position(|i| i == picked).unwrap();
            counts[idx] += 1;
        }

        for count in counts {
            assert!(count > 800, "distribution skewed: {counts:?}");
        }
    }

    #[test]
    fn input_is_left_untouched() {
        let items = vec!["x".to_string(), "y".to_string()];
        let before = items.clone();
        let _ = pick_random(&items);
        assert_eq!(items, before);
    }

    #[test]
    #[should_panic(expected = "non-empty")]
    fn empty_slice_is_a_programming_error() {
        let empty: [u8; 0] = [];
        let _ = pick_random(&empty);
    }
}
