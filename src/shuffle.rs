// src/shuffle.rs
// Fisher-Yates shuffle used to draw the phrases placed on a card.

use rand::Rng;

/// Returns a uniformly shuffled copy of `items`, leaving the input untouched.
pub fn shuffle<T: Clone, R: Rng>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut shuffled = items.to_vec();
    for i in (1..shuffled.len()).rev() {
        let j = rng.random_range(0..=i);
        shuffled.swap(i, j);
    }
    shuffled
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_shuffle_is_a_permutation() {
        let mut rng = StdRng::seed_from_u64(7);
        let input: Vec<u32> = (0..50).collect();
        let mut output = shuffle(&input, &mut rng);
        assert_eq!(output.len(), input.len());
        output.sort();
        assert_eq!(output, input);
    }

    #[test]
    fn test_shuffle_keeps_repeated_values() {
        let mut rng = StdRng::seed_from_u64(99);
        let input = vec!["a", "b", "b", "c", "c", "c"];
        let mut output = shuffle(&input, &mut rng);
        output.sort();
        assert_eq!(output, vec!["a", "b", "b", "c", "c", "c"]);
    }

    #[test]
    fn test_shuffle_does_not_touch_input() {
        let mut rng = StdRng::seed_from_u64(1);
        let input: Vec<u32> = (0..10).collect();
        let _ = shuffle(&input, &mut rng);
        assert_eq!(input, (0..10).collect::<Vec<u32>>());
    }

    #[test]
    fn test_same_seed_same_order() {
        let input: Vec<u32> = (0..24).collect();
        let a = shuffle(&input, &mut StdRng::seed_from_u64(42));
        let b = shuffle(&input, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_small_inputs() {
        let mut rng = StdRng::seed_from_u64(3);
        let empty: Vec<u8> = Vec::new();
        assert!(shuffle(&empty, &mut rng).is_empty());
        assert_eq!(shuffle(&[5u8], &mut rng), vec![5]);
    }

    #[test]
    fn test_every_position_reachable() {
        // Each element should land in every slot at least once over many trials.
        let mut rng = StdRng::seed_from_u64(2024);
        let input: Vec<usize> = (0..5).collect();
        let mut seen = [[false; 5]; 5];
        for _ in 0..500 {
            for (slot, &value) in shuffle(&input, &mut rng).iter().enumerate() {
                seen[value][slot] = true;
            }
        }
        assert!(seen.iter().all(|row| row.iter().all(|&hit| hit)));
    }
}
