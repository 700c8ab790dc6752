//! Fixed rule constants and dice.

use rand::Rng;

pub const DIE_SIDES: u8 = 6;
pub const DEFAULT_DIE_COUNT: u8 = 2;
pub const MIN_PLAYERS: usize = 2;

/// Sum of `die_count` six-sided dice.
pub fn roll_dice(die_count: u8, rng: &mut impl Rng) -> u8 {
    (0..die_count).map(|_| rng.random_range(1..=DIE_SIDES)).sum()
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn rolls_stay_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..200 {
            let r = roll_dice(2, &mut rng);
            assert!((2..=12).contains(&r), "roll {r} out of range");
        }
    }

    #[test]
    fn rolls_are_deterministic_per_seed() {
        let mut a = ChaCha8Rng::seed_from_u64(42);
        let mut b = ChaCha8Rng::seed_from_u64(42);
        let ra: Vec<u8> = (0..20).map(|_| roll_dice(2, &mut a)).collect();
        let rb: Vec<u8> = (0..20).map(|_| roll_dice(2, &mut b)).collect();
        assert_eq!(ra, rb);
    }
}
