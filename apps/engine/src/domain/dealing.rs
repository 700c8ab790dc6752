//! Solution pick, deck construction and dealing.

use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;

use crate::domain::cards::{Card, Edition};
use crate::domain::rules::MIN_PLAYERS;
use crate::domain::state::CaseFile;
use crate::errors::domain::{DomainError, IllegalActionKind};

/// Pick the hidden solution uniformly from the edition's candidates.
pub fn pick_solution(edition: Edition, rng: &mut impl Rng) -> CaseFile {
    // Rosters are compile-time non-empty, so the picks cannot fail.
    let suspect = *edition
        .suspects()
        .choose(rng)
        .expect("edition has suspects");
    let weapon = *edition.weapons().choose(rng).expect("edition has weapons");
    let room = *edition
        .solution_rooms()
        .choose(rng)
        .expect("edition has rooms");
    CaseFile {
        suspect,
        weapon,
        room,
    }
}

/// Every dealable card: the full rosters minus the three solution cards.
pub fn build_deck(edition: Edition, solution: &CaseFile) -> Vec<Card> {
    edition
        .suspects()
        .iter()
        .map(|&s| Card::Suspect(s))
        .chain(edition.weapons().iter().map(|&w| Card::Weapon(w)))
        .chain(edition.solution_rooms().iter().map(|&r| Card::Room(r)))
        .filter(|&c| !solution.contains(c))
        .collect()
}

/// Shuffle and deal the deck into `player_count` near-equal hands.
///
/// Hands are filled round-robin from the shuffled deck. When the deck does
/// not divide evenly, the order of the hands is shuffled too, so the larger
/// hands are not always front-loaded onto the first seats in turn order.
pub fn deal_hands(
    edition: Edition,
    solution: &CaseFile,
    player_count: usize,
    rng: &mut impl Rng,
) -> Result<Vec<Vec<Card>>, DomainError> {
    if player_count < MIN_PLAYERS {
        return Err(DomainError::illegal(
            IllegalActionKind::Registration,
            format!("need at least {MIN_PLAYERS} players"),
        ));
    }
    if player_count > edition.suspects().len() {
        return Err(DomainError::illegal(
            IllegalActionKind::Registration,
            format!(
                "{player_count} players exceed the {:?} roster of {}",
                edition,
                edition.suspects().len()
            ),
        ));
    }

    let mut deck = build_deck(edition, solution);
    deck.shuffle(rng);

    let mut hands: Vec<Vec<Card>> = (0..player_count)
        .map(|i| deck.iter().skip(i).step_by(player_count).copied().collect())
        .collect();
    if deck.len() % player_count != 0 {
        hands.shuffle(rng);
    }
    Ok(hands)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::domain::cards::Room;

    fn rng(seed: u64) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(seed)
    }

    #[test]
    fn solution_room_is_never_the_cloak() {
        let mut r = rng(3);
        for _ in 0..100 {
            let s = pick_solution(Edition::Master, &mut r);
            assert_ne!(s.room, Room::Cloak);
        }
    }

    #[test]
    fn deck_excludes_exactly_the_solution() {
        let mut r = rng(5);
        let solution = pick_solution(Edition::Basic, &mut r);
        let deck = build_deck(Edition::Basic, &solution);
        assert_eq!(deck.len(), 6 + 6 + 9 - 3);
        for card in solution.cards() {
            assert!(!deck.contains(&card));
        }
    }

    #[test]
    fn dealing_is_deterministic_per_seed() {
        let solution = pick_solution(Edition::Basic, &mut rng(1));
        let h1 = deal_hands(Edition::Basic, &solution, 4, &mut rng(9)).unwrap();
        let h2 = deal_hands(Edition::Basic, &solution, 4, &mut rng(9)).unwrap();
        assert_eq!(h1, h2);
    }

    #[test]
    fn dealing_covers_the_deck_without_duplicates() {
        let solution = pick_solution(Edition::Master, &mut rng(2));
        let hands = deal_hands(Edition::Master, &solution, 7, &mut rng(11)).unwrap();
        let all: Vec<_> = hands.iter().flatten().copied().collect();
        let unique: BTreeSet<_> = all.iter().copied().collect();
        assert_eq!(all.len(), 10 + 8 + 12 - 3);
        assert_eq!(all.len(), unique.len());
    }

    #[test]
    fn hand_sizes_differ_by_at_most_one() {
        let solution = pick_solution(Edition::Basic, &mut rng(4));
        for n in MIN_PLAYERS..=6 {
            let hands = deal_hands(Edition::Basic, &solution, n, &mut rng(13)).unwrap();
            let min = hands.iter().map(Vec::len).min().unwrap();
            let max = hands.iter().map(Vec::len).max().unwrap();
            assert!(max - min <= 1, "uneven deal for {n} players");
        }
    }

    #[test]
    fn player_count_is_validated() {
        let solution = pick_solution(Edition::Basic, &mut rng(6));
        assert!(deal_hands(Edition::Basic, &solution, 1, &mut rng(1)).is_err());
        assert!(deal_hands(Edition::Basic, &solution, 7, &mut rng(1)).is_err());
        assert!(deal_hands(Edition::Master, &solution, 10, &mut rng(1)).is_ok());
    }
}
