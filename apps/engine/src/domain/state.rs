//! Game state container, sufficient for all pure engine operations.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use serde::{Deserialize, Serialize};

use crate::domain::board::{Board, Coord, Position};
use crate::domain::cards::{Card, Edition, Room, Suspect, Weapon};

/// One registered seat. The roster entry is stable for the whole game;
/// elimination removes the suspect's position, never the seat (an
/// eliminated player's hand still disproves suggestions).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Opaque external identity (e.g. a chat user id).
    pub user_id: i64,
    pub suspect: Suspect,
    pub cards: Vec<Card>,
}

/// A (suspect, weapon, room) triple: the hidden solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseFile {
    pub suspect: Suspect,
    pub weapon: Weapon,
    pub room: Room,
}

impl CaseFile {
    pub fn cards(&self) -> [Card; 3] {
        [
            Card::Suspect(self.suspect),
            Card::Weapon(self.weapon),
            Card::Room(self.room),
        ]
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards().contains(&card)
    }
}

/// Entire game container. Mutated only through the move engine, the
/// resolution helpers and the gated facade.
#[derive(Debug, Clone)]
pub struct GameState {
    pub edition: Edition,
    pub board: Board,
    /// Seat ring; the front seat is the turn holder.
    pub players: VecDeque<Player>,
    /// Token positions. No entry for eliminated players.
    pub positions: BTreeMap<Suspect, Position>,
    pub eliminated: BTreeSet<Suspect>,
    pub solution: CaseFile,
    /// Most recent dice roll for the turn holder.
    pub cur_roll: u8,
    /// Unused roll carried across a snoop suspension, 0 otherwise.
    pub leftover_roll: u8,
    /// Visited set at the moment of the snoop suspension; its room entries
    /// seed the resumed move's visited set.
    pub leftover_visited: BTreeSet<Position>,
    /// Total accusations made this game, right or wrong.
    pub accuse_count: usize,
    /// Room each player last suggested from, while they remain in it.
    pub last_suggest_room: BTreeMap<Suspect, Position>,
}

impl GameState {
    pub fn current_player(&self) -> Option<&Player> {
        self.players.front()
    }

    /// Suspect holding the turn. Callers only invoke this after `start`.
    pub fn current_suspect(&self) -> Option<Suspect> {
        self.current_player().map(|p| p.suspect)
    }

    /// Advance the seat ring to the next non-eliminated player.
    ///
    /// Also clears the leftover-roll carryover, which is transient per
    /// turn. Bounded by the seat count so a fully-eliminated table (which
    /// the action gate never lets act again) cannot spin forever.
    pub fn rotate_to_next_active(&mut self) {
        self.leftover_roll = 0;
        self.leftover_visited.clear();

        for _ in 0..self.players.len() {
            self.players.rotate_left(1);
            let front = self.players.front().expect("players present after start");
            if !self.eliminated.contains(&front.suspect) {
                return;
            }
        }
    }

    /// Corridor cells currently occupied by any token.
    pub fn occupied_cells(&self) -> BTreeSet<Coord> {
        self.positions
            .values()
            .filter_map(|p| match p {
                Position::Cell(c) => Some(*c),
                Position::Room(_) => None,
            })
            .collect()
    }

    /// Whether every hand holds the same number of cards.
    pub fn even_deal(&self) -> bool {
        let mut sizes = self.players.iter().map(|p| p.cards.len());
        match sizes.next() {
            Some(first) => sizes.all(|n| n == first),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_helpers::open_grid_state;

    #[test]
    fn rotation_skips_eliminated_players() {
        let mut state = open_grid_state(3);
        let order: Vec<Suspect> = state.players.iter().map(|p| p.suspect).collect();
        state.eliminated.insert(order[1]);
        state.positions.remove(&order[1]);

        state.rotate_to_next_active();
        assert_eq!(state.current_suspect(), Some(order[2]));
        state.rotate_to_next_active();
        assert_eq!(state.current_suspect(), Some(order[0]));
    }

    #[test]
    fn rotation_clears_leftover_state() {
        let mut state = open_grid_state(2);
        state.leftover_roll = 3;
        state
            .leftover_visited
            .insert(Position::Cell((0, 0)));
        state.rotate_to_next_active();
        assert_eq!(state.leftover_roll, 0);
        assert!(state.leftover_visited.is_empty());
    }

    #[test]
    fn even_deal_compares_hand_sizes() {
        let mut state = open_grid_state(2);
        assert!(state.even_deal());
        state.players[0].cards.push(Card::Weapon(Weapon::Rope));
        assert!(!state.even_deal());
    }
}
