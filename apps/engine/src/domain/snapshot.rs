//! Read-only views for external collaborators.
//!
//! The chat layer renders turn prompts from `GameSnapshot`; the rendering
//! collaborator composes the board frame from `BoardView`. Both carry only
//! plain values so nothing engine-internal leaks outward.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::domain::board::{Board, Coord, Position};
use crate::domain::cards::{Edition, Room, Suspect};
use crate::domain::options::Action;
use crate::domain::state::GameState;

/// Public info about one seat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatView {
    pub user_id: i64,
    pub suspect: Suspect,
    pub hand_size: usize,
    pub eliminated: bool,
}

/// Turn-facing view of the whole game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub edition: Edition,
    /// Turn holder, `None` before the game starts.
    pub current: Option<Suspect>,
    /// Currently legal action names.
    pub options: BTreeSet<Action>,
    pub positions: BTreeMap<Suspect, Position>,
    pub seats: Vec<SeatView>,
    pub accuse_count: usize,
}

pub fn game_snapshot(state: &GameState, options: BTreeSet<Action>) -> GameSnapshot {
    GameSnapshot {
        edition: state.edition,
        current: state.current_suspect(),
        options,
        positions: state.positions.clone(),
        seats: state
            .players
            .iter()
            .map(|p| SeatView {
                user_id: p.user_id,
                suspect: p.suspect,
                hand_size: p.cards.len(),
                eliminated: state.eliminated.contains(&p.suspect),
            })
            .collect(),
        accuse_count: state.accuse_count,
    }
}

/// A room's doors in index order. The label is the letter players use to
/// pick a door ('a' is door index 0).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoorView {
    pub room: Room,
    pub doors: Vec<(char, Coord)>,
}

/// Geometry a renderer needs: dimensions, labeled doors, interior slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardView {
    pub rows: usize,
    pub cols: usize,
    pub doors: Vec<DoorView>,
    pub room_slots: BTreeMap<Room, Vec<Coord>>,
}

pub fn board_view(board: &Board, edition: Edition) -> BoardView {
    BoardView {
        rows: board.rows(),
        cols: board.cols(),
        doors: edition
            .rooms()
            .iter()
            .map(|&room| DoorView {
                room,
                doors: ('a'..='z')
                    .zip(board.doors(room).iter().copied())
                    .collect(),
            })
            .collect(),
        room_slots: edition
            .rooms()
            .iter()
            .map(|&room| (room, board.room_slots(room).to_vec()))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::layouts::basic_layout;

    #[test]
    fn board_view_labels_doors_in_index_order() {
        let board = Board::from_layout(&basic_layout()).unwrap();
        let view = board_view(&board, Edition::Basic);
        let study = view
            .doors
            .iter()
            .find(|d| d.room == Room::Study)
            .expect("study present");
        assert_eq!(study.doors, vec![('a', (2, 6)), ('b', (3, 3))]);
    }

    #[test]
    fn snapshot_serializes() {
        let board = Board::from_layout(&basic_layout()).unwrap();
        let view = board_view(&board, Edition::Basic);
        let json = serde_json::to_string(&view).unwrap();
        let back: BoardView = serde_json::from_str(&json).unwrap();
        assert_eq!(view, back);
    }
}
