//! Test-only builders for boards and game state.

use std::collections::{BTreeMap, BTreeSet};

use crate::domain::board::{Board, Position};
use crate::domain::cards::{Edition, Room, Suspect, Weapon};
use crate::domain::layouts::{BoardLayout, StartSpots};
use crate::domain::state::{CaseFile, GameState, Player};

/// Layout over a literal grid: basic rules (full blocking, no combo
/// rolls), no secret passages, no entrance exceptions.
pub fn corridor_layout(grid: &str) -> BoardLayout {
    BoardLayout {
        edition: Edition::Basic,
        grid: grid.to_string(),
        secret_pairs: vec![],
        entrance_exceptions: vec![],
        full_block: true,
        allow_combo_rolls: false,
        start_spots: StartSpots::Corridor(vec![]),
    }
}

/// Layout over a literal grid with the master movement flags (hop-over,
/// combo rolls) but the basic card roster for compact tests.
pub fn combo_layout(grid: &str) -> BoardLayout {
    BoardLayout {
        full_block: false,
        allow_combo_rolls: true,
        ..corridor_layout(grid)
    }
}

/// Game state over `layout` with the given seats. Hands start empty and
/// the solution is a fixed triple; tests adjust fields directly.
pub fn build_state(layout: &BoardLayout, seats: &[(Suspect, Position)]) -> GameState {
    let board = Board::from_layout(layout).expect("test layout parses");
    GameState {
        edition: layout.edition,
        board,
        players: seats
            .iter()
            .enumerate()
            .map(|(i, &(suspect, _))| Player {
                user_id: i as i64,
                suspect,
                cards: Vec::new(),
            })
            .collect(),
        positions: seats.iter().copied().collect::<BTreeMap<_, _>>(),
        eliminated: BTreeSet::new(),
        solution: CaseFile {
            suspect: Suspect::Peacock,
            weapon: Weapon::Wrench,
            room: Room::Hall,
        },
        cur_roll: 0,
        leftover_roll: 0,
        leftover_visited: BTreeSet::new(),
        accuse_count: 0,
        last_suggest_room: BTreeMap::new(),
    }
}

/// An 8x8 open corridor with `n` basic suspects seated along the bottom
/// row.
pub fn open_grid_state(n: usize) -> GameState {
    let grid = vec!["OOOOOOOO"; 8].join("\n");
    let layout = corridor_layout(&grid);
    let seats: Vec<(Suspect, Position)> = Edition::Basic
        .suspects()
        .iter()
        .take(n)
        .enumerate()
        .map(|(i, &s)| (s, Position::Cell((7, i as i16))))
        .collect();
    build_state(&layout, &seats)
}
