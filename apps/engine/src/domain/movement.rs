//! The move engine.
//!
//! Validates an ordered list of move primitives against a roll budget and
//! commits the resulting position only when the whole sequence is legal.
//! Validation runs against immutable state and produces a `MoveCommit`;
//! `execute_move` applies it, so a rejected sequence can never leave a
//! partial position behind. The one deliberate partial exit is stopping on
//! a snoop tile, which stores the unused roll and visited set for the
//! resumed move after the snoop.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::board::{Board, Move, MoveDirection, Position};
use crate::domain::cards::{Room, Suspect};
use crate::domain::state::GameState;
use crate::errors::domain::{DomainError, IllegalActionKind};

/// How a successfully executed move ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveOutcome {
    /// The move ended by entering a room; unused roll is discarded.
    EnteredRoom(Room),
    /// The move stopped on a snoop tile. Unused roll is stored as the
    /// leftover for the move resumed after the snoop.
    SuspendedOnSnoop,
    /// The move consumed the whole roll on open ground.
    Continuing,
}

struct MoveCommit {
    final_pos: Position,
    leftover: Option<(u8, BTreeSet<Position>)>,
    outcome: MoveOutcome,
}

/// Validate and execute a move sequence for `player` with `budget` roll
/// units. The budget is the stored leftover when resuming after a snoop,
/// otherwise the current dice roll; the caller picks.
pub fn execute_move(
    state: &mut GameState,
    player: Suspect,
    budget: u8,
    moves: &[Move],
) -> Result<MoveOutcome, DomainError> {
    let commit = validate(state, player, budget, moves)?;

    state.positions.insert(player, commit.final_pos);
    match commit.leftover {
        Some((roll, visited)) => {
            state.leftover_roll = roll;
            state.leftover_visited = visited;
        }
        None => {
            state.leftover_roll = 0;
            state.leftover_visited.clear();
        }
    }
    Ok(commit.outcome)
}

fn validate(
    state: &GameState,
    player: Suspect,
    budget: u8,
    moves: &[Move],
) -> Result<MoveCommit, DomainError> {
    let board = &state.board;

    let Some(&start) = state.positions.get(&player) else {
        return Err(DomainError::illegal(
            IllegalActionKind::UnknownPlayer,
            format!("{player} is not in this game"),
        ));
    };
    if moves.is_empty() {
        return Err(DomainError::illegal(
            IllegalActionKind::EmptyMoveList,
            "must have at least one move",
        ));
    }

    let mut visited: BTreeSet<Position> = BTreeSet::new();
    visited.insert(start);
    // Resuming a leftover roll: rooms visited before the snoop stay off
    // limits; cells become traversable again.
    if state.leftover_roll > 0 {
        visited.extend(
            state
                .leftover_visited
                .iter()
                .copied()
                .filter(|p| matches!(p, Position::Room(_))),
        );
    }

    let other_cells: BTreeSet<_> = state
        .positions
        .iter()
        .filter(|&(&s, _)| s != player)
        .filter_map(|(_, p)| match p {
            Position::Cell(c) => Some(*c),
            Position::Room(_) => None,
        })
        .collect();

    let mut roll = i32::from(budget);
    let mut current = start;
    let mut pending: Option<(u8, BTreeSet<Position>)> = None;
    let mut idx = 0;

    'sequence: while idx < moves.len() {
        if roll <= 0 {
            return Err(DomainError::illegal(
                IllegalActionKind::RollOverdraw,
                "too many moves for this roll",
            ));
        }
        let m = moves[idx];
        idx += 1;
        let remaining = &moves[idx..];

        match (m.direction, current) {
            (MoveDirection::Secret, _) => {
                if !board.allow_combo_rolls() && !remaining.is_empty() {
                    return Err(DomainError::illegal(
                        IllegalActionKind::SecretNotSole,
                        "'secret' must be the only move",
                    ));
                }
                let Some(dest) = board.secret_target(&current) else {
                    return Err(DomainError::illegal(
                        IllegalActionKind::NoSecretPassage,
                        "this position does not have a secret passage",
                    ));
                };
                current = dest;
                if !remaining.is_empty() {
                    if visited.contains(&current) {
                        return Err(revisit_space());
                    }
                } else if matches!(current, Position::Room(_)) {
                    // Terminal secret into a room: no roll conservation.
                    break 'sequence;
                }
                roll -= 1;
                visited.insert(current);
            }
            (MoveDirection::Door, Position::Room(room)) => {
                let Some(next) = remaining.first() else {
                    return Err(DomainError::illegal(
                        IllegalActionKind::DoorAtEnd,
                        "cannot end a move at a door",
                    ));
                };
                if matches!(
                    next.direction,
                    MoveDirection::Door | MoveDirection::Secret
                ) {
                    return Err(DomainError::illegal(
                        IllegalActionKind::DoorSequence,
                        "must move out of a door",
                    ));
                }
                // Chained room exits each cost one roll unit; leaving the
                // room the move started in is free.
                if board.allow_combo_rolls() && current != start {
                    roll -= 1;
                }
                let Some(&door_cell) = board.doors(room).get(m.length as usize) else {
                    return Err(DomainError::illegal(
                        IllegalActionKind::DoorIndex,
                        format!("{room} does not have that many doors"),
                    ));
                };
                current = Position::Cell(door_cell);
                if let Some(rev) = next.direction.reverse() {
                    if board.entrance_exceptions().contains(&(room, rev)) {
                        return Err(DomainError::illegal(
                            IllegalActionKind::IllegalExit,
                            format!("illegal move out of {room}"),
                        ));
                    }
                }
            }
            (_, Position::Room(_)) => {
                return Err(DomainError::illegal(
                    IllegalActionKind::WrongMoveInRoom,
                    "must do secret or door (if multiple) in room",
                ));
            }
            (dir, Position::Cell(cell_at_entry)) => {
                let mut cell = cell_at_entry;
                for _ in 0..m.length {
                    cell = dir.translate(cell);
                    // Sliding tiles carry the step onward for free.
                    while board.tile(cell) == Some('s') {
                        cell = dir.translate(cell);
                    }
                    let Some(tile) = board.tile(cell) else {
                        return Err(DomainError::illegal(
                            IllegalActionKind::OutOfBounds,
                            "illegal move out of bounds",
                        ));
                    };
                    current = Position::Cell(cell);
                    if visited.contains(&current) {
                        return Err(revisit_space());
                    }
                    visited.insert(current);

                    if let Some(room) = board.entrance_room(tile) {
                        if board.entrance_exceptions().contains(&(room, dir)) {
                            return Err(DomainError::illegal(
                                IllegalActionKind::IllegalEntrance,
                                format!("illegal move into {room}"),
                            ));
                        }
                        if visited.contains(&Position::Room(room)) {
                            return Err(DomainError::illegal(
                                IllegalActionKind::Revisit,
                                "cannot traverse a particular room more than once in a \
                                 roll (including starting room)",
                            ));
                        }
                        current = Position::Room(room);
                        if !board.allow_combo_rolls() || remaining.is_empty() {
                            // Turn-ending room entry: the entering step must
                            // still be affordable; any roll beyond it is lost.
                            if roll <= 0 {
                                return Err(DomainError::illegal(
                                    IllegalActionKind::RollOverdraw,
                                    "too many moves for this roll",
                                ));
                            }
                            break 'sequence;
                        }
                        roll -= 1;
                        if roll < 0 {
                            return Err(DomainError::illegal(
                                IllegalActionKind::RollOverdraw,
                                "too many moves for this roll",
                            ));
                        }
                        visited.insert(current);
                        break;
                    } else if Board::is_walkable(tile) {
                        roll -= 1;
                        if roll < 0 {
                            return Err(DomainError::illegal(
                                IllegalActionKind::RollOverdraw,
                                "too many moves for this roll",
                            ));
                        }
                        if other_cells.contains(&cell) {
                            if roll == 0 || board.full_block() {
                                return Err(DomainError::illegal(
                                    IllegalActionKind::Occupied,
                                    "illegal move into another player's position",
                                ));
                            }
                        } else if Board::is_snoop(tile) {
                            // Snoop stop: remember the unused roll and the
                            // visited set, then suspend this primitive.
                            pending = Some((roll as u8, visited.clone()));
                            break;
                        }
                    } else {
                        let whereabouts = if tile == 'r' {
                            ("into a room", IllegalActionKind::IntoRoom)
                        } else {
                            ("out of bounds", IllegalActionKind::OutOfBounds)
                        };
                        return Err(DomainError::illegal(
                            whereabouts.1,
                            format!("illegal move {}", whereabouts.0),
                        ));
                    }
                }
            }
        }
    }

    // Roll conservation only applies when the move ends on a corridor cell.
    if let Position::Cell(cell) = current {
        if roll < 0 {
            return Err(DomainError::illegal(
                IllegalActionKind::RollOverdraw,
                "too many moves for this roll",
            ));
        }
        let on_snoop = board.tile(cell).is_some_and(Board::is_snoop);
        if roll > 0 && !on_snoop {
            return Err(DomainError::illegal(
                IllegalActionKind::RollUnderused,
                "roll not fully used up",
            ));
        }
    }

    let outcome = match current {
        Position::Room(room) => MoveOutcome::EnteredRoom(room),
        Position::Cell(cell) if board.tile(cell).is_some_and(Board::is_snoop) => {
            MoveOutcome::SuspendedOnSnoop
        }
        Position::Cell(_) => MoveOutcome::Continuing,
    };

    let leftover = match outcome {
        MoveOutcome::SuspendedOnSnoop => pending,
        _ => None,
    };

    Ok(MoveCommit {
        final_pos: current,
        leftover,
        outcome,
    })
}

fn revisit_space() -> DomainError {
    DomainError::illegal(
        IllegalActionKind::Revisit,
        "cannot traverse a particular space or room more than once in a roll",
    )
}
