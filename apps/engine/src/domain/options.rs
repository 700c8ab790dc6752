//! The per-turn legal-action state machine.
//!
//! The engine gates every state-changing operation on the set of currently
//! legal action names. `Gate` is the explicit machine state, the legal set
//! is a pure function of `(gate, game state)`, and `advance` computes the
//! next gate after an action succeeded. Failed actions never advance the
//! gate, so the caller sees an unchanged legal set after a rejection.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::board::{Board, Position};
use crate::domain::state::GameState;

/// Externally visible action names.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Action {
    Start,
    Roll,
    Move,
    Snoop,
    Secret,
    Suggest,
    Accuse,
    EndTurn,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::Start => "start",
            Action::Roll => "roll",
            Action::Move => "move",
            Action::Snoop => "snoop",
            Action::Secret => "secret",
            Action::Suggest => "suggest",
            Action::Accuse => "accuse",
            Action::EndTurn => "endturn",
        };
        f.write_str(name)
    }
}

/// State of the action gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gate {
    /// Nothing has happened yet; only `start` is legal.
    AwaitingStart,
    /// Turn holder chooses how to open their turn.
    TopOfTurn,
    /// A roll happened; the only legal action is the move that spends it.
    AwaitingMove,
    /// The move stopped on a snoop tile; the snoop must happen now.
    AwaitingSnoop,
    /// Snoop done with leftover roll remaining: resume the move or accuse.
    SnoopContinue,
    /// Snoop done with no leftover roll: accuse or end the turn.
    SnoopEnd,
    /// A room was entered; the suggestion must be made before anything else.
    SuggestOnly,
    /// Post-suggestion (or no-suggest room): accuse or end the turn.
    AccuseOrEnd,
    /// Wrong accusation with other players still able to accuse; the
    /// eliminated player may only pass the turn on.
    EndTurnOnly,
    /// Terminal: correct accusation, or every player has accused.
    GameOver,
}

/// The currently legal action set, as a pure function of gate and state.
pub fn legal_actions(gate: Gate, state: &GameState) -> BTreeSet<Action> {
    match gate {
        Gate::AwaitingStart => BTreeSet::from([Action::Start]),
        Gate::TopOfTurn => top_of_turn_actions(state),
        Gate::AwaitingMove => BTreeSet::from([Action::Move]),
        Gate::AwaitingSnoop => BTreeSet::from([Action::Snoop]),
        Gate::SnoopContinue => BTreeSet::from([Action::Move, Action::Accuse]),
        Gate::SnoopEnd => BTreeSet::from([Action::Accuse, Action::EndTurn]),
        Gate::SuggestOnly => BTreeSet::from([Action::Suggest]),
        Gate::AccuseOrEnd => BTreeSet::from([Action::Accuse, Action::EndTurn]),
        Gate::EndTurnOnly => BTreeSet::from([Action::EndTurn]),
        Gate::GameOver => BTreeSet::new(),
    }
}

fn top_of_turn_actions(state: &GameState) -> BTreeSet<Action> {
    let mut options = BTreeSet::from([Action::Roll, Action::Accuse, Action::EndTurn]);
    let Some(suspect) = state.current_suspect() else {
        return options;
    };
    if let Some(&pos) = state.positions.get(&suspect) {
        let Position::Room(room) = pos else {
            return options;
        };
        let suggested_here = state.last_suggest_room.get(&suspect) == Some(&pos);
        if state.edition.no_suggest_room() != Some(room) && !suggested_here {
            options.insert(Action::Suggest);
        }
        if state.board.secret_target(&pos).is_some() {
            options.insert(Action::Secret);
        }
        if state.board.is_blocked(room, &state.occupied_cells()) {
            options.remove(&Action::Roll);
        }
    }
    options
}

/// Next gate after `action` executed successfully under `gate`.
///
/// Also maintains the last-suggested-room bookkeeping the legal set
/// depends on, exactly where the turn flow updates it.
pub fn advance(gate: Gate, action: Action, state: &mut GameState) -> Gate {
    match (gate, action) {
        (Gate::AwaitingStart, Action::Start) => Gate::TopOfTurn,

        (Gate::TopOfTurn, Action::Roll) => {
            clear_last_suggest(state);
            Gate::AwaitingMove
        }
        (Gate::TopOfTurn, Action::Secret) => {
            clear_last_suggest(state);
            after_room_entry(state)
        }
        (Gate::TopOfTurn | Gate::SuggestOnly, Action::Suggest) => {
            record_last_suggest(state);
            Gate::AccuseOrEnd
        }

        (Gate::AwaitingMove | Gate::SnoopContinue, Action::Move) => after_move(state),

        (Gate::AwaitingSnoop, Action::Snoop) => {
            if state.leftover_roll > 0 {
                Gate::SnoopContinue
            } else {
                Gate::SnoopEnd
            }
        }

        (
            Gate::TopOfTurn
            | Gate::SnoopContinue
            | Gate::SnoopEnd
            | Gate::AccuseOrEnd,
            Action::Accuse,
        ) => after_accuse(state),

        (
            Gate::TopOfTurn | Gate::SnoopEnd | Gate::AccuseOrEnd | Gate::EndTurnOnly,
            Action::EndTurn,
        ) => Gate::TopOfTurn,

        // The facade only advances with actions from the legal set, so any
        // other pairing indicates a caller bug; hold the gate in place.
        (gate, _) => {
            debug_assert!(false, "advance called with illegal ({gate:?}, {action})");
            gate
        }
    }
}

fn clear_last_suggest(state: &mut GameState) {
    if let Some(suspect) = state.current_suspect() {
        state.last_suggest_room.remove(&suspect);
    }
}

fn record_last_suggest(state: &mut GameState) {
    let Some(suspect) = state.current_suspect() else {
        return;
    };
    let Some(&pos) = state.positions.get(&suspect) else {
        return;
    };
    state.last_suggest_room.insert(suspect, pos);
}

/// Where the turn goes after a completed move.
fn after_move(state: &mut GameState) -> Gate {
    let Some(suspect) = state.current_suspect() else {
        return Gate::TopOfTurn;
    };
    match state.positions.get(&suspect) {
        Some(Position::Cell(cell)) => {
            if state.board.tile(*cell).is_some_and(Board::is_snoop) {
                Gate::AwaitingSnoop
            } else {
                // Open ground: back to the same player's top of turn.
                Gate::TopOfTurn
            }
        }
        Some(Position::Room(_)) => after_room_entry(state),
        None => Gate::TopOfTurn,
    }
}

/// Entering a room forces the suggestion, except in the no-suggest room.
fn after_room_entry(state: &mut GameState) -> Gate {
    let Some(suspect) = state.current_suspect() else {
        return Gate::TopOfTurn;
    };
    let no_suggest = state
        .edition
        .no_suggest_room()
        .map(Position::Room);
    let pos = state.positions.get(&suspect).copied();
    if pos.is_some() && pos != no_suggest {
        Gate::SuggestOnly
    } else {
        record_last_suggest(state);
        Gate::AccuseOrEnd
    }
}

/// After any accusation: either the eliminated player hands the turn on,
/// or the game is over. The boundary is exactly
/// `accuse_count < player_count`.
fn after_accuse(state: &GameState) -> Gate {
    let eliminated = state
        .current_suspect()
        .is_some_and(|s| state.eliminated.contains(&s));
    if eliminated && state.accuse_count < state.players.len() {
        Gate::EndTurnOnly
    } else {
        Gate::GameOver
    }
}
