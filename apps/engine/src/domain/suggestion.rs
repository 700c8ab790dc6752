//! Suggestion and accusation resolution.

use std::collections::BTreeSet;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::domain::board::Position;
use crate::domain::cards::{Card, Room, Suspect, Weapon};
use crate::domain::state::{CaseFile, GameState};
use crate::errors::domain::{DomainError, IllegalActionKind};

/// The first player able to disprove a suggestion, with the matching cards
/// from their hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Disproof {
    pub user_id: i64,
    pub suspect: Suspect,
    pub cards: BTreeSet<Card>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionOutcome {
    /// A randomly picked true/false statement about one pair of the
    /// suggested triple, phrased for direct display.
    pub hint: String,
    /// `None` when nobody can disprove the suggestion.
    pub disproof: Option<Disproof>,
}

/// Resolve a suggestion for the turn holder.
///
/// The suggested room is always the room the turn holder stands in; a
/// suggested suspect that is a live token is moved into that room.
pub fn resolve_suggestion(
    state: &mut GameState,
    rng: &mut impl Rng,
    suspect: Suspect,
    weapon: Weapon,
) -> Result<SuggestionOutcome, DomainError> {
    if !state.edition.suspects().contains(&suspect) {
        return Err(unknown_card(suspect.name()));
    }
    if !state.edition.weapons().contains(&weapon) {
        return Err(unknown_card(weapon.name()));
    }

    let current = require_current(state)?;
    let Some(Position::Room(room)) = state.positions.get(&current).copied() else {
        return Err(DomainError::illegal(
            IllegalActionKind::NotInRoom,
            "cannot suggest outside a room",
        ));
    };

    // The suggested suspect is called into the room.
    if state.positions.contains_key(&suspect) {
        state.positions.insert(suspect, Position::Room(room));
    }

    let hint = pick_hint(&state.solution, suspect, weapon, room, rng);

    let triple = [
        Card::Suspect(suspect),
        Card::Weapon(weapon),
        Card::Room(room),
    ];
    let disproof = state
        .players
        .iter()
        .skip(1)
        .find_map(|p| {
            let cards: BTreeSet<Card> = p
                .cards
                .iter()
                .copied()
                .filter(|c| triple.contains(c))
                .collect();
            if cards.is_empty() {
                None
            } else {
                Some(Disproof {
                    user_id: p.user_id,
                    suspect: p.suspect,
                    cards,
                })
            }
        });

    Ok(SuggestionOutcome { hint, disproof })
}

/// Resolve an accusation for the turn holder. A wrong accusation removes
/// the accuser's token and marks them eliminated; their seat (and hand)
/// stays in the ring.
pub fn resolve_accusation(
    state: &mut GameState,
    suspect: Suspect,
    weapon: Weapon,
    room: Room,
) -> Result<bool, DomainError> {
    if !state.edition.suspects().contains(&suspect) {
        return Err(unknown_card(suspect.name()));
    }
    if !state.edition.weapons().contains(&weapon) {
        return Err(unknown_card(weapon.name()));
    }
    if !state.edition.solution_rooms().contains(&room) {
        return Err(unknown_card(room.name()));
    }

    let current = require_current(state)?;
    state.accuse_count += 1;

    let correct = state.solution
        == CaseFile {
            suspect,
            weapon,
            room,
        };
    if !correct {
        state.positions.remove(&current);
        state.eliminated.insert(current);
    }
    Ok(correct)
}

/// One of the three pairwise combinations of the suggested triple,
/// reported for or against the hidden solution. The verb is uppercased
/// when the statement is affirmative.
fn pick_hint(
    solution: &CaseFile,
    suspect: Suspect,
    weapon: Weapon,
    room: Room,
    rng: &mut impl Rng,
) -> String {
    let pairs = [
        (Card::Suspect(suspect), Card::Weapon(weapon)),
        (Card::Suspect(suspect), Card::Room(room)),
        (Card::Weapon(weapon), Card::Room(room)),
    ];
    let (first, second) = pairs[rng.random_range(0..pairs.len())];
    let truth = solution.contains(first) && solution.contains(second);

    let (verb, afterverb) = match (first, second) {
        (Card::Suspect(_), Card::Weapon(_)) => ("did", "have"),
        _ => ("was", "in"),
    };
    let lead = if matches!(first, Card::Weapon(_)) {
        "The "
    } else {
        ""
    };
    let verb = if truth {
        verb.to_uppercase()
    } else {
        verb.to_string()
    };
    let negation = if truth { " " } else { " NOT " };
    format!("{lead}{first} {verb}{negation}{afterverb} the {second}.")
}

fn require_current(state: &GameState) -> Result<Suspect, DomainError> {
    state.current_suspect().ok_or_else(|| {
        DomainError::illegal(IllegalActionKind::NotStarted, "game has not started")
    })
}

fn unknown_card(name: &str) -> DomainError {
    DomainError::illegal(
        IllegalActionKind::UnknownCard,
        format!("{name} is not part of this edition"),
    )
}
