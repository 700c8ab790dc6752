//! Tests for suggestion and accusation resolution.

use std::collections::BTreeSet;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::domain::board::Position;
use crate::domain::cards::{Card, Room, Suspect, Weapon};
use crate::domain::state::CaseFile;
use crate::domain::suggestion::{resolve_accusation, resolve_suggestion};
use crate::domain::test_helpers::{build_state, corridor_layout};
use crate::errors::domain::IllegalActionKind;

fn rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

#[test]
fn suggestion_requires_a_room() {
    let layout = corridor_layout("OAO\nOOO");
    let mut state = build_state(&layout, &[(Suspect::Scarlet, Position::Cell((1, 0)))]);

    let err = resolve_suggestion(&mut state, &mut rng(1), Suspect::Mustard, Weapon::Rope)
        .unwrap_err();
    assert_eq!(err.kind(), Some(IllegalActionKind::NotInRoom));
}

#[test]
fn suggested_suspect_is_called_into_the_room() {
    let layout = corridor_layout("OAO\nOOO");
    let mut state = build_state(
        &layout,
        &[
            (Suspect::Scarlet, Position::Room(Room::Study)),
            (Suspect::Mustard, Position::Cell((1, 2))),
        ],
    );

    resolve_suggestion(&mut state, &mut rng(2), Suspect::Mustard, Weapon::Rope).unwrap();
    assert_eq!(
        state.positions[&Suspect::Mustard],
        Position::Room(Room::Study)
    );
}

#[test]
fn suggesting_an_absent_suspect_moves_no_token() {
    let layout = corridor_layout("OAO\nOOO");
    let mut state = build_state(
        &layout,
        &[
            (Suspect::Scarlet, Position::Room(Room::Study)),
            (Suspect::Mustard, Position::Cell((1, 2))),
        ],
    );

    // Plum holds no token; the positions map is untouched.
    let before = state.positions.clone();
    resolve_suggestion(&mut state, &mut rng(3), Suspect::Plum, Weapon::Rope).unwrap();
    assert_eq!(state.positions, before);
}

#[test]
fn first_holder_in_turn_order_disproves() {
    let layout = corridor_layout("OAO\nOOO");
    let mut state = build_state(
        &layout,
        &[
            (Suspect::Scarlet, Position::Room(Room::Study)),
            (Suspect::Mustard, Position::Cell((1, 0))),
            (Suspect::White, Position::Cell((1, 2))),
        ],
    );
    // Mustard cannot disprove; White holds two of the suggested cards.
    state.players[1].cards = vec![Card::Weapon(Weapon::Knife)];
    state.players[2].cards = vec![
        Card::Suspect(Suspect::Plum),
        Card::Weapon(Weapon::Rope),
        Card::Room(Room::Study),
    ];

    let outcome =
        resolve_suggestion(&mut state, &mut rng(4), Suspect::Plum, Weapon::Rope).unwrap();
    let disproof = outcome.disproof.expect("someone can disprove");
    assert_eq!(disproof.suspect, Suspect::White);
    assert_eq!(
        disproof.cards,
        BTreeSet::from([
            Card::Suspect(Suspect::Plum),
            Card::Weapon(Weapon::Rope),
            Card::Room(Room::Study)
        ])
    );
}

#[test]
fn no_disproof_when_nobody_holds_the_cards() {
    let layout = corridor_layout("OAO\nOOO");
    let mut state = build_state(
        &layout,
        &[
            (Suspect::Scarlet, Position::Room(Room::Study)),
            (Suspect::Mustard, Position::Cell((1, 0))),
        ],
    );
    state.players[1].cards = vec![Card::Weapon(Weapon::Knife)];

    let outcome =
        resolve_suggestion(&mut state, &mut rng(5), Suspect::Plum, Weapon::Rope).unwrap();
    assert!(outcome.disproof.is_none());
}

#[test]
fn hint_is_one_of_the_three_pairwise_statements() {
    let layout = corridor_layout("OAO\nOOO");
    let mut state = build_state(&layout, &[(Suspect::Scarlet, Position::Room(Room::Study))]);
    // Solution is fixed by the helper: Peacock / Wrench / Hall.
    assert_eq!(
        state.solution,
        CaseFile {
            suspect: Suspect::Peacock,
            weapon: Weapon::Wrench,
            room: Room::Hall
        }
    );

    // Suggesting Peacock with the Wrench from the Study: the suspect/weapon
    // pair co-occurs in the solution, the room pairs do not.
    let expected = [
        "Mrs. Peacock DID have the Wrench.",
        "Mrs. Peacock was NOT in the Study.",
        "The Wrench was NOT in the Study.",
    ];
    for seed in 0..12 {
        let outcome =
            resolve_suggestion(&mut state, &mut rng(seed), Suspect::Peacock, Weapon::Wrench)
                .unwrap();
        assert!(
            expected.contains(&outcome.hint.as_str()),
            "unexpected hint: {}",
            outcome.hint
        );
    }
}

#[test]
fn hint_selection_is_deterministic_per_rng() {
    let layout = corridor_layout("OAO\nOOO");
    let mut state = build_state(&layout, &[(Suspect::Scarlet, Position::Room(Room::Study))]);

    let a = resolve_suggestion(&mut state, &mut rng(9), Suspect::Peacock, Weapon::Wrench)
        .unwrap();
    let b = resolve_suggestion(&mut state, &mut rng(9), Suspect::Peacock, Weapon::Wrench)
        .unwrap();
    assert_eq!(a.hint, b.hint);
}

#[test]
fn cards_outside_the_edition_are_rejected() {
    let layout = corridor_layout("OAO\nOOO");
    let mut state = build_state(&layout, &[(Suspect::Scarlet, Position::Room(Room::Study))]);

    // Master-only members in a basic game.
    let err = resolve_suggestion(&mut state, &mut rng(6), Suspect::Gray, Weapon::Rope)
        .unwrap_err();
    assert_eq!(err.kind(), Some(IllegalActionKind::UnknownCard));
    let err = resolve_suggestion(&mut state, &mut rng(6), Suspect::Plum, Weapon::Poison)
        .unwrap_err();
    assert_eq!(err.kind(), Some(IllegalActionKind::UnknownCard));
}

#[test]
fn wrong_accusation_eliminates_but_keeps_the_seat() {
    let layout = corridor_layout("OAO\nOOO");
    let mut state = build_state(
        &layout,
        &[
            (Suspect::Scarlet, Position::Cell((1, 0))),
            (Suspect::Mustard, Position::Cell((1, 2))),
        ],
    );

    let correct =
        resolve_accusation(&mut state, Suspect::Plum, Weapon::Rope, Room::Study).unwrap();
    assert!(!correct);
    assert_eq!(state.accuse_count, 1);
    assert!(state.eliminated.contains(&Suspect::Scarlet));
    assert!(!state.positions.contains_key(&Suspect::Scarlet));
    // The seat ring is untouched: the hand can still disprove later.
    assert_eq!(state.players.len(), 2);
    assert_eq!(state.players[0].suspect, Suspect::Scarlet);
}

#[test]
fn correct_accusation_reports_true_without_elimination() {
    let layout = corridor_layout("OAO\nOOO");
    let mut state = build_state(&layout, &[(Suspect::Scarlet, Position::Cell((1, 0)))]);
    let solution = state.solution;

    let correct =
        resolve_accusation(&mut state, solution.suspect, solution.weapon, solution.room)
            .unwrap();
    assert!(correct);
    assert_eq!(state.accuse_count, 1);
    assert!(state.eliminated.is_empty());
    assert!(state.positions.contains_key(&Suspect::Scarlet));
}

#[test]
fn accusing_the_cloak_room_is_rejected() {
    let mut layout = corridor_layout("OMO\nOOO");
    layout.edition = crate::domain::cards::Edition::Master;
    let mut state = build_state(&layout, &[(Suspect::Scarlet, Position::Cell((1, 0)))]);

    let err =
        resolve_accusation(&mut state, Suspect::Plum, Weapon::Rope, Room::Cloak).unwrap_err();
    assert_eq!(err.kind(), Some(IllegalActionKind::UnknownCard));
    assert_eq!(state.accuse_count, 0);
}
