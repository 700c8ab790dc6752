//! Property tests for the move engine and the action gate.
//!
//! Properties tested:
//! - A straight walk conserves the roll exactly: shorter underdraws,
//!   longer overdraws, equal succeeds.
//! - Stepping back onto any visited cell always raises the revisit error.
//! - Door index `i` on a room with `k` doors is legal iff `i < k`.
//! - No action outside the legal set ever changes game state.

use proptest::prelude::*;

use crate::domain::board::{Move, MoveDirection, Position};
use crate::domain::cards::{Room, Suspect};
use crate::domain::game::Game;
use crate::domain::layouts::StartSpots;
use crate::domain::movement::{execute_move, MoveOutcome};
use crate::domain::options::Action;
use crate::domain::test_gens;
use crate::domain::test_helpers::{build_state, corridor_layout};
use crate::errors::domain::IllegalActionKind;

proptest! {
    #[test]
    fn prop_straight_walks_conserve_the_roll(
        budget in 1u8..=10,
        length in 1u8..=10,
    ) {
        let layout = corridor_layout(&"O".repeat(24));
        let mut state = build_state(&layout, &[(Suspect::Scarlet, Position::Cell((0, 0)))]);

        let result = execute_move(
            &mut state,
            Suspect::Scarlet,
            budget,
            &[Move::walk(MoveDirection::Right, length)],
        );
        match length.cmp(&budget) {
            std::cmp::Ordering::Less => {
                prop_assert_eq!(
                    result.unwrap_err().kind(),
                    Some(IllegalActionKind::RollUnderused)
                );
                prop_assert_eq!(state.positions[&Suspect::Scarlet], Position::Cell((0, 0)));
            }
            std::cmp::Ordering::Equal => {
                prop_assert_eq!(result.unwrap(), MoveOutcome::Continuing);
                prop_assert_eq!(
                    state.positions[&Suspect::Scarlet],
                    Position::Cell((0, i16::from(length)))
                );
            }
            std::cmp::Ordering::Greater => {
                prop_assert_eq!(
                    result.unwrap_err().kind(),
                    Some(IllegalActionKind::RollOverdraw)
                );
                prop_assert_eq!(state.positions[&Suspect::Scarlet], Position::Cell((0, 0)));
            }
        }
    }

    #[test]
    fn prop_turning_back_always_revisits(
        out in test_gens::small_len(),
    ) {
        let layout = corridor_layout(&"O".repeat(16));
        let mut state = build_state(&layout, &[(Suspect::Scarlet, Position::Cell((0, 0)))]);

        let err = execute_move(
            &mut state,
            Suspect::Scarlet,
            out + 2,
            &[
                Move::walk(MoveDirection::Right, out),
                Move::walk(MoveDirection::Left, 1),
            ],
        )
        .unwrap_err();
        prop_assert_eq!(err.kind(), Some(IllegalActionKind::Revisit));
        prop_assert_eq!(state.positions[&Suspect::Scarlet], Position::Cell((0, 0)));
    }

    #[test]
    fn prop_door_index_is_bounded_by_door_count(index in 0u8..8) {
        // Study has exactly two doors.
        let layout = corridor_layout("OAOAO\nOOOOO");
        let mut state =
            build_state(&layout, &[(Suspect::Scarlet, Position::Room(Room::Study))]);

        let result = execute_move(
            &mut state,
            Suspect::Scarlet,
            1,
            &[Move::door(index), Move::walk(MoveDirection::Down, 1)],
        );
        if index < 2 {
            prop_assert_eq!(result.unwrap(), MoveOutcome::Continuing);
        } else {
            prop_assert_eq!(result.unwrap_err().kind(), Some(IllegalActionKind::DoorIndex));
            prop_assert_eq!(
                state.positions[&Suspect::Scarlet],
                Position::Room(Room::Study)
            );
        }
    }

    #[test]
    fn prop_pre_start_gate_rejects_everything_but_start(
        seed in test_gens::seed(),
        action_idx in 0usize..7,
    ) {
        let grid = vec!["OOOOOOOO"; 8].join("\n");
        let mut layout = corridor_layout(&grid);
        layout.start_spots = StartSpots::Corridor(vec![
            (7, 0),
            (7, 1),
            (7, 2),
            (7, 3),
            (7, 4),
            (7, 5),
        ]);
        let mut game = Game::with_layout(&layout, seed, 2).unwrap();

        let err = match action_idx {
            0 => game.roll().unwrap_err(),
            1 => game.move_piece(&[Move::walk(MoveDirection::Up, 1)]).unwrap_err(),
            2 => game.snoop(Suspect::Mustard).unwrap_err(),
            3 => game.secret().unwrap_err(),
            4 => game
                .suggest(Suspect::Mustard, crate::domain::cards::Weapon::Rope)
                .unwrap_err(),
            5 => game
                .accuse(
                    Suspect::Mustard,
                    crate::domain::cards::Weapon::Rope,
                    Room::Hall,
                )
                .unwrap_err(),
            _ => game.end_turn().unwrap_err(),
        };
        prop_assert_eq!(err.kind(), Some(IllegalActionKind::NotAllowed));
        prop_assert_eq!(
            game.next_options(),
            std::collections::BTreeSet::from([Action::Start])
        );
    }
}
