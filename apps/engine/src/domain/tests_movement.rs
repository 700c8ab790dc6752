//! Scenario tests for the move engine.

use crate::domain::board::{Move, MoveDirection, Position};
use crate::domain::cards::{Room, Suspect};
use crate::domain::movement::{execute_move, MoveOutcome};
use crate::domain::test_helpers::{build_state, combo_layout, corridor_layout};
use crate::errors::domain::IllegalActionKind;

fn walk(direction: MoveDirection, length: u8) -> Move {
    Move::walk(direction, length)
}

use MoveDirection::{Down, Left, Right, Up};

#[test]
fn two_steps_into_a_room() {
    engine_test_support::logging::init();
    let layout = corridor_layout("OOA\nOOO\nOOO");
    let mut state = build_state(&layout, &[(Suspect::Scarlet, Position::Cell((0, 0)))]);

    let outcome =
        execute_move(&mut state, Suspect::Scarlet, 2, &[walk(Right, 1), walk(Right, 1)]).unwrap();
    assert_eq!(outcome, MoveOutcome::EnteredRoom(Room::Study));
    assert_eq!(
        state.positions[&Suspect::Scarlet],
        Position::Room(Room::Study)
    );
}

#[test]
fn overdrawn_roll_is_rejected_without_mutation() {
    let layout = corridor_layout("OOA\nOOO\nOOO");
    let mut state = build_state(&layout, &[(Suspect::Scarlet, Position::Cell((0, 0)))]);

    let err = execute_move(&mut state, Suspect::Scarlet, 1, &[walk(Right, 2)]).unwrap_err();
    assert_eq!(err.kind(), Some(IllegalActionKind::RollOverdraw));
    assert_eq!(err.to_string().contains("too many moves"), true);
    assert_eq!(state.positions[&Suspect::Scarlet], Position::Cell((0, 0)));
    assert_eq!(state.leftover_roll, 0);
}

#[test]
fn entering_a_room_discards_unused_roll() {
    let layout = corridor_layout("OOA\nOOO\nOOO");
    let mut state = build_state(&layout, &[(Suspect::Scarlet, Position::Cell((0, 0)))]);

    let outcome = execute_move(&mut state, Suspect::Scarlet, 5, &[walk(Right, 2)]).unwrap();
    assert_eq!(outcome, MoveOutcome::EnteredRoom(Room::Study));
}

#[test]
fn exact_roll_on_open_ground_continues() {
    let layout = corridor_layout("OOOOOO");
    let mut state = build_state(&layout, &[(Suspect::Scarlet, Position::Cell((0, 0)))]);

    let outcome = execute_move(&mut state, Suspect::Scarlet, 3, &[walk(Right, 3)]).unwrap();
    assert_eq!(outcome, MoveOutcome::Continuing);
    assert_eq!(state.positions[&Suspect::Scarlet], Position::Cell((0, 3)));
}

#[test]
fn underused_roll_is_rejected() {
    let layout = corridor_layout("OOOOOO");
    let mut state = build_state(&layout, &[(Suspect::Scarlet, Position::Cell((0, 0)))]);

    let err = execute_move(&mut state, Suspect::Scarlet, 3, &[walk(Right, 2)]).unwrap_err();
    assert_eq!(err.kind(), Some(IllegalActionKind::RollUnderused));
    assert_eq!(state.positions[&Suspect::Scarlet], Position::Cell((0, 0)));
}

#[test]
fn revisiting_a_cell_is_rejected() {
    let layout = corridor_layout("OOOOOO");
    let mut state = build_state(&layout, &[(Suspect::Scarlet, Position::Cell((0, 0)))]);

    let err = execute_move(
        &mut state,
        Suspect::Scarlet,
        4,
        &[walk(Right, 2), walk(Left, 1)],
    )
    .unwrap_err();
    assert_eq!(err.kind(), Some(IllegalActionKind::Revisit));
}

#[test]
fn stepping_off_the_grid_is_rejected() {
    let layout = corridor_layout("OOO\nOOO");
    let mut state = build_state(&layout, &[(Suspect::Scarlet, Position::Cell((0, 0)))]);

    for m in [walk(Up, 1), walk(Left, 1)] {
        let err = execute_move(&mut state, Suspect::Scarlet, 1, &[m]).unwrap_err();
        assert_eq!(err.kind(), Some(IllegalActionKind::OutOfBounds));
    }
}

#[test]
fn stepping_into_room_wall_is_rejected() {
    let layout = corridor_layout("OrO\nOOO");
    let mut state = build_state(&layout, &[(Suspect::Scarlet, Position::Cell((0, 0)))]);

    let err = execute_move(&mut state, Suspect::Scarlet, 1, &[walk(Right, 1)]).unwrap_err();
    assert_eq!(err.kind(), Some(IllegalActionKind::IntoRoom));
    assert!(err.to_string().contains("into a room"));
}

#[test]
fn stepping_onto_interior_slot_is_rejected() {
    let layout = corridor_layout("OaO\nOOO");
    let mut state = build_state(&layout, &[(Suspect::Scarlet, Position::Cell((0, 0)))]);

    let err = execute_move(&mut state, Suspect::Scarlet, 1, &[walk(Right, 1)]).unwrap_err();
    assert_eq!(err.kind(), Some(IllegalActionKind::OutOfBounds));
}

#[test]
fn occupied_cell_blocks_on_full_block_boards() {
    let layout = corridor_layout("OOOO");
    let mut state = build_state(
        &layout,
        &[
            (Suspect::Scarlet, Position::Cell((0, 0))),
            (Suspect::Mustard, Position::Cell((0, 1))),
        ],
    );

    let err = execute_move(&mut state, Suspect::Scarlet, 2, &[walk(Right, 2)]).unwrap_err();
    assert_eq!(err.kind(), Some(IllegalActionKind::Occupied));
}

#[test]
fn occupied_cell_can_be_hopped_over_without_full_block() {
    let layout = combo_layout("OOOO");
    let mut state = build_state(
        &layout,
        &[
            (Suspect::Scarlet, Position::Cell((0, 0))),
            (Suspect::Mustard, Position::Cell((0, 1))),
        ],
    );

    let outcome = execute_move(&mut state, Suspect::Scarlet, 2, &[walk(Right, 2)]).unwrap();
    assert_eq!(outcome, MoveOutcome::Continuing);
    assert_eq!(state.positions[&Suspect::Scarlet], Position::Cell((0, 2)));
}

#[test]
fn landing_on_occupied_cell_with_spent_roll_is_rejected() {
    let layout = combo_layout("OOOO");
    let mut state = build_state(
        &layout,
        &[
            (Suspect::Scarlet, Position::Cell((0, 0))),
            (Suspect::Mustard, Position::Cell((0, 1))),
        ],
    );

    let err = execute_move(&mut state, Suspect::Scarlet, 1, &[walk(Right, 1)]).unwrap_err();
    assert_eq!(err.kind(), Some(IllegalActionKind::Occupied));
}

#[test]
fn sliding_tiles_carry_the_step_for_one_unit() {
    let layout = corridor_layout("OssOO");
    let mut state = build_state(&layout, &[(Suspect::Scarlet, Position::Cell((0, 0)))]);

    let outcome = execute_move(&mut state, Suspect::Scarlet, 1, &[walk(Right, 1)]).unwrap();
    assert_eq!(outcome, MoveOutcome::Continuing);
    assert_eq!(state.positions[&Suspect::Scarlet], Position::Cell((0, 3)));
}

#[test]
fn sliding_into_an_entrance_enters_the_room() {
    let layout = corridor_layout("OssAO");
    let mut state = build_state(&layout, &[(Suspect::Scarlet, Position::Cell((0, 0)))]);

    let outcome = execute_move(&mut state, Suspect::Scarlet, 1, &[walk(Right, 1)]).unwrap();
    assert_eq!(outcome, MoveOutcome::EnteredRoom(Room::Study));
}

#[test]
fn door_selector_rules() {
    // Study has doors at (0,1) and (0,3).
    let layout = corridor_layout("OAOAO\nOOOOO");
    let in_study = [(Suspect::Scarlet, Position::Room(Room::Study))];

    let mut state = build_state(&layout, &in_study);
    let err = execute_move(&mut state, Suspect::Scarlet, 2, &[Move::door(0)]).unwrap_err();
    assert_eq!(err.kind(), Some(IllegalActionKind::DoorAtEnd));

    let mut state = build_state(&layout, &in_study);
    let err =
        execute_move(&mut state, Suspect::Scarlet, 2, &[Move::door(0), Move::door(1)]).unwrap_err();
    assert_eq!(err.kind(), Some(IllegalActionKind::DoorSequence));

    let mut state = build_state(&layout, &in_study);
    let err = execute_move(&mut state, Suspect::Scarlet, 2, &[Move::door(0), Move::secret()])
        .unwrap_err();
    assert_eq!(err.kind(), Some(IllegalActionKind::DoorSequence));

    let mut state = build_state(&layout, &in_study);
    let err = execute_move(
        &mut state,
        Suspect::Scarlet,
        2,
        &[Move::door(5), walk(Down, 1)],
    )
    .unwrap_err();
    assert_eq!(err.kind(), Some(IllegalActionKind::DoorIndex));
    assert!(err.to_string().contains("does not have that many doors"));

    let mut state = build_state(&layout, &in_study);
    let err = execute_move(&mut state, Suspect::Scarlet, 2, &[walk(Up, 1)]).unwrap_err();
    assert_eq!(err.kind(), Some(IllegalActionKind::WrongMoveInRoom));

    // Door index 1 exits at (0,3); one step down consumes the roll.
    let mut state = build_state(&layout, &in_study);
    let outcome = execute_move(
        &mut state,
        Suspect::Scarlet,
        1,
        &[Move::door(1), walk(Down, 1)],
    )
    .unwrap();
    assert_eq!(outcome, MoveOutcome::Continuing);
    assert_eq!(state.positions[&Suspect::Scarlet], Position::Cell((1, 3)));
}

#[test]
fn door_exit_against_entrance_exception_is_rejected() {
    let mut layout = corridor_layout("OAOAO\nOOOOO");
    layout.entrance_exceptions = vec![(Room::Study, MoveDirection::Up)];
    let mut state = build_state(&layout, &[(Suspect::Scarlet, Position::Room(Room::Study))]);

    // Stepping down off the door retraces the forbidden upward entry.
    let err = execute_move(
        &mut state,
        Suspect::Scarlet,
        1,
        &[Move::door(0), walk(Down, 1)],
    )
    .unwrap_err();
    assert_eq!(err.kind(), Some(IllegalActionKind::IllegalExit));

    // Sideways exit stays legal.
    let outcome = execute_move(
        &mut state,
        Suspect::Scarlet,
        1,
        &[Move::door(0), walk(Right, 1)],
    )
    .unwrap();
    assert_eq!(outcome, MoveOutcome::Continuing);
}

#[test]
fn walking_entry_against_entrance_exception_is_rejected() {
    let mut layout = corridor_layout("OOA\nOOO");
    layout.entrance_exceptions = vec![(Room::Study, MoveDirection::Right)];
    let mut state = build_state(&layout, &[(Suspect::Scarlet, Position::Cell((0, 0)))]);

    let err = execute_move(&mut state, Suspect::Scarlet, 2, &[walk(Right, 2)]).unwrap_err();
    assert_eq!(err.kind(), Some(IllegalActionKind::IllegalEntrance));

    // The same room accepts entry from below.
    let mut state = build_state(&layout, &[(Suspect::Scarlet, Position::Cell((1, 2)))]);
    let outcome = execute_move(&mut state, Suspect::Scarlet, 1, &[walk(Up, 1)]).unwrap();
    assert_eq!(outcome, MoveOutcome::EnteredRoom(Room::Study));
}

#[test]
fn terminal_secret_enters_the_paired_room() {
    let mut layout = corridor_layout("OOO");
    layout.secret_pairs = vec![(Position::Room(Room::Study), Position::Room(Room::Lounge))];
    let mut state = build_state(&layout, &[(Suspect::Scarlet, Position::Room(Room::Study))]);

    let outcome = execute_move(&mut state, Suspect::Scarlet, 1, &[Move::secret()]).unwrap();
    assert_eq!(outcome, MoveOutcome::EnteredRoom(Room::Lounge));
    assert_eq!(
        state.positions[&Suspect::Scarlet],
        Position::Room(Room::Lounge)
    );
}

#[test]
fn secret_without_passage_is_rejected() {
    let layout = corridor_layout("OOO");
    let mut state = build_state(&layout, &[(Suspect::Scarlet, Position::Cell((0, 0)))]);

    let err = execute_move(&mut state, Suspect::Scarlet, 1, &[Move::secret()]).unwrap_err();
    assert_eq!(err.kind(), Some(IllegalActionKind::NoSecretPassage));
}

#[test]
fn secret_must_be_sole_move_without_combo_rolls() {
    let mut layout = corridor_layout("OOO");
    layout.secret_pairs = vec![(Position::Room(Room::Study), Position::Room(Room::Lounge))];
    let mut state = build_state(&layout, &[(Suspect::Scarlet, Position::Room(Room::Study))]);

    let err = execute_move(
        &mut state,
        Suspect::Scarlet,
        2,
        &[Move::secret(), walk(Right, 1)],
    )
    .unwrap_err();
    assert_eq!(err.kind(), Some(IllegalActionKind::SecretNotSole));
}

#[test]
fn corridor_secret_passage_between_cells() {
    let mut layout = combo_layout("OOOO");
    layout.secret_pairs = vec![(Position::Cell((0, 0)), Position::Cell((0, 3)))];
    let mut state = build_state(&layout, &[(Suspect::Scarlet, Position::Cell((0, 0)))]);

    let outcome = execute_move(&mut state, Suspect::Scarlet, 1, &[Move::secret()]).unwrap();
    assert_eq!(outcome, MoveOutcome::Continuing);
    assert_eq!(state.positions[&Suspect::Scarlet], Position::Cell((0, 3)));
}

#[test]
fn combo_secret_cannot_return_to_visited_ground() {
    let mut layout = combo_layout("OOO");
    layout.secret_pairs = vec![(Position::Cell((0, 0)), Position::Cell((0, 2)))];
    let mut state = build_state(&layout, &[(Suspect::Scarlet, Position::Cell((0, 0)))]);

    let err = execute_move(
        &mut state,
        Suspect::Scarlet,
        3,
        &[Move::secret(), walk(Left, 2)],
    )
    .unwrap_err();
    assert_eq!(err.kind(), Some(IllegalActionKind::Revisit));
}

#[test]
fn combo_roll_chains_rooms_for_one_unit_each() {
    // Study door at (0,1), Hall door at (0,3).
    let layout = combo_layout("OAOBO\nOOOOO");
    let mut state = build_state(&layout, &[(Suspect::Scarlet, Position::Cell((0, 0)))]);

    // Enter Study (1), exit its door (1), step onward (1).
    let outcome = execute_move(
        &mut state,
        Suspect::Scarlet,
        3,
        &[walk(Right, 1), Move::door(0), walk(Right, 1)],
    )
    .unwrap();
    assert_eq!(outcome, MoveOutcome::Continuing);
    assert_eq!(state.positions[&Suspect::Scarlet], Position::Cell((0, 2)));
}

#[test]
fn starting_room_cannot_be_reentered() {
    // Study has doors at (0,1) and (1,1).
    let layout = combo_layout("OAOBO\nOAOOO\nOOOOO");
    let mut state = build_state(&layout, &[(Suspect::Scarlet, Position::Room(Room::Study))]);

    let err = execute_move(
        &mut state,
        Suspect::Scarlet,
        5,
        &[Move::door(0), walk(Down, 1)],
    )
    .unwrap_err();
    assert_eq!(err.kind(), Some(IllegalActionKind::Revisit));
    assert!(err.to_string().contains("including starting room"));
}

#[test]
fn room_entered_mid_combo_cannot_be_reentered() {
    let layout = combo_layout("OAOBO\nOAOOO\nOOOOO");
    let mut state = build_state(&layout, &[(Suspect::Scarlet, Position::Cell((2, 0)))]);

    // Enter Study through its (1,1) door, leave through the (0,1) door,
    // sidestep onto fresh ground, then step back onto (0,1): every cell on
    // the way is fresh, but the room itself is already visited.
    let err = execute_move(
        &mut state,
        Suspect::Scarlet,
        6,
        &[
            walk(Up, 1),
            walk(Right, 1),
            Move::door(0),
            walk(Left, 1),
            walk(Right, 1),
        ],
    )
    .unwrap_err();
    assert_eq!(err.kind(), Some(IllegalActionKind::Revisit));
    assert!(err.to_string().contains("room"));
}

#[test]
fn snoop_tile_suspends_with_leftover() {
    let layout = combo_layout("OXOOOO\nOOOOOO");
    let mut state = build_state(&layout, &[(Suspect::Scarlet, Position::Cell((0, 0)))]);

    let outcome = execute_move(&mut state, Suspect::Scarlet, 3, &[walk(Right, 3)]).unwrap();
    assert_eq!(outcome, MoveOutcome::SuspendedOnSnoop);
    assert_eq!(state.positions[&Suspect::Scarlet], Position::Cell((0, 1)));
    assert_eq!(state.leftover_roll, 2);
    assert!(state.leftover_visited.contains(&Position::Cell((0, 1))));
}

#[test]
fn leftover_resume_resets_cell_visits() {
    let layout = combo_layout("OXOOOO\nOOOOOO");
    let mut state = build_state(&layout, &[(Suspect::Scarlet, Position::Cell((0, 0)))]);
    execute_move(&mut state, Suspect::Scarlet, 3, &[walk(Right, 3)]).unwrap();

    // The pre-snoop cells are traversable again on the leftover roll.
    let leftover_roll = state.leftover_roll;
    let outcome = execute_move(
        &mut state,
        Suspect::Scarlet,
        leftover_roll,
        &[walk(Left, 1), walk(Down, 1)],
    )
    .unwrap();
    assert_eq!(outcome, MoveOutcome::Continuing);
    assert_eq!(state.positions[&Suspect::Scarlet], Position::Cell((1, 0)));
    assert_eq!(state.leftover_roll, 0);
    assert!(state.leftover_visited.is_empty());
}

#[test]
fn leftover_resume_keeps_rooms_off_limits() {
    let mut layout = combo_layout("OOA\nOOO");
    layout.secret_pairs = vec![];
    let mut state = build_state(&layout, &[(Suspect::Scarlet, Position::Cell((0, 0)))]);
    state.leftover_roll = 2;
    state.leftover_visited.insert(Position::Room(Room::Study));

    let err = execute_move(&mut state, Suspect::Scarlet, 2, &[walk(Right, 2)]).unwrap_err();
    assert_eq!(err.kind(), Some(IllegalActionKind::Revisit));
}

#[test]
fn snoop_tile_with_roll_to_spare_still_suspends() {
    let layout = combo_layout("OOXO");
    let mut state = build_state(&layout, &[(Suspect::Scarlet, Position::Cell((0, 0)))]);

    let outcome = execute_move(&mut state, Suspect::Scarlet, 5, &[walk(Right, 2)]).unwrap();
    assert_eq!(outcome, MoveOutcome::SuspendedOnSnoop);
    assert_eq!(state.leftover_roll, 3);
}

#[test]
fn occupied_snoop_tile_with_spent_roll_is_rejected() {
    let layout = combo_layout("OXOO");
    let mut state = build_state(
        &layout,
        &[
            (Suspect::Scarlet, Position::Cell((0, 0))),
            (Suspect::Mustard, Position::Cell((0, 1))),
        ],
    );

    let err = execute_move(&mut state, Suspect::Scarlet, 1, &[walk(Right, 1)]).unwrap_err();
    assert_eq!(err.kind(), Some(IllegalActionKind::Occupied));
}

#[test]
fn failed_move_leaves_leftover_state_intact() {
    let layout = combo_layout("OXOOOO\nOOOOOO");
    let mut state = build_state(&layout, &[(Suspect::Scarlet, Position::Cell((0, 0)))]);
    execute_move(&mut state, Suspect::Scarlet, 3, &[walk(Right, 3)]).unwrap();
    let leftover = state.leftover_roll;

    let err = execute_move(&mut state, Suspect::Scarlet, leftover, &[walk(Right, 9)]).unwrap_err();
    assert_eq!(err.kind(), Some(IllegalActionKind::RollOverdraw));
    assert_eq!(state.leftover_roll, leftover);
    assert_eq!(state.positions[&Suspect::Scarlet], Position::Cell((0, 1)));
}

#[test]
fn unregistered_player_cannot_move() {
    let layout = corridor_layout("OOO");
    let mut state = build_state(&layout, &[(Suspect::Scarlet, Position::Cell((0, 0)))]);

    let err = execute_move(&mut state, Suspect::Plum, 1, &[walk(Right, 1)]).unwrap_err();
    assert_eq!(err.kind(), Some(IllegalActionKind::UnknownPlayer));
}

#[test]
fn empty_move_list_is_rejected() {
    let layout = corridor_layout("OOO");
    let mut state = build_state(&layout, &[(Suspect::Scarlet, Position::Cell((0, 0)))]);

    let err = execute_move(&mut state, Suspect::Scarlet, 1, &[]).unwrap_err();
    assert_eq!(err.kind(), Some(IllegalActionKind::EmptyMoveList));
}
