//! Tests for the legal-action state machine and the gated facade.

use std::collections::BTreeSet;

use crate::domain::board::{Move, MoveDirection, Position};
use crate::domain::cards::{Edition, Room, Suspect, Weapon};
use crate::domain::game::{Game, TurnOrder};
use crate::domain::layouts::StartSpots;
use crate::domain::movement::MoveOutcome;
use crate::domain::options::{advance, legal_actions, Action, Gate};
use crate::domain::test_helpers::{build_state, combo_layout, corridor_layout};
use crate::errors::domain::IllegalActionKind;

fn actions(list: &[Action]) -> BTreeSet<Action> {
    list.iter().copied().collect()
}

fn open_grid_game() -> Game {
    let grid = vec!["OOOOOOOOOOOOOOOO"; 8].join("\n");
    let mut layout = corridor_layout(&grid);
    layout.start_spots = StartSpots::Corridor(vec![
        (7, 0),
        (7, 2),
        (7, 4),
        (7, 6),
        (7, 8),
        (7, 10),
    ]);
    Game::with_layout(&layout, 4242, 2).unwrap()
}

fn two_player_start(game: &mut Game) {
    game.start(
        &[(10, Suspect::Scarlet), (20, Suspect::Mustard)],
        TurnOrder::Standard,
        false,
    )
    .unwrap();
}

/// Spend the whole roll on the open grid without revisiting a cell.
fn spend_roll(game: &mut Game, roll: u8) {
    let up = roll.min(7);
    let mut moves = vec![Move::walk(MoveDirection::Up, up)];
    if roll > 7 {
        moves.push(Move::walk(MoveDirection::Right, roll - 7));
    }
    assert_eq!(game.move_piece(&moves).unwrap(), MoveOutcome::Continuing);
}

#[test]
fn only_start_is_legal_initially() {
    engine_test_support::logging::init();
    let game = open_grid_game();
    assert_eq!(game.next_options(), actions(&[Action::Start]));
}

#[test]
fn actions_outside_the_legal_set_are_rejected_without_state_change() {
    let mut game = open_grid_game();
    let before = game.snapshot();

    assert_eq!(
        game.roll().unwrap_err().kind(),
        Some(IllegalActionKind::NotAllowed)
    );
    assert_eq!(
        game.end_turn().unwrap_err().kind(),
        Some(IllegalActionKind::NotAllowed)
    );
    assert_eq!(
        game.suggest(Suspect::Scarlet, Weapon::Rope).unwrap_err().kind(),
        Some(IllegalActionKind::NotAllowed)
    );
    assert_eq!(game.snapshot(), before);
}

#[test]
fn start_leads_to_top_of_turn() {
    let mut game = open_grid_game();
    two_player_start(&mut game);

    assert_eq!(
        game.current_player().map(|p| p.suspect),
        Some(Suspect::Scarlet)
    );
    assert_eq!(
        game.next_options(),
        actions(&[Action::Roll, Action::Accuse, Action::EndTurn])
    );
    // Starting twice is not an option.
    assert_eq!(
        game.start(&[(1, Suspect::Scarlet), (2, Suspect::Mustard)], TurnOrder::Standard, false)
            .unwrap_err()
            .kind(),
        Some(IllegalActionKind::NotAllowed)
    );
}

#[test]
fn start_validates_registrations() {
    let mut game = open_grid_game();
    let err = game
        .start(
            &[(1, Suspect::Scarlet), (2, Suspect::Scarlet)],
            TurnOrder::Standard,
            false,
        )
        .unwrap_err();
    assert_eq!(err.kind(), Some(IllegalActionKind::Registration));

    let err = game
        .start(
            &[(1, Suspect::Scarlet), (2, Suspect::Gray)],
            TurnOrder::Standard,
            false,
        )
        .unwrap_err();
    assert_eq!(err.kind(), Some(IllegalActionKind::Registration));

    let err = game
        .start(&[(1, Suspect::Scarlet)], TurnOrder::Standard, false)
        .unwrap_err();
    assert_eq!(err.kind(), Some(IllegalActionKind::Registration));

    // Rejections leave the gate at awaiting-start, so a valid start works.
    two_player_start(&mut game);
}

#[test]
fn roll_then_move_then_back_to_top_of_turn() {
    let mut game = open_grid_game();
    two_player_start(&mut game);

    let roll = game.roll().unwrap();
    assert!((2..=12).contains(&roll));
    assert_eq!(game.gate(), Gate::AwaitingMove);
    assert_eq!(game.next_options(), actions(&[Action::Move]));

    // A second roll is gated off while the move is pending.
    assert_eq!(
        game.roll().unwrap_err().kind(),
        Some(IllegalActionKind::NotAllowed)
    );

    spend_roll(&mut game, roll);
    // Open ground: same player back at top of turn.
    assert_eq!(
        game.current_player().map(|p| p.suspect),
        Some(Suspect::Scarlet)
    );
    assert_eq!(
        game.next_options(),
        actions(&[Action::Roll, Action::Accuse, Action::EndTurn])
    );
}

#[test]
fn end_turn_rotates_to_next_player() {
    let mut game = open_grid_game();
    two_player_start(&mut game);

    game.end_turn().unwrap();
    assert_eq!(
        game.current_player().map(|p| p.suspect),
        Some(Suspect::Mustard)
    );
    game.end_turn().unwrap();
    assert_eq!(
        game.current_player().map(|p| p.suspect),
        Some(Suspect::Scarlet)
    );
}

#[test]
fn wrong_accusation_eliminates_and_limits_to_end_turn() {
    let mut game = open_grid_game();
    two_player_start(&mut game);
    let solution = *game.solution();

    // Any suspect other than the real one makes the accusation wrong.
    let wrong = Edition::Basic
        .suspects()
        .iter()
        .copied()
        .find(|&s| s != solution.suspect)
        .unwrap();

    assert!(!game.accuse(wrong, solution.weapon, solution.room).unwrap());
    assert!(game.eliminated().contains(&Suspect::Scarlet));
    assert!(!game.positions().contains_key(&Suspect::Scarlet));
    assert_eq!(game.next_options(), actions(&[Action::EndTurn]));

    game.end_turn().unwrap();
    assert_eq!(
        game.current_player().map(|p| p.suspect),
        Some(Suspect::Mustard)
    );

    // Rotation now skips the eliminated player entirely.
    game.end_turn().unwrap();
    assert_eq!(
        game.current_player().map(|p| p.suspect),
        Some(Suspect::Mustard)
    );
}

#[test]
fn last_wrong_accusation_ends_the_game() {
    let mut game = open_grid_game();
    two_player_start(&mut game);
    let solution = *game.solution();
    let wrong = Edition::Basic
        .suspects()
        .iter()
        .copied()
        .find(|&s| s != solution.suspect)
        .unwrap();

    assert!(!game.accuse(wrong, solution.weapon, solution.room).unwrap());
    game.end_turn().unwrap();
    // Second (and final) seat accuses wrongly: accuse_count reaches the
    // player count, so the game is over.
    assert!(!game.accuse(wrong, solution.weapon, solution.room).unwrap());
    assert!(game.next_options().is_empty());
    assert_eq!(
        game.end_turn().unwrap_err().kind(),
        Some(IllegalActionKind::NotAllowed)
    );
}

#[test]
fn correct_accusation_wins_and_closes_the_game() {
    let mut game = open_grid_game();
    two_player_start(&mut game);
    let solution = *game.solution();

    assert!(game
        .accuse(solution.suspect, solution.weapon, solution.room)
        .unwrap());
    assert!(game.next_options().is_empty());
    assert!(game.eliminated().is_empty());
}

#[test]
fn force_end_turn_resets_from_any_state() {
    let mut game = open_grid_game();
    two_player_start(&mut game);
    game.roll().unwrap();
    assert_eq!(game.next_options(), actions(&[Action::Move]));

    game.force_end_turn().unwrap();
    assert_eq!(
        game.current_player().map(|p| p.suspect),
        Some(Suspect::Mustard)
    );
    assert_eq!(
        game.next_options(),
        actions(&[Action::Roll, Action::Accuse, Action::EndTurn])
    );
    assert_eq!(game.leftover_roll(), 0);
}

#[test]
fn force_end_turn_requires_a_started_game() {
    let mut game = open_grid_game();
    assert_eq!(
        game.force_end_turn().unwrap_err().kind(),
        Some(IllegalActionKind::NotStarted)
    );
}

#[test]
fn entering_a_room_forces_the_suggestion() {
    let mut layout = corridor_layout("OAO\nOOO\nOOO");
    layout.start_spots = StartSpots::Corridor(vec![
        (1, 0),
        (2, 2),
        (0, 0),
        (0, 2),
        (2, 0),
        (2, 1),
    ]);
    let mut game = Game::with_layout(&layout, 7, 2).unwrap();
    two_player_start(&mut game);

    game.roll().unwrap();
    // One step then up into the door; entering forgives the rest of the
    // roll, so this works for every possible roll.
    let outcome = game
        .move_piece(&[
            Move::walk(MoveDirection::Right, 1),
            Move::walk(MoveDirection::Up, 1),
        ])
        .unwrap();
    assert_eq!(outcome, MoveOutcome::EnteredRoom(Room::Study));
    assert_eq!(game.next_options(), actions(&[Action::Suggest]));

    let outcome = game.suggest(Suspect::Mustard, Weapon::Rope).unwrap();
    assert!(!outcome.hint.is_empty());
    // The suggested suspect is called into the room.
    assert_eq!(
        game.positions()[&Suspect::Mustard],
        Position::Room(Room::Study)
    );
    assert_eq!(game.next_options(), actions(&[Action::Accuse, Action::EndTurn]));
}

#[test]
fn suggestion_cannot_repeat_within_one_room_visit() {
    let mut layout = corridor_layout("OAO\nOOO\nOOO");
    layout.start_spots = StartSpots::Corridor(vec![
        (1, 0),
        (2, 2),
        (0, 0),
        (0, 2),
        (2, 0),
        (2, 1),
    ]);
    let mut game = Game::with_layout(&layout, 7, 2).unwrap();
    two_player_start(&mut game);

    game.roll().unwrap();
    game.move_piece(&[
        Move::walk(MoveDirection::Right, 1),
        Move::walk(MoveDirection::Up, 1),
    ])
    .unwrap();
    game.suggest(Suspect::Mustard, Weapon::Rope).unwrap();
    game.end_turn().unwrap();
    // Mustard was pulled into the room; pass straight back.
    game.end_turn().unwrap();

    // Scarlet is still in the Study and may not suggest again this visit.
    let options = game.next_options();
    assert!(!options.contains(&Action::Suggest));
    assert!(options.contains(&Action::Roll));
    assert!(options.contains(&Action::Accuse));
    assert!(options.contains(&Action::EndTurn));
}

#[test]
fn snoop_flow_suspends_and_resumes() {
    let mut layout = combo_layout(&vec!["OXOOOOOOOOOOOOOO"; 2].join("\n"));
    layout.start_spots = StartSpots::Corridor(vec![
        (0, 0),
        (1, 0),
        (1, 2),
        (1, 4),
        (1, 6),
        (1, 8),
    ]);
    let mut game = Game::with_layout(&layout, 31, 2).unwrap();
    two_player_start(&mut game);

    let roll = game.roll().unwrap();
    let outcome = game
        .move_piece(&[Move::walk(MoveDirection::Right, 1)])
        .unwrap();
    assert_eq!(outcome, MoveOutcome::SuspendedOnSnoop);
    assert_eq!(game.leftover_roll(), roll - 1);
    assert_eq!(game.next_options(), actions(&[Action::Snoop]));

    // Snooping yourself or an absent suspect is rejected; the gate holds.
    assert_eq!(
        game.snoop(Suspect::Scarlet).unwrap_err().kind(),
        Some(IllegalActionKind::SnoopSelf)
    );
    assert_eq!(
        game.snoop(Suspect::Plum).unwrap_err().kind(),
        Some(IllegalActionKind::UnknownPlayer)
    );
    assert_eq!(game.next_options(), actions(&[Action::Snoop]));

    let reveal = game.snoop(Suspect::Mustard).unwrap();
    assert_eq!(reveal.suspect, Suspect::Mustard);
    let mustard = game
        .snapshot()
        .seats
        .iter()
        .find(|s| s.suspect == Suspect::Mustard)
        .unwrap()
        .hand_size;
    assert!(mustard > 0);
    assert_eq!(game.next_options(), actions(&[Action::Move, Action::Accuse]));

    // Resume with the leftover roll along the fresh row.
    let leftover = game.leftover_roll();
    let outcome = game
        .move_piece(&[Move::walk(MoveDirection::Right, leftover)])
        .unwrap();
    assert_eq!(outcome, MoveOutcome::Continuing);
    assert_eq!(game.leftover_roll(), 0);
    assert_eq!(
        game.next_options(),
        actions(&[Action::Roll, Action::Accuse, Action::EndTurn])
    );
}

#[test]
fn snoop_with_no_leftover_offers_accuse_or_end_turn() {
    // FSM-level: a snoop consumed the whole roll.
    let mut state = crate::domain::test_helpers::open_grid_state(2);
    state.leftover_roll = 0;
    let gate = advance(Gate::AwaitingSnoop, Action::Snoop, &mut state);
    assert_eq!(gate, Gate::SnoopEnd);
    assert_eq!(
        legal_actions(gate, &state),
        actions(&[Action::Accuse, Action::EndTurn])
    );

    state.leftover_roll = 3;
    let gate = advance(Gate::AwaitingSnoop, Action::Snoop, &mut state);
    assert_eq!(gate, Gate::SnoopContinue);
    assert_eq!(
        legal_actions(gate, &state),
        actions(&[Action::Move, Action::Accuse])
    );
}

#[test]
fn top_of_turn_offers_secret_only_with_a_passage() {
    let mut layout = corridor_layout("OAO\nOOO");
    layout.secret_pairs = vec![(Position::Room(Room::Study), Position::Room(Room::Lounge))];
    let mut state = build_state(&layout, &[(Suspect::Scarlet, Position::Room(Room::Study))]);

    let options = legal_actions(Gate::TopOfTurn, &state);
    assert!(options.contains(&Action::Secret));
    assert!(options.contains(&Action::Suggest));

    // Without the passage the secret option disappears.
    let layout = corridor_layout("OAO\nOOO");
    state = build_state(&layout, &[(Suspect::Scarlet, Position::Room(Room::Study))]);
    let options = legal_actions(Gate::TopOfTurn, &state);
    assert!(!options.contains(&Action::Secret));
}

#[test]
fn no_suggest_room_never_offers_suggest() {
    // Master roster: entrance letter 'M' is the Cloak Room.
    let mut layout = corridor_layout("OMO\nOOO");
    layout.edition = Edition::Master;
    let state = build_state(&layout, &[(Suspect::Scarlet, Position::Room(Room::Cloak))]);

    let options = legal_actions(Gate::TopOfTurn, &state);
    assert!(!options.contains(&Action::Suggest));
    assert!(options.contains(&Action::Roll));
}

#[test]
fn fully_blocked_room_loses_the_roll_option() {
    // Door at (1,1) flanked by four corridor tiles.
    let layout = corridor_layout("OOO\nOAO\nOOO");
    let mut state = build_state(
        &layout,
        &[
            (Suspect::Scarlet, Position::Room(Room::Study)),
            (Suspect::Mustard, Position::Cell((0, 1))),
            (Suspect::White, Position::Cell((2, 1))),
            (Suspect::Green, Position::Cell((1, 0))),
            (Suspect::Peacock, Position::Cell((1, 2))),
        ],
    );

    let options = legal_actions(Gate::TopOfTurn, &state);
    assert!(!options.contains(&Action::Roll));
    assert!(options.contains(&Action::Suggest));
    assert!(options.contains(&Action::Accuse));

    // Freeing one blocking tile restores the roll.
    state
        .positions
        .insert(Suspect::Peacock, Position::Cell((2, 2)));
    let options = legal_actions(Gate::TopOfTurn, &state);
    assert!(options.contains(&Action::Roll));
}

#[test]
fn move_onto_snoop_tile_routes_through_awaiting_snoop() {
    let layout = combo_layout("OXO\nOOO");
    let mut state = build_state(&layout, &[(Suspect::Scarlet, Position::Cell((0, 1)))]);
    let gate = advance(Gate::AwaitingMove, Action::Move, &mut state);
    assert_eq!(gate, Gate::AwaitingSnoop);

    state
        .positions
        .insert(Suspect::Scarlet, Position::Cell((1, 1)));
    let gate = advance(Gate::AwaitingMove, Action::Move, &mut state);
    assert_eq!(gate, Gate::TopOfTurn);
}
