//! End-to-end games on the shipped boards.

use crate::domain::board::{Move, MoveDirection, Position};
use crate::domain::cards::{Edition, Room, Suspect, Weapon};
use crate::domain::game::{Game, TurnOrder};
use crate::domain::layouts::basic_layout;
use crate::domain::movement::MoveOutcome;
use crate::domain::options::Action;
use crate::errors::domain::IllegalActionKind;

use MoveDirection::{Down, Left};

const PLAYERS: [(i64, Suspect); 3] = [
    (100, Suspect::Scarlet),
    (200, Suspect::Mustard),
    (300, Suspect::White),
];

#[test]
fn same_seed_produces_the_same_game() {
    engine_test_support::logging::init();
    let mut a = Game::new(Edition::Basic, 777).unwrap();
    let mut b = Game::new(Edition::Basic, 777).unwrap();

    for game in [&mut a, &mut b] {
        game.start(&PLAYERS, TurnOrder::Standard, true).unwrap();
    }
    assert_eq!(a.solution(), b.solution());
    assert_eq!(a.snapshot(), b.snapshot());
    assert_eq!(a.positions(), b.positions());
    assert_eq!(
        a.current_player().unwrap().cards,
        b.current_player().unwrap().cards
    );
    assert_eq!(a.roll().unwrap(), b.roll().unwrap());
}

#[test]
fn standard_turn_order_follows_the_roster() {
    let mut game = Game::new(Edition::Basic, 5).unwrap();
    game.start(
        &[(1, Suspect::Plum), (2, Suspect::Scarlet), (3, Suspect::Green)],
        TurnOrder::Standard,
        false,
    )
    .unwrap();
    assert_eq!(
        game.current_player().map(|p| p.suspect),
        Some(Suspect::Scarlet)
    );
    game.end_turn().unwrap();
    assert_eq!(
        game.current_player().map(|p| p.suspect),
        Some(Suspect::Green)
    );
    game.end_turn().unwrap();
    assert_eq!(
        game.current_player().map(|p| p.suspect),
        Some(Suspect::Plum)
    );
}

#[test]
fn signup_turn_order_follows_registration() {
    let mut game = Game::new(Edition::Basic, 5).unwrap();
    game.start(
        &[(1, Suspect::Plum), (2, Suspect::Scarlet), (3, Suspect::Green)],
        TurnOrder::Signup,
        false,
    )
    .unwrap();
    assert_eq!(
        game.current_player().map(|p| p.suspect),
        Some(Suspect::Plum)
    );
}

#[test]
fn basic_start_places_tokens_on_their_corridor_spots() {
    let mut game = Game::new(Edition::Basic, 11).unwrap();
    game.start(&PLAYERS, TurnOrder::Standard, false).unwrap();

    assert_eq!(game.positions()[&Suspect::Scarlet], Position::Cell((0, 16)));
    assert_eq!(game.positions()[&Suspect::Mustard], Position::Cell((7, 23)));
    assert_eq!(game.positions()[&Suspect::White], Position::Cell((24, 14)));
}

#[test]
fn hands_cover_the_deck_evenly() {
    let mut game = Game::new(Edition::Basic, 13).unwrap();
    game.start(&PLAYERS, TurnOrder::Standard, false).unwrap();
    // 15 dealable cards over 3 players.
    assert!(game.even_deal());

    let mut game = Game::new(Edition::Basic, 13).unwrap();
    game.start(
        &[(1, Suspect::Scarlet), (2, Suspect::Mustard)],
        TurnOrder::Standard,
        false,
    )
    .unwrap();
    // 15 over 2 players cannot be even.
    assert!(!game.even_deal());
}

#[test]
fn basic_walkthrough_with_elimination_and_win() {
    // Six dice so the scripted path into the Dining Room is always
    // affordable; room entry forgives whatever remains.
    let mut game = Game::with_layout(&basic_layout(), 901, 6).unwrap();
    game.start(
        &[(1, Suspect::Scarlet), (2, Suspect::Mustard)],
        TurnOrder::Standard,
        false,
    )
    .unwrap();
    let solution = *game.solution();

    // Scarlet passes; Mustard walks from (7,23) into the Dining Room.
    game.end_turn().unwrap();
    game.roll().unwrap();
    let outcome = game
        .move_piece(&[
            Move::walk(Down, 1),
            Move::walk(Left, 3),
            Move::walk(Down, 1),
        ])
        .unwrap();
    assert_eq!(outcome, MoveOutcome::EnteredRoom(Room::Dining));

    // The room entry forces a suggestion; suggesting Scarlet pulls her in.
    assert_eq!(game.next_options().len(), 1);
    game.suggest(Suspect::Scarlet, Weapon::Knife).unwrap();
    assert_eq!(
        game.positions()[&Suspect::Scarlet],
        Position::Room(Room::Dining)
    );

    // A wrong accusation eliminates Mustard but the game continues.
    let wrong_weapon = Edition::Basic
        .weapons()
        .iter()
        .copied()
        .find(|&w| w != solution.weapon)
        .unwrap();
    assert!(!game
        .accuse(solution.suspect, wrong_weapon, solution.room)
        .unwrap());
    assert!(game.eliminated().contains(&Suspect::Mustard));
    game.end_turn().unwrap();

    // Scarlet (standing in the Dining Room after the suggestion) wins.
    assert_eq!(
        game.current_player().map(|p| p.suspect),
        Some(Suspect::Scarlet)
    );
    assert!(game.next_options().contains(&Action::Suggest));
    assert!(game
        .accuse(solution.suspect, solution.weapon, solution.room)
        .unwrap());
    assert!(game.next_options().is_empty());
    assert_eq!(
        game.roll().unwrap_err().kind(),
        Some(IllegalActionKind::NotAllowed)
    );
}

#[test]
fn master_game_starts_everyone_in_the_cloak_room() {
    let mut game = Game::new(Edition::Master, 321).unwrap();
    game.start(&PLAYERS, TurnOrder::Standard, false).unwrap();

    for suspect in [Suspect::Scarlet, Suspect::Mustard, Suspect::White] {
        assert_eq!(game.positions()[&suspect], Position::Room(Room::Cloak));
    }
    // No suggestion from the Cloak Room, no secret passage, never blocked.
    let options = game.next_options();
    assert!(options.contains(&Action::Roll));
    assert!(!options.contains(&Action::Suggest));
    assert!(!options.contains(&Action::Secret));
}

#[test]
fn master_combo_exit_from_the_cloak_room() {
    let mut game = Game::new(Edition::Master, 321).unwrap();
    game.start(&PLAYERS, TurnOrder::Standard, false).unwrap();

    let roll = game.roll().unwrap();
    // Leaving the starting room is free; the corridor west of the Cloak
    // door runs long enough for any roll.
    let outcome = game
        .move_piece(&[
            Move::door(0),
            Move::walk(Left, 1),
            Move::walk(Down, roll - 1),
        ])
        .unwrap();
    assert_eq!(outcome, MoveOutcome::Continuing);
    assert_eq!(
        game.positions()[&Suspect::Scarlet],
        Position::Cell((12 + i16::from(roll) - 1, 16))
    );
    // Open ground on a combo board: back to the top of the turn.
    assert!(game.next_options().contains(&Action::Roll));
}

#[test]
fn solution_cards_never_reach_a_hand() {
    for seed in [1, 2, 3, 4, 5] {
        let mut game = Game::new(Edition::Master, seed).unwrap();
        game.start(&PLAYERS, TurnOrder::Standard, false).unwrap();
        let solution = *game.solution();

        // 27 dealable master cards after removing the solution.
        let dealt: usize = game.snapshot().seats.iter().map(|s| s.hand_size).sum();
        assert_eq!(dealt, 27);
        for player in game.state_mut().players.clone() {
            for card in solution.cards() {
                assert!(
                    !player.cards.contains(&card),
                    "{card} dealt to {} (seed {seed})",
                    player.suspect
                );
            }
        }
    }
}
