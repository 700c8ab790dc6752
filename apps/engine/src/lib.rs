#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

//! Rules engine for the Clue board game, two editions.
//!
//! The engine is pure and synchronous: an external caller (a chat bot, a
//! CLI, a test) creates a [`Game`], registers players, then repeatedly asks
//! [`Game::next_options`] which actions are legal, invokes one, and reads
//! plain values back. Everything transport- or rendering-shaped lives
//! outside this crate.

pub mod domain;
pub mod errors;

// Re-exports for public API
pub use domain::board::{Board, Coord, Move, MoveDirection, Position};
pub use domain::cards::{Ambience, Card, Edition, Room, Suspect, Weapon};
pub use domain::game::{Game, SnoopReveal, TurnOrder};
pub use domain::layouts::{basic_layout, master_layout, BoardLayout, StartSpots};
pub use domain::movement::MoveOutcome;
pub use domain::options::Action;
pub use domain::snapshot::{BoardView, GameSnapshot};
pub use domain::state::{CaseFile, Player};
pub use domain::suggestion::{Disproof, SuggestionOutcome};
pub use errors::{DomainError, IllegalActionKind};
