//! The gated game facade.
//!
//! `Game` wraps the state container together with the action gate: every
//! state-changing operation first checks its action name against the
//! currently legal set, executes, then advances the gate. A rejected
//! operation leaves both the state and the legal set untouched.

use std::collections::{BTreeMap, BTreeSet};

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::board::{Board, Move, Position};
use crate::domain::cards::{Card, Edition, Room, Suspect, Weapon};
use crate::domain::dealing::{deal_hands, pick_solution};
use crate::domain::layouts::{BoardLayout, StartSpots};
use crate::domain::movement::{execute_move, MoveOutcome};
use crate::domain::options::{advance, legal_actions, Action, Gate};
use crate::domain::rules::{roll_dice, DEFAULT_DIE_COUNT};
use crate::domain::seed_derivation::{derive_play_seed, derive_setup_seed};
use crate::domain::snapshot::{board_view, game_snapshot, BoardView, GameSnapshot};
use crate::domain::state::{CaseFile, GameState, Player};
use crate::domain::suggestion::{resolve_accusation, resolve_suggestion, SuggestionOutcome};
use crate::errors::domain::{DomainError, IllegalActionKind};

/// How seats are ordered at game start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnOrder {
    /// Edition roster order.
    Standard,
    /// Registration order.
    Signup,
    /// Random order.
    Random,
}

/// Result of a snoop: one random card out of another player's hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnoopReveal {
    pub user_id: i64,
    pub suspect: Suspect,
    pub card: Card,
}

pub struct Game {
    state: GameState,
    gate: Gate,
    setup_rng: ChaCha8Rng,
    play_rng: ChaCha8Rng,
    die_count: u8,
    start_spots: StartSpots,
}

impl Game {
    /// New game on the edition's shipped board with two dice.
    pub fn new(edition: Edition, seed: u64) -> Result<Self, DomainError> {
        Self::with_layout(&edition.default_layout(), seed, DEFAULT_DIE_COUNT)
    }

    /// New game on an arbitrary layout.
    pub fn with_layout(
        layout: &BoardLayout,
        seed: u64,
        die_count: u8,
    ) -> Result<Self, DomainError> {
        let board = Board::from_layout(layout)?;
        let mut setup_rng = ChaCha8Rng::seed_from_u64(derive_setup_seed(seed));
        let play_rng = ChaCha8Rng::seed_from_u64(derive_play_seed(seed));
        let solution = pick_solution(layout.edition, &mut setup_rng);

        Ok(Self {
            state: GameState {
                edition: layout.edition,
                board,
                players: Default::default(),
                positions: BTreeMap::new(),
                eliminated: BTreeSet::new(),
                solution,
                cur_roll: 0,
                leftover_roll: 0,
                leftover_visited: BTreeSet::new(),
                accuse_count: 0,
                last_suggest_room: BTreeMap::new(),
            },
            gate: Gate::AwaitingStart,
            setup_rng,
            play_rng,
            die_count,
            start_spots: layout.start_spots.clone(),
        })
    }

    /// Currently legal action names.
    pub fn next_options(&self) -> BTreeSet<Action> {
        legal_actions(self.gate, &self.state)
    }

    pub fn current_player(&self) -> Option<&Player> {
        self.state.current_player()
    }

    pub fn positions(&self) -> &BTreeMap<Suspect, Position> {
        &self.state.positions
    }

    pub fn eliminated(&self) -> &BTreeSet<Suspect> {
        &self.state.eliminated
    }

    /// The hidden solution. Exposed for the external layer's post-game
    /// reveal; keeping it out of player-facing traffic is its job.
    pub fn solution(&self) -> &CaseFile {
        &self.state.solution
    }

    pub fn edition(&self) -> Edition {
        self.state.edition
    }

    pub fn board(&self) -> &Board {
        &self.state.board
    }

    pub fn leftover_roll(&self) -> u8 {
        self.state.leftover_roll
    }

    pub fn even_deal(&self) -> bool {
        self.state.even_deal()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        game_snapshot(&self.state, self.next_options())
    }

    /// Geometry view for the rendering collaborator.
    pub fn board_view(&self) -> BoardView {
        board_view(&self.state.board, self.state.edition)
    }

    /// Register players, deal hands and place tokens.
    pub fn start(
        &mut self,
        players: &[(i64, Suspect)],
        turn_order: TurnOrder,
        random_spots: bool,
    ) -> Result<(), DomainError> {
        self.gate_check(Action::Start)?;

        let registered: BTreeMap<Suspect, i64> = players.iter().map(|&(u, s)| (s, u)).collect();
        if registered.len() != players.len() {
            return Err(DomainError::illegal(
                IllegalActionKind::Registration,
                "each suspect can be registered once",
            ));
        }
        let roster = self.state.edition.suspects();
        if let Some(&(_, bad)) = players.iter().find(|(_, s)| !roster.contains(s)) {
            return Err(DomainError::illegal(
                IllegalActionKind::Registration,
                format!("{bad} is not in the {:?} roster", self.state.edition),
            ));
        }

        let hands = deal_hands(
            self.state.edition,
            &self.state.solution,
            players.len(),
            &mut self.setup_rng,
        )?;

        let order: Vec<Suspect> = match turn_order {
            TurnOrder::Standard => roster
                .iter()
                .copied()
                .filter(|s| registered.contains_key(s))
                .collect(),
            TurnOrder::Signup => players.iter().map(|&(_, s)| s).collect(),
            TurnOrder::Random => {
                let mut shuffled = roster.to_vec();
                shuffled.shuffle(&mut self.setup_rng);
                shuffled
                    .into_iter()
                    .filter(|s| registered.contains_key(s))
                    .collect()
            }
        };

        self.state.players = order
            .iter()
            .zip(hands)
            .map(|(&suspect, cards)| Player {
                user_id: registered[&suspect],
                suspect,
                cards,
            })
            .collect();

        self.state.positions = self.starting_positions(&registered, random_spots)?;
        self.state.eliminated.clear();
        self.state.accuse_count = 0;
        self.state.last_suggest_room.clear();
        self.state.leftover_roll = 0;
        self.state.leftover_visited.clear();
        self.state.cur_roll = 0;

        debug!(
            players = players.len(),
            edition = ?self.state.edition,
            ?turn_order,
            "game started"
        );
        self.gate = advance(self.gate, Action::Start, &mut self.state);
        Ok(())
    }

    fn starting_positions(
        &mut self,
        registered: &BTreeMap<Suspect, i64>,
        random_spots: bool,
    ) -> Result<BTreeMap<Suspect, Position>, DomainError> {
        let roster = self.state.edition.suspects();
        match self.start_spots.clone() {
            StartSpots::Room(room) => Ok(registered
                .keys()
                .map(|&s| (s, Position::Room(room)))
                .collect()),
            StartSpots::Corridor(mut cells) => {
                if cells.len() < roster.len() {
                    return Err(DomainError::config(format!(
                        "layout provides {} starting spots for a roster of {}",
                        cells.len(),
                        roster.len()
                    )));
                }
                if random_spots {
                    cells.shuffle(&mut self.setup_rng);
                }
                Ok(roster
                    .iter()
                    .zip(cells)
                    .filter(|(s, _)| registered.contains_key(s))
                    .map(|(&s, c)| (s, Position::Cell(c)))
                    .collect())
            }
        }
    }

    /// Roll the dice for the turn holder.
    pub fn roll(&mut self) -> Result<u8, DomainError> {
        self.gate_check(Action::Roll)?;
        self.state.cur_roll = roll_dice(self.die_count, &mut self.play_rng);
        debug!(roll = self.state.cur_roll, "dice rolled");
        self.gate = advance(self.gate, Action::Roll, &mut self.state);
        Ok(self.state.cur_roll)
    }

    /// Spend the current roll (or the stored leftover, when resuming after
    /// a snoop) on a sequence of move primitives.
    pub fn move_piece(&mut self, moves: &[Move]) -> Result<MoveOutcome, DomainError> {
        self.gate_check(Action::Move)?;
        let suspect = self.require_current()?;
        let budget = if self.state.leftover_roll > 0 {
            self.state.leftover_roll
        } else {
            self.state.cur_roll
        };
        let outcome = execute_move(&mut self.state, suspect, budget, moves)?;
        debug!(%suspect, budget, ?outcome, "move executed");
        self.gate = advance(self.gate, Action::Move, &mut self.state);
        Ok(outcome)
    }

    /// Take the secret passage from the current room.
    pub fn secret(&mut self) -> Result<MoveOutcome, DomainError> {
        self.gate_check(Action::Secret)?;
        let suspect = self.require_current()?;
        let outcome = execute_move(&mut self.state, suspect, 1, &[Move::secret()])?;
        debug!(%suspect, ?outcome, "secret passage taken");
        self.gate = advance(self.gate, Action::Secret, &mut self.state);
        Ok(outcome)
    }

    /// Reveal one random card from another player's hand.
    pub fn snoop(&mut self, suspect: Suspect) -> Result<SnoopReveal, DomainError> {
        self.gate_check(Action::Snoop)?;
        let current = self.require_current()?;
        if suspect == current {
            return Err(DomainError::illegal(
                IllegalActionKind::SnoopSelf,
                "cannot snoop yourself",
            ));
        }
        let Some(target) = self.state.players.iter().find(|p| p.suspect == suspect) else {
            return Err(DomainError::illegal(
                IllegalActionKind::UnknownPlayer,
                format!("{suspect} is not in this game"),
            ));
        };
        if target.cards.is_empty() {
            return Err(DomainError::illegal(
                IllegalActionKind::UnknownCard,
                format!("{suspect} holds no cards"),
            ));
        }
        let card = target.cards[self.play_rng.random_range(0..target.cards.len())];
        let reveal = SnoopReveal {
            user_id: target.user_id,
            suspect: target.suspect,
            card,
        };
        debug!(snooper = %current, snooped = %suspect, "snoop");
        self.gate = advance(self.gate, Action::Snoop, &mut self.state);
        Ok(reveal)
    }

    /// Suggest a suspect and weapon in the current room.
    pub fn suggest(
        &mut self,
        suspect: Suspect,
        weapon: Weapon,
    ) -> Result<SuggestionOutcome, DomainError> {
        self.gate_check(Action::Suggest)?;
        let outcome = resolve_suggestion(&mut self.state, &mut self.play_rng, suspect, weapon)?;
        debug!(%suspect, %weapon, disproved = outcome.disproof.is_some(), "suggestion");
        self.gate = advance(self.gate, Action::Suggest, &mut self.state);
        Ok(outcome)
    }

    /// Accuse. Returns whether the accusation matched the solution; a
    /// wrong accusation eliminates the accuser.
    pub fn accuse(
        &mut self,
        suspect: Suspect,
        weapon: Weapon,
        room: Room,
    ) -> Result<bool, DomainError> {
        self.gate_check(Action::Accuse)?;
        let correct = resolve_accusation(&mut self.state, suspect, weapon, room)?;
        debug!(%suspect, %weapon, %room, correct, "accusation");
        self.gate = advance(self.gate, Action::Accuse, &mut self.state);
        Ok(correct)
    }

    /// Pass the turn to the next non-eliminated player.
    pub fn end_turn(&mut self) -> Result<(), DomainError> {
        self.gate_check(Action::EndTurn)?;
        self.state.rotate_to_next_active();
        debug!(next = ?self.state.current_suspect(), "turn ended");
        self.gate = advance(self.gate, Action::EndTurn, &mut self.state);
        Ok(())
    }

    /// Forcibly end the current turn from any state, for external
    /// timeouts. Resets the leftover carryover exactly like a normal turn
    /// end and advances to the next eligible player.
    pub fn force_end_turn(&mut self) -> Result<(), DomainError> {
        if self.state.players.is_empty() {
            return Err(DomainError::illegal(
                IllegalActionKind::NotStarted,
                "game has not started",
            ));
        }
        self.state.rotate_to_next_active();
        debug!(next = ?self.state.current_suspect(), "turn force-ended");
        self.gate = Gate::TopOfTurn;
        Ok(())
    }

    fn gate_check(&self, action: Action) -> Result<(), DomainError> {
        let options = self.next_options();
        if options.contains(&action) {
            Ok(())
        } else {
            let names: Vec<String> = options.iter().map(|a| a.to_string()).collect();
            Err(DomainError::illegal(
                IllegalActionKind::NotAllowed,
                format!(
                    "'{action}' is not within the current options [{}]",
                    names.join(", ")
                ),
            ))
        }
    }

    fn require_current(&self) -> Result<Suspect, DomainError> {
        self.state.current_suspect().ok_or_else(|| {
            DomainError::illegal(IllegalActionKind::NotStarted, "game has not started")
        })
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    #[cfg(test)]
    pub(crate) fn gate(&self) -> Gate {
        self.gate
    }
}
