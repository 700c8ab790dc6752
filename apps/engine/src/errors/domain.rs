//! Domain-level error type used across the engine.
//!
//! Two kinds cover everything the engine can reject:
//!
//! - `Config`: a malformed board definition, fatal at construction and not
//!   recoverable.
//! - `IllegalAction`: any rule violation while playing. Always caused by
//!   caller input, always recoverable by rejecting the one attempted action
//!   and leaving the turn state untouched. Callers are expected to surface
//!   the detail string verbatim to the end user.

use thiserror::Error;

/// Discriminant for illegal-action errors.
///
/// Callers react to every variant the same way (reject the action, re-offer
/// the unchanged legal-action set); the kind exists so tests and logs can
/// tell rejections apart without string matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum IllegalActionKind {
    /// Action name is not in the currently legal set.
    NotAllowed,
    /// Game has not been started yet.
    NotStarted,
    /// Named suspect is not a registered, live player.
    UnknownPlayer,
    /// Card does not belong to the active edition's roster.
    UnknownCard,
    /// Malformed player registration at game start.
    Registration,
    /// A move request carried no primitives.
    EmptyMoveList,
    /// A cell or room would be entered twice within one roll.
    Revisit,
    /// The move sequence needs more roll than is available.
    RollOverdraw,
    /// The move sequence left unused roll on a non-snoop tile.
    RollUnderused,
    /// Entering a room against an entrance exception.
    IllegalEntrance,
    /// Exiting a room against an entrance exception.
    IllegalExit,
    /// Ending on a cell occupied by another player.
    Occupied,
    /// Door index out of range for the room.
    DoorIndex,
    /// A door selector cannot be the final primitive.
    DoorAtEnd,
    /// A door selector must be followed by a walking primitive.
    DoorSequence,
    /// Secret passage used alongside other primitives on a board without
    /// combo rolls.
    SecretNotSole,
    /// Current position has no secret passage.
    NoSecretPassage,
    /// Walking primitive issued while inside a room.
    WrongMoveInRoom,
    /// Suggesting from a corridor position.
    NotInRoom,
    /// Stepping outside the grid or onto a non-walkable tile.
    OutOfBounds,
    /// Stepping onto room interior without using a door.
    IntoRoom,
    /// Snooping your own hand.
    SnoopSelf,
}

/// Central engine error type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Malformed board or layout definition (fatal at construction).
    #[error("configuration error: {0}")]
    Config(String),
    /// Rule violation during play (recoverable).
    #[error("illegal action {kind:?}: {detail}")]
    IllegalAction {
        kind: IllegalActionKind,
        detail: String,
    },
}

impl DomainError {
    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config(detail.into())
    }

    pub fn illegal(kind: IllegalActionKind, detail: impl Into<String>) -> Self {
        Self::IllegalAction {
            kind,
            detail: detail.into(),
        }
    }

    /// Kind discriminant for illegal-action errors, `None` for config errors.
    pub fn kind(&self) -> Option<IllegalActionKind> {
        match self {
            Self::Config(_) => None,
            Self::IllegalAction { kind, .. } => Some(*kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_have_no_kind() {
        let err = DomainError::config("bad grid");
        assert_eq!(err.kind(), None);
        assert_eq!(err.to_string(), "configuration error: bad grid");
    }

    #[test]
    fn illegal_action_display_carries_kind_and_detail() {
        let err = DomainError::illegal(IllegalActionKind::Revisit, "no backtracking");
        assert_eq!(err.kind(), Some(IllegalActionKind::Revisit));
        let s = err.to_string();
        assert!(s.contains("Revisit"));
        assert!(s.contains("no backtracking"));
    }
}
