//! Edition board presets.
//!
//! A `BoardLayout` bundles everything `Board::from_layout` needs: the grid
//! text, the secret-passage pairs, the entrance exceptions, the movement
//! flags and where tokens start. The two shipped presets embed their grid
//! from `boards/`; custom layouts (used heavily by tests) are plain values
//! and round-trip through serde.

use serde::{Deserialize, Serialize};

use crate::domain::board::{Coord, MoveDirection, Position};
use crate::domain::cards::{Edition, Room};

/// Where tokens are placed at game start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StartSpots {
    /// One corridor cell per suspect, in roster order.
    Corridor(Vec<Coord>),
    /// Every token starts in the same room.
    Room(Room),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardLayout {
    pub edition: Edition,
    pub grid: String,
    /// One direction per passage; the board builds the symmetric map.
    pub secret_pairs: Vec<(Position, Position)>,
    pub entrance_exceptions: Vec<(Room, MoveDirection)>,
    pub full_block: bool,
    pub allow_combo_rolls: bool,
    pub start_spots: StartSpots,
}

/// The classic six-player board.
pub fn basic_layout() -> BoardLayout {
    BoardLayout {
        edition: Edition::Basic,
        grid: include_str!("../../boards/basic.txt").to_string(),
        secret_pairs: vec![
            (
                Position::Room(Room::Conservatory),
                Position::Room(Room::Lounge),
            ),
            (Position::Room(Room::Kitchen), Position::Room(Room::Study)),
        ],
        entrance_exceptions: vec![
            (Room::Study, MoveDirection::Left),
            (Room::Lounge, MoveDirection::Right),
            (Room::Conservatory, MoveDirection::Down),
        ],
        full_block: true,
        allow_combo_rolls: false,
        start_spots: StartSpots::Corridor(vec![
            (0, 16),
            (7, 23),
            (24, 14),
            (24, 9),
            (18, 0),
            (5, 0),
        ]),
    }
}

/// The ten-player board: hop-over movement, combo rolls, snoop tiles, a
/// corridor secret passage, and the Cloak Room everyone starts in.
pub fn master_layout() -> BoardLayout {
    BoardLayout {
        edition: Edition::Master,
        grid: include_str!("../../boards/master.txt").to_string(),
        secret_pairs: vec![
            (
                Position::Room(Room::Conservatory),
                Position::Room(Room::Drawing),
            ),
            (Position::Room(Room::Kitchen), Position::Room(Room::Library)),
            (Position::Cell((17, 4)), Position::Cell((17, 37))),
        ],
        entrance_exceptions: vec![
            (Room::Kitchen, MoveDirection::Up),
            (Room::Conservatory, MoveDirection::Down),
        ],
        full_block: false,
        allow_combo_rolls: true,
        start_spots: StartSpots::Room(Room::Cloak),
    }
}

impl Edition {
    /// The edition's shipped layout.
    pub fn default_layout(self) -> BoardLayout {
        match self {
            Edition::Basic => basic_layout(),
            Edition::Master => master_layout(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::board::Board;

    #[test]
    fn basic_layout_parses() {
        let layout = basic_layout();
        let board = Board::from_layout(&layout).unwrap();
        assert_eq!(board.rows(), 25);
        assert_eq!(board.cols(), 24);
        // Every room is pierced by at least one door.
        for &room in Edition::Basic.rooms() {
            assert!(!board.doors(room).is_empty(), "{room} has no door");
        }
        // The starting corridor cells are walkable.
        let StartSpots::Corridor(spots) = &layout.start_spots else {
            panic!("basic layout starts in corridor");
        };
        assert_eq!(spots.len(), Edition::Basic.suspects().len());
        for &c in spots {
            assert_eq!(board.tile(c), Some('O'));
        }
    }

    #[test]
    fn basic_doors_match_board_text() {
        let board = Board::from_layout(&basic_layout()).unwrap();
        assert_eq!(board.doors(Room::Study), &[(2, 6), (3, 3)]);
        assert_eq!(board.doors(Room::Conservatory), &[(20, 5)]);
        assert_eq!(board.doors(Room::Kitchen), &[(19, 20), (21, 18)]);
        // The Study's east door opens against the excepted direction, so
        // only the south door contributes a blocking tile.
        let blocks = board.door_blocks(Room::Study).unwrap();
        assert_eq!(blocks.iter().copied().collect::<Vec<_>>(), vec![(4, 3)]);
    }

    #[test]
    fn master_layout_parses() {
        let layout = master_layout();
        let board = Board::from_layout(&layout).unwrap();
        assert_eq!(board.rows(), 27);
        assert_eq!(board.cols(), 40);
        for &room in Edition::Master.rooms() {
            assert!(!board.doors(room).is_empty(), "{room} has no door");
        }
        // Everyone starts in the Cloak Room, which has a single door and
        // enough interior slots for a full table.
        assert_eq!(layout.start_spots, StartSpots::Room(Room::Cloak));
        assert_eq!(board.doors(Room::Cloak), &[(12, 17)]);
        assert!(board.room_slots(Room::Cloak).len() >= 10);
    }

    #[test]
    fn master_corridor_secret_passage_is_symmetric() {
        let board = Board::from_layout(&master_layout()).unwrap();
        assert_eq!(
            board.secret_target(&Position::Cell((17, 4))),
            Some(Position::Cell((17, 37)))
        );
        assert_eq!(
            board.secret_target(&Position::Cell((17, 37))),
            Some(Position::Cell((17, 4)))
        );
        // Both endpoints are plain corridor.
        assert_eq!(board.tile((17, 4)), Some('O'));
        assert_eq!(board.tile((17, 37)), Some('O'));
    }

    #[test]
    fn master_snoop_and_sliding_tiles_present() {
        let board = Board::from_layout(&master_layout()).unwrap();
        assert_eq!(board.tile((7, 4)), Some('X'));
        assert_eq!(board.tile((7, 20)), Some('X'));
        assert_eq!(board.tile((17, 9)), Some('s'));
        assert_eq!(board.tile((17, 12)), Some('s'));
    }

    #[test]
    fn layouts_round_trip_through_serde() {
        let layout = basic_layout();
        let json = serde_json::to_string(&layout).unwrap();
        let back: BoardLayout = serde_json::from_str(&json).unwrap();
        assert_eq!(layout, back);
    }
}
