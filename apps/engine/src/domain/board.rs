//! Board topology: grid parsing and derived door/blocking/secret structures.
//!
//! The grid is a rectangle of characters read once at construction:
//!
//! - `O` (and any non-letter printable character) is a walkable corridor
//!   tile; `O` tiles orthogonally adjacent to a door also act as that
//!   door's blocking coordinates,
//! - `X` is a walkable snoop tile,
//! - `s` is a sliding tile (stepping onto it continues the step in the same
//!   direction until a non-sliding tile, for a single roll unit),
//! - other uppercase letters are room entrances, mapped `A..` onto the
//!   edition's room roster,
//! - matching lowercase letters are room-interior slots (rendering data
//!   only), `r` is plain room wall.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::cards::Room;
use crate::domain::layouts::BoardLayout;
use crate::errors::domain::DomainError;

/// Grid coordinate as (row, column). Signed so a step off the top or left
/// edge stays representable until the bounds check rejects it.
pub type Coord = (i16, i16);

/// Where a token is: a corridor cell or a room.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Position {
    Cell(Coord),
    Room(Room),
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Cell((x, y)) => write!(f, "({x}, {y})"),
            Position::Room(r) => r.fmt(f),
        }
    }
}

/// One step direction of a move primitive. `Door` and `Secret` are
/// selectors rather than geometric directions and translate by (0, 0).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum MoveDirection {
    Up,
    Down,
    Left,
    Right,
    Door,
    Secret,
}

impl MoveDirection {
    pub fn delta(self) -> (i16, i16) {
        match self {
            MoveDirection::Up => (-1, 0),
            MoveDirection::Down => (1, 0),
            MoveDirection::Left => (0, -1),
            MoveDirection::Right => (0, 1),
            MoveDirection::Door | MoveDirection::Secret => (0, 0),
        }
    }

    pub fn translate(self, (x, y): Coord) -> Coord {
        let (dx, dy) = self.delta();
        (x + dx, y + dy)
    }

    /// Opposite walking direction; `None` for the selector variants.
    pub fn reverse(self) -> Option<MoveDirection> {
        match self {
            MoveDirection::Up => Some(MoveDirection::Down),
            MoveDirection::Down => Some(MoveDirection::Up),
            MoveDirection::Left => Some(MoveDirection::Right),
            MoveDirection::Right => Some(MoveDirection::Left),
            MoveDirection::Door | MoveDirection::Secret => None,
        }
    }

    const WALKING: [MoveDirection; 4] = [
        MoveDirection::Up,
        MoveDirection::Left,
        MoveDirection::Right,
        MoveDirection::Down,
    ];
}

/// One move primitive. For `Door` the length is reinterpreted as a 0-based
/// door index; for `Secret` it is unused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub direction: MoveDirection,
    pub length: u8,
}

impl Move {
    pub fn walk(direction: MoveDirection, length: u8) -> Self {
        Self { direction, length }
    }

    pub fn door(index: u8) -> Self {
        Self {
            direction: MoveDirection::Door,
            length: index,
        }
    }

    pub fn secret() -> Self {
        Self {
            direction: MoveDirection::Secret,
            length: 0,
        }
    }
}

/// Parsed topology plus the movement flags of the active edition.
#[derive(Debug, Clone)]
pub struct Board {
    grid: Vec<Vec<char>>,
    rows: usize,
    cols: usize,
    entrance_map: BTreeMap<char, Room>,
    entrance_exceptions: BTreeSet<(Room, MoveDirection)>,
    secret_map: BTreeMap<Position, Position>,
    door_map: BTreeMap<Room, Vec<Coord>>,
    door_blocks: BTreeMap<Room, BTreeSet<Coord>>,
    room_slots: BTreeMap<Room, Vec<Coord>>,
    full_block: bool,
    allow_combo_rolls: bool,
}

impl Board {
    pub fn from_layout(layout: &BoardLayout) -> Result<Self, DomainError> {
        let grid: Vec<Vec<char>> = layout
            .grid
            .lines()
            .map(|line| line.chars().collect())
            .collect();
        if grid.is_empty() || grid[0].is_empty() {
            return Err(DomainError::config("board grid is empty"));
        }
        let rows = grid.len();
        let cols = grid[0].len();
        if let Some(bad) = grid.iter().position(|row| row.len() != cols) {
            return Err(DomainError::config(format!(
                "board grid is not rectangular: row {bad} has {} columns, expected {cols}",
                grid[bad].len()
            )));
        }

        let rooms = layout.edition.rooms();
        let entrance_map: BTreeMap<char, Room> =
            ('A'..='Z').zip(rooms.iter().copied()).collect();
        let interior_map: BTreeMap<char, Room> =
            ('a'..='z').zip(rooms.iter().copied()).collect();

        for row in &grid {
            for &c in row {
                if c.is_ascii_uppercase()
                    && c != 'O'
                    && c != 'X'
                    && !entrance_map.contains_key(&c)
                {
                    return Err(DomainError::config(format!(
                        "entrance letter '{c}' has no room in the {:?} roster",
                        layout.edition
                    )));
                }
            }
        }

        let entrance_exceptions: BTreeSet<(Room, MoveDirection)> =
            layout.entrance_exceptions.iter().copied().collect();

        let mut secret_map = BTreeMap::new();
        for &(a, b) in &layout.secret_pairs {
            if secret_map.insert(a, b).is_some() || secret_map.insert(b, a).is_some() {
                return Err(DomainError::config(format!(
                    "position {a} appears in more than one secret passage"
                )));
            }
        }

        let mut board = Self {
            grid,
            rows,
            cols,
            entrance_map,
            entrance_exceptions,
            secret_map,
            door_map: rooms.iter().map(|&r| (r, Vec::new())).collect(),
            door_blocks: rooms.iter().map(|&r| (r, BTreeSet::new())).collect(),
            room_slots: rooms.iter().map(|&r| (r, Vec::new())).collect(),
            full_block: layout.full_block,
            allow_combo_rolls: layout.allow_combo_rolls,
        };
        board.scan(&interior_map);
        Ok(board)
    }

    /// Row-major scan collecting doors, door blocks and interior slots.
    fn scan(&mut self, interior_map: &BTreeMap<char, Room>) {
        for x in 0..self.rows as i16 {
            for y in 0..self.cols as i16 {
                let c = self.grid[x as usize][y as usize];
                if let Some(&room) = self.entrance_map.get(&c) {
                    self.door_map.get_mut(&room).expect("room seeded").push((x, y));
                    for m in MoveDirection::WALKING {
                        let n = m.translate((x, y));
                        let rev = m.reverse().expect("walking direction");
                        if self.tile(n) == Some('O')
                            && !self.entrance_exceptions.contains(&(room, rev))
                        {
                            self.door_blocks.get_mut(&room).expect("room seeded").insert(n);
                        }
                    }
                } else if let Some(&room) = interior_map.get(&c) {
                    self.room_slots.get_mut(&room).expect("room seeded").push((x, y));
                }
            }
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Tile at a coordinate, `None` outside the grid.
    pub fn tile(&self, (x, y): Coord) -> Option<char> {
        if x < 0 || y < 0 {
            return None;
        }
        self.grid
            .get(x as usize)
            .and_then(|row| row.get(y as usize))
            .copied()
    }

    /// Room entered by stepping onto this tile, if it is an entrance.
    pub fn entrance_room(&self, tile: char) -> Option<Room> {
        self.entrance_map.get(&tile).copied()
    }

    /// Whether a tile can be stood on as plain corridor.
    pub fn is_walkable(tile: char) -> bool {
        tile == 'O' || tile == 'X' || (tile.is_ascii_graphic() && !tile.is_ascii_alphabetic())
    }

    pub fn is_snoop(tile: char) -> bool {
        tile == 'X'
    }

    /// Doors of a room in row-major discovery order.
    pub fn doors(&self, room: Room) -> &[Coord] {
        self.door_map.get(&room).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Blocking coordinates guarding a room's doors.
    pub fn door_blocks(&self, room: Room) -> Option<&BTreeSet<Coord>> {
        self.door_blocks.get(&room)
    }

    /// Interior slot coordinates, for the rendering collaborator.
    pub fn room_slots(&self, room: Room) -> &[Coord] {
        self.room_slots.get(&room).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn secret_target(&self, from: &Position) -> Option<Position> {
        self.secret_map.get(from).copied()
    }

    pub fn entrance_exceptions(&self) -> &BTreeSet<(Room, MoveDirection)> {
        &self.entrance_exceptions
    }

    pub fn full_block(&self) -> bool {
        self.full_block
    }

    pub fn allow_combo_rolls(&self) -> bool {
        self.allow_combo_rolls
    }

    /// Whether a room is fully blocked by occupancy.
    ///
    /// True only when full blocking is active and every door-block
    /// coordinate of the room is occupied. Pure in the occupancy argument.
    pub fn is_blocked(&self, room: Room, occupied: &BTreeSet<Coord>) -> bool {
        self.full_block
            && self
                .door_blocks
                .get(&room)
                .is_some_and(|blocks| blocks.iter().all(|c| occupied.contains(c)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cards::Edition;
    use crate::domain::layouts::{BoardLayout, StartSpots};

    fn layout(grid: &str) -> BoardLayout {
        BoardLayout {
            edition: Edition::Basic,
            grid: grid.to_string(),
            secret_pairs: vec![],
            entrance_exceptions: vec![],
            full_block: true,
            allow_combo_rolls: false,
            start_spots: StartSpots::Corridor(vec![(0, 0)]),
        }
    }

    #[test]
    fn ragged_grid_is_a_config_error() {
        let err = Board::from_layout(&layout("OOO\nOO")).unwrap_err();
        assert!(matches!(err, DomainError::Config(_)));
    }

    #[test]
    fn unknown_entrance_letter_is_a_config_error() {
        // Basic roster covers A..I; Z has no room.
        let err = Board::from_layout(&layout("OOO\nOZO")).unwrap_err();
        assert!(matches!(err, DomainError::Config(_)));
    }

    #[test]
    fn doors_are_collected_in_row_major_order() {
        let grid = "OAOO\nOOOO\nOAOO";
        let board = Board::from_layout(&layout(grid)).unwrap();
        assert_eq!(board.doors(Room::Study), &[(0, 1), (2, 1)]);
    }

    #[test]
    fn door_blocks_skip_excepted_directions() {
        // Door at (1,1); O tiles on all four sides.
        let grid = "OOO\nOAO\nOOO";
        let mut l = layout(grid);
        let board = Board::from_layout(&l).unwrap();
        let blocks = board.door_blocks(Room::Study).unwrap();
        assert_eq!(blocks.len(), 4);

        // Excepting entry moving Down removes the block above the door
        // (the tile from which a player would step down onto it).
        l.entrance_exceptions = vec![(Room::Study, MoveDirection::Down)];
        let board = Board::from_layout(&l).unwrap();
        let blocks = board.door_blocks(Room::Study).unwrap();
        assert_eq!(blocks.len(), 3);
        assert!(!blocks.contains(&(0, 1)));
    }

    #[test]
    fn blocking_requires_full_block_and_total_occupancy() {
        let grid = "OOO\nOAO\nOOO";
        let mut l = layout(grid);
        let board = Board::from_layout(&l).unwrap();
        let all: BTreeSet<Coord> = [(0, 1), (2, 1), (1, 0), (1, 2)].into_iter().collect();
        let some: BTreeSet<Coord> = [(0, 1), (2, 1)].into_iter().collect();
        assert!(board.is_blocked(Room::Study, &all));
        assert!(!board.is_blocked(Room::Study, &some));

        l.full_block = false;
        let board = Board::from_layout(&l).unwrap();
        assert!(!board.is_blocked(Room::Study, &all));
    }

    #[test]
    fn secret_map_is_symmetric() {
        let mut l = layout("OAOB\nOOOO");
        l.secret_pairs = vec![(Position::Room(Room::Study), Position::Room(Room::Hall))];
        let board = Board::from_layout(&l).unwrap();
        assert_eq!(
            board.secret_target(&Position::Room(Room::Study)),
            Some(Position::Room(Room::Hall))
        );
        assert_eq!(
            board.secret_target(&Position::Room(Room::Hall)),
            Some(Position::Room(Room::Study))
        );
        assert_eq!(board.secret_target(&Position::Room(Room::Lounge)), None);
    }

    #[test]
    fn walkable_tiles_cover_corridor_codes() {
        assert!(Board::is_walkable('O'));
        assert!(Board::is_walkable('X'));
        assert!(Board::is_walkable('.'));
        assert!(!Board::is_walkable('r'));
        assert!(!Board::is_walkable('s'));
        assert!(!Board::is_walkable('A'));
    }

    #[test]
    fn tile_lookup_is_bounds_checked() {
        let board = Board::from_layout(&layout("OO\nOO")).unwrap();
        assert_eq!(board.tile((0, 0)), Some('O'));
        assert_eq!(board.tile((-1, 0)), None);
        assert_eq!(board.tile((0, 2)), None);
        assert_eq!(board.tile((2, 0)), None);
    }
}
