//! Card identity for both editions.
//!
//! Suspects, weapons and rooms are plain enums covering the union of the two
//! editions' members; `Edition` selects the active roster. Cards carry only
//! identity plus static display data (name, suspect color, room ambience).
//! Board geometry is deliberately not a card concern.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which rule set / board a game uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Edition {
    /// 6 suspects, 6 weapons, 9 rooms; full door blocking; no combo rolls.
    Basic,
    /// 10 suspects, 8 weapons, 13 rooms (the Cloak Room is never part of a
    /// solution); hop-over movement, combo rolls, snoop tiles.
    Master,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suspect {
    Scarlet,
    Mustard,
    White,
    Green,
    Peacock,
    Plum,
    Peach,
    Brunette,
    Rose,
    Gray,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weapon {
    Knife,
    Revolver,
    LeadPipe,
    Candlestick,
    Rope,
    Wrench,
    Horseshoe,
    Poison,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Room {
    Study,
    Hall,
    Lounge,
    Library,
    Billiard,
    Dining,
    Conservatory,
    Ballroom,
    Kitchen,
    Studio,
    Courtyard,
    Trophy,
    Carriage,
    Gazebo,
    Drawing,
    Fountain,
    Cloak,
}

/// Room flavor tag consumed by the narrative collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ambience {
    Quiet,
    Stately,
}

/// Any card that can sit in a hand, the deck or the solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Card {
    Suspect(Suspect),
    Weapon(Weapon),
    Room(Room),
}

const BASIC_SUSPECTS: [Suspect; 6] = [
    Suspect::Scarlet,
    Suspect::Mustard,
    Suspect::White,
    Suspect::Green,
    Suspect::Peacock,
    Suspect::Plum,
];

const MASTER_SUSPECTS: [Suspect; 10] = [
    Suspect::Scarlet,
    Suspect::Mustard,
    Suspect::White,
    Suspect::Green,
    Suspect::Peacock,
    Suspect::Plum,
    Suspect::Peach,
    Suspect::Brunette,
    Suspect::Rose,
    Suspect::Gray,
];

const BASIC_WEAPONS: [Weapon; 6] = [
    Weapon::Knife,
    Weapon::Revolver,
    Weapon::LeadPipe,
    Weapon::Candlestick,
    Weapon::Rope,
    Weapon::Wrench,
];

const MASTER_WEAPONS: [Weapon; 8] = [
    Weapon::Knife,
    Weapon::Revolver,
    Weapon::LeadPipe,
    Weapon::Candlestick,
    Weapon::Rope,
    Weapon::Wrench,
    Weapon::Horseshoe,
    Weapon::Poison,
];

const BASIC_ROOMS: [Room; 9] = [
    Room::Study,
    Room::Hall,
    Room::Lounge,
    Room::Library,
    Room::Billiard,
    Room::Dining,
    Room::Conservatory,
    Room::Ballroom,
    Room::Kitchen,
];

const MASTER_ROOMS: [Room; 13] = [
    Room::Studio,
    Room::Courtyard,
    Room::Trophy,
    Room::Library,
    Room::Billiard,
    Room::Dining,
    Room::Conservatory,
    Room::Carriage,
    Room::Kitchen,
    Room::Gazebo,
    Room::Drawing,
    Room::Fountain,
    Room::Cloak,
];

impl Edition {
    /// Active suspects in canonical (standard turn) order.
    pub fn suspects(self) -> &'static [Suspect] {
        match self {
            Edition::Basic => &BASIC_SUSPECTS,
            Edition::Master => &MASTER_SUSPECTS,
        }
    }

    pub fn weapons(self) -> &'static [Weapon] {
        match self {
            Edition::Basic => &BASIC_WEAPONS,
            Edition::Master => &MASTER_WEAPONS,
        }
    }

    /// All rooms the board pierces with entrances, in entrance-letter order
    /// (`A` maps to the first entry and so on).
    pub fn rooms(self) -> &'static [Room] {
        match self {
            Edition::Basic => &BASIC_ROOMS,
            Edition::Master => &MASTER_ROOMS,
        }
    }

    /// Rooms that may appear in the solution (excludes the Cloak Room).
    pub fn solution_rooms(self) -> &'static [Room] {
        match self {
            Edition::Basic => &BASIC_ROOMS,
            Edition::Master => &MASTER_ROOMS[..MASTER_ROOMS.len() - 1],
        }
    }

    /// The room suggestions may never name or be made from.
    pub fn no_suggest_room(self) -> Option<Room> {
        match self {
            Edition::Basic => None,
            Edition::Master => Some(Room::Cloak),
        }
    }

    /// Position of a suspect within the active roster.
    pub fn suspect_ordinal(self, suspect: Suspect) -> Option<usize> {
        self.suspects().iter().position(|&s| s == suspect)
    }
}

impl Suspect {
    pub fn name(self) -> &'static str {
        match self {
            Suspect::Scarlet => "Ms. Scarlet",
            Suspect::Mustard => "Col. Mustard",
            Suspect::White => "Mrs. White",
            Suspect::Green => "Mr. Green",
            Suspect::Peacock => "Mrs. Peacock",
            Suspect::Plum => "Prof. Plum",
            Suspect::Peach => "Ms. Peach",
            Suspect::Brunette => "M. Brunette",
            Suspect::Rose => "Mme. Rose",
            Suspect::Gray => "Sgt. Gray",
        }
    }

    /// Token color as 0xRRGGBB, for the rendering collaborator.
    pub fn color(self) -> u32 {
        match self {
            Suspect::Scarlet => 0xD81840,
            Suspect::Mustard => 0xD8A038,
            Suspect::White => 0xE0E0E0,
            Suspect::Green => 0x006000,
            Suspect::Peacock => 0x006070,
            Suspect::Plum => 0x802050,
            Suspect::Peach => 0xFFCC99,
            Suspect::Brunette => 0x6D4730,
            Suspect::Rose => 0xFF48A5,
            Suspect::Gray => 0x777777,
        }
    }
}

impl Weapon {
    pub fn name(self) -> &'static str {
        match self {
            Weapon::Knife => "Knife",
            Weapon::Revolver => "Revolver",
            Weapon::LeadPipe => "Lead Pipe",
            Weapon::Candlestick => "Candlestick",
            Weapon::Rope => "Rope",
            Weapon::Wrench => "Wrench",
            Weapon::Horseshoe => "Horseshoe",
            Weapon::Poison => "Poison",
        }
    }
}

impl Room {
    pub fn name(self) -> &'static str {
        match self {
            Room::Study => "Study",
            Room::Hall => "Hall",
            Room::Lounge => "Lounge",
            Room::Library => "Library",
            Room::Billiard => "Billiard Room",
            Room::Dining => "Dining Room",
            Room::Conservatory => "Conservatory",
            Room::Ballroom => "Ballroom",
            Room::Kitchen => "Kitchen",
            Room::Studio => "Studio",
            Room::Courtyard => "Courtyard",
            Room::Trophy => "Trophy Room",
            Room::Carriage => "Carriage House",
            Room::Gazebo => "Gazebo",
            Room::Drawing => "Drawing Room",
            Room::Fountain => "Fountain",
            Room::Cloak => "Cloak Room",
        }
    }

    pub fn ambience(self) -> Option<Ambience> {
        match self {
            Room::Study | Room::Hall | Room::Billiard | Room::Dining | Room::Ballroom => {
                Some(Ambience::Quiet)
            }
            Room::Lounge | Room::Library | Room::Conservatory | Room::Kitchen => {
                Some(Ambience::Stately)
            }
            Room::Trophy => Some(Ambience::Stately),
            Room::Studio
            | Room::Courtyard
            | Room::Carriage
            | Room::Gazebo
            | Room::Drawing
            | Room::Fountain => Some(Ambience::Quiet),
            Room::Cloak => None,
        }
    }
}

impl fmt::Display for Suspect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Weapon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Room {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Card::Suspect(s) => s.fmt(f),
            Card::Weapon(w) => w.fmt(f),
            Card::Room(r) => r.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roster_sizes_match_editions() {
        assert_eq!(Edition::Basic.suspects().len(), 6);
        assert_eq!(Edition::Basic.weapons().len(), 6);
        assert_eq!(Edition::Basic.rooms().len(), 9);
        assert_eq!(Edition::Master.suspects().len(), 10);
        assert_eq!(Edition::Master.weapons().len(), 8);
        assert_eq!(Edition::Master.rooms().len(), 13);
    }

    #[test]
    fn cloak_is_never_a_solution_candidate() {
        assert!(!Edition::Master.solution_rooms().contains(&Room::Cloak));
        assert_eq!(Edition::Master.solution_rooms().len(), 12);
        assert_eq!(Edition::Master.no_suggest_room(), Some(Room::Cloak));
        assert_eq!(Edition::Basic.no_suggest_room(), None);
    }

    #[test]
    fn ordinals_follow_roster_order() {
        assert_eq!(Edition::Basic.suspect_ordinal(Suspect::Scarlet), Some(0));
        assert_eq!(Edition::Basic.suspect_ordinal(Suspect::Plum), Some(5));
        assert_eq!(Edition::Basic.suspect_ordinal(Suspect::Gray), None);
        assert_eq!(Edition::Master.suspect_ordinal(Suspect::Gray), Some(9));
    }

    #[test]
    fn cloak_has_no_ambience() {
        assert_eq!(Room::Cloak.ambience(), None);
        assert_eq!(Room::Lounge.ambience(), Some(Ambience::Stately));
        assert_eq!(Room::Gazebo.ambience(), Some(Ambience::Quiet));
    }

    #[test]
    fn display_uses_full_names() {
        assert_eq!(Suspect::Scarlet.to_string(), "Ms. Scarlet");
        assert_eq!(Weapon::LeadPipe.to_string(), "Lead Pipe");
        assert_eq!(Card::Room(Room::Billiard).to_string(), "Billiard Room");
    }
}
