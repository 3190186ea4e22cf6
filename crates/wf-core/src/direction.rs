//! Movement vocabulary.
//!
//! Connections are keyed by free-form direction labels so template authors
//! can use words like `deeper` or `portal`. The compass directions get a
//! typed [`Direction`] with shorthand parsing; every label, compass or not,
//! can be reversed through [`opposite`].

use std::fmt;

/// A compass or vertical direction with a well-known shorthand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// North.
    North,
    /// South.
    South,
    /// East.
    East,
    /// West.
    West,
    /// Up.
    Up,
    /// Down.
    Down,
    /// Northeast.
    Northeast,
    /// Northwest.
    Northwest,
    /// Southeast.
    Southeast,
    /// Southwest.
    Southwest,
}

impl Direction {
    /// All directions, in display order.
    pub const ALL: [Direction; 10] = [
        Self::North,
        Self::South,
        Self::East,
        Self::West,
        Self::Up,
        Self::Down,
        Self::Northeast,
        Self::Northwest,
        Self::Southeast,
        Self::Southwest,
    ];

    /// The four cardinal directions.
    pub const CARDINAL: [Direction; 4] = [Self::North, Self::South, Self::East, Self::West];

    /// Parse a direction from its full name or shorthand.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "n" | "north" => Some(Self::North),
            "s" | "south" => Some(Self::South),
            "e" | "east" => Some(Self::East),
            "w" | "west" => Some(Self::West),
            "u" | "up" => Some(Self::Up),
            "d" | "down" => Some(Self::Down),
            "ne" | "northeast" => Some(Self::Northeast),
            "nw" | "northwest" => Some(Self::Northwest),
            "se" | "southeast" => Some(Self::Southeast),
            "sw" | "southwest" => Some(Self::Southwest),
            _ => None,
        }
    }

    /// Parse a direction for the command interpreter. Identical to
    /// [`Direction::parse`] except that the one-letter `u` and `d` are
    /// rejected, since they collide with ordinary words.
    pub fn parse_compass(s: &str) -> Option<Self> {
        let lower = s.trim().to_lowercase();
        if lower == "u" || lower == "d" {
            return None;
        }
        Self::parse(&lower)
    }

    /// Get the display name for this direction.
    pub fn name(&self) -> &'static str {
        match self {
            Self::North => "north",
            Self::South => "south",
            Self::East => "east",
            Self::West => "west",
            Self::Up => "up",
            Self::Down => "down",
            Self::Northeast => "northeast",
            Self::Northwest => "northwest",
            Self::Southeast => "southeast",
            Self::Southwest => "southwest",
        }
    }

    /// The direction pointing back the way you came.
    pub fn reverse(&self) -> Self {
        match self {
            Self::North => Self::South,
            Self::South => Self::North,
            Self::East => Self::West,
            Self::West => Self::East,
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Northeast => Self::Southwest,
            Self::Southwest => Self::Northeast,
            Self::Northwest => Self::Southeast,
            Self::Southeast => Self::Northwest,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Labels that lead back along themselves.
const SELF_OPPOSITE: &[&str] = &["secret", "portal", "tunnel", "shore", "passage", "shaft"];

/// Domain-specific opposite pairs beyond the compass.
const PAIRED: &[(&str, &str)] = &[
    ("deeper", "surface"),
    ("inner", "outer"),
    ("deep", "shallow"),
    ("in", "out"),
];

/// The opposite of a connection label, if one is defined.
///
/// Compass labels reverse through [`Direction::reverse`]; labels such as
/// `portal` map to themselves; unknown labels have no opposite.
pub fn opposite(label: &str) -> Option<&'static str> {
    let label = label.trim().to_lowercase();
    if let Some(dir) = Direction::parse(&label).filter(|d| d.name() == label) {
        return Some(dir.reverse().name());
    }
    if let Some(same) = SELF_OPPOSITE.iter().find(|s| **s == label) {
        return Some(*same);
    }
    PAIRED.iter().find_map(|(a, b)| {
        if *a == label {
            Some(*b)
        } else if *b == label {
            Some(*a)
        } else {
            None
        }
    })
}

/// Expand a compass shorthand (`ne`) to its full label (`northeast`);
/// any other label is returned lower-cased and trimmed.
pub fn normalize(label: &str) -> String {
    match Direction::parse(label) {
        Some(dir) => dir.name().to_string(),
        None => label.trim().to_lowercase(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_shorthand_and_names() {
        assert_eq!(Direction::parse("n"), Some(Direction::North));
        assert_eq!(Direction::parse("North"), Some(Direction::North));
        assert_eq!(Direction::parse("sw"), Some(Direction::Southwest));
        assert_eq!(Direction::parse("sideways"), None);
    }

    #[test]
    fn compass_parse_skips_single_letter_vertical() {
        assert_eq!(Direction::parse_compass("ne"), Some(Direction::Northeast));
        assert_eq!(Direction::parse_compass("up"), Some(Direction::Up));
        assert_eq!(Direction::parse_compass("u"), None);
        assert_eq!(Direction::parse_compass("d"), None);
    }

    #[test]
    fn every_direction_reverses_to_itself_twice() {
        for dir in Direction::ALL {
            assert_eq!(dir.reverse().reverse(), dir);
            assert_ne!(dir.reverse(), dir);
        }
    }

    #[test]
    fn opposite_table() {
        assert_eq!(opposite("north"), Some("south"));
        assert_eq!(opposite("northwest"), Some("southeast"));
        assert_eq!(opposite("up"), Some("down"));
        assert_eq!(opposite("deeper"), Some("surface"));
        assert_eq!(opposite("outer"), Some("inner"));
        assert_eq!(opposite("portal"), Some("portal"));
        assert_eq!(opposite("shaft"), Some("shaft"));
        assert_eq!(opposite("widdershins"), None);
    }

    #[test]
    fn shorthand_labels_have_no_opposite_until_normalized() {
        assert_eq!(opposite("n"), None);
        assert_eq!(opposite(&normalize("n")), Some("south"));
    }
}
