//! Robot headings on the grid.
//!
//! Headings are the four cardinal directions, wire-encoded as the even
//! integers 0/2/4/6 so that the minimum wrapped difference between two codes
//! is exactly the rotational distance (two per quarter turn). Diagonal
//! headings do not exist; a 180-degree change is never a single transition.

/// Cardinal heading of the robot. North is +y, East is +x.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Heading {
    North,
    East,
    South,
    West,
}

impl Heading {
    pub const ALL: [Heading; 4] = [Heading::North, Heading::East, Heading::South, Heading::West];

    /// Wire encoding shared with the robot firmware: N=0, E=2, S=4, W=6.
    pub fn code(self) -> i32 {
        match self {
            Heading::North => 0,
            Heading::East => 2,
            Heading::South => 4,
            Heading::West => 6,
        }
    }

    pub fn from_code(code: i32) -> Option<Heading> {
        match code {
            0 => Some(Heading::North),
            2 => Some(Heading::East),
            4 => Some(Heading::South),
            6 => Some(Heading::West),
            _ => None,
        }
    }

    /// Dense index 0..4, used for array-backed per-state storage.
    pub fn index(self) -> usize {
        (self.code() / 2) as usize
    }

    /// Unit displacement of one forward step.
    pub fn unit(self) -> (i32, i32) {
        match self {
            Heading::North => (0, 1),
            Heading::East => (1, 0),
            Heading::South => (0, -1),
            Heading::West => (-1, 0),
        }
    }

    pub fn opposite(self) -> Heading {
        match self {
            Heading::North => Heading::South,
            Heading::East => Heading::West,
            Heading::South => Heading::North,
            Heading::West => Heading::East,
        }
    }

    /// The heading reached by a quarter turn clockwise (N -> E -> S -> W -> N).
    pub fn clockwise(self) -> Heading {
        match self {
            Heading::North => Heading::East,
            Heading::East => Heading::South,
            Heading::South => Heading::West,
            Heading::West => Heading::North,
        }
    }

    pub fn counterclockwise(self) -> Heading {
        self.clockwise().opposite()
    }

    /// Offsets perpendicular to the heading, used for lateral camera poses.
    pub fn perpendicular(self) -> (i32, i32) {
        let (dx, dy) = self.unit();
        (dy, -dx)
    }
}

/// Rotational distance between two headings in encoding units.
///
/// Zero for equal headings, 2 per quarter turn, 4 for opposite headings.
pub fn rotation_cost(a: Heading, b: Heading) -> u32 {
    let diff = (a.code() - b.code()).unsigned_abs();
    diff.min(8 - diff)
}
