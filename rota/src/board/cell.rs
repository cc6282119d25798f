use std::fmt;

/// The contents of a single hole on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Player,
    Computer,
}

impl Cell {
    /// The character used for this cell in the service's board strings.
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '-',
            Cell::Player => 'p',
            Cell::Computer => 'c',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '-' => Some(Cell::Empty),
            'p' => Some(Cell::Player),
            'c' => Some(Cell::Computer),
            _ => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// One of the two sides that own pieces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    /// The maximizing side in the search.
    Player,
    /// The minimizing side in the search.
    Computer,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::Player => Side::Computer,
            Side::Computer => Side::Player,
        }
    }

    pub fn cell(self) -> Cell {
        match self {
            Side::Player => Cell::Player,
            Side::Computer => Cell::Computer,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Player => write!(f, "player"),
            Side::Computer => write!(f, "computer"),
        }
    }
}
