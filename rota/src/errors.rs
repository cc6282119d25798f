use crate::{Side, NUM_CELLS};

/// The error type for [`Board::apply()`](crate::Board::apply), i.e. for placing or moving a piece.
#[derive(Debug, PartialEq, Eq)]
pub enum IllegalAction {
    OutOfBounds { idx: usize },
    TargetOccupied { idx: usize },
    NoPieceToMove { side: Side, idx: usize },
    NotAdjacent { from: usize, to: usize },
}

impl std::error::Error for IllegalAction {}

impl std::fmt::Display for IllegalAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalAction::OutOfBounds { idx } =>
                write!(f, "Index {} is outside of the board (0 to {})", idx, NUM_CELLS - 1),
            IllegalAction::TargetOccupied { idx } =>
                write!(f, "Position {} is already occupied", idx + 1),
            IllegalAction::NoPieceToMove { side, idx } =>
                write!(f, "The {} has no piece on position {} to move", side, idx + 1),
            IllegalAction::NotAdjacent { from, to } =>
                write!(f, "Position {} is not adjacent to position {}", to + 1, from + 1),
        }
    }
}

/// The error type for parsing a board from its 9-character representation.
#[derive(Debug, PartialEq, Eq)]
pub enum ParseBoardError {
    WrongLength { len: usize },
    InvalidCharacter { idx: usize, c: char },
}

impl std::error::Error for ParseBoardError {}

impl std::fmt::Display for ParseBoardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseBoardError::WrongLength { len } => {
                write!(f, "A board has {} cells, but got {} characters", NUM_CELLS, len)
            }
            ParseBoardError::InvalidCharacter { idx, c } => write!(
                f,
                "Character '{}' at index {} is not one of '-', 'p' or 'c'",
                c, idx
            ),
        }
    }
}

/// The error type for [`ActionSelector::select()`](crate::ActionSelector::select).
#[derive(Debug, PartialEq, Eq)]
pub enum SelectionError {
    /// The second-placement rule found no empty, non-center neighbor of the first piece.
    NoQualifyingNeighbor { piece: usize },
    /// Every legal action was filtered out, or there were none to begin with.
    NoLegalAction { side: Side },
}

impl std::error::Error for SelectionError {}

impl std::fmt::Display for SelectionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SelectionError::NoQualifyingNeighbor { piece } => write!(
                f,
                "No empty neighbor outside the center next to the piece on position {}",
                piece + 1
            ),
            SelectionError::NoLegalAction { side } => {
                write!(f, "There is no action the {} can take", side)
            }
        }
    }
}
