mod cell;
mod topology;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use cell::*;
pub use topology::*;

use crate::{Action, IllegalAction, ParseBoardError};

/// The state of a round, as far as the board can tell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameOutcome {
    Ongoing,
    PlayerWin,
    ComputerWin,
}

/// The nine holes of the board, row-major.
///
/// This is a [`Copy`] value. Its "mutating" methods return a new board
/// instead of really mutating, so a search can hold on to every board it
/// has seen without undoing anything.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Board {
    cells: [Cell; NUM_CELLS],
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    pub fn empty() -> Self {
        Self {
            cells: [Cell::Empty; NUM_CELLS],
        }
    }

    pub fn from_cells(cells: [Cell; NUM_CELLS]) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[Cell; NUM_CELLS] {
        &self.cells
    }

    /// The cell at index `idx`.
    ///
    /// Panics if `idx` is not a valid index.
    pub fn cell(&self, idx: usize) -> Cell {
        self.cells[idx]
    }

    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    /// All indices holding `cell`, in ascending order.
    pub fn locations(&self, cell: Cell) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(idx, &c)| (c == cell).then_some(idx))
            .collect()
    }

    /// Whether `side` holds all three holes of any winning triple.
    pub fn wins(&self, side: Side) -> bool {
        let cell = side.cell();
        WINNING_TRIPLES
            .iter()
            .any(|triple| triple.iter().all(|&idx| self.cells[idx] == cell))
    }

    pub fn outcome(&self) -> GameOutcome {
        if self.wins(Side::Player) {
            GameOutcome::PlayerWin
        } else if self.wins(Side::Computer) {
            GameOutcome::ComputerWin
        } else {
            GameOutcome::Ongoing
        }
    }

    /// Put a new piece of `side` on the empty hole `idx`.
    pub fn place(&self, side: Side, idx: usize) -> Result<Board, IllegalAction> {
        if idx >= NUM_CELLS {
            return Err(IllegalAction::OutOfBounds { idx });
        }
        if self.cells[idx] != Cell::Empty {
            return Err(IllegalAction::TargetOccupied { idx });
        }
        let mut cells = self.cells;
        cells[idx] = side.cell();
        Ok(Board { cells })
    }

    /// Slide a piece of `side` from `from` to the adjacent empty hole `to`.
    pub fn move_piece(&self, side: Side, from: usize, to: usize) -> Result<Board, IllegalAction> {
        if from >= NUM_CELLS {
            return Err(IllegalAction::OutOfBounds { idx: from });
        }
        if to >= NUM_CELLS {
            return Err(IllegalAction::OutOfBounds { idx: to });
        }
        if self.cells[from] != side.cell() {
            return Err(IllegalAction::NoPieceToMove { side, idx: from });
        }
        if self.cells[to] != Cell::Empty {
            return Err(IllegalAction::TargetOccupied { idx: to });
        }
        if !are_adjacent(from, to) {
            return Err(IllegalAction::NotAdjacent { from, to });
        }
        let mut cells = self.cells;
        cells[from] = Cell::Empty;
        cells[to] = side.cell();
        Ok(Board { cells })
    }

    /// Checks and applies an action.
    pub fn apply(&self, side: Side, action: Action) -> Result<Board, IllegalAction> {
        match action {
            Action::Place { idx } => self.place(side, idx),
            Action::Move { from, to } => self.move_piece(side, from, to),
        }
    }

    /// Applies an action that came out of the action generator for this board.
    ///
    /// Skips the legality checks of [`Self::apply()`] in release builds.
    pub(crate) fn apply_generated(&self, side: Side, action: Action) -> Board {
        debug_assert_eq!(self.apply(side, action).ok(), Some(self.apply_unchecked(side, action)));
        self.apply_unchecked(side, action)
    }

    fn apply_unchecked(&self, side: Side, action: Action) -> Board {
        let mut cells = self.cells;
        match action {
            Action::Place { idx } => cells[idx] = side.cell(),
            Action::Move { from, to } => {
                cells[from] = Cell::Empty;
                cells[to] = side.cell();
            }
        }
        Board { cells }
    }
}

impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let len = s.chars().count();
        if len != NUM_CELLS {
            return Err(ParseBoardError::WrongLength { len });
        }
        let mut cells = [Cell::Empty; NUM_CELLS];
        for (idx, c) in s.chars().enumerate() {
            cells[idx] = Cell::from_char(c).ok_or(ParseBoardError::InvalidCharacter { idx, c })?;
        }
        Ok(Board { cells })
    }
}

impl TryFrom<String> for Board {
    type Error = ParseBoardError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Board> for String {
    fn from(board: Board) -> String {
        board.cells.iter().map(|c| c.to_char()).collect()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row_idx, row) in self.cells.chunks(3).enumerate() {
            if row_idx > 0 {
                writeln!(f)?;
            }
            for cell in row {
                write!(f, "{}", cell)?;
            }
        }
        Ok(())
    }
}
