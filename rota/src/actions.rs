use std::fmt;

use crate::{neighbors, to_position, Board, Cell, Side};

/// A single turn: either placing a new piece or sliding an existing one.
///
/// Indices are 0-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    Place { idx: usize },
    Move { from: usize, to: usize },
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Action::Place { idx } => write!(f, "place on {}", to_position(idx)),
            Action::Move { from, to } => {
                write!(f, "move {} -> {}", to_position(from), to_position(to))
            }
        }
    }
}

/// Every empty hole, in ascending order.
///
/// The order matters: selection breaks ties in favor of the first action found.
pub fn placements(board: &Board) -> Vec<Action> {
    board
        .locations(Cell::Empty)
        .into_iter()
        .map(|idx| Action::Place { idx })
        .collect()
}

/// Every legal slide for `side`, by ascending origin and then in adjacency order.
pub fn moves(board: &Board, side: Side) -> Vec<Action> {
    let mut moves = Vec::new();
    for from in board.locations(side.cell()) {
        moves.extend(
            neighbors(from)
                .iter()
                .filter(|&&to| board.cell(to) == Cell::Empty)
                .map(|&to| Action::Move { from, to }),
        );
    }
    moves
}
