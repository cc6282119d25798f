use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, trace};

use crate::{
    moves, neighbors, placements, Action, Board, Cell, GameState, Minimax, Phase, PieceCounts,
    SelectionError, Side, CENTER, PIECES_PER_SIDE,
};

/// Decides one action per turn for the side it plays.
///
/// While the computer has a single piece, the next piece goes right next to
/// it (but not into the center). A side without pieces places randomly, and
/// everything else is decided by a minimax search. Actions that would win on the spot are never taken:
/// the goal is to keep rounds going, and a win ends the round just like a loss.
pub struct ActionSelector<R> {
    rng: R,
    search: Minimax,
}

impl<R: Rng> ActionSelector<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            search: Minimax::default(),
        }
    }

    pub fn with_search(rng: R, search: Minimax) -> Self {
        Self { rng, search }
    }

    /// Picks the next action for `side`.
    ///
    /// While the computer has a single piece, the answer is the first empty
    /// neighbor of that piece outside the center. Otherwise a side without
    /// pieces places randomly, and from then on actions are ranked by search
    /// value as seen from `side`: the highest value for the player, the lowest
    /// for the computer.
    pub fn select(&mut self, board: &Board, side: Side) -> Result<Action, SelectionError> {
        if let &[piece] = board.locations(Cell::Computer).as_slice() {
            return neighbors(piece)
                .iter()
                .copied()
                .find(|&idx| idx != CENTER && board.cell(idx) == Cell::Empty)
                .map(|idx| Action::Place { idx })
                .ok_or(SelectionError::NoQualifyingNeighbor { piece });
        }
        if board.count(side.cell()) == 0 {
            return placements(board)
                .choose(&mut self.rng)
                .copied()
                .ok_or(SelectionError::NoLegalAction { side });
        }
        self.best_action(board, side)
    }

    /// Scores every action that doesn't win immediately and returns the best one.
    ///
    /// Ties go to the action that was generated first.
    fn best_action(&self, board: &Board, side: Side) -> Result<Action, SelectionError> {
        let counts = PieceCounts::of(board);
        let (actions, phase) = if counts.get(side) < PIECES_PER_SIDE {
            (placements(board), Phase::Placing)
        } else {
            (moves(board, side), Phase::Moving)
        };

        let mut best: Option<(i8, Action)> = None;
        for action in actions {
            let next_board = board.apply_generated(side, action);
            if next_board.wins(side) {
                trace!(%action, "Skipping winning action");
                continue;
            }
            let next_counts = match action {
                Action::Place { .. } => counts.after_placement(side),
                Action::Move { .. } => counts,
            };
            let state = GameState {
                board: next_board,
                mover: side.opponent(),
                phase,
                counts: next_counts,
            };
            let score = oriented(self.search.value(&state), side);
            trace!(%action, score);
            if best.map_or(true, |(best_score, _)| score > best_score) {
                debug!(%action, score, "New best action");
                best = Some((score, action));
            }
        }

        best.map(|(_, action)| action)
            .ok_or(SelectionError::NoLegalAction { side })
    }
}

/// Search values favor the player, so flip them when choosing for the computer.
fn oriented(value: i8, side: Side) -> i8 {
    match side {
        Side::Player => value,
        Side::Computer => -value,
    }
}
