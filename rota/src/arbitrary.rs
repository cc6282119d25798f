use quickcheck::{Arbitrary, Gen};

use crate::{moves, placements, Board, PieceCounts, Side, PIECES_PER_SIDE};

/// A board that can come up in a real round: both sides take turns,
/// placing until they have three pieces and moving after that, and the
/// round stops as soon as someone wins.
#[derive(Clone, Debug)]
pub struct ReachableBoard {
    pub board: Board,
}

impl Arbitrary for ReachableBoard {
    fn arbitrary(g: &mut Gen) -> Self {
        let mut board = Board::empty();
        let mut side = if bool::arbitrary(g) {
            Side::Player
        } else {
            Side::Computer
        };
        let num_turns = u8::arbitrary(g) % 16;

        for _ in 0..num_turns {
            if board.wins(Side::Player) || board.wins(Side::Computer) {
                break;
            }
            let actions = if PieceCounts::of(&board).get(side) < PIECES_PER_SIDE {
                placements(&board)
            } else {
                moves(&board, side)
            };
            let Some(&action) = g.choose(&actions) else {
                break;
            };
            board = board.apply_generated(side, action);
            side = side.opponent();
        }

        ReachableBoard { board }
    }
}
