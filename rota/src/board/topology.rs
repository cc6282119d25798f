//! The fixed shape of the board: which holes are connected, and which
//! triples of holes win.
//!
//! All indices are 0-based, row-major over the 3x3 grid. The service talks
//! in 1-based positions, see [`crate::to_position`].

/// Number of holes on the board.
pub const NUM_CELLS: usize = 9;

/// The hole in the middle of the board, connected to every other hole.
pub const CENTER: usize = 4;

/// Adjacency lists, in the order in which moves are generated.
static NEIGHBORS: [&[usize]; NUM_CELLS] = [
    &[1, 3, 4],
    &[0, 2, 4],
    &[1, 4, 5],
    &[0, 4, 6],
    &[0, 1, 2, 3, 5, 6, 7, 8],
    &[2, 4, 8],
    &[3, 4, 7],
    &[4, 6, 8],
    &[4, 5, 7],
];

/// Every set of three holes that wins the game. No other triple counts.
pub static WINNING_TRIPLES: [[usize; 3]; 12] = [
    // Rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // Columns
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // Three consecutive holes on the outer ring, around each corner
    [3, 0, 1],
    [1, 2, 5],
    [3, 6, 7],
    [7, 8, 5],
    // Diagonals through the center
    [0, 4, 8],
    [2, 4, 6],
];

/// The holes that a piece on `idx` can move to, if they are empty.
///
/// Panics if `idx` is not a valid index.
pub fn neighbors(idx: usize) -> &'static [usize] {
    NEIGHBORS[idx]
}

pub fn are_adjacent(from: usize, to: usize) -> bool {
    from < NUM_CELLS && neighbors(from).contains(&to)
}
