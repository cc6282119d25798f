use crate::{Board, Cell};

/// Draws the board as a boxed 3x3 grid, with empty holes showing their position number.
pub fn visualize_board(board: &Board) -> String {
    let mut result = String::from("╭───────╮");
    for (row_idx, row) in board.cells().chunks(3).enumerate() {
        result += "\n│";
        for (col_idx, cell) in row.iter().enumerate() {
            match cell {
                Cell::Empty => result += &format!(" {}", row_idx * 3 + col_idx + 1),
                _ => result += &format!(" {}", cell),
            }
        }
        result += " │";
    }
    result += "\n╰───────╯";
    result
}
