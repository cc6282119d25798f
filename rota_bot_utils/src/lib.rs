mod session;
pub use session::*;

use rota::{Action, BoardSnapshot};

/// The game service that a client plays against.
///
/// Positions are 1-based, as on the wire. Every request returns the state
/// of the session after the request was handled, including the computer's reply.
pub trait GameService {
    fn start_session(&mut self) -> anyhow::Result<BoardSnapshot>;
    fn next_round(&mut self) -> anyhow::Result<BoardSnapshot>;
    fn place(&mut self, position: usize) -> anyhow::Result<BoardSnapshot>;
    fn move_piece(&mut self, from: usize, to: usize) -> anyhow::Result<BoardSnapshot>;

    /// Sends an action chosen on the 0-based board.
    fn apply(&mut self, action: Action) -> anyhow::Result<BoardSnapshot> {
        match action {
            Action::Place { idx } => self.place(rota::to_position(idx)),
            Action::Move { from, to } => {
                self.move_piece(rota::to_position(from), rota::to_position(to))
            }
        }
    }
}
