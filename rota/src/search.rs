use crate::{moves, placements, Action, Board, Cell, Side};

/// Value of a board won by the player.
pub const PLAYER_WIN: i8 = 1;
/// Value of a board won by the computer.
pub const COMPUTER_WIN: i8 = -1;

const MAX_SENTINEL: i8 = -10;
const MIN_SENTINEL: i8 = 10;

/// The widest search window, used at the top level of every search.
pub const ALPHA_INIT: i8 = -100;
pub const BETA_INIT: i8 = 100;

/// The default number of plies searched.
pub const SEARCH_DEPTH: u8 = 5;

/// Number of pieces each side places before pieces start moving.
pub const PIECES_PER_SIDE: u8 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Placing,
    Moving,
}

/// How many pieces each side has placed so far.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PieceCounts {
    pub player: u8,
    pub computer: u8,
}

impl PieceCounts {
    pub fn of(board: &Board) -> Self {
        // A board holds at most nine pieces, so this can't truncate
        Self {
            player: board.count(Cell::Player) as u8,
            computer: board.count(Cell::Computer) as u8,
        }
    }

    pub fn get(self, side: Side) -> u8 {
        match side {
            Side::Player => self.player,
            Side::Computer => self.computer,
        }
    }

    #[must_use]
    pub fn after_placement(self, side: Side) -> Self {
        match side {
            Side::Player => Self {
                player: self.player + 1,
                ..self
            },
            Side::Computer => Self {
                computer: self.computer + 1,
                ..self
            },
        }
    }

    pub fn all_placed(self) -> bool {
        self.player == PIECES_PER_SIDE && self.computer == PIECES_PER_SIDE
    }

    /// The phase implied by these counts.
    pub fn phase(self) -> Phase {
        if self.all_placed() {
            Phase::Moving
        } else {
            Phase::Placing
        }
    }
}

/// Scores a board from the player's point of view.
///
/// A win only counts once the winning side has exactly three pieces on the board.
pub fn evaluate(board: &Board) -> i8 {
    if board.count(Cell::Player) == 3 && board.wins(Side::Player) {
        PLAYER_WIN
    } else if board.count(Cell::Computer) == 3 && board.wins(Side::Computer) {
        COMPUTER_WIN
    } else {
        0
    }
}

/// A node in the search tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameState {
    pub board: Board,
    /// The side to act next.
    pub mover: Side,
    pub phase: Phase,
    pub counts: PieceCounts,
}

impl GameState {
    pub fn is_terminal(&self) -> bool {
        self.board.wins(Side::Player) || self.board.wins(Side::Computer)
    }

    /// Returns all possible actions for the mover, in generation order.
    pub fn possible_actions(&self) -> Vec<Action> {
        match self.phase {
            Phase::Placing => placements(&self.board),
            Phase::Moving => moves(&self.board, self.mover),
        }
    }

    /// The state after the mover takes `action`, which must come from
    /// [`Self::possible_actions()`].
    pub fn apply_action(&self, action: Action) -> Self {
        let counts = match action {
            Action::Place { .. } => self.counts.after_placement(self.mover),
            Action::Move { .. } => self.counts,
        };
        GameState {
            board: self.board.apply_generated(self.mover, action),
            mover: self.mover.opponent(),
            phase: self.phase,
            counts,
        }
    }
}

/// Depth-limited minimax with alpha-beta pruning.
///
/// The player maximizes and the computer minimizes. Once both sides have
/// placed all their pieces, the search continues into the moving phase with
/// a fresh budget of `phase_horizon` plies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Minimax {
    pub depth: u8,
    pub phase_horizon: u8,
}

impl Default for Minimax {
    fn default() -> Self {
        Self {
            depth: SEARCH_DEPTH,
            phase_horizon: SEARCH_DEPTH,
        }
    }
}

impl Minimax {
    /// Searches `state` with the configured depth and the widest window.
    pub fn value(&self, state: &GameState) -> i8 {
        self.search(state, self.depth, ALPHA_INIT, BETA_INIT)
    }

    pub fn search(&self, state: &GameState, depth: u8, mut alpha: i8, mut beta: i8) -> i8 {
        if state.is_terminal() || depth == 0 {
            return evaluate(&state.board);
        }

        if state.phase == Phase::Placing && state.counts.all_placed() {
            let moving = GameState {
                phase: Phase::Moving,
                ..*state
            };
            return self.search(&moving, self.phase_horizon, ALPHA_INIT, BETA_INIT);
        }

        let actions = state.possible_actions();
        match state.mover {
            Side::Player => {
                let mut value = MAX_SENTINEL;
                for action in actions {
                    let child = state.apply_action(action);
                    value = value.max(self.search(&child, depth - 1, alpha, beta));
                    if value >= beta {
                        break;
                    }
                    alpha = alpha.max(value);
                }
                value
            }
            Side::Computer => {
                let mut value = MIN_SENTINEL;
                for action in actions {
                    let child = state.apply_action(action);
                    value = value.min(self.search(&child, depth - 1, alpha, beta));
                    if value <= alpha {
                        break;
                    }
                    beta = beta.min(value);
                }
                value
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use quickcheck::{quickcheck, TestResult};

    use super::*;
    use crate::arbitrary::ReachableBoard;

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    fn state(s: &str, mover: Side) -> GameState {
        let board = board(s);
        let counts = PieceCounts::of(&board);
        GameState {
            board,
            mover,
            phase: counts.phase(),
            counts,
        }
    }

    /// Plain minimax without pruning, following the same phase rules.
    fn brute_force(search: &Minimax, state: &GameState, depth: u8) -> i8 {
        if state.is_terminal() || depth == 0 {
            return evaluate(&state.board);
        }
        if state.phase == Phase::Placing && state.counts.all_placed() {
            let moving = GameState {
                phase: Phase::Moving,
                ..*state
            };
            return brute_force(search, &moving, search.phase_horizon);
        }
        let children = state
            .possible_actions()
            .into_iter()
            .map(|action| brute_force(search, &state.apply_action(action), depth - 1));
        match state.mover {
            Side::Player => children.fold(MAX_SENTINEL, i8::max),
            Side::Computer => children.fold(MIN_SENTINEL, i8::min),
        }
    }

    quickcheck! {
        fn pruning_does_not_change_value(input: ReachableBoard, player_moves: bool) -> TestResult {
            if input.board.outcome() != crate::GameOutcome::Ongoing {
                return TestResult::discard();
            }
            let mover = if player_moves { Side::Player } else { Side::Computer };
            let counts = PieceCounts::of(&input.board);
            let state = GameState { board: input.board, mover, phase: counts.phase(), counts };
            let search = Minimax { depth: 3, phase_horizon: 3 };
            TestResult::from_bool(search.value(&state) == brute_force(&search, &state, 3))
        }

        fn depth_zero_is_evaluation(input: ReachableBoard) -> bool {
            let counts = PieceCounts::of(&input.board);
            let state = GameState { board: input.board, mover: Side::Player, phase: counts.phase(), counts };
            let value = Minimax::default().search(&state, 0, ALPHA_INIT, BETA_INIT);
            value == evaluate(&input.board) && (-1..=1).contains(&value)
        }
    }

    #[test]
    fn evaluate_needs_three_pieces() {
        assert_eq!(evaluate(&board("ppp------")), PLAYER_WIN);
        assert_eq!(evaluate(&board("ccc-p-p--")), COMPUTER_WIN);
        assert_eq!(evaluate(&board("p-c-c-p-c")), 0);
        assert_eq!(evaluate(&board("---------")), 0);
    }

    #[test]
    fn won_board_returns_immediately() {
        let s = state("ccc-p-p--", Side::Player);
        assert!(s.is_terminal());
        assert_eq!(Minimax::default().value(&s), COMPUTER_WIN);
    }

    #[test]
    fn placements_count_for_the_mover() {
        let s = state("c--------", Side::Player);
        let child = s.apply_action(Action::Place { idx: 4 });
        assert_eq!(child.counts, PieceCounts { player: 1, computer: 1 });
        assert_eq!(child.mover, Side::Computer);
        assert_eq!(child.phase, Phase::Placing);
        assert_eq!(child.board, board("c---p----"));
        // The parent is untouched
        assert_eq!(s.board, board("c--------"));
    }

    #[test]
    fn player_completes_a_line() {
        // Placing on position 3 wins for the player
        let s = state("pp-cc----", Side::Player);
        assert_eq!(Minimax::default().search(&s, 1, ALPHA_INIT, BETA_INIT), PLAYER_WIN);
    }

    #[test]
    fn computer_completes_a_line() {
        // Moving from position 2 to the center completes the diagonal 1-5-9
        let s = state("ccpp-p--c", Side::Computer);
        assert_eq!(s.phase, Phase::Moving);
        let search = Minimax::default();
        assert_eq!(search.search(&s, 1, ALPHA_INIT, BETA_INIT), COMPUTER_WIN);
        assert_eq!(search.search(&s, 2, ALPHA_INIT, BETA_INIT), COMPUTER_WIN);
    }

    #[test]
    fn search_crosses_into_moving_phase() {
        // Both sides have placed everything, so the search must generate moves
        let s = GameState {
            phase: Phase::Placing,
            ..state("pcp-c-cp-", Side::Player)
        };
        let search = Minimax::default();
        let moving = GameState {
            phase: Phase::Moving,
            ..s
        };
        assert_eq!(search.search(&s, 1, ALPHA_INIT, BETA_INIT), search.value(&moving));
    }

    #[test]
    fn stuck_mover_keeps_sentinel() {
        // The player's only piece is surrounded
        let s = GameState {
            phase: Phase::Moving,
            ..state("pc-cc----", Side::Player)
        };
        assert!(s.possible_actions().is_empty());
        assert_eq!(Minimax::default().value(&s), MAX_SENTINEL);
    }
}
