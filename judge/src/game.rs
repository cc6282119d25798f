use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rota::{
    from_position, moves, placements, Action, Board, BoardSnapshot, Cell, Side, PIECES_PER_SIDE,
};
use rota_bot_utils::{GameService, SessionConfig};
use tracing::{debug, trace};

use crate::error::IllegalRequest;
use crate::recording::Recorder;

/// An offline stand-in for the remote game service.
///
/// The client plays the player's pieces. The computer opens every round
/// with a random placement, and after each client action it completes a
/// line if it can, or otherwise picks a random legal action.
pub struct LocalService {
    rng: StdRng,
    config: SessionConfig,
    hash: String,
    recorder: Option<Recorder>,
    started: bool,
    board: Board,
    moves_this_round: u32,
    round_over: bool,
    player_wins: u32,
    computer_wins: u32,
    /// Rounds survived in a row.
    streak: u32,
}

impl LocalService {
    pub fn new(seed: u64, config: SessionConfig, recorder: Option<Recorder>) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            config,
            hash: format!("{:016x}{:08x}", seed, config.target_rounds),
            recorder,
            started: false,
            board: Board::empty(),
            moves_this_round: 0,
            round_over: false,
            player_wins: 0,
            computer_wins: 0,
            streak: 0,
        }
    }

    fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            board: self.board,
            player_wins: self.player_wins,
            computer_wins: self.computer_wins,
            moves_this_round: self.moves_this_round,
            hash: (self.streak >= self.config.target_rounds).then(|| self.hash.clone()),
        }
    }

    /// Returns the current snapshot, recording it along the way.
    fn respond(&mut self) -> anyhow::Result<BoardSnapshot> {
        let snapshot = self.snapshot();
        trace!(board = %String::from(snapshot.board), moves = snapshot.moves_this_round, "Responding");
        if let Some(recorder) = &mut self.recorder {
            recorder.store_snapshot(&snapshot);
            if self.round_over {
                let path = recorder.write_round_recording()?;
                debug!(path = %path.display(), "Recorded round");
            }
        }
        Ok(snapshot)
    }

    fn open_round(&mut self) -> anyhow::Result<()> {
        self.board = Board::empty();
        self.moves_this_round = 0;
        self.round_over = false;
        self.computer_turn()
    }

    fn end_round(&mut self, survived: bool) {
        self.round_over = true;
        if survived {
            self.streak += 1;
        } else {
            self.streak = 0;
        }
        debug!(survived, streak = self.streak, "Round ended");
    }

    fn computer_turn(&mut self) -> anyhow::Result<()> {
        let side = Side::Computer;
        let actions = if self.board.count(Cell::Computer) < usize::from(PIECES_PER_SIDE) {
            placements(&self.board)
        } else {
            moves(&self.board, side)
        };
        let winning = actions.iter().copied().find(|&action| {
            self.board
                .apply(side, action)
                .map_or(false, |next| next.wins(side))
        });
        let Some(action) = winning.or_else(|| actions.choose(&mut self.rng).copied()) else {
            debug!("Computer cannot move, skipping its turn");
            return Ok(());
        };
        self.board = self.board.apply(side, action)?;
        trace!(%action, "Computer acted");
        if self.board.wins(side) {
            self.computer_wins += 1;
            self.end_round(false);
        }
        Ok(())
    }

    fn check_can_act(&self) -> Result<(), IllegalRequest> {
        if !self.started {
            Err(IllegalRequest::NoSession)
        } else if self.round_over {
            Err(IllegalRequest::RoundOver)
        } else {
            Ok(())
        }
    }

    fn client_acted(&mut self, board: Board) -> anyhow::Result<BoardSnapshot> {
        self.board = board;
        self.moves_this_round += 1;
        if self.board.wins(Side::Player) {
            self.player_wins += 1;
            self.end_round(false);
        } else if self.moves_this_round >= self.config.moves_per_round {
            self.end_round(true);
        } else {
            self.computer_turn()?;
        }
        self.respond()
    }

    fn index(position: usize) -> Result<usize, IllegalRequest> {
        from_position(position).ok_or(IllegalRequest::PositionOutOfRange { position })
    }
}

impl GameService for LocalService {
    fn start_session(&mut self) -> anyhow::Result<BoardSnapshot> {
        self.started = true;
        self.player_wins = 0;
        self.computer_wins = 0;
        self.streak = 0;
        self.open_round()?;
        self.respond()
    }

    fn next_round(&mut self) -> anyhow::Result<BoardSnapshot> {
        if !self.started {
            return Err(IllegalRequest::NoSession.into());
        }
        if !self.round_over {
            return Err(IllegalRequest::RoundInProgress.into());
        }
        self.open_round()?;
        self.respond()
    }

    fn place(&mut self, position: usize) -> anyhow::Result<BoardSnapshot> {
        self.check_can_act()?;
        let idx = Self::index(position)?;
        if self.board.count(Cell::Player) >= usize::from(PIECES_PER_SIDE) {
            return Err(IllegalRequest::PlacedAfterThirdPiece.into());
        }
        let board = self
            .board
            .apply(Side::Player, Action::Place { idx })
            .map_err(IllegalRequest::from)?;
        self.client_acted(board)
    }

    fn move_piece(&mut self, from: usize, to: usize) -> anyhow::Result<BoardSnapshot> {
        self.check_can_act()?;
        let (from, to) = (Self::index(from)?, Self::index(to)?);
        if self.board.count(Cell::Player) < usize::from(PIECES_PER_SIDE) {
            return Err(IllegalRequest::MovedBeforeThirdPiece.into());
        }
        let board = self
            .board
            .apply(Side::Player, Action::Move { from, to })
            .map_err(IllegalRequest::from)?;
        self.client_acted(board)
    }
}

#[cfg(test)]
mod tests {
    use rota::{ActionSelector, GameOutcome, IllegalAction};
    use rota_bot_utils::{Session, SessionOutcome};

    use super::*;

    fn service(target_rounds: u32, moves_per_round: u32) -> LocalService {
        LocalService::new(
            3,
            SessionConfig {
                target_rounds,
                moves_per_round,
            },
            None,
        )
    }

    fn illegal_request(err: anyhow::Error) -> IllegalRequest {
        err.downcast::<IllegalRequest>().unwrap()
    }

    #[test]
    fn computer_opens_the_round() {
        let mut service = service(50, 30);
        let snapshot = service.start_session().unwrap();
        assert_eq!(snapshot.board.count(Cell::Computer), 1);
        assert_eq!(snapshot.board.count(Cell::Empty), 8);
        assert_eq!(snapshot.moves_this_round, 0);
        assert_eq!(snapshot.hash, None);
    }

    #[test]
    fn requests_need_a_session() {
        let mut service = service(50, 30);
        assert!(matches!(
            illegal_request(service.place(1).unwrap_err()),
            IllegalRequest::NoSession
        ));
        assert!(matches!(
            illegal_request(service.next_round().unwrap_err()),
            IllegalRequest::NoSession
        ));
    }

    #[test]
    fn illegal_actions_are_rejected() {
        let mut service = service(50, 30);
        let snapshot = service.start_session().unwrap();
        let occupied = snapshot.board.locations(Cell::Computer)[0];
        let err = illegal_request(service.place(occupied + 1).unwrap_err());
        assert!(matches!(
            err,
            IllegalRequest::IllegalAction {
                err: IllegalAction::TargetOccupied { .. }
            }
        ));
        assert!(matches!(
            illegal_request(service.place(10).unwrap_err()),
            IllegalRequest::PositionOutOfRange { position: 10 }
        ));
        assert!(matches!(
            illegal_request(service.move_piece(1, 2).unwrap_err()),
            IllegalRequest::MovedBeforeThirdPiece
        ));
        assert!(matches!(
            illegal_request(service.next_round().unwrap_err()),
            IllegalRequest::RoundInProgress
        ));
    }

    #[test]
    fn computer_replies_to_each_action() {
        let mut service = service(50, 30);
        let snapshot = service.start_session().unwrap();
        let free = snapshot.board.locations(Cell::Empty)[0];
        let snapshot = service.place(free + 1).unwrap();
        assert_eq!(snapshot.moves_this_round, 1);
        assert_eq!(snapshot.board.count(Cell::Player), 1);
        assert_eq!(snapshot.board.count(Cell::Computer), 2);
    }

    #[test]
    fn computer_takes_its_win() {
        let mut service = service(50, 30);
        service.start_session().unwrap();
        service.board = "cc--pp---".parse().unwrap();
        service.computer_turn().unwrap();
        assert_eq!(service.board, "ccc-pp---".parse().unwrap());
        assert_eq!(service.computer_wins, 1);
        assert!(service.round_over);
        let snapshot = service.next_round().unwrap();
        assert_eq!(snapshot.computer_wins, 1);
        assert_eq!(snapshot.moves_this_round, 0);
    }

    #[test]
    fn survived_rounds_earn_the_hash() {
        let mut service = service(2, 1);
        let snapshot = service.start_session().unwrap();
        let free = snapshot.board.locations(Cell::Empty)[0];
        let snapshot = service.place(free + 1).unwrap();
        assert_eq!(snapshot.hash, None);
        assert!(matches!(
            illegal_request(service.place(free + 2).unwrap_err()),
            IllegalRequest::RoundOver
        ));

        let snapshot = service.next_round().unwrap();
        let free = snapshot.board.locations(Cell::Empty)[0];
        let snapshot = service.place(free + 1).unwrap();
        assert!(snapshot.hash.is_some());
        assert!(service.next_round().unwrap().hash.is_some());
    }

    fn play_session(seed: u64, config: SessionConfig) -> (Session, SessionOutcome) {
        let mut service = LocalService::new(seed, config, None);
        let mut selector = ActionSelector::new(StdRng::seed_from_u64(seed));
        let mut session = Session::new(config);
        let outcome = session
            .play(&mut service, &mut selector, Side::Player)
            .unwrap();
        (session, outcome)
    }

    #[test]
    fn short_rounds_always_earn_the_hash() {
        // Two client actions leave the computer with two pieces, too few to win
        let config = SessionConfig {
            target_rounds: 3,
            moves_per_round: 2,
        };
        for seed in 0..6 {
            let (session, outcome) = play_session(seed, config);
            assert_eq!(
                outcome,
                SessionOutcome::Completed {
                    hash: Some(format!("{:016x}{:08x}", seed, 3)),
                }
            );
            assert_eq!(session.rounds_survived(), 3);
        }
    }

    #[test]
    fn only_the_computer_can_end_a_session() {
        let config = SessionConfig {
            target_rounds: 3,
            moves_per_round: 12,
        };
        for seed in 0..4 {
            match play_session(seed, config) {
                (session, SessionOutcome::Completed { hash }) => {
                    assert!(hash.is_some());
                    assert_eq!(session.rounds_survived(), 3);
                }
                (
                    session,
                    SessionOutcome::Lost {
                        rounds_survived,
                        winner,
                        board,
                    },
                ) => {
                    assert_eq!(winner, Side::Computer);
                    assert_eq!(board.outcome(), GameOutcome::ComputerWin);
                    assert!(rounds_survived < 3);
                    assert_eq!(session.rounds_survived(), rounds_survived);
                }
            }
        }
    }
}
