use anyhow::Context;
use rand::Rng;
use rota::{visualize_board, ActionSelector, Board, BoardSnapshot, Side};
use tracing::{debug, info, warn};

use crate::GameService;

/// Rounds in a row that must end without a winner.
pub const TARGET_ROUNDS: u32 = 50;
/// Actions after which a round counts as survived.
pub const MOVES_PER_ROUND: u32 = 30;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    pub target_rounds: u32,
    pub moves_per_round: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            target_rounds: TARGET_ROUNDS,
            moves_per_round: MOVES_PER_ROUND,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundStatus {
    Ongoing,
    Survived,
    Lost { winner: Side },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Every round was survived. The service hands out a hash at that point.
    Completed { hash: Option<String> },
    /// A round ended with a winner.
    Lost {
        rounds_survived: u32,
        winner: Side,
        board: Board,
    },
}

/// Bookkeeping for one session against the game service.
///
/// The service only reports cumulative win counters, so a round is known to
/// be over when one of them goes up compared to the last value seen.
#[derive(Clone, Debug)]
pub struct Session {
    config: SessionConfig,
    rounds_survived: u32,
    player_wins_seen: u32,
    computer_wins_seen: u32,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            rounds_survived: 0,
            player_wins_seen: 0,
            computer_wins_seen: 0,
        }
    }

    pub fn rounds_survived(&self) -> u32 {
        self.rounds_survived
    }

    /// Checks whether the round shown in `snapshot` is over, and how.
    ///
    /// A win is only reported once: the saved counter catches up with the service.
    pub fn round_status(&mut self, snapshot: &BoardSnapshot) -> RoundStatus {
        if snapshot.moves_this_round >= self.config.moves_per_round {
            RoundStatus::Survived
        } else if snapshot.player_wins > self.player_wins_seen {
            self.player_wins_seen += 1;
            RoundStatus::Lost {
                winner: Side::Player,
            }
        } else if snapshot.computer_wins > self.computer_wins_seen {
            self.computer_wins_seen += 1;
            RoundStatus::Lost {
                winner: Side::Computer,
            }
        } else {
            RoundStatus::Ongoing
        }
    }

    /// Plays rounds as `side` until the target is reached or a round is lost.
    ///
    /// Returns an error only on communication failure or when no action
    /// could be chosen, not when a round is lost.
    pub fn play<S: GameService, R: Rng>(
        &mut self,
        service: &mut S,
        selector: &mut ActionSelector<R>,
        side: Side,
    ) -> anyhow::Result<SessionOutcome> {
        let mut snapshot = service.start_session()?;

        while self.rounds_survived < self.config.target_rounds {
            info!(round = self.rounds_survived + 1, "Playing round");
            loop {
                match self.round_status(&snapshot) {
                    RoundStatus::Ongoing => {}
                    RoundStatus::Survived => break,
                    RoundStatus::Lost { winner } => {
                        info!(%winner, rounds_survived = self.rounds_survived, "Round was won");
                        return Ok(SessionOutcome::Lost {
                            rounds_survived: self.rounds_survived,
                            winner,
                            board: snapshot.board,
                        });
                    }
                }
                debug!("\n{}", visualize_board(&snapshot.board));
                let action = selector.select(&snapshot.board, side).with_context(|| {
                    format!("Could not choose an action on board {}", String::from(snapshot.board))
                })?;
                debug!(%action, moves = snapshot.moves_this_round);
                snapshot = service.apply(action)?;
            }
            self.rounds_survived += 1;
            snapshot = service.next_round()?;
        }

        if snapshot.hash.is_none() {
            warn!("All rounds survived, but the service sent no hash");
        }
        Ok(SessionOutcome::Completed {
            hash: snapshot.hash,
        })
    }
}
