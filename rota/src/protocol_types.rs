use serde::{Deserialize, Serialize};

use crate::{Action, Board, NUM_CELLS};

/// Converts a 0-based board index to the 1-based position used by the game service.
pub fn to_position(idx: usize) -> usize {
    idx + 1
}

/// Converts a 1-based position from the game service to a board index.
pub fn from_position(position: usize) -> Option<usize> {
    (1..=NUM_CELLS).contains(&position).then(|| position - 1)
}

/// A request to the game service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ServiceRequest {
    /// Start a new session. The first round starts right away.
    NewSession { email: String },
    /// Start the next round, after the current one ended.
    NextRound,
    /// Place a piece on a 1-based position.
    Place { position: usize },
    /// Move a piece between two 1-based positions.
    Move { from: usize, to: usize },
}

impl ServiceRequest {
    /// The request as query string parameters.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        match self {
            ServiceRequest::NewSession { email } => {
                vec![("request", String::from("new")), ("email", email.clone())]
            }
            ServiceRequest::NextRound => vec![("request", String::from("next"))],
            ServiceRequest::Place { position } => vec![
                ("request", String::from("place")),
                ("location", position.to_string()),
            ],
            ServiceRequest::Move { from, to } => vec![
                ("request", String::from("move")),
                ("from", from.to_string()),
                ("to", to.to_string()),
            ],
        }
    }
}

impl From<Action> for ServiceRequest {
    fn from(action: Action) -> Self {
        match action {
            Action::Place { idx } => ServiceRequest::Place {
                position: to_position(idx),
            },
            Action::Move { from, to } => ServiceRequest::Move {
                from: to_position(from),
                to: to_position(to),
            },
        }
    }
}

/// The state of a session, as reported by the game service after every request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub board: Board,
    /// Rounds won by the player since the session started.
    pub player_wins: u32,
    /// Rounds won by the computer since the session started.
    pub computer_wins: u32,
    /// Actions taken in the current round.
    #[serde(rename = "moves")]
    pub moves_this_round: u32,
    /// Only present once enough rounds in a row have been survived.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
}

/// The envelope around every response of the game service.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServiceResponse {
    pub status: String,
    #[serde(default)]
    pub data: Option<BoardSnapshot>,
    /// Explanation of a failed request.
    #[serde(default)]
    pub message: Option<String>,
}

impl ServiceResponse {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}
