use rota::IllegalAction;

#[derive(Debug)]
/// Error type for one request to the local game service.
pub enum IllegalRequest {
    NoSession,
    RoundOver,
    RoundInProgress,
    PositionOutOfRange {
        position: usize,
    },
    PlacedAfterThirdPiece,
    MovedBeforeThirdPiece,
    IllegalAction {
        err: IllegalAction,
    },
}

impl std::error::Error for IllegalRequest {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IllegalRequest::IllegalAction { err } => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for IllegalRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalRequest::NoSession => write!(f, "No session has been started"),
            IllegalRequest::RoundOver => {
                write!(f, "The round is over, the next one has to be requested first")
            }
            IllegalRequest::RoundInProgress => {
                write!(f, "Requested the next round while the current one is still going")
            }
            IllegalRequest::PositionOutOfRange { position } => {
                write!(f, "Position {} is not between 1 and 9", position)
            }
            IllegalRequest::PlacedAfterThirdPiece => {
                write!(f, "Tried to place a piece after all three were placed")
            }
            IllegalRequest::MovedBeforeThirdPiece => {
                write!(f, "Tried to move a piece before all three were placed")
            }
            IllegalRequest::IllegalAction { .. } => write!(f, "The action breaks the rules"),
        }
    }
}

impl From<IllegalAction> for IllegalRequest {
    fn from(err: IllegalAction) -> Self {
        IllegalRequest::IllegalAction { err }
    }
}
