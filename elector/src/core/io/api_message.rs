use std::fmt;

use tokio::sync::oneshot;

use crate::election::ParticipantId;
use crate::election::Resolution;
use crate::election::Started;
use crate::election::VoteAccepted;
use crate::election::Withdrawn;
use crate::errors::StartError;
use crate::errors::StopError;
use crate::errors::VoteError;
use crate::errors::WithdrawError;
use crate::metrics::Status;

/// A request sent by an [`Elector`](crate::Elector) handle to the Core.
pub(crate) enum APIMessage {
    Start {
        /// Requested length in seconds; the config decides what an absent
        /// or non-positive value means.
        duration: Option<i64>,
        tx: oneshot::Sender<Result<Started, StartError>>,
    },

    Vote {
        participant: ParticipantId,
        option: String,
        tx: oneshot::Sender<Result<VoteAccepted, VoteError>>,
    },

    Withdraw {
        participant: ParticipantId,
        tx: oneshot::Sender<Result<Withdrawn, WithdrawError>>,
    },

    Stop {
        tx: oneshot::Sender<Result<Resolution, StopError>>,
    },

    /// Read the status after every request queued before it.
    Status { tx: oneshot::Sender<Status> },
}

impl fmt::Display for APIMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            APIMessage::Start { duration, .. } => {
                write!(f, "Start: duration: {:?}", duration)
            }
            APIMessage::Vote {
                participant,
                option,
                ..
            } => {
                write!(f, "Vote: {} -> {:?}", participant, option)
            }
            APIMessage::Withdraw { participant, .. } => {
                write!(f, "Withdraw: {}", participant)
            }
            APIMessage::Stop { .. } => {
                write!(f, "Stop")
            }
            APIMessage::Status { .. } => {
                write!(f, "Status")
            }
        }
    }
}
