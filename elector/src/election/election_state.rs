use std::fmt;

use crate::election::VoteLedger;

/// The state of the single election of a process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ElectionState {
    /// No election is running.
    #[default]
    Idle,

    Active(ActiveElection),
}

/// A running election.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveElection {
    /// Identifies this election round. A resolver spawned for another
    /// generation must not resolve this one.
    pub generation: u64,

    /// Unix epoch seconds at which the election should be resolved.
    pub deadline: u64,

    pub votes: VoteLedger,
}

impl ElectionState {
    pub fn is_active(&self) -> bool {
        matches!(self, ElectionState::Active(_))
    }

    pub fn active(&self) -> Option<&ActiveElection> {
        match self {
            ElectionState::Idle => None,
            ElectionState::Active(a) => Some(a),
        }
    }

    pub fn active_mut(&mut self) -> Option<&mut ActiveElection> {
        match self {
            ElectionState::Idle => None,
            ElectionState::Active(a) => Some(a),
        }
    }
}

impl fmt::Display for ElectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElectionState::Idle => write!(f, "Idle"),
            ElectionState::Active(a) => write!(
                f,
                "Active(generation:{}, deadline:{}, votes:{})",
                a.generation,
                a.deadline,
                a.votes.len()
            ),
        }
    }
}
