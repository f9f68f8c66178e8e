use std::fmt;

use crate::election::Tally;
use crate::errors::Fatal;

/// A running election as seen from outside.
#[derive(Clone, Debug, PartialEq, Eq)]
#[derive(serde::Deserialize, serde::Serialize)]
pub struct ActiveStatus {
    pub generation: u64,

    /// Unix epoch seconds.
    pub deadline: u64,

    /// Number of participants holding a vote.
    pub voters: usize,

    pub tally: Tally,
}

/// A set of metrics describing the current state of an elector.
#[derive(Clone, Debug, PartialEq, Eq)]
#[derive(serde::Deserialize, serde::Serialize)]
pub struct Status {
    pub running_state: Result<(), Fatal>,

    /// The generation of the running or most recent election.
    pub last_generation: u64,

    /// The running election, `None` when idle.
    pub election: Option<ActiveStatus>,

    /// Number of elections ended since the elector started, either at their
    /// deadline or by `stop`.
    pub resolved: u64,

    /// Number of resolver wake-ups ignored because the election they were
    /// spawned for had already ended.
    pub stale_wakeups: u64,
}

impl Status {
    pub fn new_initial() -> Self {
        Self {
            running_state: Ok(()),
            last_generation: 0,
            election: None,
            resolved: 0,
            stale_wakeups: 0,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.election.is_none()
    }

    /// The generation of the running election.
    pub fn active_generation(&self) -> Option<u64> {
        self.election.as_ref().map(|e| e.generation)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Status{{")?;

        match &self.running_state {
            Ok(()) => write!(f, "running")?,
            Err(e) => write!(f, "quit:{}", e)?,
        }

        write!(f, ", last_generation:{}", self.last_generation)?;

        match &self.election {
            None => write!(f, ", idle")?,
            Some(e) => write!(
                f,
                ", active(generation:{}, deadline:{}, voters:{}, tally:{})",
                e.generation, e.deadline, e.voters, e.tally
            )?,
        }

        write!(
            f,
            ", resolved:{}, stale_wakeups:{}}}",
            self.resolved, self.stale_wakeups
        )
    }
}
