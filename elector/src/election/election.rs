use std::fmt;
use std::time::Duration;

use crate::election::ActiveElection;
use crate::election::ElectionState;
use crate::election::Resolution;
use crate::election::Started;
use crate::election::Tally;
use crate::election::TallyEntry;
use crate::election::VoteAccepted;
use crate::election::VoteLedger;
use crate::election::Withdrawn;
use crate::errors::AlreadyActive;
use crate::errors::NotActive;
use crate::errors::VoteError;

/// The election state together with the generation counter.
///
/// `last_generation` survives an election ending so that the next one gets a
/// strictly greater generation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Election {
    pub(crate) state: ElectionState,
    pub(crate) last_generation: u64,
}

impl fmt::Display for Election {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, last_generation:{}", self.state, self.last_generation)
    }
}

impl Election {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ElectionState {
        &self.state
    }

    pub fn active(&self) -> Option<&ActiveElection> {
        self.state.active()
    }

    /// The generation of the current or the most recent election, 0 if none
    /// has ever been started.
    pub fn last_generation(&self) -> u64 {
        self.last_generation
    }

    /// Whether the running election's deadline has been reached at `now`.
    pub fn is_due(&self, now: u64) -> bool {
        self.active().map(|a| a.deadline <= now).unwrap_or_default()
    }

    /// Transition Idle to Active with a fresh generation and
    /// `deadline = now + duration`.
    ///
    /// A running election is left untouched.
    pub fn start(
        &mut self,
        now: u64,
        duration: Duration,
    ) -> Result<Started, AlreadyActive> {
        if let Some(a) = self.active() {
            return Err(AlreadyActive {
                generation: a.generation,
                deadline: a.deadline,
            });
        }

        self.last_generation += 1;

        let started = Started {
            generation: self.last_generation,
            deadline: now.saturating_add(duration.as_secs()),
        };

        self.state = ElectionState::Active(ActiveElection {
            generation: started.generation,
            deadline: started.deadline,
            votes: VoteLedger::new(),
        });

        Ok(started)
    }

    /// Record or replace `participant`'s vote and return the current leader.
    pub fn cast_vote(
        &mut self,
        participant: &str,
        option: &str,
    ) -> Result<VoteAccepted, VoteError> {
        let active = self.state.active_mut().ok_or(NotActive {})?;

        let (option, replaced) = active.votes.cast(participant, option)?;

        let tally = active.votes.tally();
        let leader = tally
            .leader()
            .cloned()
            .unwrap_or_else(|| TallyEntry::new(&option, 1));

        Ok(VoteAccepted {
            option,
            replaced,
            leader,
        })
    }

    /// Remove `participant`'s vote. Succeeds even if there was none.
    pub fn withdraw(&mut self, participant: &str) -> Result<Withdrawn, NotActive> {
        let active = self.state.active_mut().ok_or(NotActive {})?;

        Ok(Withdrawn {
            previous: active.votes.withdraw(participant),
        })
    }

    /// Tally of the running election; empty if idle.
    pub fn tally(&self) -> Tally {
        self.active().map(|a| a.votes.tally()).unwrap_or_default()
    }

    /// End the running election: tally it and go back to Idle.
    ///
    /// Returns `None` if no election is running.
    pub fn finish(&mut self) -> Option<Resolution> {
        let state = std::mem::take(&mut self.state);

        match state {
            ElectionState::Idle => None,
            ElectionState::Active(a) => Some(Resolution {
                generation: a.generation,
                tally: a.votes.tally(),
            }),
        }
    }
}
