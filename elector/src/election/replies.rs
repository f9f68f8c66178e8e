//! Successful results of election requests.

use std::fmt;

use crate::announcer::Announcement;
use crate::election::Tally;
use crate::election::TallyEntry;

/// An election has been started.
#[derive(Debug, Clone, PartialEq, Eq)]
#[derive(serde::Deserialize, serde::Serialize)]
pub struct Started {
    pub generation: u64,

    /// Unix epoch seconds.
    pub deadline: u64,
}

/// A vote has been recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
#[derive(serde::Deserialize, serde::Serialize)]
pub struct VoteAccepted {
    /// The option as stored, i.e., trimmed.
    pub option: String,

    /// The option this participant voted for before, if any.
    pub replaced: Option<String>,

    /// The leading option after this vote.
    pub leader: TallyEntry,
}

/// A participant's vote has been removed, if there was one.
#[derive(Debug, Clone, PartialEq, Eq)]
#[derive(serde::Deserialize, serde::Serialize)]
pub struct Withdrawn {
    pub previous: Option<String>,
}

/// The final tally of an election that has ended.
#[derive(Debug, Clone, PartialEq, Eq)]
#[derive(serde::Deserialize, serde::Serialize)]
pub struct Resolution {
    pub generation: u64,
    pub tally: Tally,
}

impl Resolution {
    pub fn winner(&self) -> Option<&TallyEntry> {
        self.tally.leader()
    }

    /// Build the announcement of this resolution.
    pub fn announcement(&self) -> Announcement {
        match self.winner() {
            Some(w) => Announcement::Chosen {
                generation: self.generation,
                option: w.option.clone(),
                votes: w.votes,
            },
            None => Announcement::NoVotes {
                generation: self.generation,
            },
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Resolution(generation:{}, tally:{})", self.generation, self.tally)
    }
}
