//! The announcer interface: where resolved elections are broadcast.

use std::fmt;

/// The broadcast result of a resolved election.
#[derive(Debug, Clone, PartialEq, Eq)]
#[derive(serde::Deserialize, serde::Serialize)]
pub enum Announcement {
    /// `option` won with `votes` votes.
    Chosen {
        generation: u64,
        option: String,
        votes: u64,
    },

    /// The election ended without any vote.
    NoVotes { generation: u64 },
}

impl Announcement {
    pub fn generation(&self) -> u64 {
        match self {
            Announcement::Chosen { generation, .. } => *generation,
            Announcement::NoVotes { generation } => *generation,
        }
    }
}

impl fmt::Display for Announcement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Announcement::Chosen { option, votes, .. } => {
                write!(f, "{} was chosen with {} votes", option, votes)
            }
            Announcement::NoVotes { .. } => {
                write!(f, "nothing was chosen: no votes")
            }
        }
    }
}

/// Receives announcements of resolved elections.
///
/// Announcing is fire-and-forget: it is called by the core task and must not
/// block it. An implementation that has to do IO, e.g. send a chat message,
/// should hand the announcement off to another task.
pub trait Announcer: Send + Sync + 'static {
    fn announce(&self, announcement: &Announcement);
}

impl<T> Announcer for std::sync::Arc<T>
where T: Announcer
{
    fn announce(&self, announcement: &Announcement) {
        self.as_ref().announce(announcement)
    }
}
