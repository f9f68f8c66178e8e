//! The election data model.
//!
//! Pure data and invariant-preserving mutators; no I/O and no clock. The
//! core task owns the single [`Election`] value and is the only writer.

#[allow(clippy::module_inception)]
mod election;
mod election_state;
mod replies;
mod snapshot_convert;
mod tally;
mod vote_ledger;


pub use election::Election;
pub use election_state::ActiveElection;
pub use election_state::ElectionState;
pub use replies::Resolution;
pub use replies::Started;
pub use replies::VoteAccepted;
pub use replies::Withdrawn;
pub use tally::Tally;
pub use tally::TallyEntry;
pub use vote_ledger::VoteLedger;

/// A stable, opaque identity of a voter, e.g. a chat network mask.
///
/// Display names are not identities: the same person may change nickname
/// during an election and must still hold only one vote.
pub type ParticipantId = String;
