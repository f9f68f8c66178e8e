use std::collections::BTreeMap;
use std::fmt;

use serde::de::MapAccess;
use serde::de::Visitor;
use serde::ser::SerializeMap;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;

use crate::election::ParticipantId;
use crate::election::Tally;
use crate::errors::InvalidOption;

/// A vote cast by one participant.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Cast {
    option: String,

    /// Submission order; a re-vote gets a new one.
    seq: u64,
}

/// Maps each participant to the single option they currently vote for.
///
/// Options are case-sensitive and trimmed of surrounding whitespace. Every
/// cast gets a submission sequence number, which [`Tally`] uses to break
/// ties.
///
/// It serializes as a map `participant -> option` in submission order, and
/// deserializing restores that order from the document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoteLedger {
    votes: BTreeMap<ParticipantId, Cast>,
    next_seq: u64,
}

impl VoteLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `participant`'s vote for `option`, replacing any earlier vote.
    ///
    /// Returns the trimmed option that was stored and the option it replaced.
    pub fn cast(
        &mut self,
        participant: impl ToString,
        option: &str,
    ) -> Result<(String, Option<String>), InvalidOption> {
        let trimmed = option.trim();
        if trimmed.is_empty() {
            return Err(InvalidOption::new(option));
        }

        let cast = Cast {
            option: trimmed.to_string(),
            seq: self.next_seq,
        };
        self.next_seq += 1;

        let prev = self.votes.insert(participant.to_string(), cast);
        Ok((trimmed.to_string(), prev.map(|c| c.option)))
    }

    /// Remove `participant`'s vote, returning the option they voted for.
    pub fn withdraw(&mut self, participant: &str) -> Option<String> {
        self.votes.remove(participant).map(|c| c.option)
    }

    pub fn get(&self, participant: &str) -> Option<&str> {
        self.votes.get(participant).map(|c| c.option.as_str())
    }

    /// Number of participants holding a vote.
    pub fn len(&self) -> usize {
        self.votes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.votes.is_empty()
    }

    /// Iterate `(participant, option)` in submission order.
    pub fn iter_submitted(&self) -> impl Iterator<Item = (&str, &str)> {
        let mut casts = self.votes.iter().collect::<Vec<_>>();
        casts.sort_by_key(|(_, c)| c.seq);
        casts.into_iter().map(|(p, c)| (p.as_str(), c.option.as_str()))
    }

    /// Rank the options by votes, see [`Tally`].
    pub fn tally(&self) -> Tally {
        Tally::from_submitted(self.iter_submitted().map(|(_, o)| o))
    }
}

impl Serialize for VoteLedger {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where S: Serializer {
        let mut map = serializer.serialize_map(Some(self.votes.len()))?;
        for (participant, option) in self.iter_submitted() {
            map.serialize_entry(participant, option)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for VoteLedger {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where D: Deserializer<'de> {
        struct LedgerVisitor;

        impl<'de> Visitor<'de> for LedgerVisitor {
            type Value = VoteLedger;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "a map of participant to option")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where A: MapAccess<'de> {
                let mut ledger = VoteLedger::new();

                while let Some((participant, option)) =
                    access.next_entry::<String, String>()?
                {
                    ledger
                        .cast(participant, &option)
                        .map_err(serde::de::Error::custom)?;
                }

                Ok(ledger)
            }
        }

        deserializer.deserialize_map(LedgerVisitor)
    }
}
