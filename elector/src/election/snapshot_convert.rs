use crate::election::ActiveElection;
use crate::election::Election;
use crate::election::ElectionState;
use crate::errors::CorruptSnapshot;
use crate::storage::Snapshot;

impl Election {
    /// Build the durable form of this election.
    pub fn to_snapshot(&self) -> Snapshot {
        match &self.state {
            ElectionState::Idle => Snapshot {
                started: false,
                deadline: None,
                votes: None,
                generation: Some(self.last_generation),
            },
            ElectionState::Active(a) => Snapshot {
                started: true,
                deadline: Some(a.deadline),
                votes: Some(a.votes.clone()),
                generation: Some(a.generation),
            },
        }
    }

    /// Restore an election from a snapshot.
    ///
    /// A running election must have a deadline and a generation; an idle one
    /// must not carry votes.
    pub fn from_snapshot(snapshot: Snapshot) -> Result<Self, CorruptSnapshot> {
        let Snapshot {
            started,
            deadline,
            votes,
            generation,
        } = snapshot;

        if !started {
            if votes.as_ref().map(|v| !v.is_empty()).unwrap_or_default() {
                return Err(CorruptSnapshot::new(
                    "idle snapshot carries votes",
                ));
            }

            return Ok(Election {
                state: ElectionState::Idle,
                last_generation: generation.unwrap_or_default(),
            });
        }

        let Some(deadline) = deadline else {
            return Err(CorruptSnapshot::new("started without a deadline"));
        };

        let Some(generation) = generation else {
            return Err(CorruptSnapshot::new("started without a generation"));
        };

        Ok(Election {
            state: ElectionState::Active(ActiveElection {
                generation,
                deadline,
                votes: votes.unwrap_or_default(),
            }),
            last_generation: generation,
        })
    }
}
