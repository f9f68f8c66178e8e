use std::fmt;

use crate::election::VoteLedger;

/// The durable form of the election state.
///
/// It is written after every mutation, replacing the previous one. Optional
/// fields are omitted when absent:
///
/// ```text
/// {"started":true,"deadline":1700000600,"votes":{"alice@host":"Kitchen"},"generation":3}
/// {"started":false,"generation":3}
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[derive(serde::Deserialize, serde::Serialize)]
pub struct Snapshot {
    pub started: bool,

    /// Unix epoch seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub votes: Option<VoteLedger>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation: Option<u64>,
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Snapshot{{started:{}, deadline:{:?}, votes:{}, generation:{:?}}}",
            self.started,
            self.deadline,
            self.votes.as_ref().map(|v| v.len()).unwrap_or_default(),
            self.generation
        )
    }
}
