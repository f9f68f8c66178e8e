use std::fmt;

/// A message coming from the internal components.
pub(crate) enum Notification {
    /// A resolver found the deadline of the election it was spawned for
    /// reached.
    ///
    /// The election may have been stopped or replaced in the meantime: the
    /// Core resolves only if `generation` is still the running one.
    DeadlineReached { generation: u64, deadline: u64 },
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DeadlineReached {
                generation,
                deadline,
            } => {
                write!(
                    f,
                    "DeadlineReached: generation: {}, deadline: {}",
                    generation, deadline
                )
            }
        }
    }
}
