use anyerror::AnyError;

/// Error variants related to configuration.
#[derive(Debug, thiserror::Error)]
#[derive(PartialEq, Eq)]
pub enum ConfigError {
    #[error("ParseError: {source} while parsing ({args:?})")]
    ParseError { source: AnyError, args: Vec<String> },

    #[error("snapshot key must not be empty")]
    EmptySnapshotKey,

    #[error("default duration must be > 0")]
    ZeroDefaultDuration,

    #[error("default duration({default}) must be <= max duration({max})")]
    DurationRange { default: u64, max: u64 },
}
