//! Elector runtime configuration.

use std::time::Duration;

use anyerror::AnyError;
use clap::Parser;

use crate::config::errors::ConfigError;

/// The runtime configuration for an [`Elector`].
///
/// Durations are in seconds because deadlines are persisted as unix epoch
/// seconds; sub-second precision would not survive a restart anyway.
///
/// [`Elector`]: crate::Elector
#[derive(Clone, Debug, Parser)]
#[derive(serde::Deserialize, serde::Serialize)]
pub struct Config {
    /// Length of an election in seconds, used when `start` is given no
    /// duration or a non-positive one.
    #[clap(long, default_value = "600")]
    pub default_duration: u64,

    /// The longest election in seconds. Longer requests are clamped.
    #[clap(long, default_value = "86400")]
    pub max_duration: u64,

    /// The key under which the election snapshot is stored.
    #[clap(long, default_value = "tophat/teatime")]
    pub snapshot_key: String,

    /// Whether an explicit `stop` also passes the result to the announcer.
    ///
    /// By default a stopped election is only echoed back to the caller that
    /// stopped it. The value of this config is evaluated as follows:
    /// - being absent: false
    /// - `--announce-on-stop`: true
    /// - `--announce-on-stop=true`: true
    /// - `--announce-on-stop=false`: false
    // clap 4 requires `num_args = 0..=1`, or it complains about missing arg
    // error https://github.com/clap-rs/clap/discussions/4374
    #[clap(long,
           default_value_t = false,
           action = clap::ArgAction::Set,
           num_args = 0..=1,
           default_missing_value = "true"
    )]
    pub announce_on_stop: bool,
}

impl Default for Config {
    fn default() -> Self {
        <Self as Parser>::parse_from(Vec::<&'static str>::new())
    }
}

impl Config {
    /// Build a `Config` instance from a series of command line arguments.
    ///
    /// The first element in `args` must be the application name.
    pub fn build(args: &[&str]) -> Result<Config, ConfigError> {
        let config = <Self as Parser>::try_parse_from(args).map_err(|e| {
            ConfigError::ParseError {
                source: AnyError::from(&e),
                args: args.iter().map(|x| x.to_string()).collect(),
            }
        })?;
        config.validate()
    }

    /// Validate the state of this config.
    pub fn validate(self) -> Result<Config, ConfigError> {
        if self.snapshot_key.trim().is_empty() {
            return Err(ConfigError::EmptySnapshotKey);
        }

        if self.default_duration == 0 {
            return Err(ConfigError::ZeroDefaultDuration);
        }

        if self.default_duration > self.max_duration {
            return Err(ConfigError::DurationRange {
                default: self.default_duration,
                max: self.max_duration,
            });
        }

        Ok(self)
    }

    /// Resolve the requested election length in seconds.
    ///
    /// An absent or non-positive request falls back to `default_duration`;
    /// anything above `max_duration` is clamped to it.
    pub fn election_duration(&self, requested: Option<i64>) -> Duration {
        let secs = match requested {
            Some(s) if s > 0 => (s as u64).min(self.max_duration),
            _ => self.default_duration,
        };
        Duration::from_secs(secs)
    }
}
