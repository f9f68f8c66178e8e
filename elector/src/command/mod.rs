//! The chat-command surface of an elector.
//!
//! A host passes the text following its command word, e.g. for
//! `.teatime start 5` it passes `Some("start 5")`, and renders the returned
//! [`Outcome`].


use std::fmt;

use crate::election::Resolution;
use crate::election::Started;
use crate::election::VoteAccepted;
use crate::election::Withdrawn;
use crate::errors::ElectionError;
use crate::metrics::Status;

/// A request parsed from chat parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `start [<minutes>]`. An unparsable duration is `None`.
    Start { minutes: Option<i64> },

    /// `stop`
    Stop,

    /// `suggest <option>` or just `<option>`.
    Vote(String),

    /// `withdraw`
    Withdraw,

    /// `status`, or no parameters at all.
    Status,

    /// `help`
    Help,
}

impl Command {
    pub const USAGE: &'static str = "\
start [minutes] => start an election lasting [minutes], 10 by default; \
suggest <option> => vote for <option>; \
<option> => vote for <option>; \
withdraw => take back your vote; \
stop => end the election now; \
status => show the current leader";

    /// Parse the parameters of a chat command.
    ///
    /// Keywords are matched on the first word; anything that is not a
    /// keyword is a vote for the whole text.
    pub fn parse(params: Option<&str>) -> Self {
        let params = params.map(str::trim).unwrap_or_default();

        if params.is_empty() {
            return Command::Status;
        }

        let (word, rest) = match params.split_once(char::is_whitespace) {
            Some((w, r)) => (w, r.trim()),
            None => (params, ""),
        };

        match word {
            "start" => Command::Start {
                minutes: rest.parse().ok(),
            },
            "stop" => Command::Stop,
            "suggest" => Command::Vote(rest.to_string()),
            "withdraw" => Command::Withdraw,
            "status" => Command::Status,
            "help" => Command::Help,
            _ => Command::Vote(params.to_string()),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Start { minutes: Some(m) } => write!(f, "start {}", m),
            Command::Start { minutes: None } => write!(f, "start"),
            Command::Stop => write!(f, "stop"),
            Command::Vote(option) => write!(f, "suggest {}", option),
            Command::Withdraw => write!(f, "withdraw"),
            Command::Status => write!(f, "status"),
            Command::Help => write!(f, "help"),
        }
    }
}

/// The result of handling a [`Command`], for the host to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Started(Started),
    Voted(VoteAccepted),
    Withdrawn(Withdrawn),
    Stopped(Resolution),
    Status(Status),
    Help(&'static str),

    /// The request was refused or could not be persisted.
    Failed(ElectionError),
}
