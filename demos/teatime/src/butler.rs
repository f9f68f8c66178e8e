//! Renders elector outcomes the way a butler would say them.

use elector::errors::ElectionError;
use elector::Announcement;
use elector::Announcer;
use elector::Outcome;

/// Announces resolved elections on stdout.
pub struct Butler;

impl Announcer for Butler {
    fn announce(&self, announcement: &Announcement) {
        tracing::info!("announce: {}", announcement);
        println!("{}", announce(announcement));
    }
}

pub fn announce(announcement: &Announcement) -> String {
    match announcement {
        Announcement::Chosen { option, votes, .. } => {
            format!("Sir, your guests have chosen {} with {} votes", option, votes)
        }
        Announcement::NoVotes { .. } => {
            "Looks like you're taking tea alone, sir.".to_string()
        }
    }
}

pub fn reply(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Started(_) => "The sir would like tea?".to_string(),
        Outcome::Voted(v) => {
            format!("Very good, sir, {} is an excellent choice.", v.option)
        }
        Outcome::Withdrawn(w) => match &w.previous {
            Some(prev) => format!("As you wish, sir, {} is forgotten.", prev),
            None => "You had not chosen anything, sir.".to_string(),
        },
        Outcome::Stopped(_) => {
            "My apologies, sir, perhaps it wasn't teatime after all.".to_string()
        }
        Outcome::Status(status) => match &status.election {
            None => "You haven't asked for tea, sir.".to_string(),
            Some(active) => match active.tally.leader() {
                Some(leader) => format!(
                    "Currently, your guests would like tea at {}.",
                    leader.option
                ),
                None => "Looks like you're taking tea alone, sir.".to_string(),
            },
        },
        Outcome::Help(usage) => usage.to_string(),
        Outcome::Failed(err) => match err {
            ElectionError::AlreadyActive(_) => "Sir, please be reasonable... \
                two teatimes in one day? Are you a hobbit?"
                .to_string(),
            ElectionError::NotActive(_) => {
                "You haven't asked for tea, sir.".to_string()
            }
            ElectionError::InvalidOption(_) => {
                "I beg your pardon, sir, where would you like tea?".to_string()
            }
            ElectionError::PersistenceUnavailable(_) => {
                "Forgive me, sir, I could not write that down.".to_string()
            }
        },
    }
}
