//! Testing utilities for elector.

use std::fmt::Display;
use std::sync::Arc;
use std::sync::Mutex;

use crate::announcer::Announcement;
use crate::announcer::Announcer;
use crate::election::ParticipantId;

/// Builds a participant id, for testing purposes.
pub fn pid(x: impl Display) -> ParticipantId {
    format!("{}", x)
}

/// An [`Announcer`] that keeps every announcement it receives.
///
/// Clones share the same record.
#[derive(Debug, Clone, Default)]
pub struct RecordingAnnouncer {
    announced: Arc<Mutex<Vec<Announcement>>>,
}

impl RecordingAnnouncer {
    pub fn new() -> Self {
        Self::default()
    }

    /// All announcements so far, oldest first.
    pub fn announcements(&self) -> Vec<Announcement> {
        self.announced.lock().unwrap().clone()
    }

    /// Text form of all announcements so far.
    pub fn texts(&self) -> Vec<String> {
        self.announcements().iter().map(|a| a.to_string()).collect()
    }

    pub fn count(&self) -> usize {
        self.announced.lock().unwrap().len()
    }
}

impl Announcer for RecordingAnnouncer {
    fn announce(&self, announcement: &Announcement) {
        tracing::info!("RecordingAnnouncer: {}", announcement);
        self.announced.lock().unwrap().push(announcement.clone());
    }
}
