use std::fmt;

/// Votes received by one option.
#[derive(Debug, Clone, PartialEq, Eq)]
#[derive(serde::Deserialize, serde::Serialize)]
pub struct TallyEntry {
    pub option: String,
    pub votes: u64,
}

impl TallyEntry {
    pub fn new(option: impl ToString, votes: u64) -> Self {
        Self {
            option: option.to_string(),
            votes,
        }
    }
}

impl fmt::Display for TallyEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.option, self.votes)
    }
}

/// Options ranked by votes, descending.
///
/// Ties are broken by submission order: the option whose earliest standing
/// vote was submitted first ranks higher. A tally over no votes is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[derive(serde::Deserialize, serde::Serialize)]
pub struct Tally {
    entries: Vec<TallyEntry>,
}

impl Tally {
    /// Build a tally from options listed in submission order.
    pub(crate) fn from_submitted<'a>(
        options: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        // Options are appended on first sight, so the position is the
        // first-submission order.
        let mut entries: Vec<TallyEntry> = Vec::new();

        for option in options {
            match entries.iter_mut().find(|e| e.option == option) {
                Some(e) => e.votes += 1,
                None => entries.push(TallyEntry::new(option, 1)),
            }
        }

        // `sort_by` is stable.
        entries.sort_by(|a, b| b.votes.cmp(&a.votes));

        Self { entries }
    }

    /// The winning option, if any vote was cast.
    pub fn leader(&self) -> Option<&TallyEntry> {
        self.entries.first()
    }

    pub fn entries(&self) -> &[TallyEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_votes(&self) -> u64 {
        self.entries.iter().map(|e| e.votes).sum()
    }

    /// `(option, votes)` pairs in rank order.
    pub fn pairs(&self) -> Vec<(&str, u64)> {
        self.entries.iter().map(|e| (e.option.as_str(), e.votes)).collect()
    }
}

impl fmt::Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, e) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", e)?;
        }
        write!(f, "]")
    }
}
