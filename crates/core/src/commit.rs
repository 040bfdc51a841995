use std::fmt::{Display, Formatter};

use chrono::{DateTime, TimeZone};

/// A commit as reported by `git log`, identified by its full hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub source_branch: String,
    pub timestamp_millis: i64,
    pub short_hash: String,
    pub full_hash: String,
    pub author_name: String,
    pub subject: String,
}

impl Commit {
    /// The commit time expressed in the given time zone.
    ///
    /// Returns None if the timestamp is outside the range chrono can represent.
    pub fn time_in<Tz: TimeZone>(&self, tz: &Tz) -> Option<DateTime<Tz>> {
        tz.timestamp_millis_opt(self.timestamp_millis).single()
    }
}

impl Display for Commit {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            formatter,
            "{} {} ({})",
            self.short_hash, self.subject, self.author_name
        )
    }
}
