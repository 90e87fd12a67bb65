// A point in the remote knowledge base history.
//
// Purpose
// - Pair a revision number with the timestamp the remote server reports for it.
//
// Ordering
// - Only the revision number decides "newer than". The timestamp bounds remote queries and
//   changelog windows, nothing else.
//
// Boundaries
// - No input or output here. Persistence lives in revision_record and the watermark store port.

use chrono::{DateTime, Utc};
use std::fmt;

/// Immutable (revision, revision date) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RevisionWatermark {
    revision: u64,
    revision_date: DateTime<Utc>,
}

/// Stand-in used whenever no real watermark can be established.
/// Older than every watermark with a revision of 1 or more.
pub const MIN_WATERMARK: RevisionWatermark = RevisionWatermark {
    revision: 0,
    revision_date: DateTime::<Utc>::UNIX_EPOCH,
};

impl RevisionWatermark {
    pub fn new(revision: u64, revision_date: DateTime<Utc>) -> Self {
        Self {
            revision,
            revision_date,
        }
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn revision_date(&self) -> DateTime<Utc> {
        self.revision_date
    }

    pub fn is_newer_than(&self, other: &RevisionWatermark) -> bool {
        self.revision > other.revision
    }

    pub fn is_min(&self) -> bool {
        *self == MIN_WATERMARK
    }
}

impl Default for RevisionWatermark {
    fn default() -> Self {
        MIN_WATERMARK
    }
}

impl fmt::Display for RevisionWatermark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{} @ {}", self.revision, self.revision_date.to_rfc3339())
    }
}
