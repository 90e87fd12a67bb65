use crate::modules::kb_revisions::core::watermark::RevisionWatermark;
use chrono::{DateTime, Duration, TimeZone, Utc};

pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
}

/// `seconds` after the fixture epoch.
pub fn at(seconds: i64) -> DateTime<Utc> {
    epoch() + Duration::seconds(seconds)
}

pub fn watermark(revision: u64, seconds: i64) -> RevisionWatermark {
    RevisionWatermark::new(revision, at(seconds))
}
