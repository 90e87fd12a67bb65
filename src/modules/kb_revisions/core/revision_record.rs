// Persisted shape of a build's revision watermark.
//
// Schema
// - {"revision": <unsigned integer>, "revisionDate": "<RFC 3339 timestamp>"}
// - Unknown fields are ignored on read so newer writers stay readable.
// - A missing or malformed required field makes the whole record corrupt.

use crate::modules::kb_revisions::core::watermark::RevisionWatermark;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("corrupt revision record: {0}")]
pub struct RecordDecodeError(#[from] serde_json::Error);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevisionRecord {
    pub revision: u64,
    pub revision_date: DateTime<Utc>,
}

impl From<RevisionWatermark> for RevisionRecord {
    fn from(watermark: RevisionWatermark) -> Self {
        Self {
            revision: watermark.revision(),
            revision_date: watermark.revision_date(),
        }
    }
}

impl From<RevisionRecord> for RevisionWatermark {
    fn from(record: RevisionRecord) -> Self {
        RevisionWatermark::new(record.revision, record.revision_date)
    }
}

pub fn encode(watermark: RevisionWatermark) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&RevisionRecord::from(watermark))
}

pub fn decode(document: &str) -> Result<RevisionWatermark, RecordDecodeError> {
    let record: RevisionRecord = serde_json::from_str(document)?;
    Ok(record.into())
}
