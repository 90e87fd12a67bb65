// Changelog document handed to the changelog renderer.
//
// Format
// - {"entries": [ {revision, date, author, comment, items: [{action, name, kind}]} ]}
// - The empty changelog is {"entries": []}. A changelog is always a valid document.
// - Entries are ordered by revision so the same input always renders the same bytes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeAction {
    Insert,
    Update,
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangedItem {
    pub action: ChangeAction,
    pub name: String,
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEntry {
    pub revision: u64,
    pub date: DateTime<Utc>,
    pub author: String,
    pub comment: String,
    #[serde(default)]
    pub items: Vec<ChangedItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Changelog {
    entries: Vec<ChangeEntry>,
}

impl Changelog {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_entries(mut entries: Vec<ChangeEntry>) -> Self {
        entries.sort_by_key(|entry| entry.revision);
        Self { entries }
    }

    pub fn entries(&self) -> &[ChangeEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_document(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
