use crate::modules::kb_revisions::core::changelog::{ChangeAction, ChangeEntry, ChangedItem};
use crate::tests::fixtures::watermarks::at;

pub fn change_entry(revision: u64, seconds: i64) -> ChangeEntry {
    ChangeEntry {
        revision,
        date: at(seconds),
        author: "kb-dev".to_string(),
        comment: format!("revision {revision}"),
        items: vec![ChangedItem {
            action: ChangeAction::Update,
            name: "Invoice".to_string(),
            kind: "Transaction".to_string(),
        }],
    }
}
