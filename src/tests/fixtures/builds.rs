use crate::modules::kb_revisions::core::build::BuildRef;

pub fn build(number: u64) -> BuildRef {
    BuildRef::new(number, format!("/var/ci/jobs/kb/builds/{number}"))
}
