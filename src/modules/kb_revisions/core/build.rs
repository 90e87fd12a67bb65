use std::fmt;
use std::path::{Path, PathBuf};

/// Identity of one build record: its number within the job and its own storage root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BuildRef {
    number: u64,
    root_dir: PathBuf,
}

impl BuildRef {
    pub fn new(number: u64, root_dir: impl Into<PathBuf>) -> Self {
        Self {
            number,
            root_dir: root_dir.into(),
        }
    }

    pub fn number(&self) -> u64 {
        self.number
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }
}

impl fmt::Display for BuildRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.number)
    }
}
