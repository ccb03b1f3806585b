use std::{fs, io, path::Path};

////////////////////////////////////////////////////////////////////////////////

/// A recorded game, one JSON snapshot per line.
///
/// Blank lines are dropped before indexing, so a record's offset is its
/// position among the non-blank lines, not necessarily its in-game turn.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Transcript {
    records: Vec<String>,
}

impl Transcript {
    pub fn load(path: impl AsRef<Path>) -> io::Result<Transcript> {
        let content = fs::read_to_string(path)?;
        Ok(Self::parse(&content))
    }

    pub fn parse(content: &str) -> Transcript {
        let records = content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(str::to_string)
            .collect();
        Self { records }
    }

    /// Offsets outside the transcript yield `None`.
    pub fn get(&self, offset: i64) -> Option<&str> {
        let index = usize::try_from(offset).ok()?;
        self.records.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

////////////////////////////////////////////////////////////////////////////////
